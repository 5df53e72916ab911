//! Breach tracking from the engine's per-step action frames.
//!
//! The engine calls the event callback many times per turn, so ingestion only
//! deserializes the breach list and appends to the history.

use crate::error::*;
use crate::location::*;
use fnv::FnvHashMap;
use log::*;
use serde::de::IgnoredAny;
use serde::Deserialize;

/// Owner flag the engine uses for the own side in raw frames. Any other
/// flag counts as the opponent.
const OWN_PLAYER_FLAG: u8 = 1;

/// Every cell where the opponent scored on us, oldest first. Append-only and
/// never pruned for the lifetime of a match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreachHistory {
    locations: Vec<Location>,
}

impl BreachHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, location: Location) {
        self.locations.push(location);
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Location> + '_ {
        self.locations.iter().copied()
    }

    pub fn latest(&self) -> Option<Location> {
        self.locations.last().copied()
    }

    pub fn as_slice(&self) -> &[Location] {
        &self.locations
    }

    /// Number of breaches per cell.
    pub fn hotspots(&self) -> FnvHashMap<Location, usize> {
        let mut counts = FnvHashMap::default();
        for &loc in &self.locations {
            *counts.entry(loc).or_insert(0) += 1;
        }
        counts
    }
}

impl FromIterator<Location> for BreachHistory {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        BreachHistory {
            locations: iter.into_iter().collect(),
        }
    }
}

#[derive(Deserialize)]
struct ActionFrame {
    events: FrameEvents,
}

#[derive(Deserialize)]
struct FrameEvents {
    #[serde(default)]
    breach: Vec<BreachEvent>,
}

/// `[location, damage, unit type, unit id, owner]`
#[derive(Deserialize)]
struct BreachEvent(Location, IgnoredAny, IgnoredAny, IgnoredAny, u8);

/// A breach as read from a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Breach {
    pub location: Location,
    /// True when the breaching unit was ours (we scored).
    pub by_own_unit: bool,
}

/// Decode the breach list of one serialized action frame.
pub fn parse_breaches(batch: &str) -> StrategyResult<Vec<Breach>> {
    let frame: ActionFrame = serde_json::from_str(batch)?;

    Ok(frame
        .events
        .breach
        .into_iter()
        .map(|BreachEvent(location, _, _, _, owner)| Breach {
            location,
            by_own_unit: owner == OWN_PLAYER_FLAG,
        })
        .collect())
}

/// Append every opponent breach in the batch to the history. Returns the
/// number of locations recorded.
pub fn ingest_event_batch(history: &mut BreachHistory, batch: &str) -> StrategyResult<usize> {
    let breaches = parse_breaches(batch)?;

    let mut recorded = 0;
    for breach in breaches.iter().filter(|b| !b.by_own_unit) {
        info!("Got scored on at: {}", breach.location);
        history.record(breach.location);
        recorded += 1;
    }

    if recorded > 0 {
        debug!("Breach history now holds {} locations", history.len());
    }

    Ok(recorded)
}
