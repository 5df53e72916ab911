//! Risk scoring for launch points.
//!
//! A candidate's risk is the damage a unit would be exposed to walking the
//! engine's path from that point: for each cell on the path, the number of
//! enemy structures able to hit it times the reference structure's damage.
//! The estimate is static: it ignores other units launched the same turn and
//! structures destroyed along the way. An unreachable candidate (empty path)
//! scores zero.

use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use itertools::*;
use log::*;

/// Simulation tick at which attackers are sampled.
const ATTACKER_TICK: u32 = 0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpawnScore {
    pub location: Location,
    pub risk: u64,
    pub path_len: usize,
}

/// Score every candidate, in input order.
pub fn score_candidates(
    engine: &dyn GameEngine,
    candidates: &[Location],
    reference: UnitKind,
) -> Vec<SpawnScore> {
    let damage = engine.damage(reference) as u64;

    candidates
        .iter()
        .map(|&location| {
            let path = engine.path_to_far_edge(location);
            let risk = path
                .iter()
                .map(|&cell| engine.attackers(cell, ATTACKER_TICK).len() as u64 * damage)
                .sum();

            SpawnScore {
                location,
                risk,
                path_len: path.len(),
            }
        })
        .collect()
}

/// The lowest-risk candidate. Ties go to the earliest candidate; `None` only
/// for an empty candidate list.
pub fn least_damage_spawn_location(
    engine: &dyn GameEngine,
    candidates: &[Location],
    reference: UnitKind,
) -> Option<Location> {
    let scores = score_candidates(engine, candidates, reference);
    let best = scores.iter().position_min_by_key(|s| s.risk)?;

    trace!(
        "Spawn risk: {}",
        scores
            .iter()
            .map(|s| format!("{}={}", s.location, s.risk))
            .join(", ")
    );

    Some(scores[best].location)
}
