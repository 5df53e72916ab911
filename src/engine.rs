use crate::location::*;
use crate::unit::*;
use serde::{Deserialize, Serialize};

/// The four launch edges of the arena. Own units launch from the bottom
/// edges, opponent units from the top edges.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Edge {
    /// The edge a unit launched from this edge walks towards.
    pub fn opposite(self) -> Edge {
        match self {
            Edge::TopRight => Edge::BottomLeft,
            Edge::TopLeft => Edge::BottomRight,
            Edge::BottomLeft => Edge::TopRight,
            Edge::BottomRight => Edge::TopLeft,
        }
    }

    /// Launch edges owned by a side.
    pub fn friendly(side: PlayerSide) -> [Edge; 2] {
        match side {
            PlayerSide::Own => [Edge::BottomLeft, Edge::BottomRight],
            PlayerSide::Opponent => [Edge::TopLeft, Edge::TopRight],
        }
    }
}

/// Trait for the game engine collaborator.
///
/// The engine owns the map, pathfinding, costs and the commit protocol. The
/// decision engine only reads from it and issues best-effort requests.
/// Implementations exist for the match server connection and for offline use
/// (see [`crate::sandbox::SandboxEngine`]).
pub trait GameEngine {
    fn turn_number(&self) -> u32;

    /// Current currency amount for a player, never negative.
    fn resource(&self, currency: Currency, side: PlayerSide) -> u32;

    /// Price of one unit of the given kind.
    fn cost(&self, kind: UnitKind) -> u32;

    /// Damage per hit of the given kind.
    fn damage(&self, kind: UnitKind) -> u32;

    fn contains_structure(&self, location: Location) -> bool;

    /// Path a mobile unit launched at `location` would take to the far edge.
    /// Empty when the location is unreachable or invalid.
    fn path_to_far_edge(&self, location: Location) -> Vec<Location>;

    /// Enemy structures able to hit `location` at the given simulation tick.
    fn attackers(&self, location: Location, at_tick: u32) -> Vec<Location>;

    /// Best-effort spawn of up to `count` units. Returns how many were
    /// actually placed.
    fn request_spawn(&mut self, kind: UnitKind, location: Location, count: u32) -> u32;

    /// Best-effort removal of an own structure.
    fn request_remove(&mut self, location: Location) -> bool;

    /// Commit all requests made this turn.
    fn submit_turn(&mut self);

    fn edge_locations(&self, edge: Edge) -> Vec<Location>;
}

/// Immutable per-turn view captured at the start of a turn callback.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub turn: u32,
    pub own: ResourcePool,
    pub opponent: ResourcePool,
}

impl TurnSnapshot {
    pub fn capture(engine: &dyn GameEngine) -> Self {
        let pool = |side| {
            ResourcePool::new(
                engine.resource(Currency::Structure, side),
                engine.resource(Currency::Mobile, side),
            )
        };

        TurnSnapshot {
            turn: engine.turn_number(),
            own: pool(PlayerSide::Own),
            opponent: pool(PlayerSide::Opponent),
        }
    }

    pub fn pool(&self, side: PlayerSide) -> &ResourcePool {
        match side {
            PlayerSide::Own => &self.own,
            PlayerSide::Opponent => &self.opponent,
        }
    }
}
