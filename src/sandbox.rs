//! Offline engine for running the strategy without a match server.
//!
//! The arena is the standard 28x28 diamond split into two halves at row 14.
//! Own structures live on the bottom half, opponent structures on the top
//! half. Paths are shortest orthogonal walks (structures block) to the edge
//! opposite the launch quadrant; attackers are opponent turrets in range.
//! Combat itself is not simulated.

use crate::constants::*;
use crate::engine::*;
use crate::location::*;
use crate::plan::DeploymentRequest;
use crate::unit::*;
use fnv::{FnvHashMap, FnvHashSet};
use log::*;
use pathfinding::directed::astar::astar;
use serde::{Deserialize, Serialize};

/// Static stats for one unit kind.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub cost: u32,
    pub damage: u32,
    pub range: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitCatalog {
    stats: FnvHashMap<UnitKind, UnitStats>,
}

impl UnitCatalog {
    pub fn get(&self, kind: UnitKind) -> UnitStats {
        self.stats.get(&kind).copied().unwrap_or(UnitStats {
            cost: 1,
            damage: 0,
            range: 0.0,
        })
    }

    pub fn set(&mut self, kind: UnitKind, stats: UnitStats) {
        self.stats.insert(kind, stats);
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        let stats = |cost, damage, range| UnitStats {
            cost,
            damage,
            range,
        };

        UnitCatalog {
            stats: [
                (UnitKind::Wall, stats(1, 0, 0.0)),
                (UnitKind::Support, stats(4, 0, 3.0)),
                (UnitKind::Turret, stats(3, 4, 3.5)),
                (UnitKind::Scout, stats(1, 1, 3.5)),
                (UnitKind::Demolisher, stats(3, 3, 4.5)),
                (UnitKind::Interceptor, stats(1, 10, 3.5)),
            ]
            .into_iter()
            .collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    pub kind: UnitKind,
    pub owner: PlayerSide,
}

/// True when the cell lies inside the diamond.
pub fn in_arena(loc: Location) -> bool {
    let (x, y) = (loc.x(), loc.y());
    if !(0..ARENA_SIZE).contains(&y) {
        return false;
    }
    if y < HALF_ARENA {
        (HALF_ARENA - 1 - y..=HALF_ARENA + y).contains(&x)
    } else {
        (y - HALF_ARENA..=ARENA_SIZE + HALF_ARENA - 1 - y).contains(&x)
    }
}

pub fn edge_cells(edge: Edge) -> Vec<Location> {
    (0..HALF_ARENA)
        .map(|i| match edge {
            Edge::BottomLeft => Location::new(i, HALF_ARENA - 1 - i),
            Edge::BottomRight => Location::new(HALF_ARENA + i, i),
            Edge::TopLeft => Location::new(i, HALF_ARENA + i),
            Edge::TopRight => Location::new(HALF_ARENA + i, ARENA_SIZE - 1 - i),
        })
        .collect()
}

/// Each edge is a diagonal line `a*x + b*y == c`.
fn edge_line(edge: Edge) -> (i32, i32, i32) {
    match edge {
        Edge::BottomLeft => (1, 1, HALF_ARENA - 1),
        Edge::BottomRight => (1, -1, HALF_ARENA),
        Edge::TopLeft => (-1, 1, HALF_ARENA),
        Edge::TopRight => (1, 1, ARENA_SIZE + HALF_ARENA - 1),
    }
}

/// The edge bounding the quadrant `loc` stands in.
pub fn home_edge(loc: Location) -> Edge {
    let left = loc.x() < HALF_ARENA;
    let bottom = loc.y() < HALF_ARENA;
    match (left, bottom) {
        (true, true) => Edge::BottomLeft,
        (false, true) => Edge::BottomRight,
        (true, false) => Edge::TopLeft,
        (false, false) => Edge::TopRight,
    }
}

/// The edge a unit standing at `loc` heads for.
pub fn target_edge(loc: Location) -> Edge {
    home_edge(loc).opposite()
}

/// Offline implementation of [`GameEngine`].
pub struct SandboxEngine {
    turn: u32,
    pools: [ResourcePool; 2],
    catalog: UnitCatalog,
    structures: FnvHashMap<Location, Structure>,
    pending_removals: FnvHashSet<Location>,
    launched: Vec<DeploymentRequest>,
    submitted: Vec<Vec<DeploymentRequest>>,
}

impl Default for SandboxEngine {
    fn default() -> Self {
        Self::new(UnitCatalog::default())
    }
}

impl SandboxEngine {
    pub fn new(catalog: UnitCatalog) -> Self {
        SandboxEngine {
            turn: 0,
            pools: [ResourcePool::default(); 2],
            catalog,
            structures: FnvHashMap::default(),
            pending_removals: FnvHashSet::default(),
            launched: Vec::new(),
            submitted: Vec::new(),
        }
    }

    pub fn set_pool(&mut self, side: PlayerSide, pool: ResourcePool) {
        self.pools[side.index()] = pool;
    }

    pub fn pool(&self, side: PlayerSide) -> ResourcePool {
        self.pools[side.index()]
    }

    /// Place a structure directly, bypassing costs and half checks.
    pub fn place_structure(&mut self, owner: PlayerSide, kind: UnitKind, location: Location) {
        self.structures.insert(location, Structure { kind, owner });
    }

    pub fn structure_at(&self, location: Location) -> Option<Structure> {
        self.structures.get(&location).copied()
    }

    pub fn structures_of(&self, owner: PlayerSide, kind: UnitKind) -> Vec<Location> {
        let mut cells: Vec<Location> = self
            .structures
            .iter()
            .filter(|(_, s)| s.owner == owner && s.kind == kind)
            .map(|(loc, _)| *loc)
            .collect();
        cells.sort();
        cells
    }

    /// Units launched this turn, not yet submitted.
    pub fn launched(&self) -> &[DeploymentRequest] {
        &self.launched
    }

    /// Launches of every submitted turn, oldest first.
    pub fn submitted_turns(&self) -> &[Vec<DeploymentRequest>] {
        &self.submitted
    }

    /// Start the next turn, granting both players the given income.
    pub fn advance_turn(&mut self, income: ResourcePool) {
        self.turn += 1;
        for pool in &mut self.pools {
            pool.structure += income.structure;
            pool.mobile += income.mobile;
        }
    }

    fn is_own_half(loc: Location) -> bool {
        loc.y() < HALF_ARENA
    }

    fn is_friendly_edge(loc: Location) -> bool {
        Edge::friendly(PlayerSide::Own)
            .iter()
            .any(|&edge| edge_cells(edge).contains(&loc))
    }
}

impl GameEngine for SandboxEngine {
    fn turn_number(&self) -> u32 {
        self.turn
    }

    fn resource(&self, currency: Currency, side: PlayerSide) -> u32 {
        self.pools[side.index()].get(currency)
    }

    fn cost(&self, kind: UnitKind) -> u32 {
        self.catalog.get(kind).cost
    }

    fn damage(&self, kind: UnitKind) -> u32 {
        self.catalog.get(kind).damage
    }

    fn contains_structure(&self, location: Location) -> bool {
        self.structures.contains_key(&location)
    }

    fn path_to_far_edge(&self, start: Location) -> Vec<Location> {
        if !in_arena(start) || self.contains_structure(start) {
            return Vec::new();
        }

        let (a, b, c) = edge_line(target_edge(start));
        let to_edge = |loc: &Location| (c - (a * loc.x() + b * loc.y())).unsigned_abs();

        let result = astar(
            &start,
            |&loc| {
                loc.neighbours()
                    .into_iter()
                    .filter(|&n| in_arena(n) && !self.contains_structure(n))
                    .map(|n| (n, 1u32))
                    .collect::<Vec<_>>()
            },
            to_edge,
            |loc| to_edge(loc) == 0,
        );

        result.map(|(path, _)| path).unwrap_or_default()
    }

    fn attackers(&self, location: Location, _at_tick: u32) -> Vec<Location> {
        let range = self.catalog.get(UnitKind::Turret).range;

        let mut cells: Vec<Location> = self
            .structures
            .iter()
            .filter(|(_, s)| s.owner == PlayerSide::Opponent && s.kind == UnitKind::Turret)
            .filter(|(loc, _)| loc.distance_to(location) <= range)
            .map(|(loc, _)| *loc)
            .collect();
        cells.sort();
        cells
    }

    fn request_spawn(&mut self, kind: UnitKind, location: Location, count: u32) -> u32 {
        if !in_arena(location) || self.contains_structure(location) {
            return 0;
        }

        let cost = self.cost(kind).max(1);
        let pool = &mut self.pools[PlayerSide::Own.index()];
        let affordable = pool.get(kind.currency()) / cost;

        if kind.is_structure() {
            if !Self::is_own_half(location) || affordable == 0 || count == 0 {
                return 0;
            }
            *pool.get_mut(kind.currency()) -= cost;
            self.structures.insert(
                location,
                Structure {
                    kind,
                    owner: PlayerSide::Own,
                },
            );
            return 1;
        }

        if !Self::is_friendly_edge(location) {
            return 0;
        }

        let placed = count.min(affordable);
        if placed > 0 {
            *pool.get_mut(kind.currency()) -= placed * cost;
            self.launched
                .push(DeploymentRequest::new(kind, location, placed));
        }
        placed
    }

    fn request_remove(&mut self, location: Location) -> bool {
        match self.structures.get(&location) {
            Some(s) if s.owner == PlayerSide::Own => {
                self.pending_removals.insert(location);
                true
            }
            _ => false,
        }
    }

    fn submit_turn(&mut self) {
        for loc in self.pending_removals.drain() {
            self.structures.remove(&loc);
        }

        let launched = std::mem::take(&mut self.launched);
        debug!(
            "Sandbox turn {} submitted: {} launches, {} structures",
            self.turn,
            launched.len(),
            self.structures.len()
        );
        self.submitted.push(launched);
    }

    fn edge_locations(&self, edge: Edge) -> Vec<Location> {
        edge_cells(edge)
    }
}
