//! Fully scripted engine used by unit tests: paths, attackers, occupancy and
//! pools are set directly instead of being derived from a map.

use crate::engine::*;
use crate::location::*;
use crate::plan::DeploymentRequest;
use crate::unit::*;
use fnv::{FnvHashMap, FnvHashSet};

pub struct ScriptedEngine {
    turn: u32,
    pools: [ResourcePool; 2],
    costs: FnvHashMap<UnitKind, u32>,
    damage: FnvHashMap<UnitKind, u32>,
    occupied: FnvHashSet<Location>,
    refused: FnvHashSet<Location>,
    paths: FnvHashMap<Location, Vec<Location>>,
    attackers: FnvHashMap<Location, usize>,
    edges: FnvHashMap<Edge, Vec<Location>>,
    spawned: Vec<DeploymentRequest>,
    removed: Vec<Location>,
    path_queries: std::cell::Cell<usize>,
    submissions: u32,
}

impl ScriptedEngine {
    pub fn new(turn: u32) -> Self {
        let costs = [
            (UnitKind::Wall, 1),
            (UnitKind::Support, 4),
            (UnitKind::Turret, 3),
            (UnitKind::Scout, 1),
            (UnitKind::Demolisher, 3),
            (UnitKind::Interceptor, 1),
        ];

        let mut edges = FnvHashMap::default();
        edges.insert(
            Edge::BottomLeft,
            (0..14).map(|x| Location::new(x, 13 - x)).collect(),
        );
        edges.insert(
            Edge::BottomRight,
            (0..14).map(|x| Location::new(14 + x, x)).collect(),
        );

        ScriptedEngine {
            turn,
            pools: [ResourcePool::default(); 2],
            costs: costs.iter().copied().collect(),
            damage: [(UnitKind::Turret, 5)].iter().copied().collect(),
            occupied: FnvHashSet::default(),
            refused: FnvHashSet::default(),
            paths: FnvHashMap::default(),
            attackers: FnvHashMap::default(),
            edges,
            spawned: Vec::new(),
            removed: Vec::new(),
            path_queries: std::cell::Cell::new(0),
            submissions: 0,
        }
    }

    pub fn with_own_pool(mut self, structure: u32, mobile: u32) -> Self {
        self.pools[PlayerSide::Own.index()] = ResourcePool::new(structure, mobile);
        self
    }

    pub fn with_opponent_pool(mut self, structure: u32, mobile: u32) -> Self {
        self.pools[PlayerSide::Opponent.index()] = ResourcePool::new(structure, mobile);
        self
    }

    pub fn with_damage(mut self, kind: UnitKind, damage: u32) -> Self {
        self.damage.insert(kind, damage);
        self
    }

    pub fn with_path(mut self, start: Location, path: Vec<Location>) -> Self {
        self.paths.insert(start, path);
        self
    }

    pub fn with_attackers(mut self, cell: Location, count: usize) -> Self {
        self.attackers.insert(cell, count);
        self
    }

    pub fn with_edge(mut self, edge: Edge, cells: Vec<Location>) -> Self {
        self.edges.insert(edge, cells);
        self
    }

    pub fn occupy(&mut self, location: Location) {
        self.occupied.insert(location);
    }

    /// The engine will refuse any spawn at this cell even though it looks free.
    pub fn refuse(&mut self, location: Location) {
        self.refused.insert(location);
    }

    pub fn spawned(&self) -> &[DeploymentRequest] {
        &self.spawned
    }

    pub fn spawned_kind(&self, kind: UnitKind) -> Vec<DeploymentRequest> {
        self.spawned.iter().filter(|r| r.kind == kind).copied().collect()
    }

    pub fn removed(&self) -> &[Location] {
        &self.removed
    }

    pub fn path_queries(&self) -> usize {
        self.path_queries.get()
    }

    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    pub fn own_pool(&self) -> ResourcePool {
        self.pools[PlayerSide::Own.index()]
    }
}

impl GameEngine for ScriptedEngine {
    fn turn_number(&self) -> u32 {
        self.turn
    }

    fn resource(&self, currency: Currency, side: PlayerSide) -> u32 {
        self.pools[side.index()].get(currency)
    }

    fn cost(&self, kind: UnitKind) -> u32 {
        self.costs.get(&kind).copied().unwrap_or(1)
    }

    fn damage(&self, kind: UnitKind) -> u32 {
        self.damage.get(&kind).copied().unwrap_or(0)
    }

    fn contains_structure(&self, location: Location) -> bool {
        self.occupied.contains(&location)
    }

    fn path_to_far_edge(&self, location: Location) -> Vec<Location> {
        self.path_queries.set(self.path_queries.get() + 1);
        self.paths.get(&location).cloned().unwrap_or_default()
    }

    fn attackers(&self, location: Location, _at_tick: u32) -> Vec<Location> {
        let count = self.attackers.get(&location).copied().unwrap_or(0);
        (0..count as i32).map(|i| Location::new(i, 27)).collect()
    }

    fn request_spawn(&mut self, kind: UnitKind, location: Location, count: u32) -> u32 {
        if self.refused.contains(&location) {
            return 0;
        }
        if kind.is_structure() && self.occupied.contains(&location) {
            return 0;
        }

        let cost = self.cost(kind).max(1);
        let pool = self.pools[PlayerSide::Own.index()].get_mut(kind.currency());
        let placed = if kind.is_structure() {
            count.min(1).min(*pool / cost)
        } else {
            count.min(*pool / cost)
        };

        if placed == 0 {
            return 0;
        }

        *pool -= placed * cost;
        if kind.is_structure() {
            self.occupied.insert(location);
        }
        self.spawned
            .push(DeploymentRequest::new(kind, location, placed));

        placed
    }

    fn request_remove(&mut self, location: Location) -> bool {
        if self.occupied.contains(&location) {
            self.removed.push(location);
            true
        } else {
            false
        }
    }

    fn submit_turn(&mut self) {
        self.submissions += 1;
    }

    fn edge_locations(&self, edge: Edge) -> Vec<Location> {
        self.edges.get(&edge).cloned().unwrap_or_default()
    }
}
