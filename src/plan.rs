use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use log::*;
use serde::{Deserialize, Serialize};

/// A single (kind, location, count) request handed to the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub kind: UnitKind,
    pub location: Location,
    pub count: u32,
}

impl DeploymentRequest {
    pub fn new(kind: UnitKind, location: Location, count: u32) -> Self {
        DeploymentRequest {
            kind,
            location,
            count,
        }
    }
}

/// What happened to a request. Requests never fail loudly; a skipped request
/// only means nothing was spent on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentOutcome {
    Committed,
    SkippedInsufficientResource,
    SkippedBlocked,
}

/// An operation issued during a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanOperation {
    Spawn(DeploymentRequest),
    Remove(Location),
}

/// Ledger entry for one operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub operation: PlanOperation,
    pub outcome: DeploymentOutcome,
    /// Units the engine reported as placed (0 for skips and removals).
    pub placed: u32,
}

impl DeploymentRecord {
    pub fn request(&self) -> Option<&DeploymentRequest> {
        match &self.operation {
            PlanOperation::Spawn(request) => Some(request),
            PlanOperation::Remove(_) => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        self.outcome == DeploymentOutcome::Committed
    }
}

/// Routes every request of a turn to the engine, pre-checking affordability
/// and occupancy, and keeps a ledger of the outcomes.
pub struct Deployer<'a> {
    engine: &'a mut dyn GameEngine,
    records: Vec<DeploymentRecord>,
}

impl<'a> Deployer<'a> {
    pub fn new(engine: &'a mut dyn GameEngine) -> Self {
        Deployer {
            engine,
            records: Vec::new(),
        }
    }

    pub fn engine(&self) -> &dyn GameEngine {
        &*self.engine
    }

    /// Current own amount of a currency, reflecting spends made this turn.
    pub fn available(&self, currency: Currency) -> u32 {
        self.engine.resource(currency, PlayerSide::Own)
    }

    pub fn records(&self) -> &[DeploymentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DeploymentRecord> {
        self.records
    }

    /// Place one structure per location, in order. Each location is
    /// independent; a skip never stops the remaining ones.
    pub fn place_structures(&mut self, kind: UnitKind, locations: &[Location]) -> usize {
        locations
            .iter()
            .filter(|&&loc| self.place_structure(kind, loc) == DeploymentOutcome::Committed)
            .count()
    }

    pub fn place_structure(&mut self, kind: UnitKind, location: Location) -> DeploymentOutcome {
        debug_assert!(kind.is_structure());

        let request = DeploymentRequest::new(kind, location, 1);

        if self.engine.contains_structure(location) {
            return self.skip(request, DeploymentOutcome::SkippedBlocked);
        }

        if self.available(kind.currency()) < self.engine.cost(kind) {
            return self.skip(request, DeploymentOutcome::SkippedInsufficientResource);
        }

        self.dispatch(request)
    }

    /// Launch up to `count` mobile units at a location. The engine caps the
    /// count by what is actually affordable; this only requires one unit to
    /// be affordable before asking.
    pub fn launch(&mut self, kind: UnitKind, location: Location, count: u32) -> DeploymentOutcome {
        debug_assert!(kind.is_mobile());

        let request = DeploymentRequest::new(kind, location, count);

        if count == 0 || self.available(kind.currency()) < self.engine.cost(kind) {
            return self.skip(request, DeploymentOutcome::SkippedInsufficientResource);
        }

        self.dispatch(request)
    }

    /// Ask the engine to remove an own structure.
    pub fn remove(&mut self, location: Location) -> DeploymentOutcome {
        let outcome = if self.engine.request_remove(location) {
            DeploymentOutcome::Committed
        } else {
            DeploymentOutcome::SkippedBlocked
        };

        self.records.push(DeploymentRecord {
            operation: PlanOperation::Remove(location),
            outcome,
            placed: 0,
        });

        outcome
    }

    pub(crate) fn submit(&mut self) {
        self.engine.submit_turn();
    }

    fn dispatch(&mut self, request: DeploymentRequest) -> DeploymentOutcome {
        let placed = self
            .engine
            .request_spawn(request.kind, request.location, request.count);

        let outcome = if placed > 0 {
            DeploymentOutcome::Committed
        } else {
            debug!(
                "Engine refused {:?} x{} at {}",
                request.kind, request.count, request.location
            );
            DeploymentOutcome::SkippedBlocked
        };

        self.records.push(DeploymentRecord {
            operation: PlanOperation::Spawn(request),
            outcome,
            placed,
        });

        outcome
    }

    fn skip(&mut self, request: DeploymentRequest, outcome: DeploymentOutcome) -> DeploymentOutcome {
        self.records.push(DeploymentRecord {
            operation: PlanOperation::Spawn(request),
            outcome,
            placed: 0,
        });

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedEngine;

    #[test]
    fn occupied_cell_is_skipped_without_spending() {
        let mut engine = ScriptedEngine::new(0).with_own_pool(10, 0);
        engine.occupy(Location::new(0, 13));

        let mut deployer = Deployer::new(&mut engine);
        let outcome = deployer.place_structure(UnitKind::Turret, Location::new(0, 13));

        assert_eq!(outcome, DeploymentOutcome::SkippedBlocked);
        assert_eq!(deployer.available(Currency::Structure), 10);
        assert_eq!(deployer.records()[0].placed, 0);
    }

    #[test]
    fn unaffordable_structure_is_skipped() {
        let mut engine = ScriptedEngine::new(0).with_own_pool(2, 0);
        let mut deployer = Deployer::new(&mut engine);

        let outcome = deployer.place_structure(UnitKind::Turret, Location::new(1, 12));
        assert_eq!(outcome, DeploymentOutcome::SkippedInsufficientResource);
        assert!(engine.spawned().is_empty());
    }

    #[test]
    fn launch_passes_the_requested_count_through() {
        let mut engine = ScriptedEngine::new(0).with_own_pool(0, 7);
        let mut deployer = Deployer::new(&mut engine);

        let outcome = deployer.launch(UnitKind::Scout, Location::new(13, 0), 1000);
        assert_eq!(outcome, DeploymentOutcome::Committed);

        let record = deployer.records()[0];
        assert_eq!(record.request().map(|r| r.count), Some(1000));
        assert_eq!(record.placed, 7);
        assert_eq!(deployer.available(Currency::Mobile), 0);
    }

    #[test]
    fn launch_with_nothing_affordable_is_skipped() {
        let mut engine = ScriptedEngine::new(0).with_own_pool(0, 2);
        let mut deployer = Deployer::new(&mut engine);

        let outcome = deployer.launch(UnitKind::Demolisher, Location::new(13, 0), 1);
        assert_eq!(outcome, DeploymentOutcome::SkippedInsufficientResource);
    }
}
