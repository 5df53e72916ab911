//! Core types for the per-turn phase stack.
//!
//! `TurnContext` carries everything a phase may read or spend during one turn.
//! `TurnPhase` is the trait each planner in the stack implements.

use crate::config::*;
use crate::engine::*;
use crate::events::*;
use crate::location::*;
use crate::plan::*;
use crate::scoring::*;
use crate::unit::*;
use log::*;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// State shared by the phases of a single turn. Created by the orchestrator
/// at the start of a turn and consumed into a report once the turn has been
/// submitted.
pub struct TurnContext<'a> {
    pub snapshot: TurnSnapshot,
    pub config: &'a StrategyConfig,
    pub history: &'a BreachHistory,
    pub deployer: Deployer<'a>,
    rng: &'a mut ChaCha8Rng,
    /// Set by the threat phase.
    pub large_attack_predicted: Option<bool>,
    /// Set by the static defense phase when the support row was found
    /// incomplete this turn.
    pub fallback_active: bool,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        engine: &'a mut dyn GameEngine,
        config: &'a StrategyConfig,
        history: &'a BreachHistory,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        let snapshot = TurnSnapshot::capture(&*engine);

        TurnContext {
            snapshot,
            config,
            history,
            deployer: Deployer::new(engine),
            rng,
            large_attack_predicted: None,
            fallback_active: false,
        }
    }

    pub fn turn(&self) -> u32 {
        self.snapshot.turn
    }

    pub fn engine(&self) -> &dyn GameEngine {
        self.deployer.engine()
    }

    /// Own amount of a currency right now, after this turn's spends.
    pub fn available(&self, currency: Currency) -> u32 {
        self.deployer.available(currency)
    }

    /// Safest of the given launch points.
    pub fn least_damage_location(&self, candidates: &[Location]) -> Option<Location> {
        least_damage_spawn_location(
            self.engine(),
            candidates,
            self.config.roles.reference_structure,
        )
    }

    /// Release `count` stalling units from a free friendly edge cell. The
    /// request is recorded even when it cannot be afforded; `None` means no
    /// edge cell was free.
    pub fn stall(&mut self, count: u32) -> Option<DeploymentOutcome> {
        let kind = self.config.roles.stall;

        let free_edges: Vec<Location> = Edge::friendly(PlayerSide::Own)
            .iter()
            .flat_map(|&edge| self.engine().edge_locations(edge))
            .filter(|&loc| !self.engine().contains_structure(loc))
            .collect();

        let candidates: Vec<Location> = free_edges
            .choose_multiple(&mut *self.rng, self.config.stall_candidate_samples)
            .copied()
            .collect();

        let Some(location) = self.least_damage_location(&candidates) else {
            debug!("No free edge cell to stall from");
            return None;
        };

        let outcome = self.deployer.launch(kind, location, count);
        if outcome != DeploymentOutcome::Committed {
            debug!("Stall of {} {:?} at {} skipped: {:?}", count, kind, location, outcome);
        }

        Some(outcome)
    }
}

/// A turn phase runs a single planner against the turn context.
///
/// Phases are stateless -- everything mutable lives in `TurnContext`.
pub trait TurnPhase {
    /// Human-readable name for logging and reports.
    fn name(&self) -> &str;

    /// Quick check before running. Return false to skip this phase for the
    /// current turn.
    fn is_applicable(&self, _ctx: &TurnContext) -> bool {
        true
    }

    fn run(&self, ctx: &mut TurnContext);
}
