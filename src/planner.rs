//! Public API for the turn orchestrator.
//!
//! The `StrategyBuilder` provides a fluent, append-only API for configuring
//! the phase stack. It produces a `Strategy`, which the engine drives through
//! two callbacks: `on_turn` once per turn and `on_event_batch` for every
//! simulation step in between.

use crate::config::*;
use crate::engine::*;
use crate::error::*;
use crate::events::*;
use crate::phase::*;
use crate::phases::default_phases;
use crate::plan::*;
use crate::unit::*;
use log::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Everything that happened during one turn callback.
#[derive(Clone, Debug)]
pub struct TurnReport {
    pub snapshot: TurnSnapshot,
    /// Names of the phases that ran, in order.
    pub phases_run: Vec<String>,
    /// `None` when the threat phase did not run this turn.
    pub large_attack_predicted: Option<bool>,
    pub fallback_active: bool,
    pub records: Vec<DeploymentRecord>,
}

impl TurnReport {
    /// All spawn requests of a kind, committed or not.
    pub fn requests_of(&self, kind: UnitKind) -> Vec<DeploymentRequest> {
        self.records
            .iter()
            .filter_map(|r| r.request())
            .filter(|r| r.kind == kind)
            .copied()
            .collect()
    }

    pub fn committed(&self) -> impl Iterator<Item = &DeploymentRecord> {
        self.records.iter().filter(|r| r.is_committed())
    }

    pub fn ran(&self, phase: &str) -> bool {
        self.phases_run.iter().any(|p| p == phase)
    }
}

/// Append-only builder for the decision engine.
pub struct StrategyBuilder {
    phases: Vec<Box<dyn TurnPhase>>,
    config: StrategyConfig,
    history: BreachHistory,
}

impl StrategyBuilder {
    /// Start with an empty phase stack.
    pub fn new(config: StrategyConfig) -> Self {
        StrategyBuilder {
            phases: Vec::new(),
            config,
            history: BreachHistory::new(),
        }
    }

    /// Start with the default phase stack for the given config.
    pub fn with_default_phases(config: StrategyConfig) -> Self {
        let phases = default_phases(&config);
        StrategyBuilder {
            phases,
            config,
            history: BreachHistory::new(),
        }
    }

    /// Append a phase to the end of the stack.
    pub fn add_phase(mut self, phase: Box<dyn TurnPhase>) -> Self {
        self.phases.push(phase);
        self
    }

    /// Start from an existing breach history instead of an empty one.
    pub fn with_history(mut self, history: BreachHistory) -> Self {
        self.history = history;
        self
    }

    /// Fix the RNG seed used for stall placement.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate the config and build the strategy.
    pub fn build(self) -> StrategyResult<Strategy> {
        self.config.validate()?;

        let seed = match self.config.seed {
            Some(seed) => seed,
            None => rand::random(),
        };
        info!("Random seed: {}", seed);

        Ok(Strategy {
            phases: self.phases,
            config: self.config,
            history: self.history,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        })
    }
}

impl Default for StrategyBuilder {
    /// Returns a builder pre-loaded with the default config and phase stack.
    fn default() -> Self {
        StrategyBuilder::with_default_phases(StrategyConfig::default())
    }
}

/// The per-match decision engine.
pub struct Strategy {
    phases: Vec<Box<dyn TurnPhase>>,
    config: StrategyConfig,
    history: BreachHistory,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Strategy {
    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn history(&self) -> &BreachHistory {
        &self.history
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase_names(&self) -> Vec<&str> {
        self.phases.iter().map(|p| p.name()).collect()
    }

    /// Turn callback. Runs every applicable phase in order, then submits the
    /// turn exactly once. Individual request failures never stop later
    /// phases.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> TurnReport {
        let mut ctx = TurnContext::new(engine, &self.config, &self.history, &mut self.rng);

        info!(
            "Performing turn {} (own {:?}, opponent {:?})",
            ctx.snapshot.turn, ctx.snapshot.own, ctx.snapshot.opponent
        );

        let mut phases_run = Vec::new();
        for phase in &self.phases {
            if !phase.is_applicable(&ctx) {
                trace!("Phase '{}' not applicable", phase.name());
                continue;
            }

            let before = ctx.deployer.records().len();
            phase.run(&mut ctx);
            debug!(
                "Phase '{}' issued {} operations",
                phase.name(),
                ctx.deployer.records().len() - before
            );
            phases_run.push(phase.name().to_string());
        }

        ctx.deployer.submit();

        TurnReport {
            snapshot: ctx.snapshot,
            phases_run,
            large_attack_predicted: ctx.large_attack_predicted,
            fallback_active: ctx.fallback_active,
            records: ctx.deployer.into_records(),
        }
    }

    /// Event callback for one serialized action frame. Never fails: an
    /// unusable batch is logged and dropped.
    pub fn on_event_batch(&mut self, batch: &str) {
        if let Err(err) = ingest_event_batch(&mut self.history, batch) {
            warn!("Dropping event batch: {}", err);
        }
    }
}
