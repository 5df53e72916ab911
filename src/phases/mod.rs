pub mod attack_wave;
pub mod early_stall;
pub mod reactive_defense;
pub mod static_defense;
pub mod threat;

pub use attack_wave::AttackWavePhase;
pub use early_stall::EarlyStallPhase;
pub use reactive_defense::ReactiveDefensePhase;
pub use static_defense::StaticDefensePhase;
pub use threat::ThreatResponsePhase;

use crate::config::StrategyConfig;
use crate::phase::TurnPhase;

/// Build the default phase stack.
///
/// 1. StaticDefensePhase -- every turn
/// 2. ReactiveDefensePhase -- only when enabled in the config
/// 3. EarlyStallPhase -- opening turns only
/// 4. ThreatResponsePhase -- after the opening
/// 5. AttackWavePhase -- after the opening, always following the threat phase
pub fn default_phases(config: &StrategyConfig) -> Vec<Box<dyn TurnPhase>> {
    let mut phases: Vec<Box<dyn TurnPhase>> = vec![Box::new(StaticDefensePhase)];

    if config.reactive_defense {
        phases.push(Box::new(ReactiveDefensePhase));
    }

    phases.push(Box::new(EarlyStallPhase));
    phases.push(Box::new(ThreatResponsePhase));
    phases.push(Box::new(AttackWavePhase));

    phases
}
