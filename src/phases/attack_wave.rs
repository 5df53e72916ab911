//! AttackWavePhase: Launches a turn-bracketed wave of a fixed number of heavy
//! units followed by as many light units as the engine can afford, from the
//! safest launch point.
//!
//! A bracket only launches once mobile currency covers its heavy units plus
//! its light reserve. Below that the wave is skipped for the turn; nothing is
//! carried over.

use crate::config::*;
use crate::engine::*;
use crate::location::*;
use crate::phase::*;
use crate::unit::*;
use log::*;

pub struct AttackWavePhase;

impl TurnPhase for AttackWavePhase {
    fn name(&self) -> &str {
        "attack_wave"
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        ctx.turn() >= ctx.config.early_game_turns
    }

    fn run(&self, ctx: &mut TurnContext) {
        long_march(ctx);
    }
}

/// Mobile currency a bracket needs before its wave launches.
pub fn wave_threshold(engine: &dyn GameEngine, roles: &UnitRoles, bracket: &WaveBracket) -> u32 {
    engine.cost(roles.heavy) * bracket.heavy_units + engine.cost(roles.light) * bracket.light_reserve
}

/// Launch this turn's wave if affordable. Returns the launch point used.
pub fn long_march(ctx: &mut TurnContext) -> Option<Location> {
    let config = ctx.config;
    let bracket = bracket_for(&config.wave_brackets, ctx.turn())?;

    let required = wave_threshold(ctx.engine(), &config.roles, bracket);
    let available = ctx.available(Currency::Mobile);
    if available < required {
        debug!(
            "Attack wave skipped: {} mobile available, {} required",
            available, required
        );
        return None;
    }

    let launch = ctx.least_damage_location(&config.wave_launch_points)?;

    // Heavy units first so they lead the shared path.
    ctx.deployer
        .launch(config.roles.heavy, launch, bracket.heavy_units);
    ctx.deployer
        .launch(config.roles.light, launch, config.light_wave_units);

    info!(
        "Attack wave from {}: {} {:?} + {:?}",
        launch, bracket.heavy_units, config.roles.heavy, config.roles.light
    );

    Some(launch)
}
