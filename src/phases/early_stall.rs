//! EarlyStallPhase: Minimal counter-deployment for the opening turns while the
//! opponent's base is still being scouted.

use crate::phase::*;

pub struct EarlyStallPhase;

impl TurnPhase for EarlyStallPhase {
    fn name(&self) -> &str {
        "early_stall"
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        ctx.turn() < ctx.config.early_game_turns
    }

    fn run(&self, ctx: &mut TurnContext) {
        ctx.stall(ctx.config.early_stall_units);
    }
}
