//! ReactiveDefensePhase: Replays every recorded breach as follow-up
//! placements, a turret one row behind the breach and a wall two rows behind.
//! Not part of the default stack unless enabled in the config.

use crate::phase::*;
use crate::unit::*;

pub struct ReactiveDefensePhase;

impl TurnPhase for ReactiveDefensePhase {
    fn name(&self) -> &str {
        "reactive_defense"
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        !ctx.history.is_empty()
    }

    fn run(&self, ctx: &mut TurnContext) {
        let history = ctx.history;

        // Unbounded replay: the whole history, not only the latest breach.
        for breach in history.iter() {
            ctx.deployer
                .place_structure(UnitKind::Turret, breach.offset(0, 1));
            ctx.deployer.place_structure(UnitKind::Wall, breach.offset(0, 2));
        }
    }
}
