//! StaticDefensePhase: Turn-gated, resource-gated table of structure placements.
//!
//! Tiers, in order:
//!   - corner turrets, every turn
//!   - support row (or turrets when the row is incomplete early on), the wall
//!     row in front of it, a backup turret row, and reserve supports when
//!     structure currency is left over; from turn 1
//!   - forced turret upgrades over a fixed list while above the reserve; after
//!     the upgrade turn
//!   - a central support block whenever mobile currency reaches its threshold
//!
//! Every placement is independent; the engine decides what is legal.

use crate::location::*;
use crate::phase::*;
use crate::unit::*;
use log::*;

pub struct StaticDefensePhase;

impl TurnPhase for StaticDefensePhase {
    fn name(&self) -> &str {
        "static_defense"
    }

    fn run(&self, ctx: &mut TurnContext) {
        let corners = place_corner_turrets(ctx);

        if ctx.turn() > 0 {
            // Recomputed from scratch every turn.
            let fallback = support_row_incomplete(ctx);
            ctx.fallback_active = fallback;
            build_support_rows(ctx, fallback);
        }

        if ctx.turn() > ctx.config.upgrade_after_turn {
            upgrade_to_turrets(ctx);
        }

        if ctx.available(Currency::Mobile) >= ctx.config.support_block_mobile_threshold {
            let config = ctx.config;
            ctx.deployer
                .place_structures(UnitKind::Support, &config.layout.central_supports);
        }

        debug!(
            "Static defense: {} corner turrets, fallback={}, structure left={}",
            corners,
            ctx.fallback_active,
            ctx.available(Currency::Structure)
        );
    }
}

/// Tier A. Returns the number of turrets placed.
pub fn place_corner_turrets(ctx: &mut TurnContext) -> usize {
    let config = ctx.config;
    ctx.deployer
        .place_structures(UnitKind::Turret, &config.layout.corner_turrets)
}

/// True while inside the fallback window and some support-row cell is empty.
pub fn support_row_incomplete(ctx: &TurnContext) -> bool {
    ctx.turn() < ctx.config.fallback_check_turns
        && ctx
            .config
            .layout
            .support_row
            .iter()
            .any(|&loc| !ctx.engine().contains_structure(loc))
}

/// Tier B.
pub fn build_support_rows(ctx: &mut TurnContext, fallback: bool) {
    let config = ctx.config;
    let layout = &config.layout;

    let row_kind = if fallback {
        UnitKind::Turret
    } else {
        UnitKind::Support
    };

    ctx.deployer
        .place_structures(row_kind, &by_descending_row(&layout.support_row));
    ctx.deployer
        .place_structures(UnitKind::Wall, &by_descending_row(&layout.front_walls));
    ctx.deployer
        .place_structures(UnitKind::Turret, &by_descending_row(&layout.backup_turrets));

    if ctx.available(Currency::Structure) > config.structure_reserve {
        ctx.deployer
            .place_structures(UnitKind::Support, &layout.reserve_supports);
    }
}

/// Tier C. Walks the upgrade list by descending row, replacing whatever
/// stands on each cell with a turret, until the list runs out or structure
/// currency drops to the reserve. Returns the number of cells visited.
pub fn upgrade_to_turrets(ctx: &mut TurnContext) -> usize {
    let config = ctx.config;
    let targets = by_descending_row(&config.layout.turret_upgrades);

    let mut visited = 0;
    for &loc in &targets {
        if ctx.available(Currency::Structure) <= config.structure_reserve {
            break;
        }

        if ctx.engine().contains_structure(loc) {
            ctx.deployer.remove(loc);
        }
        ctx.deployer.place_structure(UnitKind::Turret, loc);
        visited += 1;
    }

    visited
}
