//! ThreatResponsePhase: Predicts a large incoming attack from the opponent's
//! mobile currency and releases stalling units to meet it.
//!
//! The governing bracket is chosen by turn number. In exclusive brackets only
//! the first matching rule fires; in the others every matching rule fires and
//! deploys independently, so two stalls may go out in the same turn. When no
//! rule fires a baseline stall is released anyway.

use crate::config::*;
use crate::phase::*;
use log::*;

pub struct ThreatResponsePhase;

impl TurnPhase for ThreatResponsePhase {
    fn name(&self) -> &str {
        "threat_response"
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        ctx.turn() >= ctx.config.early_game_turns
    }

    fn run(&self, ctx: &mut TurnContext) {
        let predicted = defend_large_attack(ctx);
        ctx.large_attack_predicted = Some(predicted);
    }
}

/// Stall counts the threat table calls for this turn, in firing order.
pub fn triggered_stalls(config: &StrategyConfig, turn: u32, opponent_mobile: u32) -> Vec<u32> {
    let Some(bracket) = bracket_for(&config.threat_brackets, turn) else {
        return Vec::new();
    };

    let matching = bracket
        .rules
        .iter()
        .filter(|rule| opponent_mobile >= rule.min_opponent_mobile)
        .map(|rule| rule.units);

    if bracket.exclusive {
        matching.take(1).collect()
    } else {
        matching.collect()
    }
}

/// Release the stalls for the current threat level. Returns true when a
/// large attack is predicted.
pub fn defend_large_attack(ctx: &mut TurnContext) -> bool {
    let opponent_mobile = ctx.snapshot.opponent.mobile;
    let stalls = triggered_stalls(ctx.config, ctx.turn(), opponent_mobile);

    for &units in &stalls {
        ctx.stall(units);
    }

    let large_attack = !stalls.is_empty();
    if large_attack {
        debug!(
            "Large attack predicted (opponent mobile {}): stalls {:?}",
            opponent_mobile, stalls
        );
    } else {
        ctx.stall(ctx.config.baseline_stall_units);
    }

    large_attack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::*;
    use crate::events::*;
    use crate::plan::*;
    use crate::location::*;
    use crate::testing::ScriptedEngine;
    use crate::unit::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn stall_requests(turn: u32, opponent_mobile: u32) -> (bool, Vec<u32>) {
        let mut engine = ScriptedEngine::new(turn)
            .with_own_pool(0, 50)
            .with_opponent_pool(0, opponent_mobile);
        let config = StrategyConfig::default();
        let history = BreachHistory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(turn as u64);
        let mut ctx = TurnContext::new(&mut engine, &config, &history, &mut rng);

        let predicted = defend_large_attack(&mut ctx);
        let counts = ctx
            .deployer
            .records()
            .iter()
            .filter_map(|r| r.request())
            .filter(|r| r.kind == UnitKind::Interceptor)
            .map(|r| r.count)
            .collect();

        (predicted, counts)
    }

    #[test]
    fn early_brackets_fire_only_the_first_match() {
        assert_eq!(stall_requests(7, 15), (true, vec![4]));
        assert_eq!(stall_requests(7, 8), (true, vec![2]));
        assert_eq!(stall_requests(12, 20), (true, vec![4]));
        assert_eq!(stall_requests(12, 10), (true, vec![3]));
    }

    #[test]
    fn late_brackets_fire_every_match() {
        assert_eq!(stall_requests(20, 17), (true, vec![5, 3]));
        assert_eq!(stall_requests(25, 12), (true, vec![3]));
        assert_eq!(stall_requests(30, 18), (true, vec![5, 4]));
        assert_eq!(stall_requests(45, 13), (true, vec![4]));
    }

    #[test]
    fn quiet_opponent_still_gets_the_baseline_stall() {
        assert_eq!(stall_requests(5, 7), (false, vec![2]));
        assert_eq!(stall_requests(15, 9), (false, vec![2]));
        assert_eq!(stall_requests(22, 9), (false, vec![2]));
        assert_eq!(stall_requests(31, 11), (false, vec![2]));
    }

    #[test]
    fn stall_that_cannot_be_afforded_is_still_requested() {
        let mut engine = ScriptedEngine::new(9).with_opponent_pool(0, 3);
        let config = StrategyConfig::default();
        let history = BreachHistory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ctx = TurnContext::new(&mut engine, &config, &history, &mut rng);

        assert!(!defend_large_attack(&mut ctx));
        let records = ctx.deployer.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].outcome,
            DeploymentOutcome::SkippedInsufficientResource
        );
        assert!(engine.spawned().is_empty());
    }

    #[test]
    fn stalls_launch_from_friendly_edges() {
        let mut engine = ScriptedEngine::new(9)
            .with_own_pool(0, 10)
            .with_opponent_pool(0, 16);
        let config = StrategyConfig::default();
        let history = BreachHistory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ctx = TurnContext::new(&mut engine, &config, &history, &mut rng);
        defend_large_attack(&mut ctx);

        let edges: Vec<_> = engine
            .edge_locations(Edge::BottomLeft)
            .into_iter()
            .chain(engine.edge_locations(Edge::BottomRight))
            .collect();
        let spawned = engine.spawned_kind(UnitKind::Interceptor);
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].count, 4);
        assert!(edges.contains(&spawned[0].location));
    }

    #[test]
    fn fully_walled_edges_issue_nothing() {
        let (left, right) = (Location::new(13, 0), Location::new(14, 0));
        let mut engine = ScriptedEngine::new(21)
            .with_own_pool(0, 20)
            .with_opponent_pool(0, 20)
            .with_edge(Edge::BottomLeft, vec![left])
            .with_edge(Edge::BottomRight, vec![right]);
        engine.occupy(left);
        engine.occupy(right);

        let config = StrategyConfig::default();
        let history = BreachHistory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ctx = TurnContext::new(&mut engine, &config, &history, &mut rng);

        assert!(defend_large_attack(&mut ctx));
        assert!(ctx.deployer.records().is_empty());
        assert!(engine.spawned().is_empty());
        assert_eq!(engine.path_queries(), 0);
    }

    #[test]
    fn refused_stall_cell_is_recorded_as_blocked() {
        let cell = Location::new(13, 0);
        let mut engine = ScriptedEngine::new(6)
            .with_own_pool(0, 20)
            .with_edge(Edge::BottomLeft, vec![cell])
            .with_edge(Edge::BottomRight, Vec::new());
        engine.refuse(cell);

        let config = StrategyConfig::default();
        let history = BreachHistory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ctx = TurnContext::new(&mut engine, &config, &history, &mut rng);

        assert!(!defend_large_attack(&mut ctx));
        let records = ctx.deployer.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, DeploymentOutcome::SkippedBlocked);
        assert_eq!(engine.own_pool().mobile, 20);
    }

    proptest! {
        #[test]
        fn never_zero_stall_requests_after_the_opening(turn in 5u32..80, opponent_mobile in 0u32..40) {
            let (predicted, counts) = stall_requests(turn, opponent_mobile);
            prop_assert!(!counts.is_empty());
            prop_assert!(counts.iter().all(|&c| c > 0));
            let triggered = triggered_stalls(&StrategyConfig::default(), turn, opponent_mobile);
            prop_assert_eq!(predicted, !triggered.is_empty());
        }
    }
}
