//! Strategy configuration.
//!
//! Every table the planners consult lives here as data. `Default` reproduces
//! the built-in strategy; a JSON document may override any subset of fields.

use crate::constants::*;
use crate::error::*;
use crate::location::*;
use crate::unit::*;
use serde::{Deserialize, Serialize};

fn cells(list: &[(i32, i32)]) -> Vec<Location> {
    list.iter().copied().map(Location::from).collect()
}

/// Which unit kind fills each role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRoles {
    /// Short-lived unit released to delay incoming attacks.
    pub stall: UnitKind,
    /// Fixed-count front of an attack wave.
    pub heavy: UnitKind,
    /// Bulk of an attack wave.
    pub light: UnitKind,
    /// Structure whose damage value prices each attacker along a path.
    pub reference_structure: UnitKind,
}

impl Default for UnitRoles {
    fn default() -> Self {
        UnitRoles {
            stall: UnitKind::Interceptor,
            heavy: UnitKind::Demolisher,
            light: UnitKind::Scout,
            reference_structure: UnitKind::Turret,
        }
    }
}

/// Hardcoded structure coordinates for each build tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseLayout {
    pub corner_turrets: Vec<Location>,
    pub support_row: Vec<Location>,
    pub front_walls: Vec<Location>,
    /// Turrets tried after the support row. Defaults to the support-row cells.
    pub backup_turrets: Vec<Location>,
    pub reserve_supports: Vec<Location>,
    pub turret_upgrades: Vec<Location>,
    pub central_supports: Vec<Location>,
}

impl Default for DefenseLayout {
    fn default() -> Self {
        DefenseLayout {
            corner_turrets: cells(&CORNER_TURRETS),
            support_row: cells(&SUPPORT_ROW),
            front_walls: cells(&FRONT_WALLS),
            backup_turrets: cells(&SUPPORT_ROW),
            reserve_supports: cells(&RESERVE_SUPPORTS),
            turret_upgrades: cells(&TURRET_UPGRADES),
            central_supports: cells(&CENTRAL_SUPPORTS),
        }
    }
}

/// One opponent-currency threshold and the stall it triggers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatRule {
    pub min_opponent_mobile: u32,
    pub units: u32,
}

/// Threat rules for a range of turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatBracket {
    /// Exclusive upper turn bound; `None` covers every later turn.
    pub until_turn: Option<u32>,
    /// When set only the first matching rule fires; otherwise every
    /// matching rule fires independently.
    pub exclusive: bool,
    pub rules: Vec<ThreatRule>,
}

/// Attack wave composition for a range of turns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveBracket {
    pub until_turn: Option<u32>,
    pub heavy_units: u32,
    /// Light units that must be affordable on top of the heavy ones before
    /// the wave launches.
    pub light_reserve: u32,
}

/// Anything with a turn range.
pub trait Bracketed {
    fn until_turn(&self) -> Option<u32>;
}

impl Bracketed for ThreatBracket {
    fn until_turn(&self) -> Option<u32> {
        self.until_turn
    }
}

impl Bracketed for WaveBracket {
    fn until_turn(&self) -> Option<u32> {
        self.until_turn
    }
}

/// The bracket governing `turn`: the first one whose bound lies above it.
pub fn bracket_for<B: Bracketed>(brackets: &[B], turn: u32) -> Option<&B> {
    brackets
        .iter()
        .find(|b| b.until_turn().map_or(true, |until| turn < until))
}

fn default_threat_brackets() -> Vec<ThreatBracket> {
    let rule = |min_opponent_mobile, units| ThreatRule {
        min_opponent_mobile,
        units,
    };

    vec![
        ThreatBracket {
            until_turn: Some(10),
            exclusive: true,
            rules: vec![rule(15, 4), rule(8, 2)],
        },
        ThreatBracket {
            until_turn: Some(20),
            exclusive: true,
            rules: vec![rule(15, 4), rule(10, 3)],
        },
        ThreatBracket {
            until_turn: Some(30),
            exclusive: false,
            rules: vec![rule(17, 5), rule(10, 3)],
        },
        ThreatBracket {
            until_turn: None,
            exclusive: false,
            rules: vec![rule(18, 5), rule(12, 4)],
        },
    ]
}

fn default_wave_brackets() -> Vec<WaveBracket> {
    let wave = |until_turn, heavy_units, light_reserve| WaveBracket {
        until_turn,
        heavy_units,
        light_reserve,
    };

    vec![
        wave(Some(10), 1, 5),
        wave(Some(20), 2, 8),
        wave(Some(30), 2, 9),
        wave(None, 3, 10),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Seed for stall placement sampling. Drawn from entropy when absent.
    pub seed: Option<u64>,
    pub early_game_turns: u32,
    pub early_stall_units: u32,
    /// Stall released by the threat phase when no threat rule fired.
    pub baseline_stall_units: u32,
    /// Free edge cells sampled as stall candidates.
    pub stall_candidate_samples: usize,
    pub structure_reserve: u32,
    pub fallback_check_turns: u32,
    pub upgrade_after_turn: u32,
    pub support_block_mobile_threshold: u32,
    /// Insert the breach-driven defense phase into the default stack.
    pub reactive_defense: bool,
    pub layout: DefenseLayout,
    pub threat_brackets: Vec<ThreatBracket>,
    pub wave_brackets: Vec<WaveBracket>,
    pub wave_launch_points: Vec<Location>,
    pub light_wave_units: u32,
    pub roles: UnitRoles,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            seed: None,
            early_game_turns: EARLY_GAME_TURNS,
            early_stall_units: 1,
            baseline_stall_units: 2,
            stall_candidate_samples: 4,
            structure_reserve: STRUCTURE_RESERVE,
            fallback_check_turns: FALLBACK_CHECK_TURNS,
            upgrade_after_turn: UPGRADE_AFTER_TURN,
            support_block_mobile_threshold: SUPPORT_BLOCK_MOBILE_THRESHOLD,
            reactive_defense: false,
            layout: DefenseLayout::default(),
            threat_brackets: default_threat_brackets(),
            wave_brackets: default_wave_brackets(),
            wave_launch_points: cells(&WAVE_LAUNCH_POINTS),
            light_wave_units: LIGHT_WAVE_UNITS,
            roles: UnitRoles::default(),
        }
    }
}

impl StrategyConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> StrategyResult<Self> {
        let config: StrategyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StrategyResult<()> {
        if self.wave_launch_points.is_empty() {
            return Err(StrategyError::Config(
                "wave_launch_points must not be empty".to_string(),
            ));
        }

        if self.stall_candidate_samples == 0 {
            return Err(StrategyError::Config(
                "stall_candidate_samples must be at least 1".to_string(),
            ));
        }

        check_brackets("threat_brackets", &self.threat_brackets)?;
        check_brackets("wave_brackets", &self.wave_brackets)?;

        let roles = &self.roles;
        for (name, kind) in [
            ("stall", roles.stall),
            ("heavy", roles.heavy),
            ("light", roles.light),
        ] {
            if !kind.is_mobile() {
                return Err(StrategyError::Config(format!(
                    "role '{}' must be a mobile unit, got {:?}",
                    name, kind
                )));
            }
        }
        if !roles.reference_structure.is_structure() {
            return Err(StrategyError::Config(format!(
                "reference_structure must be a structure, got {:?}",
                roles.reference_structure
            )));
        }

        Ok(())
    }
}

/// Brackets must be non-empty, strictly ordered, and end with an open bound.
fn check_brackets<B: Bracketed>(name: &str, brackets: &[B]) -> StrategyResult<()> {
    let Some(last) = brackets.last() else {
        return Err(StrategyError::Config(format!("{} must not be empty", name)));
    };

    if last.until_turn().is_some() {
        return Err(StrategyError::Config(format!(
            "last entry of {} must cover all remaining turns",
            name
        )));
    }

    let bounds: Vec<u32> = brackets.iter().filter_map(|b| b.until_turn()).collect();
    if bounds.len() != brackets.len() - 1 || bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(StrategyError::Config(format!(
            "{} must be strictly ordered by until_turn",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(StrategyConfig::default().validate().is_ok());
    }

    #[test]
    fn bracket_lookup_uses_exclusive_upper_bounds() {
        let brackets = default_wave_brackets();
        assert_eq!(bracket_for(&brackets, 9).map(|b| b.heavy_units), Some(1));
        assert_eq!(bracket_for(&brackets, 10).map(|b| b.light_reserve), Some(8));
        assert_eq!(bracket_for(&brackets, 29).map(|b| b.light_reserve), Some(9));
        assert_eq!(bracket_for(&brackets, 500).map(|b| b.heavy_units), Some(3));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            StrategyConfig::from_json(r#"{ "seed": 7, "reactive_defense": true }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert!(config.reactive_defense);
        assert_eq!(config.layout, DefenseLayout::default());
        assert_eq!(config.threat_brackets.len(), 4);
    }

    #[test]
    fn layout_cells_parse_as_pairs() {
        let config =
            StrategyConfig::from_json(r#"{ "layout": { "corner_turrets": [[3, 13]] } }"#).unwrap();
        assert_eq!(config.layout.corner_turrets, vec![Location::new(3, 13)]);
        assert_eq!(config.layout.support_row.len(), 16);
    }

    #[test]
    fn unordered_brackets_are_rejected() {
        let mut config = StrategyConfig::default();
        config.wave_brackets.swap(0, 1);
        assert!(matches!(config.validate(), Err(StrategyError::Config(_))));
    }

    #[test]
    fn structural_stall_role_is_rejected() {
        let json = r#"{ "roles": { "stall": "wall" } }"#;
        assert!(matches!(
            StrategyConfig::from_json(json),
            Err(StrategyError::Config(_))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            StrategyConfig::from_json("{ not json"),
            Err(StrategyError::Json(_))
        ));
    }
}
