//! Unit kinds, currencies and per-player resource pools.

use serde::{Deserialize, Serialize};

/// The two currencies each side spends.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Spent on structural units.
    Structure,
    /// Spent on mobile units.
    Mobile,
}

/// Which side of the match a value belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSide {
    /// The side this engine decides for.
    Own,
    Opponent,
}

impl PlayerSide {
    pub fn index(self) -> usize {
        match self {
            PlayerSide::Own => 0,
            PlayerSide::Opponent => 1,
        }
    }
}

/// Closed set of unit kinds. Costs and damage are supplied by the engine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Wall,
    Support,
    Turret,
    Scout,
    Demolisher,
    Interceptor,
}

impl UnitKind {
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Wall,
        UnitKind::Support,
        UnitKind::Turret,
        UnitKind::Scout,
        UnitKind::Demolisher,
        UnitKind::Interceptor,
    ];

    /// Structural units are stationary and occupy a single cell.
    pub fn is_structure(self) -> bool {
        matches!(self, UnitKind::Wall | UnitKind::Support | UnitKind::Turret)
    }

    pub fn is_mobile(self) -> bool {
        !self.is_structure()
    }

    /// The currency this kind is paid for with.
    pub fn currency(self) -> Currency {
        if self.is_structure() {
            Currency::Structure
        } else {
            Currency::Mobile
        }
    }

    /// Two-letter shorthand used by the match server's unit table.
    pub fn shorthand(self) -> &'static str {
        match self {
            UnitKind::Wall => "FF",
            UnitKind::Support => "EF",
            UnitKind::Turret => "DF",
            UnitKind::Scout => "PI",
            UnitKind::Demolisher => "EI",
            UnitKind::Interceptor => "SI",
        }
    }

    pub fn from_shorthand(shorthand: &str) -> Option<UnitKind> {
        UnitKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.shorthand() == shorthand)
    }
}

/// Both currencies held by one player at a point in time.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ResourcePool {
    pub structure: u32,
    pub mobile: u32,
}

impl ResourcePool {
    pub fn new(structure: u32, mobile: u32) -> Self {
        ResourcePool { structure, mobile }
    }

    pub fn get(&self, currency: Currency) -> u32 {
        match currency {
            Currency::Structure => self.structure,
            Currency::Mobile => self.mobile,
        }
    }

    pub fn get_mut(&mut self, currency: Currency) -> &mut u32 {
        match currency {
            Currency::Structure => &mut self.structure,
            Currency::Mobile => &mut self.mobile,
        }
    }
}
