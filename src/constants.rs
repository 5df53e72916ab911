pub const ARENA_SIZE: i32 = 28;
pub const HALF_ARENA: i32 = ARENA_SIZE / 2;

/// Turns run before the threat and attack phases take over from the minimal
/// early stall.
pub const EARLY_GAME_TURNS: u32 = 5;

/// Structure currency kept in reserve by the optional build tiers.
pub const STRUCTURE_RESERVE: u32 = 10;

/// Support-row fallback is only checked while the turn is below this.
pub const FALLBACK_CHECK_TURNS: u32 = 3;

/// The turret upgrade pass starts after this turn.
pub const UPGRADE_AFTER_TURN: u32 = 5;

/// Mobile currency at which the central support block is built.
pub const SUPPORT_BLOCK_MOBILE_THRESHOLD: u32 = 12;

/// Light units requested per wave; the engine caps by affordability.
pub const LIGHT_WAVE_UNITS: u32 = 1000;

/// Corner and edge turrets placed every turn.
pub const CORNER_TURRETS: [(i32, i32); 5] = [(0, 13), (1, 12), (25, 12), (26, 12), (2, 11)];

/// Interior support row.
pub const SUPPORT_ROW: [(i32, i32); 16] = [
    (4, 12),
    (5, 12),
    (7, 12),
    (8, 12),
    (10, 12),
    (11, 12),
    (13, 12),
    (14, 12),
    (16, 12),
    (17, 12),
    (19, 12),
    (20, 12),
    (22, 12),
    (23, 12),
    (25, 12),
    (26, 12),
];

/// Walls in front of the support row.
pub const FRONT_WALLS: [(i32, i32); 13] = [
    (1, 13),
    (2, 13),
    (4, 13),
    (6, 13),
    (9, 13),
    (12, 13),
    (15, 13),
    (18, 13),
    (21, 13),
    (24, 13),
    (25, 13),
    (26, 13),
    (27, 13),
];

/// Extra supports built when structure currency is left over.
pub const RESERVE_SUPPORTS: [(i32, i32); 18] = [
    (3, 10),
    (4, 10),
    (5, 10),
    (6, 10),
    (10, 10),
    (11, 10),
    (16, 10),
    (17, 10),
    (18, 10),
    (7, 10),
    (8, 10),
    (9, 10),
    (12, 10),
    (13, 10),
    (14, 10),
    (15, 10),
    (19, 10),
    (20, 10),
];

/// Cells forcibly replaced by turrets in the mid game.
pub const TURRET_UPGRADES: [(i32, i32); 15] = [
    (4, 12),
    (5, 12),
    (22, 11),
    (23, 11),
    (24, 11),
    (25, 11),
    (7, 10),
    (8, 10),
    (9, 10),
    (12, 10),
    (13, 10),
    (14, 10),
    (15, 10),
    (19, 10),
    (20, 10),
];

/// 2x3 support block near the horizontal centre.
pub const CENTRAL_SUPPORTS: [(i32, i32); 6] = [(13, 7), (14, 7), (15, 7), (13, 6), (14, 6), (15, 6)];

/// Launch points considered for attack waves.
pub const WAVE_LAUNCH_POINTS: [(i32, i32); 4] = [(24, 10), (23, 9), (14, 0), (13, 0)];
