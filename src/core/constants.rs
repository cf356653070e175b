// Combat timing
pub const GLOBAL_COOLDOWN_SECONDS: f64 = 3.0;

// Success chance formula
pub const SUCCESS_CHANCE_CAP: f64 = 0.95;
pub const SUCCESS_CHANCE_PER_SKILL_LEVEL: f64 = 0.03;
pub const SUCCESS_STRESS_BASE_FACTOR: f64 = 0.9;
pub const SUCCESS_STRESS_SCALE: f64 = 0.2;

// Damage formula
pub const DAMAGE_PER_SKILL_LEVEL: f64 = 0.1;
pub const DAMAGE_STRESS_BASE_FACTOR: f64 = 0.8;
pub const DAMAGE_STRESS_SCALE: f64 = 0.4;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.9;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.1;

// Failed persuasion: the customer digs in and recovers resolve
pub const RESISTANCE_POWER_FACTOR: f64 = 0.3;
pub const RESISTANCE_RANDOM_MAX: f64 = 15.0;

// Stress cost of a turn, as a fraction of the skill's endurance cost.
// Failure is deliberately about twice as punishing as success.
pub const STRESS_FACTOR_ON_SUCCESS: f64 = 0.3;
pub const STRESS_FACTOR_ON_FAILURE: f64 = 0.6;

// Victory rewards
pub const REWARD_MONEY_VARIANCE_MIN: f64 = 0.7;
pub const REWARD_MONEY_VARIANCE_MAX: f64 = 1.3;
pub const REWARD_XP_RESOLVE_DIVISOR: i64 = 8;

// Character progression
pub const BASE_ENDURANCE: u32 = 100;
pub const BASE_STRESS_RESISTANCE: u32 = 100;
pub const STARTING_MONEY: u64 = 100;
pub const LEVEL_UP_STAT_GAIN: u32 = 5;
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

// Skill progression: XP to advance a skill from `level` to `level + 1`
// follows SKILL_XP_BASE * SKILL_XP_GROWTH^(level - 1).
pub const SKILL_XP_BASE: f64 = 100.0;
pub const SKILL_XP_GROWTH: f64 = 1.5;

// Customer selection weighting
pub const SPAWN_LEVEL_RANGE: u32 = 5;
pub const SPAWN_BASE_WEIGHT: f64 = 10.0;
pub const SPAWN_LEVEL_DIFF_PENALTY: f64 = 2.0;
pub const SPAWN_ENCOUNTER_DAMPING: f64 = 0.5;

// Inventory
pub const INVENTORY_MAX_SLOTS: usize = 20;
