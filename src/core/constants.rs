// Leveling
pub const MAX_LEVEL: u32 = 10;
// Cumulative experience needed to leave each level (index = level). Level 10 has no entry.
pub const EXP_TABLE: [u32; MAX_LEVEL as usize] = [0, 100, 250, 600, 1080, 1600, 2250, 3000, 4060, 5800];

// Per-level stat gains (index = new level - 1). The first entry is the level 1 base value.
pub const STRENGTH_GAINS: [u32; MAX_LEVEL as usize] = [12, 1, 1, 1, 1, 1, 1, 2, 1, 1];
pub const INTELLIGENCE_GAINS: [u32; MAX_LEVEL as usize] = [10, 1, 2, 1, 1, 1, 2, 1, 1, 1];
pub const AGILITY_GAINS: [u32; MAX_LEVEL as usize] = [10, 2, 1, 1, 1, 2, 1, 1, 1, 2];
pub const STAMINA_GAINS: [u32; MAX_LEVEL as usize] = [10, 2, 3, 2, 2, 3, 4, 2, 3, 3];

// Derived stat formulas
pub const BASE_PLAYER_HP: u32 = 100;
pub const HP_PER_LEVEL: u32 = 20;
pub const HP_PER_STAMINA: u32 = 10;
pub const ATTACK_PER_STRENGTH: f64 = 1.2;
pub const BASE_PLAYER_CRIT: u32 = 5;

// Combat
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const DAMAGE_VARIANCE: f64 = 0.2;
pub const DAMAGE_BASE_FACTOR: f64 = 8.0;
pub const LEVEL_DELTA_CAP: i32 = 5;
pub const LEVEL_DELTA_DEFENSE_STEP: f64 = 0.1;
pub const HEAL_MAGIC_FACTOR: f64 = 2.0;
pub const HIT_ROLL_MAX: u32 = 100;

// Session timing (seconds)
pub const TIME_BETWEEN_ENEMIES: f64 = 4.0;
pub const TIME_BETWEEN_TURNS: f64 = 2.1;
pub const TIME_RECOVERY: f64 = 60.0;
pub const PEACE_NECKLACE_RECOVERY_FACTOR: f64 = 0.5;
pub const TIME_BEFORE_COMBAT_STARTS: f64 = 1.2;
pub const TIME_BASIC_ATTACK_HIT: f64 = 0.25;
pub const TIME_AFTER_COMBAT: f64 = 1.0;

// Loot
pub const LOOT_ROLL_MAX: u32 = 1000;
pub const LOOT_BOX_CAPACITY: usize = 10;

// Encounters
pub const ENCOUNTER_ROLL_MAX: u32 = 100;
pub const DEFAULT_ENEMY_ID: u32 = 1;

// Catalog identities with gameplay hooks
pub const PEACE_NECKLACE_ID: u32 = 1;

// Save file format
pub const SAVE_VERSION_MAGIC: u64 = 0x5641_504F_5253_4156; // "VAPORSAV"
pub const DEFAULT_SAVE_SLOT: u32 = 1;
