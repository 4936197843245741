// Character creation
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_GOLD: u32 = 100;

// Experience and progression constants
pub const XP_PER_LEVEL: u32 = 100; // xp to advance from level L is L * XP_PER_LEVEL
pub const LEVEL_UP_MAX_HEALTH: i32 = 10;
pub const LEVEL_UP_STRENGTH: i32 = 2;
pub const LEVEL_UP_MAGIC: i32 = 2;

// Inventory constants
pub const MAX_INVENTORY_SIZE: usize = 20;

// Combat constants
pub const ESCAPE_CHANCE: f64 = 0.5;
pub const CRITICAL_STRIKE_CHANCE: f64 = 0.5;
pub const POWER_STRIKE_MULTIPLIER: i32 = 2;
pub const CRITICAL_STRIKE_MULTIPLIER: i32 = 3;
pub const FIREBALL_MULTIPLIER: i32 = 2;
pub const CLERIC_HEAL_AMOUNT: u32 = 30;
pub const MIN_DAMAGE: i32 = 1;
pub const DEFENSE_DIVISOR: i32 = 4;

// Enemy tiers by character level
pub const GOBLIN_MAX_LEVEL: u32 = 2;
pub const ORC_MAX_LEVEL: u32 = 5;

// Death handling
pub const DEFAULT_REVIVE_COST: u32 = 25;

// Save system constants
pub const SAVE_FILE_SUFFIX: &str = "_save.txt";
pub const MAX_NAME_LENGTH: usize = 16;

// Catalog constants
pub const NO_PREREQUISITE: &str = "NONE";
pub const QUESTS_FILE: &str = "quests.txt";
pub const ITEMS_FILE: &str = "items.txt";
