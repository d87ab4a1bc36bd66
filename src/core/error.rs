//! Error types for the simulation core.

use thiserror::Error;

/// Failures that stop an operation: I/O, corrupt saves, bad authored data.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    SaveVersion { expected: u64, found: u64 },

    #[error("Save checksum verification failed")]
    SaveChecksum,

    #[error("Save data is truncated")]
    SaveTruncated,

    #[error("No save file on slot {0}")]
    NoSave(u32),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Catalog validation failed: {0}")]
    Catalog(#[from] CatalogError),
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Serialization(err.to_string())
    }
}

/// Inconsistencies in the authored item, enemy and area tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{category} id {id} is reserved or duplicated")]
    BadItemId { category: &'static str, id: u32 },

    #[error("{category} '{name}' carries a stat its slot cannot use")]
    BadItemStat { category: &'static str, name: String },

    #[error("enemy {enemy_id} loot table references missing {category} {item_id}")]
    MissingLootItem {
        enemy_id: u32,
        category: &'static str,
        item_id: u32,
    },

    #[error("enemy {enemy_id} loot thresholds must ascend within 1..={max}")]
    BadLootThresholds { enemy_id: u32, max: u32 },

    #[error("duplicate enemy id {0}")]
    DuplicateEnemy(u32),

    #[error("area {area_id} references missing enemy {enemy_id}")]
    MissingEncounterEnemy { area_id: u32, enemy_id: u32 },

    #[error("area {0} encounter thresholds must ascend and end at 100")]
    BadEncounterThresholds(u32),

    #[error("area ids must run 1..=N, found {found} at position {position}")]
    BadAreaId { position: usize, found: u32 },

    #[error("no areas defined")]
    NoAreas,
}

/// A rejected area move. Shown to the player; never changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("There is no area before this one.")]
    NoPreviousArea,

    #[error("There is no area beyond this one.")]
    NoNextArea,

    #[error("You need to be level {required} to enter the next area.")]
    LevelTooLow { required: u32 },

    #[error("Finish the fight first.")]
    FinalBlowPending,

    #[error("Not currently in an area.")]
    NoActiveArea,
}
