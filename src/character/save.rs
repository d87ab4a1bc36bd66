use super::attributes::Attributes;
use crate::core::config::SaveConfig;
use crate::core::constants::{MAX_LEVEL, SAVE_VERSION_MAGIC};
use crate::core::error::GameError;
use crate::core::game_state::PlayerState;
use crate::items::equipment::Equipment;
use crate::items::inventory::{Inventory, LootBox};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const MAGIC_LEN: usize = 8;
const LENGTH_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;

/// The persisted part of a playthrough. Items are stored by full value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub level: u32,
    pub attributes: Attributes,
    pub experience: u32,
    pub current_area: Option<u32>,
    pub loot_box: LootBox,
    /// Unix timestamp (UTC) of the save.
    pub last_save_time: i64,
}

impl SavedGame {
    pub fn capture(player: &PlayerState, current_area: Option<u32>) -> Self {
        Self {
            equipment: player.equipment.clone(),
            inventory: player.inventory.clone(),
            level: player.level,
            attributes: player.attributes,
            experience: player.experience,
            current_area,
            loot_box: player.loot_box.clone(),
            last_save_time: chrono::Utc::now().timestamp(),
        }
    }

    /// Rebuilds the player; derived stats are recomputed and HP starts full.
    pub fn restore(&self) -> PlayerState {
        let mut player = PlayerState::empty();
        player.equipment = self.equipment.clone();
        player.inventory = self.inventory.clone();
        player.level = self.level.clamp(1, MAX_LEVEL);
        player.attributes = self.attributes;
        player.experience = self.experience;
        player.loot_box = self.loot_box.clone();
        player.recompute_derived_stats();
        player
    }
}

/// Encodes a snapshot as an opaque checksummed blob.
///
/// Layout:
/// - Version magic (8 bytes)
/// - Payload length (4 bytes)
/// - bincode payload
/// - SHA256 over everything before it (32 bytes)
pub fn save_snapshot(game: &SavedGame) -> Result<Vec<u8>, GameError> {
    let data = bincode::serialize(game)?;
    let data_len = data.len() as u32;

    let mut hasher = Sha256::new();
    hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
    hasher.update(data_len.to_le_bytes());
    hasher.update(&data);
    let checksum = hasher.finalize();

    let mut blob = Vec::with_capacity(MAGIC_LEN + LENGTH_LEN + data.len() + CHECKSUM_LEN);
    blob.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    blob.extend_from_slice(&data_len.to_le_bytes());
    blob.extend_from_slice(&data);
    blob.extend_from_slice(&checksum);
    Ok(blob)
}

/// Decodes a blob produced by [`save_snapshot`], verifying magic and checksum.
pub fn load_snapshot(blob: &[u8]) -> Result<SavedGame, GameError> {
    if blob.len() < MAGIC_LEN + LENGTH_LEN + CHECKSUM_LEN {
        return Err(GameError::SaveTruncated);
    }
    let (version_bytes, rest) = blob.split_at(MAGIC_LEN);
    let (length_bytes, rest) = rest.split_at(LENGTH_LEN);

    let mut magic = [0u8; MAGIC_LEN];
    magic.copy_from_slice(version_bytes);
    let version = u64::from_le_bytes(magic);
    if version != SAVE_VERSION_MAGIC {
        return Err(GameError::SaveVersion {
            expected: SAVE_VERSION_MAGIC,
            found: version,
        });
    }

    let mut length = [0u8; LENGTH_LEN];
    length.copy_from_slice(length_bytes);
    let data_len = u32::from_le_bytes(length) as usize;
    if rest.len() != data_len + CHECKSUM_LEN {
        return Err(GameError::SaveTruncated);
    }
    let (data, stored_checksum) = rest.split_at(data_len);

    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(data);
    if stored_checksum != hasher.finalize().as_slice() {
        return Err(GameError::SaveChecksum);
    }

    Ok(bincode::deserialize(data)?)
}

/// Reads and writes numbered save slots on disk.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Uses the configured directory, or the platform data directory.
    pub fn new(config: &SaveConfig) -> Result<Self, GameError> {
        let save_dir = match &config.directory {
            Some(dir) => dir.clone(),
            None => ProjectDirs::from("", "", "vaporquest")
                .ok_or(GameError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };
        Ok(Self::with_dir(save_dir))
    }

    pub fn with_dir(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn slot_path(&self, slot: u32) -> PathBuf {
        self.save_dir.join(format!("savefile{}.dat", slot))
    }

    pub fn save_exists(&self, slot: u32) -> bool {
        self.slot_path(slot).exists()
    }

    pub fn save(&self, slot: u32, game: &SavedGame) -> Result<PathBuf, GameError> {
        fs::create_dir_all(&self.save_dir)?;
        let path = self.slot_path(slot);
        let blob = save_snapshot(game)?;
        fs::write(&path, &blob)?;
        info!(slot, bytes = blob.len(), "game saved");
        Ok(path)
    }

    pub fn load(&self, slot: u32) -> Result<SavedGame, GameError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Err(GameError::NoSave(slot));
        }
        let blob = fs::read(&path)?;
        let game = load_snapshot(&blob)?;
        debug!(slot, level = game.level, "save loaded");
        Ok(game)
    }

    /// Human-readable dump of a slot.
    pub fn export_json(&self, slot: u32) -> Result<String, GameError> {
        let game = self.load(slot)?;
        Ok(serde_json::to_string_pretty(&game)?)
    }

    pub fn delete(&self, slot: u32) -> Result<(), GameError> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
