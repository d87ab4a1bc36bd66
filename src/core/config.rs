//! Tunable settings, loaded from a TOML file with defaults for every field.

use crate::core::constants::*;
use crate::core::error::GameError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub combat: CombatConfig,
    pub save: SaveConfig,
    pub debug: DebugConfig,
    /// Gameplay string table overriding the built-in English one.
    pub text_path: Option<PathBuf>,
}

impl GameConfig {
    /// Load config from `path`, or return defaults if missing or malformed.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| GameError::Serialization(e.to_string()))?;
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, content)?;
        info!("Saved config to {:?}", path);
        Ok(())
    }
}

/// Real-time pacing of the roam/combat loop, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub time_between_enemies: f64,
    pub time_recovery: f64,
    pub peace_necklace_recovery_factor: f64,
    pub time_before_combat: f64,
    pub time_between_turns: f64,
    pub time_player_attack_hit: f64,
    pub time_after_combat: f64,
    /// Hold the session after an area load until `confirm_area_loaded`.
    pub require_area_ready: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_between_enemies: TIME_BETWEEN_ENEMIES,
            time_recovery: TIME_RECOVERY,
            peace_necklace_recovery_factor: PEACE_NECKLACE_RECOVERY_FACTOR,
            time_before_combat: TIME_BEFORE_COMBAT_STARTS,
            time_between_turns: TIME_BETWEEN_TURNS,
            time_player_attack_hit: TIME_BASIC_ATTACK_HIT,
            time_after_combat: TIME_AFTER_COMBAT,
            require_area_ready: false,
        }
    }
}

impl SessionConfig {
    /// Faint duration, shortened while the Peace Necklace is worn.
    pub fn recovery_time(&self, peace_necklace: bool) -> f64 {
        if peace_necklace {
            self.time_recovery * self.peace_necklace_recovery_factor
        } else {
            self.time_recovery
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub damage_variance: f64,
    pub crit_multiplier: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            damage_variance: DAMAGE_VARIANCE,
            crit_multiplier: CRIT_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    pub auto_save: bool,
    pub slot: u32,
    /// Overrides the platform data directory.
    pub directory: Option<PathBuf>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            auto_save: true,
            slot: DEFAULT_SAVE_SLOT,
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub debug_mode: bool,
    pub starting_level: u32,
    pub starting_area: u32,
    pub unlock_all_gear: bool,
    pub skip_intro: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            starting_level: 1,
            starting_area: 1,
            unlock_all_gear: false,
            skip_intro: false,
        }
    }
}

impl DebugConfig {
    /// Options restored after the game is beaten.
    pub fn after_ending(&self) -> Self {
        Self {
            debug_mode: self.debug_mode,
            starting_level: 1,
            starting_area: 1,
            unlock_all_gear: false,
            skip_intro: true,
        }
    }
}
