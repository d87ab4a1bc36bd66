//! Keyed gameplay strings with `$placeholder` substitution.
//!
//! A table that fails to load degrades to empty: every lookup then yields
//! an empty string and the game keeps running without text.

use crate::core::error::GameError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{error, info};

const ENGLISH: &str = include_str!("../../assets/gameplay_en.toml");

#[derive(Debug, Clone, Default)]
pub struct TextTable {
    entries: HashMap<String, String>,
}

impl TextTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, GameError> {
        let entries: HashMap<String, String> =
            toml::from_str(content).map_err(|e| GameError::Serialization(e.to_string()))?;
        Ok(Self { entries })
    }

    /// The built-in English table.
    pub fn english() -> Self {
        Self::from_toml_str(ENGLISH).unwrap_or_else(|e| {
            error!("Built-in gameplay text failed to load: {}", e);
            Self::empty()
        })
    }

    /// Loads an override table, or the built-in one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::english();
        };
        let table = fs::read_to_string(path)
            .map_err(GameError::from)
            .and_then(|content| Self::from_toml_str(&content));
        match table {
            Ok(table) => {
                info!("Loaded {} gameplay strings from {:?}", table.len(), path);
                table
            }
            Err(e) => {
                error!("Failed to load gameplay text from {:?}: {}", path, e);
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw string for `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    /// Looks up `key` and replaces each `$name` with its value.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        substitute(self.get(key), args)
    }
}

/// Replaces `$name` placeholders in `template`. Longer names are replaced first.
pub fn substitute(template: &str, args: &[(&str, &str)]) -> String {
    let mut ordered: Vec<&(&str, &str)> = args.iter().collect();
    ordered.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));
    let mut out = template.to_string();
    for (name, value) in ordered {
        out = out.replace(&format!("${}", name), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_table_has_gameplay_keys() {
        let text = TextTable::english();
        for key in ["player_attack", "level_up", "loot_box_full", "exp_capped", "skill_heal"] {
            assert!(!text.get(key).is_empty(), "missing {}", key);
        }
    }

    #[test]
    fn test_format_substitutes_placeholders() {
        let text = TextTable::from_toml_str(r#"hit = "You deal $dmg damage at level $lvl.""#).unwrap();
        assert_eq!(
            text.format("hit", &[("dmg", "30"), ("lvl", "2")]),
            "You deal 30 damage at level 2."
        );
    }

    #[test]
    fn test_missing_key_is_blank() {
        let text = TextTable::english();
        assert_eq!(text.get("no_such_key"), "");
        assert_eq!(text.format("no_such_key", &[("dmg", "1")]), "");
    }

    #[test]
    fn test_unreadable_table_degrades_to_empty() {
        let path = std::env::temp_dir().join("vaporquest-missing-text.toml");
        let text = TextTable::load(Some(&path));
        assert!(text.is_empty());
        assert_eq!(text.get("player_attack"), "");
    }

    #[test]
    fn test_longer_placeholder_wins() {
        assert_eq!(substitute("$expgain / $exp", &[("exp", "5"), ("expgain", "9")]), "9 / 5");
    }
}
