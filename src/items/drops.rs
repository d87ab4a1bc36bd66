use super::types::{Item, ItemCategory};
use crate::core::constants::LOOT_ROLL_MAX;
use crate::core::weighted::{first_reaching, roll_threshold, Threshold};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// One authored row of an enemy's loot table.
///
/// `drop_chance` is a cumulative threshold out of 1000, evaluated in table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTableElement {
    pub item: Arc<Item>,
    pub drop_chance: u32,
    pub rare: bool,
    /// Set once claimed from the loot box; only used to prune the box afterwards.
    #[serde(default)]
    pub opened: bool,
}

impl LootTableElement {
    pub fn new(item: Arc<Item>, drop_chance: u32, rare: bool) -> Self {
        Self {
            item,
            drop_chance,
            rare,
            opened: false,
        }
    }

    pub fn category(&self) -> ItemCategory {
        self.item.category
    }
}

impl Threshold for LootTableElement {
    fn threshold(&self) -> u32 {
        self.drop_chance
    }
}

/// Selects the drop for a given roll in `1..=1000`.
pub fn loot_for_roll(table: &[LootTableElement], roll: u32) -> Option<&LootTableElement> {
    first_reaching(table, roll)
}

/// Draws one loot outcome from the table, or nothing.
pub fn roll_loot(table: &[LootTableElement], rng: &mut impl Rng) -> Option<LootTableElement> {
    let (roll, entry) = roll_threshold(table, LOOT_ROLL_MAX, rng);
    debug!(roll, hit = entry.is_some(), "loot roll");
    entry.map(|entry| {
        let mut drop = entry.clone();
        drop.opened = false;
        drop
    })
}
