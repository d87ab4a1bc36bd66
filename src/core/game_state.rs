use crate::character::attributes::Attributes;
use crate::character::derived_stats::DerivedStats;
use crate::character::progression;
use crate::core::constants::{MAX_LEVEL, PEACE_NECKLACE_ID};
use crate::items::catalog::Catalog;
use crate::items::equipment::{EquipTarget, Equipment};
use crate::items::inventory::{Inventory, LootBox};
use crate::items::types::ItemCategory;
use std::sync::Arc;

/// Everything the player owns and has earned in the current playthrough.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub attributes: Attributes,
    pub level: u32,
    pub experience: u32,
    pub current_hp: u32,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub loot_box: LootBox,
    stats: DerivedStats,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::empty()
    }
}

impl PlayerState {
    /// A blank player: level 1, no stats, nothing owned.
    pub fn empty() -> Self {
        let mut state = Self {
            attributes: Attributes::new(),
            level: 1,
            experience: 0,
            current_hp: 0,
            equipment: Equipment::new(),
            inventory: Inventory::new(),
            loot_box: LootBox::new(),
            stats: DerivedStats::calculate(&Attributes::new(), 1, &Equipment::new()),
        };
        state.recompute_derived_stats();
        state
    }

    /// A fresh character at `level` carrying the starter weapon, armor and boots.
    pub fn new_character(level: u32, catalog: &Catalog) -> Self {
        let mut state = Self::empty();
        state.level = level.clamp(1, MAX_LEVEL);
        state.attributes = Attributes::starting(state.level);
        state.experience = progression::starting_experience(state.level);
        for category in [ItemCategory::Weapon, ItemCategory::Armor, ItemCategory::Boots] {
            if let Some(item) = catalog.first(category) {
                state.inventory.insert(Arc::clone(&item));
                state.equipment.set(category, Some(item));
            }
        }
        state.recompute_derived_stats();
        state
    }

    pub fn stats(&self) -> &DerivedStats {
        &self.stats
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Recalculates derived stats and restores HP to the new maximum.
    pub fn recompute_derived_stats(&mut self) {
        self.stats = DerivedStats::calculate(&self.attributes, self.level, &self.equipment);
        self.current_hp = self.stats.max_hp;
    }

    pub fn heal_full(&mut self) {
        self.current_hp = self.stats.max_hp;
    }

    /// Heals up to max HP, returning the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.stats.max_hp);
        self.current_hp - before
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Sets or clears a slot and recomputes stats. Returns the new icon, if any.
    pub fn equip(&mut self, category: ItemCategory, target: EquipTarget) -> Option<String> {
        let icon = target.as_ref().map(|item| item.icon.clone());
        self.equipment.set(category, target);
        self.recompute_derived_stats();
        icon
    }

    /// Adds experience unless the area cap has been reached. Returns whether it counted.
    pub fn grant_experience(&mut self, amount: u32, exp_cap: u32) -> bool {
        if !progression::earns_experience(self.level, exp_cap) {
            return false;
        }
        self.experience = self.experience.saturating_add(amount);
        true
    }

    /// Applies any level-ups the current experience allows. Returns the levels reached.
    pub fn apply_level_ups(&mut self) -> Vec<u32> {
        let gained = progression::apply_level_ups(&mut self.level, self.experience, &mut self.attributes);
        if !gained.is_empty() {
            self.recompute_derived_stats();
        }
        gained
    }

    pub fn has_peace_necklace(&self) -> bool {
        self.equipment
            .is_equipped(ItemCategory::Accessory, PEACE_NECKLACE_ID)
    }

    /// Grants every catalog item in every category.
    pub fn unlock_all(&mut self, catalog: &Catalog) {
        for category in ItemCategory::all() {
            self.inventory.fill(category, catalog.list(category));
        }
    }
}
