use super::types::{GearStats, Item, ItemCategory, Skill};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What to put in a slot: an item, or `None` to empty it.
pub type EquipTarget = Option<Arc<Item>>;

/// The player's equipped slots, one per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    slots: [Option<Arc<Item>>; ItemCategory::COUNT],
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: ItemCategory) -> Option<&Arc<Item>> {
        self.slots[category.index()].as_ref()
    }

    pub fn set(&mut self, category: ItemCategory, item: EquipTarget) {
        self.slots[category.index()] = item;
    }

    /// Id of the equipped item, if any.
    pub fn equipped_id(&self, category: ItemCategory) -> Option<u32> {
        self.get(category).map(|item| item.id)
    }

    pub fn is_equipped(&self, category: ItemCategory, id: u32) -> bool {
        self.equipped_id(category) == Some(id)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// Sum of the gear bonuses across every equipped piece.
    pub fn total_bonuses(&self) -> GearStats {
        self.iter_equipped()
            .map(|item| item.stats())
            .fold(GearStats::default(), |acc, s| GearStats {
                attack: acc.attack + s.attack,
                defense: acc.defense + s.defense,
                evasion: acc.evasion + s.evasion,
                crit: acc.crit + s.crit,
            })
    }

    pub fn skill(&self) -> Option<(&Arc<Item>, &Skill)> {
        let item = self.get(ItemCategory::Skill)?;
        item.as_skill().map(|skill| (item, skill))
    }
}

/// Equip changes requested during an encounter, applied once it ends.
#[derive(Debug, Clone, Default)]
pub struct EquipQueue {
    slots: [Option<EquipTarget>; ItemCategory::COUNT],
}

impl EquipQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queued(&self, category: ItemCategory) -> Option<&EquipTarget> {
        self.slots[category.index()].as_ref()
    }

    /// Queues `target` for `category` with toggle semantics.
    ///
    /// Selecting the live-equipped item, or re-selecting what is already
    /// queued, clears the category instead. Returns whether the category is
    /// queued afterwards.
    pub fn toggle(&mut self, category: ItemCategory, target: EquipTarget, equipped: &Equipment) -> bool {
        let wanted = target.as_ref().map(|item| item.id);
        let already_queued = self.slots[category.index()]
            .as_ref()
            .map(|queued| queued.as_ref().map(|item| item.id) == wanted)
            .unwrap_or(false);

        if wanted == equipped.equipped_id(category) || already_queued {
            self.slots[category.index()] = None;
            false
        } else {
            self.slots[category.index()] = Some(target);
            true
        }
    }

    /// True iff at least one category holds a queued change.
    pub fn is_pending(&self) -> bool {
        self.slots.iter().any(|slot| slot.is_some())
    }

    /// Removes and returns every queued change in category order.
    pub fn drain(&mut self) -> Vec<(ItemCategory, EquipTarget)> {
        ItemCategory::all()
            .into_iter()
            .filter_map(|category| {
                self.slots[category.index()]
                    .take()
                    .map(|target| (category, target))
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}
