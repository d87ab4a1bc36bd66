//! Owned item lists and the loot box of unclaimed drops.

use super::drops::LootTableElement;
use super::types::{Item, ItemCategory};
use crate::core::constants::LOOT_BOX_CAPACITY;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Unlocked items per category, unique by id and sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    lists: [Vec<Arc<Item>>; ItemCategory::COUNT],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, category: ItemCategory) -> &[Arc<Item>] {
        &self.lists[category.index()]
    }

    pub fn contains(&self, category: ItemCategory, id: u32) -> bool {
        self.lists[category.index()]
            .binary_search_by_key(&id, |item| item.id)
            .is_ok()
    }

    /// Adds the item unless its id is already owned. Returns true if added.
    pub fn insert(&mut self, item: Arc<Item>) -> bool {
        let list = &mut self.lists[item.category.index()];
        match list.binary_search_by_key(&item.id, |owned| owned.id) {
            Ok(_) => false,
            Err(position) => {
                list.insert(position, item);
                true
            }
        }
    }

    /// Replaces a whole category (used when unlocking everything).
    pub fn fill(&mut self, category: ItemCategory, items: &[Arc<Item>]) {
        let list = &mut self.lists[category.index()];
        list.clear();
        for item in items {
            if item.category == category {
                list.push(Arc::clone(item));
            }
        }
        list.sort_by_key(|item| item.id);
        list.dedup_by_key(|item| item.id);
    }

    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }
}

/// Result of claiming one loot box entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Unpacked {
    /// Newly added to the inventory.
    Added(Arc<Item>),
    /// Already owned; the copy is discarded.
    Duplicate(Arc<Item>),
    /// Index missing or already opened; nothing happened.
    Ignored,
}

/// Bounded holding area for unclaimed drops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootBox {
    entries: Vec<LootTableElement>,
}

impl LootBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= LOOT_BOX_CAPACITY
    }

    pub fn entries(&self) -> &[LootTableElement] {
        &self.entries
    }

    /// Stores a drop. A full box rejects it and hands it back.
    pub fn push(&mut self, drop: LootTableElement) -> Result<(), LootTableElement> {
        if self.is_full() {
            return Err(drop);
        }
        self.entries.push(drop);
        Ok(())
    }

    /// Opens entry `index` into `inventory`. Claiming the same index twice is a no-op.
    pub fn unpack(&mut self, index: usize, inventory: &mut Inventory) -> Unpacked {
        let Some(entry) = self.entries.get_mut(index) else {
            return Unpacked::Ignored;
        };
        if entry.opened {
            return Unpacked::Ignored;
        }
        entry.opened = true;
        let item = Arc::clone(&entry.item);
        if inventory.insert(Arc::clone(&item)) {
            Unpacked::Added(item)
        } else {
            Unpacked::Duplicate(item)
        }
    }

    /// Drops every opened entry. Returns how many were removed.
    pub fn clear_opened(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.opened);
        before - self.entries.len()
    }
}
