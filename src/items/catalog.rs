//! Static item tables: every equippable weapon, headgear, armor, boots,
//! accessory and skill in the game.

use super::types::{GearStats, Item, ItemCategory, Skill, SkillEffect};
use crate::core::error::CatalogError;
use std::sync::Arc;

/// Read-only item lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    lists: [Vec<Arc<Item>>; ItemCategory::COUNT],
}

impl Catalog {
    /// Builds the catalog from explicit items and validates it.
    pub fn from_items(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut lists: [Vec<Arc<Item>>; ItemCategory::COUNT] = Default::default();
        for item in items {
            let category = item.category;
            let list = &mut lists[category.index()];
            if item.id == 0 || list.iter().any(|existing| existing.id == item.id) {
                return Err(CatalogError::BadItemId {
                    category: category.name(),
                    id: item.id,
                });
            }
            let stats = item.stats();
            if (stats.evasion > 0 && !category.carries_evasion())
                || (stats.crit > 0 && !category.carries_crit())
            {
                return Err(CatalogError::BadItemStat {
                    category: category.name(),
                    name: item.name,
                });
            }
            list.push(Arc::new(item));
        }
        for list in lists.iter_mut() {
            list.sort_by_key(|item| item.id);
        }
        Ok(Self { lists })
    }

    /// The shipped item tables.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_items(standard_items())
    }

    pub fn get(&self, category: ItemCategory, id: u32) -> Option<Arc<Item>> {
        self.lists[category.index()]
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    pub fn list(&self, category: ItemCategory) -> &[Arc<Item>] {
        &self.lists[category.index()]
    }

    /// First entry of a category (the starter piece for weapon/armor/boots).
    pub fn first(&self, category: ItemCategory) -> Option<Arc<Item>> {
        self.lists[category.index()].first().cloned()
    }
}

fn gear(
    category: ItemCategory,
    id: u32,
    name: &str,
    (attack, defense, evasion, crit): (u32, u32, u32, u32),
    icon: &str,
    description: &str,
) -> Item {
    Item::gear(
        category,
        id,
        name,
        GearStats::new(attack, defense, evasion, crit),
        icon,
        description,
    )
}

fn skill(
    id: u32,
    name: &str,
    effect: SkillEffect,
    cooldown: u32,
    multiplier: f64,
    icon: &str,
    description: &str,
) -> Item {
    Item::skill(
        id,
        name,
        Skill {
            effect,
            cooldown,
            multiplier,
        },
        icon,
        description,
    )
}

fn standard_items() -> Vec<Item> {
    use ItemCategory::*;
    vec![
        // (atk, def, eva, crit)
        gear(Weapon, 1, "Bronze Blade", (10, 0, 0, 0), "Items/w1_bronze_blade", "A dependable blade of cast bronze."),
        gear(Weapon, 2, "Nomadic Sabre", (18, 0, 0, 0), "Items/w2_nomadic_sabre", "Curved steel carried across the dunes."),
        gear(Weapon, 3, "Shamshir", (25, 0, 0, 0), "Items/w3_shamshir", "A razor arc that bites deep."),
        gear(Headgear, 1, "Food Tin", (0, 1, 0, 0), "Items/h1_food_tin", "Empty, mostly. Better than nothing."),
        gear(Headgear, 2, "Barbut", (0, 3, 0, 0), "Items/h2_barbut", "An open-faced helm with a narrow T-slit."),
        gear(Headgear, 3, "Sallet", (0, 4, 1, 0), "Items/h3_sallet", "A sweeping helm that turns glancing blows."),
        gear(Armor, 1, "Leather Cuirass", (0, 3, 0, 0), "Items/ar1_leather_cuirass", "Boiled leather over the chest."),
        gear(Armor, 2, "Brigandine", (0, 6, 0, 0), "Items/ar2_brigandine", "Steel plates riveted beneath cloth."),
        gear(Armor, 3, "Plate Armor", (0, 10, 0, 0), "Items/ar3_plate_armor", "Full plate. Heavy, loud, effective."),
        gear(Boots, 1, "Padded Boots", (0, 0, 5, 0), "Items/b1_padded_boots", "Soft soles for quick feet."),
        gear(Boots, 2, "Steel-Toe Boots", (0, 1, 3, 0), "Items/b2_steel_toe_boots", "Sturdy work boots."),
        gear(Boots, 3, "Cobalt Greaves", (1, 4, 0, 0), "Items/b3_cobalt_greaves", "Blue-sheened greaves of forged cobalt."),
        gear(Accessory, 1, "Peace Necklace", (0, 0, 0, 0), "Items/ac1_peace_necklace", "Halves the time needed to recover after fainting."),
        gear(Accessory, 2, "Ring of Agility", (0, 0, 4, 0), "Items/ac2_ring_of_agility", "The wearer moves a beat ahead."),
        gear(Accessory, 3, "Hero's Bandanna", (2, 0, 0, 3), "Items/ac3_heros_bandanna", "Worn by someone who never gave up."),
        skill(1, "Triple Stab", SkillEffect::Damage, 5, 1.8, "Items/s1_triple_stab", "Three quick thrusts in one motion."),
        skill(2, "Mend Wounds", SkillEffect::Heal, 4, 2.5, "Items/s2_mend_wounds", "Restores health using magic."),
        skill(3, "Elemental Killer", SkillEffect::FlyingMastery, 0, 1.4, "Items/s3_elemental_killer", "Strikes harder against flying foes."),
        skill(4, "Thundershock", SkillEffect::MagicDamage, 6, 4.0, "Items/s4_thundershock", "Calls down a bolt of lightning."),
        skill(5, "Catastrophe", SkillEffect::Damage, 8, 3.2, "Items/s5_catastrophe", "A devastating, slow-building strike."),
    ]
}
