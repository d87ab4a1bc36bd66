//! Enemy definitions, their loot tables and the weighted encounter pick.

use crate::core::constants::{DEFAULT_ENEMY_ID, ENCOUNTER_ROLL_MAX, LOOT_ROLL_MAX};
use crate::core::error::CatalogError;
use crate::core::weighted::{first_reaching, thresholds_ascending};
use crate::items::catalog::Catalog;
use crate::items::drops::LootTableElement;
use crate::items::types::ItemCategory;
use crate::zones::Area;
use rand::Rng;
use tracing::debug;

/// Damage-type affinity. Flying mastery skills key off `Flying`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyTag {
    Humanoid,
    Beast,
    Machine,
    Elemental,
    Avatar,
    Flying,
}

#[derive(Debug, Clone)]
pub struct EnemyType {
    pub id: u32,
    pub name: &'static str,
    pub level: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub evasion: u32,
    pub exp_value: u32,
    pub tag: EnemyTag,
    pub boss: bool,
    pub model: &'static str,
    pub model_height: f64,
    /// Seconds from the start of the attack animation to the hit.
    pub attack_timing: f64,
    pub encounter_quote: &'static str,
    /// Pushed when the enemy lands a hit; `$dmg` is the damage dealt.
    pub battle_quotes: Vec<&'static str>,
    pub miss_quote: &'static str,
    /// Authored order matters: thresholds are cumulative.
    pub loot_table: Vec<LootTableElement>,
}

/// Authored stat block, before loot references are resolved.
struct EnemyDef {
    id: u32,
    name: &'static str,
    hp: u32,
    level: u32,
    attack: u32,
    defense: u32,
    evasion: u32,
    exp_value: u32,
    tag: EnemyTag,
    boss: bool,
    model: &'static str,
    model_height: f64,
    attack_timing: f64,
    encounter_quote: &'static str,
    battle_quotes: [&'static str; 2],
    miss_quote: &'static str,
    /// (category, item id, cumulative threshold, rare)
    loot: &'static [(ItemCategory, u32, u32, bool)],
}

fn enemy_defs() -> Vec<EnemyDef> {
    use ItemCategory::*;
    vec![
        EnemyDef {
            id: 1,
            name: "Imp",
            hp: 200,
            level: 2,
            attack: 28,
            defense: 4,
            evasion: 0,
            exp_value: 100,
            tag: EnemyTag::Humanoid,
            boss: false,
            model: "imp",
            model_height: 1.3,
            attack_timing: 0.2,
            encounter_quote: "An Imp cackles from behind a beach umbrella!",
            battle_quotes: [
                "The Imp jabs with its tiny trident for $dmg damage!",
                "The Imp kicks sand in your eyes! You take $dmg damage.",
            ],
            miss_quote: "The Imp trips over a seashell and misses.",
            loot: &[(Headgear, 1, 150, false), (Accessory, 1, 200, true), (Skill, 1, 300, false)],
        },
        EnemyDef {
            id: 2,
            name: "Rentaur",
            hp: 200,
            level: 3,
            attack: 15,
            defense: 6,
            evasion: 0,
            exp_value: 100,
            tag: EnemyTag::Beast,
            boss: false,
            model: "rentaur",
            model_height: 2.0,
            attack_timing: 0.15,
            encounter_quote: "A Rentaur gallops out of the surf!",
            battle_quotes: [
                "The Rentaur tramples you for $dmg damage!",
                "The Rentaur bucks wildly, dealing $dmg damage.",
            ],
            miss_quote: "The Rentaur charges past you.",
            loot: &[(Boots, 2, 150, false), (Armor, 2, 200, true), (Skill, 2, 300, false)],
        },
        EnemyDef {
            id: 3,
            name: "Mechanical Sentry",
            hp: 420,
            level: 3,
            attack: 30,
            defense: 9,
            evasion: 0,
            exp_value: 30,
            tag: EnemyTag::Machine,
            boss: false,
            model: "mechsentry",
            model_height: 1.3,
            attack_timing: 0.25,
            encounter_quote: "A Mechanical Sentry whirs to life. INTRUDER DETECTED.",
            battle_quotes: [
                "The Sentry fires a bolt for $dmg damage!",
                "The Sentry slams its chassis into you for $dmg damage.",
            ],
            miss_quote: "The Sentry's targeting system glitches.",
            loot: &[(Headgear, 2, 120, false), (Armor, 3, 160, true), (Skill, 3, 220, false)],
        },
        EnemyDef {
            id: 4,
            name: "Hall Monitor",
            hp: 630,
            level: 4,
            attack: 24,
            defense: 7,
            evasion: 2,
            exp_value: 40,
            tag: EnemyTag::Beast,
            boss: false,
            model: "monitor",
            model_height: 1.8,
            attack_timing: 0.75,
            encounter_quote: "A Hall Monitor demands to see your pass!",
            battle_quotes: [
                "The Hall Monitor lashes its tail for $dmg damage!",
                "The Hall Monitor writes you up. It costs you $dmg health.",
            ],
            miss_quote: "The Hall Monitor is distracted by a loiterer.",
            loot: &[(Weapon, 2, 100, false), (Accessory, 2, 140, true), (Skill, 4, 220, false)],
        },
        EnemyDef {
            id: 5,
            name: "Merman",
            hp: 1000,
            level: 6,
            attack: 48,
            defense: 7,
            evasion: 5,
            exp_value: 60,
            tag: EnemyTag::Humanoid,
            boss: false,
            model: "merman",
            model_height: 1.8,
            attack_timing: 0.25,
            encounter_quote: "A Merman rises from the flooded carpet!",
            battle_quotes: [
                "The Merman strikes with a coral spear for $dmg damage!",
                "The Merman slaps you with a fin for $dmg damage.",
            ],
            miss_quote: "The Merman slips on the wet floor.",
            loot: &[(Accessory, 3, 90, false), (Skill, 5, 130, true)],
        },
        EnemyDef {
            id: 6,
            name: "Water Elemental",
            hp: 1450,
            level: 7,
            attack: 43,
            defense: 5,
            evasion: 10,
            exp_value: 80,
            tag: EnemyTag::Elemental,
            boss: false,
            model: "waterelem",
            model_height: 1.8,
            attack_timing: 0.64,
            encounter_quote: "The fluorescent hum drowns in a rushing Water Elemental!",
            battle_quotes: [
                "The Water Elemental crashes over you for $dmg damage!",
                "A torrent hits you for $dmg damage.",
            ],
            miss_quote: "The Water Elemental splashes harmlessly around you.",
            loot: &[(Headgear, 3, 80, false), (Weapon, 3, 100, true)],
        },
        EnemyDef {
            id: 7,
            name: "The God of Wishes",
            hp: 4000,
            level: 10,
            attack: 40,
            defense: 8,
            evasion: 0,
            exp_value: 2000,
            tag: EnemyTag::Avatar,
            boss: true,
            model: "god",
            model_height: 2.0,
            attack_timing: 0.5,
            encounter_quote: "The God of Wishes turns its gaze upon you.",
            battle_quotes: [
                "The God of Wishes grants you pain: $dmg damage!",
                "A wish gone wrong deals $dmg damage.",
            ],
            miss_quote: "The God of Wishes wishes it had hit you.",
            loot: &[],
        },
    ]
}

fn build_enemy(def: EnemyDef, catalog: &Catalog) -> Result<EnemyType, CatalogError> {
    let mut loot_table = Vec::with_capacity(def.loot.len());
    for &(category, item_id, threshold, rare) in def.loot {
        let item = catalog
            .get(category, item_id)
            .ok_or(CatalogError::MissingLootItem {
                enemy_id: def.id,
                category: category.name(),
                item_id,
            })?;
        loot_table.push(LootTableElement::new(item, threshold, rare));
    }
    if !thresholds_ascending(&loot_table, LOOT_ROLL_MAX) {
        return Err(CatalogError::BadLootThresholds {
            enemy_id: def.id,
            max: LOOT_ROLL_MAX,
        });
    }
    Ok(EnemyType {
        id: def.id,
        name: def.name,
        level: def.level,
        hp: def.hp,
        attack: def.attack,
        defense: def.defense,
        evasion: def.evasion,
        exp_value: def.exp_value,
        tag: def.tag,
        boss: def.boss,
        model: def.model,
        model_height: def.model_height,
        attack_timing: def.attack_timing,
        encounter_quote: def.encounter_quote,
        battle_quotes: def.battle_quotes.to_vec(),
        miss_quote: def.miss_quote,
        loot_table,
    })
}

/// Every enemy type, with loot tables resolved against the item catalog.
#[derive(Debug, Clone)]
pub struct Bestiary {
    enemies: Vec<EnemyType>,
}

impl Bestiary {
    pub fn from_enemies(enemies: Vec<EnemyType>) -> Result<Self, CatalogError> {
        for (i, enemy) in enemies.iter().enumerate() {
            if enemies[..i].iter().any(|other| other.id == enemy.id) {
                return Err(CatalogError::DuplicateEnemy(enemy.id));
            }
            if !thresholds_ascending(&enemy.loot_table, LOOT_ROLL_MAX) {
                return Err(CatalogError::BadLootThresholds {
                    enemy_id: enemy.id,
                    max: LOOT_ROLL_MAX,
                });
            }
        }
        Ok(Self { enemies })
    }

    pub fn standard(catalog: &Catalog) -> Result<Self, CatalogError> {
        let enemies = enemy_defs()
            .into_iter()
            .map(|def| build_enemy(def, catalog))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_enemies(enemies)
    }

    pub fn get(&self, id: u32) -> Option<&EnemyType> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemies(&self) -> &[EnemyType] {
        &self.enemies
    }

    /// Checks that every encounter row of `area` names a known enemy.
    pub fn validate_area(&self, area: &Area) -> Result<(), CatalogError> {
        for entry in &area.encounters {
            if self.get(entry.enemy_id).is_none() {
                return Err(CatalogError::MissingEncounterEnemy {
                    area_id: area.id,
                    enemy_id: entry.enemy_id,
                });
            }
        }
        let reaches_max = area
            .encounters
            .last()
            .is_some_and(|entry| entry.threshold == ENCOUNTER_ROLL_MAX);
        if !thresholds_ascending(&area.encounters, ENCOUNTER_ROLL_MAX) || !reaches_max {
            return Err(CatalogError::BadEncounterThresholds(area.id));
        }
        Ok(())
    }

    /// Enemy id for a forced encounter roll in `1..=100`, falling back to the default enemy.
    pub fn enemy_for_roll(&self, area: &Area, roll: u32) -> u32 {
        first_reaching(&area.encounters, roll)
            .map(|entry| entry.enemy_id)
            .unwrap_or(DEFAULT_ENEMY_ID)
    }

    /// Weighted pick of the next enemy in `area`.
    pub fn pick_enemy(&self, area: &Area, rng: &mut impl Rng) -> Option<&EnemyType> {
        let roll = rng.gen_range(1..=ENCOUNTER_ROLL_MAX);
        let id = self.enemy_for_roll(area, roll);
        debug!(roll, enemy_id = id, area = area.id, "encounter roll");
        self.get(id).or_else(|| self.get(DEFAULT_ENEMY_ID))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::get_all_areas;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bestiary() -> Bestiary {
        Bestiary::standard(&Catalog::standard().unwrap()).unwrap()
    }

    #[test]
    fn test_standard_bestiary_resolves_loot() {
        let bestiary = bestiary();
        assert_eq!(bestiary.enemies().len(), 7);
        let imp = bestiary.get(1).unwrap();
        let thresholds: Vec<u32> = imp.loot_table.iter().map(|e| e.drop_chance).collect();
        assert_eq!(thresholds, vec![150, 200, 300]);
        assert_eq!(imp.loot_table[1].item.name, "Peace Necklace");
        assert!(imp.loot_table[1].rare);
    }

    #[test]
    fn test_only_final_enemy_is_boss() {
        let bosses: Vec<u32> = bestiary()
            .enemies()
            .iter()
            .filter(|e| e.boss)
            .map(|e| e.id)
            .collect();
        assert_eq!(bosses, vec![7]);
        assert!(bestiary().get(7).unwrap().loot_table.is_empty());
    }

    #[test]
    fn test_encounter_roll_selection() {
        let bestiary = bestiary();
        let areas = get_all_areas();
        assert_eq!(bestiary.enemy_for_roll(&areas[0], 65), 1);
        assert_eq!(bestiary.enemy_for_roll(&areas[0], 66), 2);
        assert_eq!(bestiary.enemy_for_roll(&areas[2], 99), 5);
        assert_eq!(bestiary.enemy_for_roll(&areas[2], 100), 6);
    }

    #[test]
    fn test_encounter_fallback_is_default_enemy() {
        let bestiary = bestiary();
        let mut area = get_all_areas().remove(1);
        area.encounters.truncate(1);
        assert_eq!(bestiary.enemy_for_roll(&area, 90), DEFAULT_ENEMY_ID);
    }

    #[test]
    fn test_pick_enemy_stays_in_area_table() {
        let bestiary = bestiary();
        let areas = get_all_areas();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..200 {
            let enemy = bestiary.pick_enemy(&areas[1], &mut rng).unwrap();
            assert!(enemy.id == 3 || enemy.id == 4);
        }
    }

    #[test]
    fn test_areas_validate_against_bestiary() {
        let bestiary = bestiary();
        for area in get_all_areas() {
            assert!(bestiary.validate_area(&area).is_ok());
        }
        let mut broken = get_all_areas().remove(0);
        broken.encounters[0].enemy_id = 99;
        assert_eq!(
            bestiary.validate_area(&broken),
            Err(CatalogError::MissingEncounterEnemy {
                area_id: 1,
                enemy_id: 99
            })
        );
    }

    #[test]
    fn test_missing_loot_item_is_rejected() {
        let catalog = Catalog::from_items(vec![]).unwrap();
        assert!(matches!(
            Bestiary::standard(&catalog),
            Err(CatalogError::MissingLootItem { enemy_id: 1, .. })
        ));
    }
}
