//! Area definitions and their encounter tables.

use crate::core::weighted::Threshold;

/// One row of an area's encounter table. `threshold` is cumulative out of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterEntry {
    pub enemy_id: u32,
    pub threshold: u32,
}

impl Threshold for EncounterEntry {
    fn threshold(&self) -> u32 {
        self.threshold
    }
}

/// A roamable area.
#[derive(Debug, Clone)]
pub struct Area {
    pub id: u32,
    pub name: &'static str,
    pub subtitle: &'static str,
    /// Level needed to enter from the previous area.
    pub level_requirement: u32,
    /// Experience is only earned while the player's level is below this.
    pub exp_cap: u32,
    pub encounters: Vec<EncounterEntry>,
}

fn encounters(rows: &[(u32, u32)]) -> Vec<EncounterEntry> {
    rows.iter()
        .map(|&(enemy_id, threshold)| EncounterEntry {
            enemy_id,
            threshold,
        })
        .collect()
}

/// Returns every area in travel order (ids 1..=4).
pub fn get_all_areas() -> Vec<Area> {
    vec![
        Area {
            id: 1,
            name: "Santa Vapor Beach",
            subtitle: "A multitude of corridors into the unknown.",
            level_requirement: 0,
            exp_cap: 4,
            // imp, rentaur
            encounters: encounters(&[(1, 65), (2, 100)]),
        },
        Area {
            id: 2,
            name: "Pink Dolphin Mall",
            subtitle: "Artificial canals carry fresh water to the depths.",
            level_requirement: 2,
            exp_cap: 8,
            // mechanical sentry, hall monitor
            encounters: encounters(&[(3, 60), (4, 100)]),
        },
        Area {
            id: 3,
            name: "The Backrooms",
            subtitle: "Remains of a holy place, scattered by the winds.",
            level_requirement: 3,
            exp_cap: 10,
            // merman, water elemental
            encounters: encounters(&[(5, 99), (6, 100)]),
        },
        Area {
            id: 4,
            name: "The Sanctum of Wishes",
            subtitle: "Every wish ever made ends up here.",
            level_requirement: 4,
            exp_cap: 10,
            encounters: encounters(&[(7, 100)]),
        },
    ]
}
