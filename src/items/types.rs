use serde::{Deserialize, Serialize};

/// Equipment categories. One slot and one inventory list per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Headgear,
    Armor,
    Boots,
    Accessory,
    Skill,
}

impl ItemCategory {
    pub const COUNT: usize = 6;

    pub fn all() -> [ItemCategory; Self::COUNT] {
        [
            ItemCategory::Weapon,
            ItemCategory::Headgear,
            ItemCategory::Armor,
            ItemCategory::Boots,
            ItemCategory::Accessory,
            ItemCategory::Skill,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            ItemCategory::Weapon => 0,
            ItemCategory::Headgear => 1,
            ItemCategory::Armor => 2,
            ItemCategory::Boots => 3,
            ItemCategory::Accessory => 4,
            ItemCategory::Skill => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "weapon",
            ItemCategory::Headgear => "headgear",
            ItemCategory::Armor => "armor",
            ItemCategory::Boots => "boots",
            ItemCategory::Accessory => "accessory",
            ItemCategory::Skill => "skill",
        }
    }

    /// Whether gear in this category may carry an evasion bonus.
    pub fn carries_evasion(&self) -> bool {
        !matches!(self, ItemCategory::Weapon | ItemCategory::Skill)
    }

    /// Whether gear in this category may carry a critical-chance bonus.
    pub fn carries_crit(&self) -> bool {
        matches!(
            self,
            ItemCategory::Weapon | ItemCategory::Headgear | ItemCategory::Accessory
        )
    }
}

/// What a skill does on the turn it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillEffect {
    Damage,
    Heal,
    FlyingMastery,
    MagicDamage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub effect: SkillEffect,
    /// Turns between activations; 0 fires every turn.
    pub cooldown: u32,
    pub multiplier: f64,
}

/// Flat combat bonuses granted by a piece of gear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearStats {
    pub attack: u32,
    pub defense: u32,
    pub evasion: u32,
    pub crit: u32,
}

impl GearStats {
    pub fn new(attack: u32, defense: u32, evasion: u32, crit: u32) -> Self {
        Self {
            attack,
            defense,
            evasion,
            crit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Gear(GearStats),
    Skill(Skill),
}

/// An immutable catalog entry. Identity is `(category, id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub category: ItemCategory,
    pub name: String,
    pub kind: ItemKind,
    pub icon: String,
    pub description: String,
}

impl Item {
    pub fn gear(
        category: ItemCategory,
        id: u32,
        name: &str,
        stats: GearStats,
        icon: &str,
        description: &str,
    ) -> Self {
        Self {
            id,
            category,
            name: name.to_string(),
            kind: ItemKind::Gear(stats),
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }

    pub fn skill(id: u32, name: &str, skill: Skill, icon: &str, description: &str) -> Self {
        Self {
            id,
            category: ItemCategory::Skill,
            name: name.to_string(),
            kind: ItemKind::Skill(skill),
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }

    /// Gear bonuses; skills contribute nothing.
    pub fn stats(&self) -> GearStats {
        match &self.kind {
            ItemKind::Gear(stats) => *stats,
            ItemKind::Skill(_) => GearStats::default(),
        }
    }

    pub fn as_skill(&self) -> Option<&Skill> {
        match &self.kind {
            ItemKind::Skill(skill) => Some(skill),
            ItemKind::Gear(_) => None,
        }
    }

    pub fn same_identity(&self, other: &Item) -> bool {
        self.category == other.category && self.id == other.id
    }
}
