use super::attributes::Attributes;
use crate::core::constants::*;
use crate::items::equipment::Equipment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub max_hp: u32,
    pub attack: u32,
    pub magic: u32,
    pub evasion: u32,
    pub defense: u32,
    pub crit_chance: u32,
}

impl DerivedStats {
    /// Derived stats from modded attributes plus every equipped piece.
    pub fn calculate(attrs: &Attributes, level: u32, equipment: &Equipment) -> Self {
        let stats = attrs.modded();
        let gear = equipment.total_bonuses();

        // maxHp = base + level*20 + stamina*10
        let max_hp = BASE_PLAYER_HP + level * HP_PER_LEVEL + stats.stamina() * HP_PER_STAMINA;

        // attack = floor(str * 1.2) + gear
        let attack = (stats.strength() as f64 * ATTACK_PER_STRENGTH).floor() as u32 + gear.attack;

        Self {
            max_hp,
            attack,
            magic: stats.intelligence(),
            evasion: stats.agility() / 2 + gear.evasion,
            defense: stats.stamina() / 2 + gear.defense,
            crit_chance: BASE_PLAYER_CRIT + gear.crit,
        }
    }
}
