use crate::core::constants::{
    AGILITY_GAINS, INTELLIGENCE_GAINS, MAX_LEVEL, STAMINA_GAINS, STRENGTH_GAINS,
};
use serde::{Deserialize, Serialize};

pub const NUM_ATTRIBUTES: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttributeType {
    Strength,
    Intelligence,
    Agility,
    Stamina,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Strength,
            AttributeType::Intelligence,
            AttributeType::Agility,
            AttributeType::Stamina,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeType::Strength => 0,
            AttributeType::Intelligence => 1,
            AttributeType::Agility => 2,
            AttributeType::Stamina => 3,
        }
    }

    /// Per-level gain table; entry `n` is added on reaching level `n + 1`.
    fn gain_table(&self) -> &'static [u32; MAX_LEVEL as usize] {
        match self {
            AttributeType::Strength => &STRENGTH_GAINS,
            AttributeType::Intelligence => &INTELLIGENCE_GAINS,
            AttributeType::Agility => &AGILITY_GAINS,
            AttributeType::Stamina => &STAMINA_GAINS,
        }
    }

    /// Points gained on reaching `level` (level 1 yields the base value).
    pub fn gain_at(&self, level: u32) -> u32 {
        if level == 0 || level > MAX_LEVEL {
            return 0;
        }
        self.gain_table()[(level - 1) as usize]
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes {
    values: [u32; NUM_ATTRIBUTES],
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(strength: u32, intelligence: u32, agility: u32, stamina: u32) -> Self {
        Self {
            values: [strength, intelligence, agility, stamina],
        }
    }

    /// Base attributes of a fresh character at `level`: the gain tables summed up to it.
    pub fn starting(level: u32) -> Self {
        let mut attrs = Self::new();
        for l in 1..=level.clamp(1, MAX_LEVEL) {
            attrs.apply_level_gains(l);
        }
        attrs
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: u32) {
        self.values[attr.index()] = value;
    }

    pub fn strength(&self) -> u32 {
        self.get(AttributeType::Strength)
    }

    pub fn intelligence(&self) -> u32 {
        self.get(AttributeType::Intelligence)
    }

    pub fn agility(&self) -> u32 {
        self.get(AttributeType::Agility)
    }

    pub fn stamina(&self) -> u32 {
        self.get(AttributeType::Stamina)
    }

    /// Adds the fixed gains for reaching `level`.
    pub fn apply_level_gains(&mut self, level: u32) {
        for attr in AttributeType::all() {
            self.values[attr.index()] = self.values[attr.index()].saturating_add(attr.gain_at(level));
        }
    }

    /// Stats after temporary modifiers. None exist yet, so this is the base.
    pub fn modded(&self) -> Self {
        *self
    }
}
