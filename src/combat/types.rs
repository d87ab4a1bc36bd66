use crate::bestiary::{EnemyTag, EnemyType};
use crate::core::events::DisplayVariant;
use rand::Rng;

/// A live enemy for the duration of one encounter.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub type_id: u32,
    pub name: &'static str,
    pub level: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub evasion: u32,
    pub exp_value: u32,
    pub tag: EnemyTag,
    pub boss: bool,
    pub attack_timing: f64,
    battle_quotes: Vec<&'static str>,
    miss_quote: &'static str,
}

impl Enemy {
    pub fn from_type(enemy_type: &EnemyType) -> Self {
        Self {
            type_id: enemy_type.id,
            name: enemy_type.name,
            level: enemy_type.level,
            max_hp: enemy_type.hp,
            current_hp: enemy_type.hp,
            attack: enemy_type.attack,
            defense: enemy_type.defense,
            evasion: enemy_type.evasion,
            exp_value: enemy_type.exp_value,
            tag: enemy_type.tag,
            boss: enemy_type.boss,
            attack_timing: enemy_type.attack_timing,
            battle_quotes: enemy_type.battle_quotes.clone(),
            miss_quote: enemy_type.miss_quote,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn battle_quote(&self, rng: &mut impl Rng) -> &'static str {
        if self.battle_quotes.is_empty() {
            return "";
        }
        self.battle_quotes[rng.gen_range(0..self.battle_quotes.len())]
    }

    pub fn miss_quote(&self) -> &'static str {
        self.miss_quote
    }
}

/// The player's resolved action for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAction {
    /// Damage to the enemy; zero on a miss or a heal.
    pub damage: u32,
    /// HP restored by a healing skill.
    pub heal: u32,
    pub variant: DisplayVariant,
    pub hit: bool,
    pub critical: bool,
    /// Name of the skill that fired this turn, if any.
    pub skill_name: Option<String>,
}

/// The enemy's resolved attack for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyAction {
    pub damage: u32,
    pub hit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterOutcome {
    Victory,
    BossVictory,
    Defeat,
}

/// Timed steps of an encounter. Each holds the seconds left before it resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterPhase {
    /// Pre-combat pause after the enemy appears.
    Intro { remaining: f64 },
    /// Player attack animation; the action lands when the timer expires.
    PlayerStrike { remaining: f64, action: PlayerAction },
    PlayerRecover { remaining: f64 },
    /// Enemy attack animation; lands after the enemy's attack timing.
    EnemyStrike { remaining: f64, action: EnemyAction },
    EnemyRecover { remaining: f64 },
    /// Pause after the last blow before the outcome is reported.
    Aftermath {
        remaining: f64,
        outcome: EncounterOutcome,
    },
    Finished(EncounterOutcome),
}

impl EncounterPhase {
    pub fn remaining(&self) -> f64 {
        match self {
            EncounterPhase::Intro { remaining }
            | EncounterPhase::PlayerStrike { remaining, .. }
            | EncounterPhase::PlayerRecover { remaining }
            | EncounterPhase::EnemyStrike { remaining, .. }
            | EncounterPhase::EnemyRecover { remaining }
            | EncounterPhase::Aftermath { remaining, .. } => *remaining,
            EncounterPhase::Finished(_) => 0.0,
        }
    }

    /// Counts `dt` seconds down on the active timer.
    pub fn consume(&mut self, dt: f64) {
        match self {
            EncounterPhase::Intro { remaining }
            | EncounterPhase::PlayerStrike { remaining, .. }
            | EncounterPhase::PlayerRecover { remaining }
            | EncounterPhase::EnemyStrike { remaining, .. }
            | EncounterPhase::EnemyRecover { remaining }
            | EncounterPhase::Aftermath { remaining, .. } => {
                *remaining = (*remaining - dt).max(0.0);
            }
            EncounterPhase::Finished(_) => {}
        }
    }
}
