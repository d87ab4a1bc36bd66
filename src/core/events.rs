//! Notifications for the presentation layer.
//!
//! Session operations return these in order; the caller renders, plays or
//! logs them and never answers back.

use crate::items::types::ItemCategory;

/// Visual style of a floating number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayVariant {
    Damage,
    Special,
    Critical,
    Healing,
    Miss,
    Info,
}

/// Where a floating number or animation is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Player,
    Enemy,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBarOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutscene {
    Intro,
    Ending,
    Credits,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    FloatingText {
        text: String,
        variant: DisplayVariant,
        target: Target,
    },
    HealthBar {
        who: HealthBarOwner,
        current: u32,
        max: u32,
    },
    EquippedIcon {
        category: ItemCategory,
        icon: Option<String>,
    },
    EquipQueueMarker {
        category: ItemCategory,
        visible: bool,
    },
    EquipQueueVisible(bool),
    LogLine(String),
    ShowError(String),
    Animation {
        target: Target,
        name: &'static str,
    },
    LootBoxCount(usize),
    ItemRevealed {
        index: usize,
        icon: String,
    },
    LevelUp {
        level: u32,
    },
    AreaUnlocked {
        area: u32,
    },
    LoadArea {
        area: u32,
        name: &'static str,
        subtitle: &'static str,
    },
    PlayCutscene(Cutscene),
    EnemyAppeared {
        name: &'static str,
        model: &'static str,
        max_hp: u32,
        boss: bool,
    },
    EnemyCleared,
    FinalBlowReady(bool),
    Saved {
        slot: u32,
    },
    ReturnToMainMenu,
}

impl GameEvent {
    pub fn floating(text: impl Into<String>, variant: DisplayVariant, target: Target) -> Self {
        GameEvent::FloatingText {
            text: text.into(),
            variant,
            target,
        }
    }

    pub fn log(text: impl Into<String>) -> Self {
        GameEvent::LogLine(text.into())
    }
}
