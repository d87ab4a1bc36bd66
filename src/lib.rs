//! VaporQuest - idle RPG simulation core
//!
//! Real-time roaming, turn-timed combat, leveling, equipment and loot,
//! driven by a [`core::Session`] that reports everything as events.

pub mod bestiary;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod zones;
