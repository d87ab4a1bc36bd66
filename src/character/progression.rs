//! Experience curve and level-up rules.
//!
//! Experience is cumulative: it is never reset on level-up, and the table
//! entry for a level is the total needed to leave it.

use super::attributes::Attributes;
use crate::core::constants::{EXP_TABLE, MAX_LEVEL};

/// Total experience needed to advance past `level`. `None` at the level cap.
pub fn experience_required_for_level(level: u32) -> Option<u32> {
    if level >= MAX_LEVEL {
        return None;
    }
    EXP_TABLE.get(level as usize).copied()
}

/// Experience a character starting at `level` already holds.
pub fn starting_experience(level: u32) -> u32 {
    match level {
        0 | 1 => 0,
        l => experience_required_for_level(l.min(MAX_LEVEL) - 1).unwrap_or(0),
    }
}

/// Whether experience is still earned at `level` inside an area capped at `exp_cap`.
pub fn earns_experience(level: u32, exp_cap: u32) -> bool {
    level < exp_cap
}

/// Levels up while the experience threshold is met, adding the per-level gains.
///
/// Returns every level reached, in order. A large grant can cross several.
pub fn apply_level_ups(level: &mut u32, experience: u32, attributes: &mut Attributes) -> Vec<u32> {
    let mut gained = Vec::new();
    while let Some(required) = experience_required_for_level(*level) {
        if experience < required {
            break;
        }
        *level += 1;
        attributes.apply_level_gains(*level);
        gained.push(*level);
    }
    gained
}
