//! Ascending cumulative-threshold selection shared by loot and encounter tables.
//!
//! Entries are scanned in authored order and the first entry whose threshold
//! reaches the roll wins. An entry with threshold 300 that follows one with
//! threshold 150 therefore covers rolls 151..=300; entries are not independent
//! per-item probabilities.

use rand::Rng;

/// An authored table entry carrying a cumulative threshold.
pub trait Threshold {
    fn threshold(&self) -> u32;
}

/// Returns the first entry whose threshold is >= `roll`, if any.
pub fn first_reaching<T: Threshold>(entries: &[T], roll: u32) -> Option<&T> {
    entries.iter().find(|entry| roll <= entry.threshold())
}

/// Draws a roll uniformly from `1..=max` and selects from `entries`.
pub fn roll_threshold<'a, T: Threshold>(
    entries: &'a [T],
    max: u32,
    rng: &mut impl Rng,
) -> (u32, Option<&'a T>) {
    let roll = rng.gen_range(1..=max);
    (roll, first_reaching(entries, roll))
}

/// True when thresholds strictly ascend and stay within `1..=max`.
pub fn thresholds_ascending<T: Threshold>(entries: &[T], max: u32) -> bool {
    let mut previous = 0;
    for entry in entries {
        let t = entry.threshold();
        if t <= previous || t > max {
            return false;
        }
        previous = t;
    }
    true
}
