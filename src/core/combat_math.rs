//! Pure combat formulas: damage, hit and critical rolls.
//!
//! Nothing here touches session state; the encounter resolver and the tests
//! feed stats and an RNG in and get numbers out.

use crate::core::constants::*;
use rand::Rng;

/// Inputs to the damage formula for one attack.
#[derive(Debug, Clone, Copy)]
pub struct DamageInput {
    pub attack: u32,
    pub attacker_level: u32,
    pub target_defense: u32,
    pub target_level: u32,
    pub multiplier: f64,
    pub variance: f64,
}

impl DamageInput {
    pub fn new(attack: u32, attacker_level: u32, target_defense: u32, target_level: u32) -> Self {
        Self {
            attack,
            attacker_level,
            target_defense,
            target_level,
            multiplier: 1.0,
            variance: DAMAGE_VARIANCE,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }
}

/// Draws the variance factor from `[1 - variance, 1 + variance]`.
pub fn roll_variance(variance: f64, rng: &mut impl Rng) -> f64 {
    if variance <= 0.0 {
        return 1.0;
    }
    rng.gen_range((1.0 - variance)..=(1.0 + variance))
}

/// Damage formula with a fixed variance factor already drawn.
///
/// `base = (atk + atk*lvl/4) * mult * 8`, scaled by `factor`, then divided by
/// `def + clamp(target_lvl - lvl, -5, 5) * 0.1 * def`. Never below 1.
pub fn damage_with_factor(input: &DamageInput, factor: f64) -> u32 {
    // atk*lvl/4 is integer division
    let level_bonus = (input.attack * input.attacker_level) / 4;
    let mut base = (input.attack + level_bonus) as f64 * input.multiplier * DAMAGE_BASE_FACTOR;
    base *= factor;

    let level_delta = (input.target_level as i32 - input.attacker_level as i32)
        .clamp(-LEVEL_DELTA_CAP, LEVEL_DELTA_CAP);
    let defense = input.target_defense as f64;
    let mitigation = defense + (level_delta as f64 * LEVEL_DELTA_DEFENSE_STEP) * defense;
    if mitigation > 0.0 {
        base /= mitigation;
    }

    if base.is_finite() && base >= 1.0 {
        base.floor() as u32
    } else {
        1
    }
}

/// Damage formula including the variance roll.
pub fn calculate_damage(input: &DamageInput, rng: &mut impl Rng) -> u32 {
    let factor = roll_variance(input.variance, rng);
    damage_with_factor(input, factor)
}

/// Rolls `1..=100`; the attack connects when the roll is strictly above evasion.
pub fn roll_hit(target_evasion: u32, rng: &mut impl Rng) -> (u32, bool) {
    let roll = rng.gen_range(1..=HIT_ROLL_MAX);
    (roll, roll > target_evasion)
}

/// Rolls `1..=100`; critical when the roll is strictly below the crit chance.
pub fn roll_crit(crit_chance: u32, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=HIT_ROLL_MAX) < crit_chance
}

/// Applies the critical multiplier, flooring the result.
pub fn apply_crit(damage: u32, multiplier: f64) -> u32 {
    (damage as f64 * multiplier).floor() as u32
}

/// Heal amount from a healing skill: `floor(magic * 2 * mult)`.
pub fn heal_amount(magic: u32, multiplier: f64) -> u32 {
    (magic as f64 * HEAL_MAGIC_FACTOR * multiplier).floor().max(0.0) as u32
}

/// Subtracts damage from HP, floored at zero.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_level_one_player_against_imp_without_variance() {
        // floor(12 * 1.2) = 14 attack; (14 + 14/4) * 8 = 136; 136 / (4 + 0.1*4) = 30.9
        let input = DamageInput::new(14, 1, 4, 2).with_variance(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(calculate_damage(&input, &mut rng), 30);
    }

    #[test]
    fn test_imp_against_level_one_player() {
        // (28 + 56/4) * 8 = 336; 336 / (5 - 0.1*5) = 74.6
        let input = DamageInput::new(28, 2, 5, 1);
        assert_eq!(damage_with_factor(&input, 1.0), 74);
    }

    #[test]
    fn test_level_delta_is_clamped() {
        let far = DamageInput::new(20, 1, 10, 50);
        let capped = DamageInput::new(20, 1, 10, 6);
        assert_eq!(damage_with_factor(&far, 1.0), damage_with_factor(&capped, 1.0));
    }

    #[test]
    fn test_multiplier_scales_damage() {
        let plain = DamageInput::new(20, 3, 6, 3);
        let boosted = plain.with_multiplier(1.8);
        assert!(damage_with_factor(&boosted, 1.0) > damage_with_factor(&plain, 1.0));
    }

    #[test]
    fn test_minimum_damage_is_one() {
        let mut rng = StdRng::seed_from_u64(99);
        for defense in 1..200 {
            for level_gap in 0..12 {
                let input = DamageInput::new(1, 1, defense, 1 + level_gap).with_variance(0.9);
                assert!(calculate_damage(&input, &mut rng) >= 1);
            }
        }
        let zero_attack = DamageInput::new(0, 1, 50, 10);
        assert_eq!(damage_with_factor(&zero_attack, 0.8), 1);
    }

    #[test]
    fn test_zero_defense_does_not_divide() {
        let input = DamageInput::new(10, 1, 0, 1);
        // (10 + 10/4) * 8, left unmitigated
        assert_eq!(damage_with_factor(&input, 1.0), 96);
    }

    #[test]
    fn test_variance_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let factor = roll_variance(0.2, &mut rng);
            assert!((0.8..=1.2).contains(&factor));
        }
        assert_eq!(roll_variance(0.0, &mut rng), 1.0);
    }

    #[test]
    fn test_hit_roll_boundaries() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(roll_hit(0, &mut rng).1);
            assert!(!roll_hit(100, &mut rng).1);
        }
    }

    #[test]
    fn test_crit_roll_boundaries() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            assert!(!roll_crit(0, &mut rng));
            assert!(!roll_crit(1, &mut rng));
            assert!(roll_crit(101, &mut rng));
        }
    }

    #[test]
    fn test_crit_and_heal_floor() {
        assert_eq!(apply_crit(31, 1.5), 46);
        assert_eq!(heal_amount(10, 2.5), 50);
        assert_eq!(heal_amount(11, 2.5), 55);
        assert_eq!(heal_amount(13, 1.3), 33);
    }

    #[test]
    fn test_apply_damage_floors_at_zero() {
        assert_eq!(apply_damage(100, 30), 70);
        assert_eq!(apply_damage(30, 100), 0);
    }
}
