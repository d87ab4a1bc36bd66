//! Combat flow integration tests
//!
//! Exercises the damage formula, player and enemy turn resolution and whole
//! encounters run through the public combat API.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use vaporquest::bestiary::Bestiary;
use vaporquest::character::{Attributes, DerivedStats};
use vaporquest::combat::{
    resolve_enemy_action, resolve_player_action, CombatRules, Combatant, Encounter,
    EncounterOutcome, EncounterPhase, Enemy,
};
use vaporquest::core::combat_math::{damage_with_factor, DamageInput};
use vaporquest::core::{CombatConfig, DisplayVariant, GameConfig, GameEvent, PlayerState, TextTable};
use vaporquest::items::{Catalog, ItemCategory};

fn fixtures() -> (Catalog, Bestiary) {
    let catalog = Catalog::standard().unwrap();
    let bestiary = Bestiary::standard(&catalog).unwrap();
    (catalog, bestiary)
}

fn no_variance() -> CombatConfig {
    CombatConfig {
        damage_variance: 0.0,
        ..CombatConfig::default()
    }
}

// ============================================================================
// Damage formula
// ============================================================================

#[test]
fn test_level_one_attack_against_defense_four_level_two() {
    // str 12 -> attack floor(14.4) = 14, no equipment
    let mut player = PlayerState::empty();
    player.attributes = Attributes::from_values(12, 10, 10, 10);
    player.recompute_derived_stats();
    assert_eq!(player.stats().attack, 14);

    // (14 + 14*1/4) * 8 = 136; 136 / (4 + 1 * 0.1 * 4) = 30.9
    let input = DamageInput::new(14, 1, 4, 2);
    assert_eq!(damage_with_factor(&input, 1.0), 30);

    let stats = DerivedStats {
        crit_chance: 0,
        ..*player.stats()
    };
    let combatant = Combatant {
        stats: &stats,
        level: 1,
        skill: None,
    };
    let (_, bestiary) = fixtures();
    let imp = Enemy::from_type(bestiary.get(1).unwrap());
    assert_eq!((imp.defense, imp.level), (4, 2));

    let mut rng = StdRng::seed_from_u64(3);
    let action = resolve_player_action(&combatant, false, &imp, &no_variance(), &mut rng);
    assert_eq!(action.damage, 30);
    assert_eq!(action.variant, DisplayVariant::Damage);
}

#[test]
fn test_damage_never_below_one() {
    for attack in [0, 1, 5, 40] {
        for defense in [1, 10, 500, 100_000] {
            for (attacker, target) in [(1, 10), (10, 1), (1, 1), (10, 10)] {
                for factor in [0.8, 1.0, 1.2] {
                    let input = DamageInput::new(attack, attacker, defense, target);
                    assert!(
                        damage_with_factor(&input, factor) >= 1,
                        "atk {} def {} lvl {}->{} factor {}",
                        attack,
                        defense,
                        attacker,
                        target,
                        factor
                    );
                }
            }
        }
    }
}

#[test]
fn test_enemy_misses_an_untouchable_player() {
    let (_, bestiary) = fixtures();
    let sentry = Enemy::from_type(bestiary.get(3).unwrap());
    let stats = DerivedStats {
        max_hp: 300,
        attack: 20,
        magic: 10,
        evasion: 100,
        defense: 8,
        crit_chance: 5,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for _ in 0..100 {
        let action = resolve_enemy_action(&sentry, &stats, 3, &CombatConfig::default(), &mut rng);
        assert!(!action.hit);
        assert_eq!(action.damage, 0);
    }
}

// ============================================================================
// Whole encounters
// ============================================================================

fn run_encounter(
    encounter: &mut Encounter,
    player: &mut PlayerState,
    rules: &CombatRules,
    rng: &mut StdRng,
    events: &mut Vec<GameEvent>,
) -> EncounterOutcome {
    for _ in 0..100_000 {
        if let Some(outcome) = encounter.advance(0.05, player, rules, rng, events) {
            return outcome;
        }
    }
    panic!("encounter never finished");
}

#[test]
fn test_strong_player_wins_without_being_hit() {
    let (catalog, bestiary) = fixtures();
    let config = GameConfig::default();
    let text = TextTable::english();
    let rules = CombatRules {
        session: &config.session,
        combat: &config.combat,
        text: &text,
    };

    let mut player = PlayerState::new_character(1, &catalog);
    player.attributes = Attributes::from_values(1000, 10, 10, 10);
    player.recompute_derived_stats();
    let full_hp = player.current_hp;

    let mut events = Vec::new();
    let mut encounter = Encounter::start(bestiary.get(2).unwrap(), &rules, &mut events);
    assert!(matches!(events[0], GameEvent::EnemyAppeared { name: "Rentaur", .. }));

    let mut rng = StdRng::seed_from_u64(21);
    let outcome = run_encounter(&mut encounter, &mut player, &rules, &mut rng, &mut events);
    assert_eq!(outcome, EncounterOutcome::Victory);
    assert_eq!(encounter.turns(), 1);
    assert!(!encounter.enemy.is_alive());
    assert_eq!(player.current_hp, full_hp);
    assert!(matches!(encounter.phase(), EncounterPhase::Finished(_)));
    assert!(events.contains(&GameEvent::log(text.get("enemy_defeated"))));
}

#[test]
fn test_weak_player_is_defeated_by_the_boss() {
    let (catalog, bestiary) = fixtures();
    let config = GameConfig::default();
    let text = TextTable::english();
    let rules = CombatRules {
        session: &config.session,
        combat: &config.combat,
        text: &text,
    };

    let mut player = PlayerState::new_character(1, &catalog);
    let mut events = Vec::new();
    let god = bestiary.get(7).unwrap();
    let mut encounter = Encounter::start(god, &rules, &mut events);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::FloatingText { variant: DisplayVariant::Info, .. }
    )));

    let mut rng = StdRng::seed_from_u64(22);
    let outcome = run_encounter(&mut encounter, &mut player, &rules, &mut rng, &mut events);
    assert_eq!(outcome, EncounterOutcome::Defeat);
    assert_eq!(player.current_hp, 0);
    assert!(encounter.enemy.is_alive());
}

#[test]
fn test_equipped_skill_fires_on_its_cooldown() {
    let (catalog, bestiary) = fixtures();
    let mut config = GameConfig::default();
    config.combat.damage_variance = 0.0;
    let text = TextTable::english();
    let rules = CombatRules {
        session: &config.session,
        combat: &config.combat,
        text: &text,
    };

    // Mend Wounds: heal every 4th turn
    let mut player = PlayerState::new_character(1, &catalog);
    player.equip(ItemCategory::Skill, catalog.get(ItemCategory::Skill, 2));
    let mut events = Vec::new();
    let mut encounter = Encounter::start(bestiary.get(4).unwrap(), &rules, &mut events);
    let mut rng = StdRng::seed_from_u64(23);
    run_encounter(&mut encounter, &mut player, &rules, &mut rng, &mut events);

    let heals = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::FloatingText {
                    variant: DisplayVariant::Healing,
                    ..
                }
            )
        })
        .count();
    assert_eq!(heals, (encounter.turns() / 4) as usize);
}
