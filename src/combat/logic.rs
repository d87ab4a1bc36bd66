//! Turn-based encounter resolution.
//!
//! `resolve_player_action` and `resolve_enemy_action` are pure given an RNG.
//! `Encounter` sequences them on timers: the session advances it with the
//! frame delta and it reports an outcome once the post-combat pause ends.

use super::types::*;
use crate::bestiary::{EnemyTag, EnemyType};
use crate::character::derived_stats::DerivedStats;
use crate::core::combat_math::{
    apply_crit, calculate_damage, heal_amount, roll_crit, roll_hit, DamageInput,
};
use crate::core::config::{CombatConfig, SessionConfig};
use crate::core::events::{DisplayVariant, GameEvent, HealthBarOwner, Target};
use crate::core::game_state::PlayerState;
use crate::core::text::{substitute, TextTable};
use crate::items::types::{Skill, SkillEffect};
use rand::Rng;
use tracing::debug;

/// Zero-length phases can chain; this bounds the work done by one advance.
const MAX_TRANSITIONS_PER_ADVANCE: usize = 64;

/// The attacker-side stats the player brings to a turn.
#[derive(Debug, Clone, Copy)]
pub struct Combatant<'a> {
    pub stats: &'a DerivedStats,
    pub level: u32,
    /// Equipped skill and its display name.
    pub skill: Option<(&'a str, &'a Skill)>,
}

/// Settings and text an encounter reads while it runs.
#[derive(Debug, Clone, Copy)]
pub struct CombatRules<'a> {
    pub session: &'a SessionConfig,
    pub combat: &'a CombatConfig,
    pub text: &'a TextTable,
}

/// Resolves the player's turn.
///
/// Draw order: damage variance, hit roll, crit roll. Heals skip the hit check
/// and never crit;
/// a miss zeroes the damage and wins over every other display variant.
pub fn resolve_player_action(
    player: &Combatant,
    skill_turn: bool,
    enemy: &Enemy,
    combat: &CombatConfig,
    rng: &mut impl Rng,
) -> PlayerAction {
    let attack = DamageInput::new(player.stats.attack, player.level, enemy.defense, enemy.level)
        .with_variance(combat.damage_variance);

    let fired = if skill_turn { player.skill } else { None };
    let (mut damage, heal, mut variant) = match fired {
        Some((_, skill)) => match skill.effect {
            SkillEffect::Damage => (
                calculate_damage(&attack.with_multiplier(skill.multiplier), rng),
                0,
                DisplayVariant::Special,
            ),
            SkillEffect::Heal => (
                0,
                heal_amount(player.stats.magic, skill.multiplier),
                DisplayVariant::Healing,
            ),
            SkillEffect::FlyingMastery => {
                let multiplier = if enemy.tag == EnemyTag::Flying {
                    skill.multiplier
                } else {
                    1.0
                };
                (
                    calculate_damage(&attack.with_multiplier(multiplier), rng),
                    0,
                    DisplayVariant::Damage,
                )
            }
            SkillEffect::MagicDamage => {
                let spell = DamageInput {
                    attack: player.stats.magic,
                    ..attack
                }
                .with_multiplier(skill.multiplier);
                (calculate_damage(&spell, rng), 0, DisplayVariant::Special)
            }
        },
        None => (calculate_damage(&attack, rng), 0, DisplayVariant::Damage),
    };

    let (hit_roll, connects) = roll_hit(enemy.evasion, rng);
    let critical = variant != DisplayVariant::Healing && roll_crit(player.stats.crit_chance, rng);

    if critical {
        damage = apply_crit(damage, combat.crit_multiplier);
        if variant == DisplayVariant::Damage {
            variant = DisplayVariant::Critical;
        }
    }

    let hit = variant == DisplayVariant::Healing || connects;
    if !hit {
        debug!(roll = hit_roll, evasion = enemy.evasion, "player missed");
        damage = 0;
        variant = DisplayVariant::Miss;
    }

    PlayerAction {
        damage,
        heal,
        variant,
        hit,
        critical,
        skill_name: fired.map(|(name, _)| name.to_string()),
    }
}

/// Resolves the enemy's attack. Enemies never crit.
pub fn resolve_enemy_action(
    enemy: &Enemy,
    player_stats: &DerivedStats,
    player_level: u32,
    combat: &CombatConfig,
    rng: &mut impl Rng,
) -> EnemyAction {
    let input = DamageInput::new(enemy.attack, enemy.level, player_stats.defense, player_level)
        .with_variance(combat.damage_variance);
    let damage = calculate_damage(&input, rng);
    let (roll, hit) = roll_hit(player_stats.evasion, rng);
    if !hit {
        debug!(roll, evasion = player_stats.evasion, "enemy missed");
    }
    EnemyAction {
        damage: if hit { damage } else { 0 },
        hit,
    }
}

/// One fight between the player and a single enemy.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub enemy: Enemy,
    phase: EncounterPhase,
    /// Turns since the equipped skill last fired.
    cooldown_counter: u32,
    turns: u32,
}

impl Encounter {
    /// Spawns the enemy and starts the pre-combat pause.
    pub fn start(
        enemy_type: &EnemyType,
        rules: &CombatRules,
        events: &mut Vec<GameEvent>,
    ) -> Self {
        let enemy = Enemy::from_type(enemy_type);
        events.push(GameEvent::EnemyAppeared {
            name: enemy.name,
            model: enemy_type.model,
            max_hp: enemy.max_hp,
            boss: enemy.boss,
        });
        events.push(GameEvent::HealthBar {
            who: HealthBarOwner::Enemy,
            current: enemy.current_hp,
            max: enemy.max_hp,
        });
        events.push(GameEvent::log(enemy_type.encounter_quote));
        if enemy.boss {
            events.push(GameEvent::floating(
                rules.text.get("boss_appears"),
                DisplayVariant::Info,
                Target::Info,
            ));
        }
        debug!(enemy = enemy.name, hp = enemy.max_hp, "encounter started");

        Self {
            enemy,
            phase: EncounterPhase::Intro {
                remaining: rules.session.time_before_combat,
            },
            cooldown_counter: 0,
            turns: 0,
        }
    }

    pub fn phase(&self) -> &EncounterPhase {
        &self.phase
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        match self.phase {
            EncounterPhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Runs the encounter forward by `dt` seconds. Leftover time carries into
    /// the next phase, so one large step equals many small ones.
    pub fn advance(
        &mut self,
        mut dt: f64,
        player: &mut PlayerState,
        rules: &CombatRules,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> Option<EncounterOutcome> {
        for _ in 0..MAX_TRANSITIONS_PER_ADVANCE {
            if let Some(outcome) = self.outcome() {
                return Some(outcome);
            }
            let remaining = self.phase.remaining();
            if dt < remaining {
                self.phase.consume(dt);
                return None;
            }
            dt -= remaining;
            let finished = std::mem::replace(&mut self.phase, EncounterPhase::Intro { remaining: 0.0 });
            self.phase = self.next_phase(finished, player, rules, rng, events);
        }
        self.outcome()
    }

    fn next_phase(
        &mut self,
        finished: EncounterPhase,
        player: &mut PlayerState,
        rules: &CombatRules,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> EncounterPhase {
        match finished {
            EncounterPhase::Intro { .. } | EncounterPhase::EnemyRecover { .. } => {
                self.begin_player_turn(player, rules, rng, events)
            }
            EncounterPhase::PlayerStrike { action, .. } => {
                self.land_player_action(action, player, rules, events)
            }
            EncounterPhase::PlayerRecover { .. } => {
                events.push(GameEvent::Animation {
                    target: Target::Enemy,
                    name: "Attack",
                });
                let action =
                    resolve_enemy_action(&self.enemy, player.stats(), player.level, rules.combat, rng);
                EncounterPhase::EnemyStrike {
                    remaining: self.enemy.attack_timing,
                    action,
                }
            }
            EncounterPhase::EnemyStrike { action, .. } => {
                self.land_enemy_action(action, player, rules, rng, events)
            }
            EncounterPhase::Aftermath { outcome, .. } => EncounterPhase::Finished(outcome),
            EncounterPhase::Finished(outcome) => EncounterPhase::Finished(outcome),
        }
    }

    fn begin_player_turn(
        &mut self,
        player: &mut PlayerState,
        rules: &CombatRules,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> EncounterPhase {
        self.turns += 1;
        events.push(GameEvent::Animation {
            target: Target::Player,
            name: "Basic Attack",
        });

        let skill = player
            .equipment
            .skill()
            .map(|(item, skill)| (item.name.as_str(), *skill));
        self.cooldown_counter += 1;
        let skill_turn = match skill {
            Some((_, s)) if self.cooldown_counter >= s.cooldown => {
                self.cooldown_counter = 0;
                true
            }
            _ => false,
        };

        let combatant = Combatant {
            stats: player.stats(),
            level: player.level,
            skill: skill.as_ref().map(|(name, s)| (*name, s)),
        };
        let action = resolve_player_action(&combatant, skill_turn, &self.enemy, rules.combat, rng);
        debug!(turn = self.turns, ?action, "player action");

        if let Some(name) = &action.skill_name {
            events.push(GameEvent::floating(
                name.clone(),
                DisplayVariant::Damage,
                Target::Player,
            ));
        }
        if action.heal > 0 {
            player.heal(action.heal);
            events.push(GameEvent::HealthBar {
                who: HealthBarOwner::Player,
                current: player.current_hp,
                max: player.max_hp(),
            });
        }

        EncounterPhase::PlayerStrike {
            remaining: rules.session.time_player_attack_hit,
            action,
        }
    }

    fn land_player_action(
        &mut self,
        action: PlayerAction,
        player: &PlayerState,
        rules: &CombatRules,
        events: &mut Vec<GameEvent>,
    ) -> EncounterPhase {
        let text = rules.text;
        let skill_name = action.skill_name.as_deref().unwrap_or("");
        let damage = action.damage.to_string();
        let (floating, target, line) = match action.variant {
            DisplayVariant::Healing => {
                let cured = action.heal.to_string();
                let line = text.format("skill_heal", &[("curetotal", cured.as_str()), ("skillname", skill_name)]);
                (cured, Target::Player, line)
            }
            DisplayVariant::Miss => ("miss!".to_string(), Target::Enemy, text.get("player_miss").to_string()),
            DisplayVariant::Special => (
                damage.clone(),
                Target::Enemy,
                text.format("skill_damage", &[("dmg", damage.as_str()), ("skillname", skill_name)]),
            ),
            DisplayVariant::Critical => (
                damage.clone(),
                Target::Enemy,
                text.format("player_critical", &[("dmg", damage.as_str())]),
            ),
            DisplayVariant::Damage | DisplayVariant::Info => (
                damage.clone(),
                Target::Enemy,
                text.format("player_attack", &[("dmg", damage.as_str())]),
            ),
        };
        events.push(GameEvent::floating(floating, action.variant, target));
        events.push(GameEvent::LogLine(line));
        if action.variant == DisplayVariant::Damage {
            events.push(GameEvent::Animation {
                target: Target::Enemy,
                name: "Damage",
            });
        }

        self.enemy.take_damage(action.damage);
        events.push(GameEvent::HealthBar {
            who: HealthBarOwner::Enemy,
            current: self.enemy.current_hp,
            max: self.enemy.max_hp,
        });

        if !self.enemy.is_alive() {
            events.push(GameEvent::Animation {
                target: Target::Enemy,
                name: "Death",
            });
            events.push(GameEvent::log(text.get("enemy_defeated")));
            let outcome = if self.enemy.boss {
                EncounterOutcome::BossVictory
            } else {
                EncounterOutcome::Victory
            };
            debug!(turns = self.turns, hp_left = player.current_hp, "enemy defeated");
            return EncounterPhase::Aftermath {
                remaining: rules.session.time_after_combat,
                outcome,
            };
        }

        EncounterPhase::PlayerRecover {
            remaining: (rules.session.time_between_turns - rules.session.time_player_attack_hit).max(0.0),
        }
    }

    fn land_enemy_action(
        &mut self,
        action: EnemyAction,
        player: &mut PlayerState,
        rules: &CombatRules,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> EncounterPhase {
        if action.hit {
            player.take_damage(action.damage);
            events.push(GameEvent::Animation {
                target: Target::Player,
                name: "Damaged",
            });
            events.push(GameEvent::floating(
                action.damage.to_string(),
                DisplayVariant::Damage,
                Target::Player,
            ));
            let dealt = action.damage.to_string();
            let quote = substitute(self.enemy.battle_quote(rng), &[("dmg", dealt.as_str())]);
            events.push(GameEvent::LogLine(quote));
        } else {
            events.push(GameEvent::floating("miss!", DisplayVariant::Miss, Target::Player));
            events.push(GameEvent::log(self.enemy.miss_quote()));
        }
        events.push(GameEvent::HealthBar {
            who: HealthBarOwner::Player,
            current: player.current_hp,
            max: player.max_hp(),
        });

        if !player.is_alive() {
            return EncounterPhase::Aftermath {
                remaining: rules.session.time_after_combat,
                outcome: EncounterOutcome::Defeat,
            };
        }

        EncounterPhase::EnemyRecover {
            remaining: (rules.session.time_between_turns - self.enemy.attack_timing).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bestiary::Bestiary;
    use crate::core::config::GameConfig;
    use crate::items::catalog::Catalog;
    use crate::items::types::ItemCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

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

    fn bare_stats(crit_chance: u32) -> DerivedStats {
        DerivedStats {
            max_hp: 220,
            attack: 14,
            magic: 10,
            evasion: 5,
            defense: 5,
            crit_chance,
        }
    }

    #[test]
    fn test_standard_attack_is_deterministic_without_variance() {
        let (_, bestiary) = fixtures();
        let imp = Enemy::from_type(bestiary.get(1).unwrap());
        let stats = bare_stats(0);
        let player = Combatant {
            stats: &stats,
            level: 1,
            skill: None,
        };
        let mut rng = StdRng::seed_from_u64(8);
        // imp evasion 0: every roll connects, crit chance 0 never crits
        for _ in 0..50 {
            let action = resolve_player_action(&player, false, &imp, &no_variance(), &mut rng);
            assert_eq!(action.damage, 30);
            assert_eq!(action.variant, DisplayVariant::Damage);
            assert!(action.hit);
        }
    }

    #[test]
    fn test_guaranteed_crit_multiplies_and_relabels() {
        let (_, bestiary) = fixtures();
        let imp = Enemy::from_type(bestiary.get(1).unwrap());
        let stats = bare_stats(101);
        let player = Combatant {
            stats: &stats,
            level: 1,
            skill: None,
        };
        let mut rng = StdRng::seed_from_u64(9);
        let action = resolve_player_action(&player, false, &imp, &no_variance(), &mut rng);
        assert!(action.critical);
        assert_eq!(action.damage, 45);
        assert_eq!(action.variant, DisplayVariant::Critical);
    }

    #[test]
    fn test_damage_skill_keeps_special_label_on_crit() {
        let (_, bestiary) = fixtures();
        let imp = Enemy::from_type(bestiary.get(1).unwrap());
        let stats = bare_stats(101);
        let skill = Skill {
            effect: SkillEffect::Damage,
            cooldown: 5,
            multiplier: 1.8,
        };
        let player = Combatant {
            stats: &stats,
            level: 1,
            skill: Some(("Triple Stab", &skill)),
        };
        let mut rng = StdRng::seed_from_u64(10);
        let action = resolve_player_action(&player, true, &imp, &no_variance(), &mut rng);
        assert_eq!(action.variant, DisplayVariant::Special);
        assert!(action.critical);
        assert_eq!(action.skill_name.as_deref(), Some("Triple Stab"));
        // 136 * 1.8 / 4.4 = 55.6 -> 55, crit -> 82
        assert_eq!(action.damage, 82);
    }

    #[test]
    fn test_full_evasion_always_misses() {
        let (_, bestiary) = fixtures();
        let mut imp = Enemy::from_type(bestiary.get(1).unwrap());
        imp.evasion = 100;
        let stats = bare_stats(101);
        let player = Combatant {
            stats: &stats,
            level: 1,
            skill: None,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let action = resolve_player_action(&player, false, &imp, &CombatConfig::default(), &mut rng);
            assert_eq!(action.damage, 0);
            assert_eq!(action.variant, DisplayVariant::Miss);
        }
    }

    #[test]
    fn test_heal_ignores_evasion() {
        let (_, bestiary) = fixtures();
        let mut imp = Enemy::from_type(bestiary.get(1).unwrap());
        imp.evasion = 100;
        let stats = bare_stats(0);
        let skill = Skill {
            effect: SkillEffect::Heal,
            cooldown: 4,
            multiplier: 2.5,
        };
        let player = Combatant {
            stats: &stats,
            level: 1,
            skill: Some(("Mend Wounds", &skill)),
        };
        let mut rng = StdRng::seed_from_u64(12);
        let action = resolve_player_action(&player, true, &imp, &CombatConfig::default(), &mut rng);
        assert_eq!(action.variant, DisplayVariant::Healing);
        assert_eq!(action.heal, 50);
        assert_eq!(action.damage, 0);
        assert!(action.hit);
    }

    #[test]
    fn test_heal_never_crits() {
        let (_, bestiary) = fixtures();
        let imp = Enemy::from_type(bestiary.get(1).unwrap());
        let stats = bare_stats(101);
        let skill = Skill {
            effect: SkillEffect::Heal,
            cooldown: 4,
            multiplier: 2.5,
        };
        let player = Combatant {
            stats: &stats,
            level: 1,
            skill: Some(("Mend Wounds", &skill)),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        for _ in 0..50 {
            let action = resolve_player_action(&player, true, &imp, &no_variance(), &mut rng);
            assert_eq!(action.variant, DisplayVariant::Healing);
            assert!(!action.critical);
            assert_eq!(action.heal, 50);
        }
    }

    #[test]
    fn test_flying_mastery_only_boosts_flying() {
        let (_, bestiary) = fixtures();
        let mut target = Enemy::from_type(bestiary.get(1).unwrap());
        let stats = bare_stats(0);
        let skill = Skill {
            effect: SkillEffect::FlyingMastery,
            cooldown: 0,
            multiplier: 1.4,
        };
        let player = Combatant {
            stats: &stats,
            level: 1,
            skill: Some(("Elemental Killer", &skill)),
        };
        let mut rng = StdRng::seed_from_u64(13);
        let grounded = resolve_player_action(&player, true, &target, &no_variance(), &mut rng);
        assert_eq!(grounded.damage, 30);

        target.tag = EnemyTag::Flying;
        let flying = resolve_player_action(&player, true, &target, &no_variance(), &mut rng);
        // 136 * 1.4 / 4.4 = 43.3
        assert_eq!(flying.damage, 43);
        assert_eq!(flying.variant, DisplayVariant::Damage);
    }

    #[test]
    fn test_magic_damage_uses_magic_stat() {
        let (_, bestiary) = fixtures();
        let imp = Enemy::from_type(bestiary.get(1).unwrap());
        let stats = bare_stats(0);
        let skill = Skill {
            effect: SkillEffect::MagicDamage,
            cooldown: 6,
            multiplier: 4.0,
        };
        let player = Combatant {
            stats: &stats,
            level: 1,
            skill: Some(("Thundershock", &skill)),
        };
        let mut rng = StdRng::seed_from_u64(14);
        let action = resolve_player_action(&player, true, &imp, &no_variance(), &mut rng);
        // (10 + 10/4) * 4 * 8 = 384; 384 / 4.4 = 87.2
        assert_eq!(action.damage, 87);
        assert_eq!(action.variant, DisplayVariant::Special);
    }

    #[test]
    fn test_enemy_action_against_level_one_player() {
        let (_, bestiary) = fixtures();
        let imp = Enemy::from_type(bestiary.get(1).unwrap());
        let mut stats = bare_stats(0);
        stats.evasion = 0;
        let mut rng = StdRng::seed_from_u64(15);
        let action = resolve_enemy_action(&imp, &stats, 1, &no_variance(), &mut rng);
        assert!(action.hit);
        assert_eq!(action.damage, 74);
    }

    #[test]
    fn test_encounter_runs_to_victory_against_imp() {
        let (catalog, bestiary) = fixtures();
        let config = GameConfig::default();
        let text = TextTable::english();
        let rules = CombatRules {
            session: &config.session,
            combat: &config.combat,
            text: &text,
        };
        let mut player = PlayerState::new_character(1, &catalog);
        // a level 4 character with the best weapon outclasses an imp
        player.level = 4;
        player.equip(ItemCategory::Weapon, catalog.get(ItemCategory::Weapon, 3));
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let mut events = Vec::new();
        let mut encounter = Encounter::start(bestiary.get(1).unwrap(), &rules, &mut events);

        let mut outcome = None;
        for _ in 0..2000 {
            outcome = encounter.advance(0.05, &mut player, &rules, &mut rng, &mut events);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(EncounterOutcome::Victory));
        assert!(!encounter.enemy.is_alive());
        assert!(events.iter().any(|e| matches!(e, GameEvent::EnemyAppeared { name: "Imp", .. })));
    }

    #[test]
    fn test_enemy_never_acts_after_dying() {
        let (catalog, bestiary) = fixtures();
        let config = GameConfig::default();
        let text = TextTable::english();
        let rules = CombatRules {
            session: &config.session,
            combat: &config.combat,
            text: &text,
        };
        let mut player = PlayerState::new_character(1, &catalog);
        let mut rng = StdRng::seed_from_u64(17);
        let mut events = Vec::new();
        let mut encounter = Encounter::start(bestiary.get(1).unwrap(), &rules, &mut events);
        encounter.enemy.current_hp = 1;
        let hp_before = player.current_hp;

        // intro + strike land, well short of the enemy's turn
        encounter.advance(1.5, &mut player, &rules, &mut rng, &mut events);
        assert!(!encounter.enemy.is_alive());
        assert!(matches!(encounter.phase(), EncounterPhase::Aftermath { .. }));

        let outcome = encounter.advance(1.0, &mut player, &rules, &mut rng, &mut events);
        assert_eq!(outcome, Some(EncounterOutcome::Victory));
        assert_eq!(player.current_hp, hp_before);
    }

    #[test]
    fn test_boss_kill_reports_boss_victory() {
        let (catalog, bestiary) = fixtures();
        let config = GameConfig::default();
        let text = TextTable::english();
        let rules = CombatRules {
            session: &config.session,
            combat: &config.combat,
            text: &text,
        };
        let mut player = PlayerState::new_character(1, &catalog);
        let mut rng = StdRng::seed_from_u64(18);
        let mut events = Vec::new();
        let mut encounter = Encounter::start(bestiary.get(7).unwrap(), &rules, &mut events);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::FloatingText { variant: DisplayVariant::Info, .. })));
        encounter.enemy.current_hp = 1;
        let outcome = encounter.advance(10.0, &mut player, &rules, &mut rng, &mut events);
        assert_eq!(outcome, Some(EncounterOutcome::BossVictory));
    }

    #[test]
    fn test_weak_player_is_defeated() {
        let (catalog, bestiary) = fixtures();
        let config = GameConfig::default();
        let text = TextTable::english();
        let rules = CombatRules {
            session: &config.session,
            combat: &config.combat,
            text: &text,
        };
        let mut player = PlayerState::new_character(1, &catalog);
        let mut rng = StdRng::seed_from_u64(19);
        let mut events = Vec::new();
        // The God of Wishes has 4000 HP and hits far harder than a level 1 character
        let mut encounter = Encounter::start(bestiary.get(7).unwrap(), &rules, &mut events);
        let mut outcome = None;
        for _ in 0..600 {
            outcome = encounter.advance(0.5, &mut player, &rules, &mut rng, &mut events);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(EncounterOutcome::Defeat));
        assert_eq!(player.current_hp, 0);
    }

    #[test]
    fn test_skill_fires_on_cooldown() {
        let (catalog, bestiary) = fixtures();
        let config = GameConfig::default();
        let text = TextTable::english();
        let rules = CombatRules {
            session: &config.session,
            combat: &config.combat,
            text: &text,
        };
        let mut player = PlayerState::new_character(1, &catalog);
        player.equip(ItemCategory::Skill, catalog.get(ItemCategory::Skill, 2));
        let mut rng = StdRng::seed_from_u64(20);
        let mut events = Vec::new();
        let mut encounter = Encounter::start(bestiary.get(4).unwrap(), &rules, &mut events);
        encounter.enemy.current_hp = u32::MAX / 2;
        player.attributes.set(crate::character::attributes::AttributeType::Stamina, 500);
        player.recompute_derived_stats();

        let mut skill_turns = Vec::new();
        for _ in 0..1000 {
            events.clear();
            encounter.advance(0.05, &mut player, &rules, &mut rng, &mut events);
            let fired = events.iter().any(|e| {
                matches!(e, GameEvent::FloatingText { text, target: Target::Player, variant: DisplayVariant::Damage } if text == "Mend Wounds")
            });
            if fired {
                skill_turns.push(encounter.turns());
            }
        }
        // cooldown 4: turns 4, 8, 12, ...
        assert!(skill_turns.len() >= 2);
        assert_eq!(&skill_turns[..2], &[4, 8]);
    }
}
