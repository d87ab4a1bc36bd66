//! The top-level playthrough controller.
//!
//! A [`Session`] owns the player, the active encounter and every timer, and
//! is driven by two kinds of input: named actions (new game, move area,
//! equip, claim loot, final blow) and [`Session::tick`] with the elapsed
//! time. Both return the [`GameEvent`]s the presentation layer should show.
//! Requests that arrive mid-fight or while fainted are queued and applied
//! at the next safe point of the roam loop.

use crate::character::save::{SaveManager, SavedGame};
use crate::combat::logic::{CombatRules, Encounter};
use crate::combat::types::EncounterOutcome;
use crate::core::config::{DebugConfig, GameConfig};
use crate::core::constants::MAX_LEVEL;
use crate::core::error::{GameError, NavigationError};
use crate::core::events::{Cutscene, DisplayVariant, GameEvent, HealthBarOwner, Target};
use crate::core::game_data::GameData;
use crate::core::game_state::PlayerState;
use crate::core::text::TextTable;
use crate::items::drops::roll_loot;
use crate::items::equipment::{EquipQueue, EquipTarget};
use crate::items::inventory::Unpacked;
use crate::items::types::ItemCategory;
use crate::zones::{destination, unlocks_next_area, AreaMove};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Session {
    data: Arc<GameData>,
    config: GameConfig,
    text: TextTable,
    saves: SaveManager,
    player: PlayerState,
    /// `None` while on the main menu or after the final blow.
    current_area: Option<u32>,
    area_ready: bool,
    encounter: Option<Encounter>,
    fainted: bool,
    faint_timer: f64,
    roam_timer: f64,
    queued_area: Option<u32>,
    equip_queue: EquipQueue,
    final_blow_pending: bool,
    cutscene: Option<Cutscene>,
}

impl Session {
    pub fn new(data: Arc<GameData>, config: GameConfig) -> Result<Self, GameError> {
        let text = TextTable::load(config.text_path.as_deref());
        let saves = SaveManager::new(&config.save)?;
        Ok(Self::with_parts(data, config, text, saves))
    }

    /// Builds a session from already-resolved collaborators.
    pub fn with_parts(
        data: Arc<GameData>,
        config: GameConfig,
        text: TextTable,
        saves: SaveManager,
    ) -> Self {
        Self {
            data,
            config,
            text,
            saves,
            player: PlayerState::empty(),
            current_area: None,
            area_ready: false,
            encounter: None,
            fainted: false,
            faint_timer: 0.0,
            roam_timer: 0.0,
            queued_area: None,
            equip_queue: EquipQueue::new(),
            final_blow_pending: false,
            cutscene: None,
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn text(&self) -> &TextTable {
        &self.text
    }

    pub fn saves(&self) -> &SaveManager {
        &self.saves
    }

    pub fn current_area(&self) -> Option<u32> {
        self.current_area
    }

    pub fn is_area_ready(&self) -> bool {
        self.area_ready
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn is_in_combat(&self) -> bool {
        self.encounter.is_some()
    }

    pub fn is_fainted(&self) -> bool {
        self.fainted
    }

    pub fn faint_timer(&self) -> f64 {
        self.faint_timer
    }

    /// Seconds a faint lasts with the current equipment.
    pub fn recovery_time(&self) -> f64 {
        self.config
            .session
            .recovery_time(self.player.has_peace_necklace())
    }

    pub fn roam_timer(&self) -> f64 {
        self.roam_timer
    }

    pub fn queued_area(&self) -> Option<u32> {
        self.queued_area
    }

    pub fn equip_queue(&self) -> &EquipQueue {
        &self.equip_queue
    }

    pub fn is_final_blow_pending(&self) -> bool {
        self.final_blow_pending
    }

    pub fn cutscene(&self) -> Option<Cutscene> {
        self.cutscene
    }

    /// True once a game is running, including its cutscenes.
    pub fn is_playing(&self) -> bool {
        self.current_area.is_some() || self.cutscene.is_some()
    }

    // ── Main menu ───────────────────────────────────────────────

    /// Starts a fresh playthrough at the configured level and area.
    pub fn new_game(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.reset_transient();

        let debug = &self.config.debug;
        let (level, area) = if debug.debug_mode {
            (debug.starting_level, debug.starting_area)
        } else {
            (1, 1)
        };
        let area = if self.data.area(area).is_some() { area } else { 1 };
        self.player = PlayerState::new_character(level, &self.data.catalog);
        if debug.debug_mode && debug.unlock_all_gear {
            self.player.unlock_all(&self.data.catalog);
        }
        let skip_intro = debug.debug_mode && debug.skip_intro;

        self.emit_equipment_icons(&mut events);
        self.emit_player_health(&mut events);
        events.push(GameEvent::LootBoxCount(self.player.loot_box.len()));
        info!(level = self.player.level, area, "new game");

        self.current_area = Some(area);
        if skip_intro {
            self.load_area(area, &mut events);
        } else {
            self.area_ready = false;
            self.cutscene = Some(Cutscene::Intro);
            events.push(GameEvent::PlayCutscene(Cutscene::Intro));
        }
        events
    }

    /// Restores the configured save slot and enters its area.
    pub fn load_game(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let slot = self.config.save.slot;
        let saved = self.saves.load(slot)?;
        let mut events = Vec::new();
        self.reset_transient();

        self.player = saved.restore();
        self.emit_equipment_icons(&mut events);
        self.emit_player_health(&mut events);
        events.push(GameEvent::LootBoxCount(self.player.loot_box.len()));

        let area = saved
            .current_area
            .filter(|id| self.data.area(*id).is_some())
            .unwrap_or(1);
        info!(slot, level = self.player.level, area, "game loaded");
        self.load_area(area, &mut events);
        Ok(events)
    }

    /// Writes the current playthrough to the configured slot.
    pub fn save_game(&self) -> Result<GameEvent, GameError> {
        let slot = self.config.save.slot;
        let snapshot = SavedGame::capture(&self.player, self.current_area);
        self.saves.save(slot, &snapshot)?;
        Ok(GameEvent::Saved { slot })
    }

    /// Abandons the playthrough and returns to the main menu.
    pub fn quit(&mut self) -> Vec<GameEvent> {
        self.reset_transient();
        self.player = PlayerState::empty();
        info!("returned to main menu");
        vec![GameEvent::EnemyCleared, GameEvent::ReturnToMainMenu]
    }

    fn reset_transient(&mut self) {
        self.current_area = None;
        self.area_ready = false;
        self.encounter = None;
        self.fainted = false;
        self.faint_timer = 0.0;
        self.roam_timer = 0.0;
        self.queued_area = None;
        self.equip_queue.clear();
        self.final_blow_pending = false;
        self.cutscene = None;
    }

    // ── Areas ───────────────────────────────────────────────────

    /// Moves to the next or previous area, or queues the move if the player
    /// is fighting or fainted. A rejected move changes nothing.
    pub fn try_move_area(&mut self, direction: AreaMove) -> Result<Vec<GameEvent>, NavigationError> {
        if self.final_blow_pending {
            return Err(NavigationError::FinalBlowPending);
        }
        let target = destination(
            &self.data.areas,
            self.current_area,
            self.player.level,
            direction,
        )?;

        let mut events = Vec::new();
        if self.is_in_combat() || self.fainted {
            self.queued_area = Some(target);
            events.push(GameEvent::log(self.text.get("area_change_queued")));
            debug!(area = target, "area change queued");
        } else {
            self.load_area(target, &mut events);
        }
        Ok(events)
    }

    /// [`Session::try_move_area`] with the rejection shown to the player.
    pub fn move_area(&mut self, direction: AreaMove) -> Vec<GameEvent> {
        match self.try_move_area(direction) {
            Ok(events) => events,
            Err(err) => {
                warn!(?direction, "area move rejected: {}", err);
                vec![GameEvent::ShowError(err.to_string())]
            }
        }
    }

    pub fn attempt_next_area(&mut self) -> Vec<GameEvent> {
        self.move_area(AreaMove::Next)
    }

    pub fn attempt_previous_area(&mut self) -> Vec<GameEvent> {
        self.move_area(AreaMove::Previous)
    }

    fn load_area(&mut self, id: u32, events: &mut Vec<GameEvent>) {
        let Some(area) = self.data.area(id) else {
            warn!(area = id, "unknown area");
            return;
        };
        self.current_area = Some(id);
        self.roam_timer = 0.0;
        self.area_ready = !self.config.session.require_area_ready;
        events.push(GameEvent::LoadArea {
            area: id,
            name: area.name,
            subtitle: area.subtitle,
        });
        info!(area = id, name = area.name, "entered area");
    }

    /// Releases the session after the presentation finished loading an area.
    pub fn confirm_area_loaded(&mut self) {
        if self.current_area.is_some() {
            self.area_ready = true;
        }
    }

    // ── Equipment and loot ──────────────────────────────────────

    /// Equips (or clears, with `None`) a slot, queuing the change while an
    /// encounter is running. Returns false when the request is ignored.
    pub fn try_equip(
        &mut self,
        category: ItemCategory,
        target: EquipTarget,
    ) -> (bool, Vec<GameEvent>) {
        let mut events = Vec::new();
        if self.final_blow_pending {
            debug!(?category, "equip ignored during final blow");
            return (false, events);
        }
        if target.as_ref().is_some_and(|item| item.category != category) {
            debug!(?category, "equip ignored: item belongs to another slot");
            return (false, events);
        }

        if self.is_in_combat() {
            let queued = self
                .equip_queue
                .toggle(category, target, &self.player.equipment);
            events.push(GameEvent::EquipQueueMarker {
                category,
                visible: queued,
            });
            events.push(GameEvent::EquipQueueVisible(self.equip_queue.is_pending()));
            if queued {
                events.push(GameEvent::log(self.text.get("equip_change_queued")));
            }
        } else {
            let icon = self.player.equip(category, target);
            events.push(GameEvent::EquippedIcon { category, icon });
            self.emit_player_health(&mut events);
        }
        (true, events)
    }

    fn apply_queued_equipment(&mut self, events: &mut Vec<GameEvent>) {
        for (category, target) in self.equip_queue.drain() {
            let icon = self.player.equip(category, target);
            events.push(GameEvent::EquippedIcon { category, icon });
            events.push(GameEvent::EquipQueueMarker {
                category,
                visible: false,
            });
        }
        events.push(GameEvent::EquipQueueVisible(false));
        self.emit_player_health(events);
    }

    /// Opens one loot box entry. Opening the same entry twice does nothing.
    pub fn unpack_loot(&mut self, index: usize) -> Vec<GameEvent> {
        let player = &mut self.player;
        match player.loot_box.unpack(index, &mut player.inventory) {
            Unpacked::Added(item) | Unpacked::Duplicate(item) => vec![GameEvent::ItemRevealed {
                index,
                icon: item.icon.clone(),
            }],
            Unpacked::Ignored => {
                debug!(index, "loot entry already opened or missing");
                Vec::new()
            }
        }
    }

    /// Drops opened entries from the loot box.
    pub fn clear_opened_loot(&mut self) -> Vec<GameEvent> {
        self.player.loot_box.clear_opened();
        vec![GameEvent::LootBoxCount(self.player.loot_box.len())]
    }

    // ── Ending ──────────────────────────────────────────────────

    /// Confirms the final blow after the boss falls, ending the playthrough.
    pub fn final_blow(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.final_blow_pending {
            debug!("final blow ignored: nothing to finish");
            return events;
        }
        self.reset_transient();
        self.player = PlayerState::empty();
        events.push(GameEvent::FinalBlowReady(false));
        events.push(GameEvent::EnemyCleared);
        for category in ItemCategory::all() {
            events.push(GameEvent::EquippedIcon {
                category,
                icon: None,
            });
        }
        events.push(GameEvent::LootBoxCount(0));

        self.config.debug = self.config.debug.after_ending();
        self.cutscene = Some(Cutscene::Ending);
        events.push(GameEvent::PlayCutscene(Cutscene::Ending));
        info!("final blow delivered");
        events
    }

    /// Called by the presentation when a cutscene finishes playing.
    pub fn end_cutscene(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.cutscene.take() {
            Some(Cutscene::Intro) => {
                if let Some(area) = self.current_area {
                    self.load_area(area, &mut events);
                }
            }
            Some(Cutscene::Ending) => {
                self.cutscene = Some(Cutscene::Credits);
                events.push(GameEvent::PlayCutscene(Cutscene::Credits));
            }
            Some(Cutscene::Credits) => {
                self.reset_transient();
                events.push(GameEvent::ReturnToMainMenu);
            }
            None => {}
        }
        events
    }

    // ── Debug options ───────────────────────────────────────────

    pub fn set_debug_starting_level(&mut self, level: u32) -> bool {
        self.with_debug(|debug| debug.starting_level = level.clamp(1, MAX_LEVEL))
    }

    pub fn set_debug_starting_area(&mut self, area: u32) -> bool {
        self.with_debug(|debug| debug.starting_area = area.max(1))
    }

    pub fn set_debug_unlock_all(&mut self, unlock: bool) -> bool {
        self.with_debug(|debug| debug.unlock_all_gear = unlock)
    }

    pub fn set_debug_skip_intro(&mut self, skip: bool) -> bool {
        self.with_debug(|debug| debug.skip_intro = skip)
    }

    fn with_debug(&mut self, change: impl FnOnce(&mut DebugConfig)) -> bool {
        if !self.config.debug.debug_mode {
            return false;
        }
        change(&mut self.config.debug);
        true
    }

    // ── Loop ────────────────────────────────────────────────────

    /// Advances the session by `dt` seconds.
    pub fn tick(&mut self, dt: f64, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.current_area.is_none() || self.cutscene.is_some() || !self.area_ready {
            return events;
        }

        if let Some(mut encounter) = self.encounter.take() {
            let rules = CombatRules {
                session: &self.config.session,
                combat: &self.config.combat,
                text: &self.text,
            };
            match encounter.advance(dt, &mut self.player, &rules, rng, &mut events) {
                Some(outcome) => self.finish_encounter(&encounter, outcome, rng, &mut events),
                None => self.encounter = Some(encounter),
            }
            return events;
        }

        if self.final_blow_pending {
            return events;
        }

        if self.fainted {
            self.tick_recovery(dt, &mut events);
            return events;
        }

        if let Some(area) = self.queued_area.take() {
            self.load_area(area, &mut events);
            if !self.area_ready {
                return events;
            }
        }
        if self.equip_queue.is_pending() {
            self.apply_queued_equipment(&mut events);
        }

        self.roam_timer += dt;
        if self.roam_timer >= self.config.session.time_between_enemies {
            self.roam_timer = 0.0;
            self.spawn_enemy(rng, &mut events);
        }
        events
    }

    fn tick_recovery(&mut self, dt: f64, events: &mut Vec<GameEvent>) {
        self.faint_timer += dt;
        if self.faint_timer < self.recovery_time() {
            return;
        }
        self.fainted = false;
        self.faint_timer = 0.0;
        self.player.heal_full();
        events.push(GameEvent::Animation {
            target: Target::Player,
            name: "Recover",
        });
        events.push(GameEvent::log(self.text.get("player_recovered")));
        self.emit_player_health(events);
        info!("player recovered");
    }

    fn spawn_enemy(&mut self, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        let data = Arc::clone(&self.data);
        let Some(area) = self.current_area.and_then(|id| data.area(id)) else {
            return;
        };
        let Some(enemy_type) = data.bestiary.pick_enemy(area, rng) else {
            warn!(area = area.id, "no enemy to spawn");
            return;
        };
        let rules = CombatRules {
            session: &self.config.session,
            combat: &self.config.combat,
            text: &self.text,
        };
        self.encounter = Some(Encounter::start(enemy_type, &rules, events));
    }

    fn finish_encounter(
        &mut self,
        encounter: &Encounter,
        outcome: EncounterOutcome,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        info!(enemy = encounter.enemy.name, ?outcome, turns = encounter.turns(), "encounter over");
        match outcome {
            EncounterOutcome::Victory => {
                self.reward_victory(encounter, rng, events);
                events.push(GameEvent::EnemyCleared);
                self.auto_save(events);
            }
            EncounterOutcome::BossVictory => {
                self.final_blow_pending = true;
                self.queued_area = None;
                self.equip_queue.clear();
                events.push(GameEvent::EquipQueueVisible(false));
                events.push(GameEvent::log(self.text.get("boss_defeated")));
                events.push(GameEvent::EnemyCleared);
                events.push(GameEvent::FinalBlowReady(true));
            }
            EncounterOutcome::Defeat => {
                let fainted = self.text.get("player_fainted");
                events.push(GameEvent::floating(fainted, DisplayVariant::Info, Target::Info));
                events.push(GameEvent::log(fainted));
                events.push(GameEvent::Animation {
                    target: Target::Player,
                    name: "Defeat",
                });
                self.fainted = true;
                self.faint_timer = 0.0;
                self.player.heal_full();
                self.emit_player_health(events);
                events.push(GameEvent::EnemyCleared);
                if !encounter.enemy.boss {
                    self.auto_save(events);
                }
            }
        }
    }

    fn reward_victory(&mut self, encounter: &Encounter, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        let data = Arc::clone(&self.data);
        let exp = encounter.enemy.exp_value;
        let exp_cap = self
            .current_area
            .and_then(|id| data.area(id))
            .map_or(0, |area| area.exp_cap);

        let gained = self.text.format("exp_gained", &[("exp", exp.to_string().as_str())]);
        events.push(GameEvent::floating(gained.as_str(), DisplayVariant::Info, Target::Info));
        events.push(GameEvent::log(gained));
        if !self.player.grant_experience(exp, exp_cap) {
            events.push(GameEvent::log(self.text.get("exp_capped")));
        }

        for level in self.player.apply_level_ups() {
            let text = self.text.format("level_up", &[("lvl", level.to_string().as_str())]);
            events.push(GameEvent::LevelUp { level });
            events.push(GameEvent::floating(text.as_str(), DisplayVariant::Info, Target::Info));
            events.push(GameEvent::log(text));
            info!(level, "level up");
            if let Some(area) = unlocks_next_area(&data.areas, self.current_area, level) {
                events.push(GameEvent::AreaUnlocked { area });
                events.push(GameEvent::log(self.text.get("area_unlocked")));
            }
        }

        self.player.heal_full();
        self.emit_player_health(events);

        let loot = data
            .bestiary
            .get(encounter.enemy.type_id)
            .and_then(|enemy_type| roll_loot(&enemy_type.loot_table, rng));
        if let Some(drop) = loot {
            match self.player.loot_box.push(drop) {
                Ok(()) => {
                    events.push(GameEvent::LootBoxCount(self.player.loot_box.len()));
                    events.push(GameEvent::log(self.text.get("loot_box_gained")));
                }
                Err(lost) => {
                    let full = self.text.get("loot_box_full");
                    events.push(GameEvent::ShowError(full.to_string()));
                    events.push(GameEvent::log(full));
                    debug!(item = lost.item.name.as_str(), "loot box full, drop discarded");
                }
            }
        }
    }

    fn auto_save(&self, events: &mut Vec<GameEvent>) {
        if !self.config.save.auto_save {
            return;
        }
        match self.save_game() {
            Ok(event) => events.push(event),
            Err(err) => warn!("auto-save failed: {}", err),
        }
    }

    fn emit_equipment_icons(&self, events: &mut Vec<GameEvent>) {
        for category in ItemCategory::all() {
            let icon = self
                .player
                .equipment
                .get(category)
                .map(|item| item.icon.clone());
            events.push(GameEvent::EquippedIcon { category, icon });
        }
    }

    fn emit_player_health(&self, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::HealthBar {
            who: HealthBarOwner::Player,
            current: self.player.current_hp,
            max: self.player.max_hp(),
        });
    }
}
