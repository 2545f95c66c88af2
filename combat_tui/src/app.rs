//! Application state and the duel driver

use crate::simulation::DuelSimulation;
use combat_core::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

/// Enemies fought in order, wrapping around
pub const ENEMY_ROTATION: &[&str] = &["skeleton", "zombie", "bone_lord"];

/// Seconds a jump stays airborne before landing
const JUMP_AIRTIME: f64 = 0.6;
/// Remaining airtime at which the rise turns into a fall
const JUMP_APEX: f64 = 0.3;

const MAX_LOG_LINES: usize = 200;
const PREDICT_SECONDS: f64 = 60.0;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to spawn character: {0}")]
    Spawn(#[from] CombatError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Arena,
    Character,
    Equipment,
    Abilities,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Arena, Tab::Character, Tab::Equipment, Tab::Abilities, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Arena => "Arena",
            Tab::Character => "Character",
            Tab::Equipment => "Equipment",
            Tab::Abilities => "Abilities",
            Tab::Help => "Help",
        }
    }

    fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }
}

pub struct App {
    pub data: GameData,
    pub player: Character,
    pub enemy: Character,
    pub current_tab: Tab,
    pub combat_log: Vec<String>,
    pub log_scroll: usize,
    pub stats_scroll: usize,
    /// Cursor into the equipment catalogue
    pub selected_item: usize,
    pub time_elapsed: f64,
    pub kills: u32,
    enemy_index: usize,
    spawned: u32,
    airtime: Option<f64>,
    rng: StdRng,
}

impl App {
    pub fn new() -> Result<Self, AppError> {
        Self::with_data(default_game_data(), StdRng::from_entropy())
    }

    /// Deterministic app for tests and replays
    pub fn with_seed(seed: u64) -> Result<Self, AppError> {
        Self::with_data(default_game_data(), StdRng::seed_from_u64(seed))
    }

    pub fn with_data(data: GameData, rng: StdRng) -> Result<Self, AppError> {
        let player = data.spawn("knight", "player")?;
        let enemy = data.spawn(ENEMY_ROTATION[0], "enemy_1")?;
        info!(player = %player.name(), enemy = %enemy.name(), "arena ready");

        let mut app = App {
            data,
            player,
            enemy,
            current_tab: Tab::Arena,
            combat_log: Vec::new(),
            log_scroll: 0,
            stats_scroll: 0,
            selected_item: 0,
            time_elapsed: 0.0,
            kills: 0,
            enemy_index: 0,
            spawned: 1,
            airtime: None,
            rng,
        };
        app.log(format!(
            "{} enters the arena against {}",
            app.player.name(),
            app.enemy.name()
        ));
        Ok(app)
    }

    // === Navigation ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        self.current_tab = tabs[(self.current_tab.index() + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        self.current_tab = tabs[(self.current_tab.index() + tabs.len() - 1) % tabs.len()];
    }

    pub fn set_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::all().get(index) {
            self.current_tab = *tab;
        }
    }

    pub fn toggle_help(&mut self) {
        self.current_tab = if self.current_tab == Tab::Help {
            Tab::Arena
        } else {
            Tab::Help
        };
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Arena => self.log_scroll = self.log_scroll.saturating_sub(1),
            Tab::Character => self.stats_scroll = self.stats_scroll.saturating_sub(1),
            Tab::Equipment => self.selected_item = self.selected_item.saturating_sub(1),
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Arena => {
                if self.log_scroll + 1 < self.combat_log.len() {
                    self.log_scroll += 1;
                }
            }
            Tab::Character => self.stats_scroll += 1,
            Tab::Equipment => {
                let count = self.data.all_equipment().count();
                if self.selected_item + 1 < count {
                    self.selected_item += 1;
                }
            }
            _ => {}
        }
    }

    // === Player actions ===

    pub fn attack(&mut self) {
        let target = AttackTarget::Entity(self.enemy.id().to_string());
        match self.player.request_attack(target) {
            Ok(effect) => {
                self.log(format!(
                    "━━━ [{:.1}s] {} attacks {} ━━━",
                    self.time_elapsed,
                    self.player.name(),
                    self.enemy.name()
                ));
                self.strike_enemy(effect.damage, effect.damage_kind);
            }
            Err(err) => self.log(format!("  ✗ Attack: {}", err)),
        }
        self.collect_events();
    }

    /// Use the ability in `slot` (0-based)
    pub fn use_ability(&mut self, slot: usize) {
        let Some(id) = self.player.abilities().slot(slot).map(|a| a.id.clone()) else {
            self.log(format!("  ✗ No ability in slot {}", slot + 1));
            return;
        };

        match self.player.request_ability(&id) {
            Ok(effect) => {
                let name = self
                    .player
                    .abilities()
                    .get(&id)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| id.clone());
                self.log(format!(
                    "━━━ [{:.1}s] {} uses {} ━━━",
                    self.time_elapsed,
                    self.player.name(),
                    name
                ));
                for strike in effect.strikes {
                    self.strike_enemy(strike.damage, strike.damage_kind);
                }
                let queued = self.player.pending_strikes().len();
                if queued > 0 {
                    self.log(format!("  ⏳ {} hit(s) incoming", queued));
                }
                if effect.heal > 0 {
                    self.log(format!(
                        "  ✚ Healed up to {} → {}/{} HP",
                        effect.heal,
                        self.player.stats().hp,
                        self.player.stats().max_hp
                    ));
                }
            }
            Err(err) => self.log(format!("  ✗ {}: {}", id, err)),
        }
        self.collect_events();
    }

    pub fn move_player(&mut self, direction: Direction) {
        if let Err(err) = self.player.request_move(direction) {
            self.log(format!("  ✗ Move: {}", err));
        }
        self.collect_events();
    }

    pub fn jump(&mut self) {
        match self.player.request_jump() {
            Ok(()) => self.airtime = Some(JUMP_AIRTIME),
            Err(err) => self.log(format!("  ✗ Jump: {}", err)),
        }
        self.collect_events();
    }

    pub fn dash(&mut self) {
        match self.player.request_dash(Direction::ZERO) {
            Ok(()) => {
                let dir = self.player.dash_direction();
                self.log(format!("  » Dash ({:+.0}, {:+.0})", dir.x, dir.y));
            }
            Err(err) => self.log(format!("  ✗ Dash: {}", err)),
        }
        self.collect_events();
    }

    /// Respawn the player if dead, otherwise bring in the next enemy
    pub fn respawn(&mut self) {
        if self.player.is_dead() {
            match self.player.respawn() {
                Ok(()) => self.log(format!("{} respawns", self.player.name())),
                Err(err) => self.log(format!("  ✗ Respawn: {}", err)),
            }
            self.collect_events();
        } else {
            self.next_enemy();
        }
    }

    pub fn next_enemy(&mut self) {
        self.enemy_index = (self.enemy_index + 1) % ENEMY_ROTATION.len();
        self.spawned += 1;
        let preset = ENEMY_ROTATION[self.enemy_index];
        match self.data.spawn(preset, &format!("enemy_{}", self.spawned)) {
            Ok(enemy) => {
                self.log(format!("A {} appears!", enemy.name()));
                self.enemy = enemy;
            }
            Err(err) => self.log(format!("  ✗ Could not spawn {}: {}", preset, err)),
        }
    }

    /// Run a basic-attack duel on copies of both fighters and log the outcome
    pub fn predict(&mut self) {
        let forecast = DuelSimulation::run(&self.player, &self.enemy, PREDICT_SECONDS, &mut self.rng);
        self.log(format!("  ⚖ Forecast vs {}: {}", self.enemy.name(), forecast.summary()));
    }

    // === Equipment ===

    pub fn selected_equipment(&self) -> Option<&Equipment> {
        self.data.all_equipment().nth(self.selected_item)
    }

    pub fn equip_selected(&mut self) {
        let Some(item) = self.selected_equipment().cloned() else {
            return;
        };
        let name = item.name.clone();
        match self.player.equip(item) {
            Ok(Some(old)) => self.log(format!("Equipped {} (replaced {})", name, old.name)),
            Ok(None) => self.log(format!("Equipped {}", name)),
            Err(err) => self.log(format!("  ✗ {}: {}", name, err)),
        }
        self.collect_events();
    }

    /// Take off whatever sits in the selected item's slot
    pub fn unequip_selected(&mut self) {
        let Some(slot) = self.selected_equipment().map(|item| item.slot) else {
            return;
        };
        match self.player.unequip(slot) {
            Some(old) => self.log(format!("Unequipped {} from {}", old.name, slot)),
            None => self.log(format!("  Nothing equipped in {}", slot)),
        }
        self.collect_events();
    }

    // === Simulation ===

    /// Advance the duel by `delta` seconds
    pub fn tick(&mut self, delta: f64) {
        self.time_elapsed += delta;
        self.tick_airtime(delta);

        for strike in self.player.tick(delta) {
            self.log(format!("  ↯ {} lands", strike.ability_id));
            self.strike_enemy(strike.damage, strike.damage_kind);
        }
        for strike in self.enemy.tick(delta) {
            self.strike_player(strike.damage, strike.damage_kind);
        }

        self.enemy_turn();
        self.collect_events();
    }

    /// Advance in fixed steps, as the real-time loop would
    pub fn tick_time(&mut self, seconds: f64) {
        let steps = (seconds / 0.1).round() as u32;
        for _ in 0..steps {
            self.tick(0.1);
        }
    }

    /// Jumps rise, fall at the apex and land when airtime runs out
    fn tick_airtime(&mut self, delta: f64) {
        let Some(before) = self.airtime else {
            return;
        };
        let after = before - delta;
        if before > JUMP_APEX && after <= JUMP_APEX {
            self.player.notify_airborne(true);
        }
        if after <= 0.0 {
            self.player.notify_grounded();
            self.airtime = None;
        } else {
            self.airtime = Some(after);
        }
    }

    /// The enemy swings whenever its attack is off cooldown
    fn enemy_turn(&mut self) {
        if self.enemy.is_dead() || self.player.is_dead() {
            return;
        }
        if !self.enemy.cooldowns().is_ready(combat_core::ability::ATTACK_COOLDOWN_KEY) {
            return;
        }
        let target = AttackTarget::Entity(self.player.id().to_string());
        if let Ok(effect) = self.enemy.request_attack(target) {
            self.strike_player(effect.damage, effect.damage_kind);
        }
    }

    fn strike_enemy(&mut self, damage: f64, kind: DamageKind) {
        let reward = self.enemy.experience_reward();
        match exchange(&mut self.player, &mut self.enemy, damage, kind, &mut self.rng) {
            Some(report) => {
                self.log(format!("  ▶ {}", report.summary()));
                if report.killing_blow {
                    self.kills += 1;
                    info!(enemy = %self.enemy.name(), reward, "enemy defeated");
                    self.log(format!("  💀 {} DEFEATED! (+{} XP)", self.enemy.name(), reward));
                }
            }
            None => self.log(format!("  {} cannot be hit right now", self.enemy.name())),
        }
    }

    fn strike_player(&mut self, damage: f64, kind: DamageKind) {
        if let Some(report) = exchange(&mut self.enemy, &mut self.player, damage, kind, &mut self.rng)
        {
            self.log(format!(
                "  ◀ {} hits you: {}",
                self.enemy.name(),
                report.summary()
            ));
            if report.killing_blow {
                self.log("  💀 You have fallen. Press r to respawn.".to_string());
            }
        }
    }

    /// Turn queued character events into log lines
    fn collect_events(&mut self) {
        for event in self.player.drain_events() {
            debug!(?event, "player event");
            let line = match event {
                CharacterEvent::LevelUp { level } => format!("  ★ LEVEL UP! Now level {}", level),
                CharacterEvent::BuffApplied { buff_id, stacks } => {
                    format!("  ⬆ {} ({} stack{})", buff_id, stacks, if stacks == 1 { "" } else { "s" })
                }
                CharacterEvent::BuffRemoved { buff_id } => format!("  ⬇ {} wore off", buff_id),
                CharacterEvent::Death => "  ✝ You died".to_string(),
                _ => continue,
            };
            self.log(line);
        }
        for event in self.enemy.drain_events() {
            debug!(?event, "enemy event");
        }
    }

    fn log(&mut self, line: String) {
        self.combat_log.push(line);
        if self.combat_log.len() > MAX_LOG_LINES {
            let excess = self.combat_log.len() - MAX_LOG_LINES;
            self.combat_log.drain(..excess);
        }
        self.log_scroll = self.combat_log.len().saturating_sub(15);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_seed(7).unwrap()
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = app();
        assert_eq!(app.current_tab, Tab::Arena);
        app.prev_tab();
        assert_eq!(app.current_tab, Tab::Help);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Character);
        app.toggle_help();
        assert_eq!(app.current_tab, Tab::Help);
    }

    #[test]
    fn test_attack_locks_until_cooldown() {
        let mut app = app();
        let hp_before = app.enemy.stats().hp;
        app.attack();
        assert_eq!(app.player.current_state(), CharacterState::Attacking);

        app.attack();
        assert!(app.combat_log.last().unwrap().contains("✗ Attack"));

        // A few seconds of swings will land at least one hit
        for _ in 0..5 {
            app.tick_time(1.0);
            app.attack();
        }
        assert!(app.enemy.stats().hp < hp_before || app.kills > 0);
    }

    #[test]
    fn test_jump_lands() {
        let mut app = app();
        app.jump();
        assert_eq!(app.player.current_state(), CharacterState::Jumping);
        app.tick_time(1.0);
        assert_eq!(app.player.current_state(), CharacterState::Idle);
    }

    #[test]
    fn test_predict_leaves_fighters_untouched() {
        let mut app = app();
        let enemy_hp = app.enemy.stats().hp;
        app.predict();
        assert!(app.combat_log.last().unwrap().contains("Forecast vs Skeleton"));
        assert_eq!(app.enemy.stats().hp, enemy_hp);
        assert_eq!(app.player.current_state(), CharacterState::Idle);
    }

    #[test]
    fn test_next_enemy_rotates() {
        let mut app = app();
        let first = app.enemy.name().to_string();
        app.next_enemy();
        assert_ne!(app.enemy.name(), first);
        assert_eq!(app.enemy.id(), "enemy_2");
    }

    #[test]
    fn test_equip_selected_logs_requirement_failure() {
        let mut app = app();
        let tome = app
            .data
            .all_equipment()
            .position(|item| item.id == "arcane_tome")
            .unwrap();
        app.selected_item = tome;
        app.equip_selected();
        assert!(app.combat_log.last().unwrap().contains("✗"));
        assert_eq!(app.player.equipped(EquipmentSlot::Shield).unwrap().id, "iron_shield");
    }
}
