//! Character - One combatant composed from stats, modifiers, abilities,
//! state machine and progression
//!
//! All mutation goes through request and notification methods; each one
//! either succeeds completely or returns an error and leaves the character
//! untouched. Observers read the queued [`CharacterEvent`]s after a tick.

mod actions;
mod traits;
mod vitals;

pub use actions::{AttackEffect, AttackTarget};
pub use traits::{AbilityUser, Attacker, Damageable, Levelable, Movable, StatHolder, Stateful};

use crate::ability::{AbilityDefinition, AbilityRegistry, CooldownTracker, PendingStrike};
use crate::buff::{ActiveBuff, BuffTemplate};
use crate::config::CombatConstants;
use crate::error::CombatError;
use crate::events::{CharacterEvent, EventQueue};
use crate::modifier::{Equipment, EquipmentSet, ModifierStack};
use crate::progression::ProgressionTracker;
use crate::state::{CharacterState, StateChange, StateMachine};
use crate::stats::CharacterStats;
use crate::types::{CharacterClass, CharacterKind, Direction, EquipmentSlot};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Character {
    id: String,
    name: String,
    kind: CharacterKind,
    class: CharacterClass,
    /// Stats before modifiers. Resources (hp, mana) and level live here.
    base: CharacterStats,
    /// Base with every modifier applied
    stats: CharacterStats,
    modifiers: ModifierStack,
    cooldowns: CooldownTracker,
    abilities: AbilityRegistry,
    /// Buff templates this character can receive, by id
    buff_book: HashMap<String, BuffTemplate>,
    state: StateMachine,
    progression: ProgressionTracker,
    pending_strikes: Vec<PendingStrike>,
    facing: Direction,
    move_direction: Direction,
    dash_direction: Direction,
    experience_reward: u64,
    constants: CombatConstants,
    invulnerable_for: f64,
    since_last_damage: f64,
    regen_timer: f64,
    events: EventQueue,
}

impl Character {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: CharacterClass,
        base: CharacterStats,
    ) -> Self {
        let mut base = base;
        base.enforce_bounds();
        let constants = CombatConstants::default();
        let mut state = StateMachine::new();
        if !base.is_alive() {
            state.force_dead();
        }
        Character {
            id: id.into(),
            name: name.into(),
            kind: CharacterKind::Player,
            class,
            stats: base.clone(),
            base,
            modifiers: ModifierStack::new(),
            cooldowns: CooldownTracker::new(),
            abilities: AbilityRegistry::new(),
            buff_book: HashMap::new(),
            state,
            progression: constants.progression(),
            pending_strikes: Vec::new(),
            facing: Direction::RIGHT,
            move_direction: Direction::ZERO,
            dash_direction: Direction::ZERO,
            experience_reward: 0,
            constants,
            invulnerable_for: 0.0,
            since_last_damage: 0.0,
            regen_timer: 0.0,
            events: EventQueue::new(),
        }
    }

    pub fn with_kind(mut self, kind: CharacterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace the tuning constants. Resets progression thresholds.
    pub fn with_constants(mut self, constants: CombatConstants) -> Self {
        self.progression = constants.progression();
        self.constants = constants;
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityDefinition>) -> Self {
        for ability in abilities {
            self.abilities.register(ability);
        }
        self
    }

    pub fn with_buffs(mut self, templates: impl IntoIterator<Item = BuffTemplate>) -> Self {
        for template in templates {
            self.buff_book.insert(template.id.clone(), template);
        }
        self
    }

    pub fn with_sets(mut self, sets: Vec<EquipmentSet>) -> Self {
        self.modifiers.set_sets(sets);
        self.refresh();
        self
    }

    pub fn with_experience_reward(mut self, reward: u64) -> Self {
        self.experience_reward = reward;
        self
    }

    // === Queries ===

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn base_stats(&self) -> &CharacterStats {
        &self.base
    }

    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    pub fn active_buffs(&self) -> &[ActiveBuff] {
        self.modifiers.active_buffs()
    }

    pub fn has_buff(&self, buff_id: &str) -> bool {
        self.modifiers.has_buff(buff_id)
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        self.modifiers.equipped(slot)
    }

    pub fn all_equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &Equipment)> {
        self.modifiers.all_equipped()
    }

    pub fn abilities(&self) -> &AbilityRegistry {
        &self.abilities
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    pub fn progression(&self) -> &ProgressionTracker {
        &self.progression
    }

    pub fn pending_strikes(&self) -> &[PendingStrike] {
        &self.pending_strikes
    }

    pub fn move_direction(&self) -> Direction {
        self.move_direction
    }

    pub fn dash_direction(&self) -> Direction {
        self.dash_direction
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<CharacterEvent> {
        self.events.drain()
    }

    // === Buffs ===

    /// Apply a buff from this character's buff book. Returns the stack count.
    pub fn apply_buff(&mut self, buff_id: &str) -> Result<u32, CombatError> {
        let template = self
            .buff_book
            .get(buff_id)
            .cloned()
            .ok_or_else(|| CombatError::missing("buff", buff_id))?;
        Ok(self.apply_buff_template(&template))
    }

    /// Apply a buff that isn't in the buff book
    pub fn apply_buff_template(&mut self, template: &BuffTemplate) -> u32 {
        let stacks = self.modifiers.apply_buff(template);
        debug!(character = %self.id, buff = %template.id, stacks, "buff applied");
        self.events.push(CharacterEvent::BuffApplied {
            buff_id: template.id.clone(),
            stacks,
        });
        self.refresh();
        stacks
    }

    pub fn remove_buff(&mut self, buff_id: &str) -> Result<(), CombatError> {
        self.modifiers
            .remove_buff(buff_id)
            .ok_or_else(|| CombatError::missing("buff", buff_id))?;
        debug!(character = %self.id, buff = %buff_id, "buff removed");
        self.events.push(CharacterEvent::BuffRemoved {
            buff_id: buff_id.to_string(),
        });
        self.refresh();
        Ok(())
    }

    // === Equipment ===

    /// Equip into the item's own slot
    pub fn equip(&mut self, item: Equipment) -> Result<Option<Equipment>, CombatError> {
        self.equip_to(item.slot, item)
    }

    /// Swap `item` into `slot`, returning the previous item. On error the
    /// previous item stays equipped.
    pub fn equip_to(
        &mut self,
        slot: EquipmentSlot,
        item: Equipment,
    ) -> Result<Option<Equipment>, CombatError> {
        let passives = item
            .passive_buffs
            .iter()
            .map(|id| {
                self.buff_book
                    .get(id)
                    .cloned()
                    .ok_or_else(|| CombatError::missing("buff", id.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let item_id = item.id.clone();
        let previous = match self
            .modifiers
            .equip(slot, item, self.class, self.base.level, passives.clone())
        {
            Ok(previous) => previous,
            Err(err) => {
                debug!(character = %self.id, item = %item_id, error = %err, "equip rejected");
                return Err(err);
            }
        };

        if let Some(old) = &previous {
            self.push_unequip_events(slot, old);
        }
        self.events.push(CharacterEvent::Equipped { slot, item_id });
        for template in passives {
            self.events.push(CharacterEvent::BuffApplied {
                buff_id: template.id,
                stacks: 1,
            });
        }
        self.refresh();
        Ok(previous)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        let item = self.modifiers.unequip(slot)?;
        self.push_unequip_events(slot, &item);
        self.refresh();
        Some(item)
    }

    fn push_unequip_events(&mut self, slot: EquipmentSlot, item: &Equipment) {
        for buff_id in &item.passive_buffs {
            self.events.push(CharacterEvent::BuffRemoved {
                buff_id: buff_id.clone(),
            });
        }
        self.events.push(CharacterEvent::Unequipped {
            slot,
            item_id: item.id.clone(),
        });
    }

    // === Imposed state ===

    /// Stun for `duration` seconds. Ignored when dead.
    pub fn apply_stun(&mut self, duration: f64) -> bool {
        match self.state.force(CharacterState::Stunned, duration) {
            Some(change) => {
                debug!(character = %self.id, duration, "stunned");
                self.push_state_change(change);
                true
            }
            None => false,
        }
    }

    /// Bring a dead character back at full hp and mana with applied buffs,
    /// cooldowns and pending strikes cleared
    pub fn respawn(&mut self) -> Result<(), CombatError> {
        let change = self.state.respawn()?;
        self.push_state_change(change);

        for buff in self.modifiers.clear_applied_buffs() {
            self.events.push(CharacterEvent::BuffRemoved {
                buff_id: buff.template.id,
            });
        }
        self.cooldowns.clear();
        self.pending_strikes.clear();
        self.invulnerable_for = 0.0;
        self.since_last_damage = 0.0;
        self.regen_timer = 0.0;
        self.move_direction = Direction::ZERO;

        self.base.restore_all();
        self.refresh();
        self.push_resource_events();
        debug!(character = %self.id, "respawned");
        Ok(())
    }

    /// Physics reports the character left the ground
    pub fn notify_airborne(&mut self, falling: bool) {
        if let Some(change) = self.state.notify_airborne(falling) {
            self.push_state_change(change);
        }
    }

    /// Physics reports the character landed
    pub fn notify_grounded(&mut self) {
        if let Some(change) = self.state.notify_grounded() {
            self.push_state_change(change);
        }
    }

    // === Simulation step ===

    /// Advance timers by `delta` seconds. Returns strikes that became ready
    /// this tick, in landing order.
    pub fn tick(&mut self, delta: f64) -> Vec<PendingStrike> {
        let delta = delta.max(0.0);

        self.cooldowns.tick(delta);

        let expired = self.modifiers.tick_buffs(delta);
        if !expired.is_empty() {
            for buff in expired {
                debug!(character = %self.id, buff = %buff.template.id, "buff expired");
                self.events.push(CharacterEvent::BuffRemoved {
                    buff_id: buff.template.id,
                });
            }
            self.refresh();
        }

        if let Some(change) = self.state.tick(delta) {
            self.push_state_change(change);
        }

        self.invulnerable_for = (self.invulnerable_for - delta).max(0.0);

        if self.is_dead() {
            return Vec::new();
        }

        self.tick_regeneration(delta);
        self.tick_strikes(delta)
    }

    fn tick_strikes(&mut self, delta: f64) -> Vec<PendingStrike> {
        let mut ready = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending_strikes.len());
        for mut strike in self.pending_strikes.drain(..) {
            strike.delay -= delta;
            if strike.is_ready() {
                strike.delay = 0.0;
                ready.push(strike);
            } else {
                waiting.push(strike);
            }
        }
        self.pending_strikes = waiting;

        for strike in &ready {
            self.events.push(CharacterEvent::StrikeReady(strike.clone()));
        }
        ready
    }

    // === Internals ===

    /// Recompute effective stats from base + modifiers
    fn refresh(&mut self) {
        self.base.enforce_bounds();
        let stats = self.modifiers.effective(&self.base);
        if stats != self.stats {
            self.stats = stats;
            self.events.push(CharacterEvent::StatsChanged);
        }
    }

    fn push_state_change(&mut self, change: StateChange) {
        debug!(character = %self.id, from = %change.from, to = %change.to, "state change");
        self.events
            .push(CharacterEvent::StateExited { state: change.from });
        self.events
            .push(CharacterEvent::StateEntered { state: change.to });
        self.events.push(CharacterEvent::StateChanged {
            from: change.from,
            to: change.to,
        });
    }

    fn push_resource_events(&mut self) {
        self.events.push(CharacterEvent::HealthChanged {
            current: self.stats.hp,
            max: self.stats.max_hp,
        });
        self.events.push(CharacterEvent::ManaChanged {
            current: self.stats.mana,
            max: self.stats.max_mana,
        });
    }
}

impl StatHolder for Character {
    fn stats(&self) -> &CharacterStats {
        &self.stats
    }
}

impl Stateful for Character {
    fn current_state(&self) -> CharacterState {
        self.state.current()
    }

    fn can_transition_to(&self, state: CharacterState) -> bool {
        self.state.can_transition_to(state)
    }
}
