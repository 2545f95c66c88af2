//! Health, mana, death, regeneration and experience

use super::traits::{Damageable, Levelable};
use super::Character;
use crate::combat::{apply_hit, resolve_damage_with_rolls, HitReport, Rolls};
use crate::events::CharacterEvent;
use crate::stats::CharacterStats;
use crate::types::{DamageKind, Direction};
use rand::Rng;
use tracing::{debug, info};

impl Character {
    /// Dead is a state, not an hp reading. Only respawn leaves it.
    pub fn is_dead(&self) -> bool {
        self.state.current().is_terminal()
    }

    /// Restore mana, capped at max. No-op when dead.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let restored = self.base.restore_mana(amount);
        if restored > 0 {
            self.refresh();
            self.events.push(CharacterEvent::ManaChanged {
                current: self.stats.mana,
                max: self.stats.max_mana,
            });
        }
        restored
    }

    /// [`Damageable::receive_hit`] with rolls drawn from `rng`
    pub fn receive_hit_with_rng<R: Rng + ?Sized>(
        &mut self,
        base_damage: f64,
        kind: DamageKind,
        attacker: &CharacterStats,
        rng: &mut R,
    ) -> Option<HitReport> {
        self.receive_hit(base_damage, kind, attacker, Rolls::draw(rng))
    }

    pub(super) fn restore_health(&mut self, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let restored = self.base.heal(amount);
        if restored > 0 {
            self.refresh();
            self.events.push(CharacterEvent::HealthChanged {
                current: self.stats.hp,
                max: self.stats.max_hp,
            });
        }
        restored
    }

    fn die(&mut self) {
        self.pending_strikes.clear();
        self.move_direction = Direction::ZERO;
        self.state.set_moving(false);
        if let Some(change) = self.state.force_dead() {
            self.push_state_change(change);
        }
        info!(character = %self.id, "died");
        self.events.push(CharacterEvent::Death);
    }

    /// Once `regen_delay` has passed since the last hit, restore
    /// round(hp_regen) and round(mana_regen) every `regen_interval`
    pub(super) fn tick_regeneration(&mut self, delta: f64) {
        self.since_last_damage += delta;
        let interval = self.constants.regen_interval;
        if interval <= 0.0 || self.since_last_damage < self.constants.regen_delay {
            return;
        }

        self.regen_timer += delta;
        while self.regen_timer >= interval {
            self.regen_timer -= interval;
            let hp = self.stats.hp_regen.round().max(0.0) as u32;
            let mana = self.stats.mana_regen.round().max(0.0) as u32;
            if hp > 0 {
                self.restore_health(hp);
            }
            if mana > 0 {
                self.restore_mana(mana);
            }
        }
    }
}

impl Damageable for Character {
    fn receive_hit(
        &mut self,
        base_damage: f64,
        kind: DamageKind,
        attacker: &CharacterStats,
        rolls: Rolls,
    ) -> Option<HitReport> {
        if self.is_dead() || self.is_invulnerable() {
            return None;
        }

        let outcome = resolve_damage_with_rolls(base_damage, kind, attacker, &self.stats, rolls);
        let report = apply_hit(&mut self.base, outcome)?;
        self.refresh();
        debug!(
            character = %self.id,
            damage = outcome.damage,
            dodged = outcome.dodged,
            critical = outcome.critical,
            hp = self.stats.hp,
            "hit received"
        );

        if outcome.damage > 0 {
            self.since_last_damage = 0.0;
            self.regen_timer = 0.0;
            self.invulnerable_for = self.constants.invulnerability_window;
            self.events.push(CharacterEvent::HealthChanged {
                current: self.stats.hp,
                max: self.stats.max_hp,
            });
        }
        if report.killing_blow {
            self.die();
        }
        Some(report)
    }

    /// Restore hp, capped at max. No-op when dead.
    fn heal(&mut self, amount: u32) -> u32 {
        self.restore_health(amount)
    }

    fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    fn experience_reward(&self) -> u64 {
        self.experience_reward
    }
}

impl Levelable for Character {
    /// No-op when dead
    fn gain_experience(&mut self, amount: u64) -> u32 {
        if amount == 0 || self.is_dead() {
            return 0;
        }
        self.events.push(CharacterEvent::ExperienceGained { amount });

        let start = self.base.level;
        let levels = self.progression.gain_experience(amount, &mut self.base);
        if levels > 0 {
            for level in start + 1..=self.base.level {
                self.events.push(CharacterEvent::LevelUp { level });
            }
            info!(character = %self.id, level = self.base.level, "leveled up");
            self.refresh();
            self.push_resource_events();
        }
        levels
    }

    fn experience(&self) -> u64 {
        self.progression.experience()
    }

    fn experience_to_next_level(&self) -> u64 {
        self.progression.experience_to_next_level()
    }
}
