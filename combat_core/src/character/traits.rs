//! Capability traits implemented by [`Character`](super::Character)
//!
//! Collaborators depend on the narrowest capability they need: a renderer
//! only wants `StatHolder + Stateful`, an AI driver wants `Movable + Attacker`.

use super::{AttackEffect, AttackTarget};
use crate::ability::AbilityEffect;
use crate::combat::{HitReport, Rolls};
use crate::error::CombatError;
use crate::state::CharacterState;
use crate::stats::CharacterStats;
use crate::types::{DamageKind, Direction};

/// Read access to effective stats
pub trait StatHolder {
    fn stats(&self) -> &CharacterStats;

    fn health_percentage(&self) -> f64 {
        self.stats().health_percentage()
    }

    fn level(&self) -> u32 {
        self.stats().level
    }
}

/// Something that can be hit, healed and killed
pub trait Damageable {
    /// Resolve and apply an incoming hit. `None` if the hit was ignored
    /// (target dead or invulnerable).
    fn receive_hit(
        &mut self,
        base_damage: f64,
        kind: DamageKind,
        attacker: &CharacterStats,
        rolls: Rolls,
    ) -> Option<HitReport>;

    fn heal(&mut self, amount: u32) -> u32;

    fn is_alive(&self) -> bool;

    /// Experience credited to whoever lands the killing blow
    fn experience_reward(&self) -> u64;
}

pub trait Attacker {
    fn request_attack(&mut self, target: AttackTarget) -> Result<AttackEffect, CombatError>;
}

pub trait Movable {
    fn request_move(&mut self, direction: Direction) -> Result<(), CombatError>;

    fn request_jump(&mut self) -> Result<(), CombatError>;

    fn request_dash(&mut self, direction: Direction) -> Result<(), CombatError>;

    fn facing(&self) -> Direction;
}

pub trait AbilityUser {
    /// Check whether `id` could be used right now. Mutates nothing.
    fn can_use_ability(&self, id: &str) -> Result<(), CombatError>;

    fn request_ability(&mut self, id: &str) -> Result<AbilityEffect, CombatError>;

    /// Seconds until `id` is ready
    fn ability_cooldown(&self, id: &str) -> f64;
}

pub trait Stateful {
    fn current_state(&self) -> CharacterState;

    fn can_transition_to(&self, state: CharacterState) -> bool;
}

pub trait Levelable {
    /// Returns the number of levels gained
    fn gain_experience(&mut self, amount: u64) -> u32;

    fn experience(&self) -> u64;

    fn experience_to_next_level(&self) -> u64;
}
