//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::stats::CharacterStats;
pub use crate::types::{CharacterClass, CharacterKind, DamageKind, Direction, EquipmentSlot};

// Character and its capabilities
pub use crate::character::{
    AbilityUser, AttackEffect, AttackTarget, Attacker, Character, Damageable, Levelable, Movable,
    StatHolder, Stateful,
};

// Combat
pub use crate::combat::{exchange, DamageOutcome, HitReport, Rolls};

// Modifiers and buffs
pub use crate::buff::{ActiveBuff, BuffTemplate};
pub use crate::modifier::{Equipment, StatBonus};

// Abilities
pub use crate::ability::{AbilityDefinition, AbilityEffect, PendingStrike};

// State, events, errors
pub use crate::error::CombatError;
pub use crate::events::CharacterEvent;
pub use crate::state::CharacterState;

// Config
pub use crate::config::{default_game_data, GameData};
