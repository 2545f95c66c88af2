//! combat_core - Character combat simulation for action games
//!
//! This library provides:
//! - CharacterStats: Base and derived numeric attributes
//! - ModifierStack: Equipment and buff bonuses layered over base stats
//! - CooldownTracker / AbilityRegistry: Gated ability usage
//! - Combat resolution: Armor mitigation, dodge and critical rolls
//! - StateMachine: Which actions are legal at a given instant
//! - ProgressionTracker: Experience and level-ups
//! - Character: The record composing all of the above

pub mod ability;
pub mod buff;
pub mod character;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod modifier;
pub mod prelude;
pub mod progression;
pub mod state;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use ability::{
    AbilityDefinition, AbilityEffect, AbilityKind, AbilityRegistry, AreaOfEffect, CooldownTracker,
    PendingStrike,
};
pub use buff::{ActiveBuff, BuffOrigin, BuffTemplate};
pub use character::{
    AbilityUser, AttackEffect, AttackTarget, Attacker, Character, Damageable, Levelable, Movable,
    StatHolder, Stateful,
};
pub use combat::{exchange, DamageOutcome, HitReport, Rolls};
pub use config::{default_game_data, CharacterPreset, CombatConstants, ConfigError, GameData};
pub use error::CombatError;
pub use events::{CharacterEvent, EventQueue};
pub use modifier::{Equipment, EquipmentSet, ModifierStack, StatBonus};
pub use progression::{LevelUpGrowth, ProgressionTracker};
pub use state::{CharacterState, StateChange, StateMachine};
pub use stats::CharacterStats;
pub use types::{CharacterClass, CharacterKind, DamageKind, Direction, EquipmentSlot};
