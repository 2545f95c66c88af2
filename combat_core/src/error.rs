//! Gameplay outcomes that reject a request
//!
//! None of these are fatal. An operation returning one of them has left the
//! character exactly as it was.

use crate::state::CharacterState;
use crate::types::{CharacterClass, EquipmentSlot};
use thiserror::Error;

/// Reason an action, ability, buff or equipment request was refused
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CombatError {
    #[error("Unknown {kind} '{id}'")]
    InvalidReference { kind: &'static str, id: String },

    #[error("Not enough mana: need {required}, have {available}")]
    InsufficientResource { required: u32, available: u32 },

    #[error("Requires class {required}, character is {actual}")]
    ClassMismatch {
        required: CharacterClass,
        actual: CharacterClass,
    },

    #[error("Requires level {required}, character is level {actual}")]
    LevelTooLow { required: u32, actual: u32 },

    #[error("'{id}' is on cooldown ({remaining:.2}s remaining)")]
    OnCooldown { id: String, remaining: f64 },

    #[error("Cannot transition from {from:?} to {to:?}")]
    IllegalStateTransition {
        from: CharacterState,
        to: CharacterState,
    },

    #[error("Item for {expected} cannot go in the {requested} slot")]
    InvalidSlot {
        requested: EquipmentSlot,
        expected: EquipmentSlot,
    },
}

impl CombatError {
    pub(crate) fn missing(kind: &'static str, id: impl Into<String>) -> Self {
        CombatError::InvalidReference {
            kind,
            id: id.into(),
        }
    }

    /// Short stable code, handy for UI tables and logs
    pub fn code(&self) -> &'static str {
        match self {
            CombatError::InvalidReference { .. } => "invalid_reference",
            CombatError::InsufficientResource { .. } => "insufficient_resource",
            CombatError::ClassMismatch { .. } => "class_mismatch",
            CombatError::LevelTooLow { .. } => "level_too_low",
            CombatError::OnCooldown { .. } => "on_cooldown",
            CombatError::IllegalStateTransition { .. } => "illegal_state_transition",
            CombatError::InvalidSlot { .. } => "invalid_slot",
        }
    }
}
