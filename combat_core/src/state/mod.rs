//! Character state machine
//!
//! Legality lives in one pure function, [`legal`]. [`StateMachine`] owns the
//! timers and movement flags that feed it.

mod machine;

pub use machine::{StateChange, StateMachine};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterState {
    #[default]
    Idle,
    Moving,
    Jumping,
    Falling,
    Dashing,
    Attacking,
    Casting,
    Stunned,
    Dead,
}

impl CharacterState {
    pub fn all() -> &'static [CharacterState] {
        &[
            CharacterState::Idle,
            CharacterState::Moving,
            CharacterState::Jumping,
            CharacterState::Falling,
            CharacterState::Dashing,
            CharacterState::Attacking,
            CharacterState::Casting,
            CharacterState::Stunned,
            CharacterState::Dead,
        ]
    }

    /// States that refuse every request until their timer runs out
    pub fn is_timed_lock(self) -> bool {
        matches!(
            self,
            CharacterState::Attacking | CharacterState::Dashing | CharacterState::Stunned
        )
    }

    /// States that end on their own when their timer runs out
    pub fn is_timed(self) -> bool {
        self.is_timed_lock() || self == CharacterState::Casting
    }

    pub fn is_terminal(self) -> bool {
        self == CharacterState::Dead
    }

    pub fn is_airborne(self) -> bool {
        matches!(self, CharacterState::Jumping | CharacterState::Falling)
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterState::Idle => "Idle",
            CharacterState::Moving => "Moving",
            CharacterState::Jumping => "Jumping",
            CharacterState::Falling => "Falling",
            CharacterState::Dashing => "Dashing",
            CharacterState::Attacking => "Attacking",
            CharacterState::Casting => "Casting",
            CharacterState::Stunned => "Stunned",
            CharacterState::Dead => "Dead",
        }
    }
}

impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Inputs to [`legal`] beyond the two states
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransitionContext {
    /// Seconds left on the current state's timer
    pub lock_remaining: f64,
}

/// Whether a voluntary request to move from `from` to `to` is allowed
pub fn legal(from: CharacterState, _to: CharacterState, context: TransitionContext) -> bool {
    match from {
        CharacterState::Dead => false,
        state if state.is_timed_lock() => context.lock_remaining <= 0.0,
        _ => true,
    }
}
