//! StateMachine - Current state, lock timer and movement continuation

use super::{legal, CharacterState, TransitionContext};
use crate::error::CombatError;

/// A state change that took place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: CharacterState,
    pub to: CharacterState,
}

#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    current: CharacterState,
    previous: Option<CharacterState>,
    /// Seconds left in a timed state
    timer: f64,
    moving: bool,
    airborne: bool,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CharacterState {
        self.current
    }

    pub fn previous(&self) -> Option<CharacterState> {
        self.previous
    }

    /// Seconds left before the current timed state ends
    pub fn time_remaining(&self) -> f64 {
        if self.current.is_timed() {
            self.timer.max(0.0)
        } else {
            0.0
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn context(&self) -> TransitionContext {
        TransitionContext {
            lock_remaining: if self.current.is_timed_lock() {
                self.timer
            } else {
                0.0
            },
        }
    }

    pub fn can_transition_to(&self, to: CharacterState) -> bool {
        legal(self.current, to, self.context())
    }

    /// Voluntary transition into an untimed state
    pub fn request(&mut self, to: CharacterState) -> Result<StateChange, CombatError> {
        self.request_timed(to, 0.0)
    }

    /// Voluntary transition into a state that ends after `duration` seconds
    pub fn request_timed(
        &mut self,
        to: CharacterState,
        duration: f64,
    ) -> Result<StateChange, CombatError> {
        if !self.can_transition_to(to) {
            return Err(CombatError::IllegalStateTransition {
                from: self.current,
                to,
            });
        }
        if to == CharacterState::Jumping {
            self.airborne = true;
        }
        Ok(self.enter(to, duration))
    }

    /// Impose a state regardless of locks. Dead still can't be left.
    pub fn force(&mut self, to: CharacterState, duration: f64) -> Option<StateChange> {
        if self.current.is_terminal() {
            return None;
        }
        Some(self.enter(to, duration))
    }

    /// Enter Dead. `None` if already dead.
    pub fn force_dead(&mut self) -> Option<StateChange> {
        self.force(CharacterState::Dead, 0.0)
    }

    /// Leave Dead for Idle. Only valid from Dead.
    pub fn respawn(&mut self) -> Result<StateChange, CombatError> {
        if !self.current.is_terminal() {
            return Err(CombatError::IllegalStateTransition {
                from: self.current,
                to: CharacterState::Idle,
            });
        }
        self.moving = false;
        self.airborne = false;
        Ok(self.enter(CharacterState::Idle, 0.0))
    }

    /// Record whether the driver is asking to move
    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    /// Physics reports the character left the ground
    pub fn notify_airborne(&mut self, falling: bool) -> Option<StateChange> {
        self.airborne = true;
        let free = matches!(
            self.current,
            CharacterState::Idle | CharacterState::Moving | CharacterState::Jumping
        );
        if falling && free && self.current != CharacterState::Falling {
            Some(self.enter(CharacterState::Falling, 0.0))
        } else {
            None
        }
    }

    /// Physics reports the character landed
    pub fn notify_grounded(&mut self) -> Option<StateChange> {
        self.airborne = false;
        if self.current.is_airborne() {
            let next = self.continuation();
            Some(self.enter(next, 0.0))
        } else {
            None
        }
    }

    /// State to settle into once a timed state ends
    pub fn continuation(&self) -> CharacterState {
        if self.airborne {
            CharacterState::Falling
        } else if self.moving {
            CharacterState::Moving
        } else {
            CharacterState::Idle
        }
    }

    /// Run the timer down. Returns the automatic transition, if one happened.
    pub fn tick(&mut self, delta: f64) -> Option<StateChange> {
        if !self.current.is_timed() {
            return None;
        }
        self.timer -= delta.max(0.0);
        if self.timer > 0.0 {
            return None;
        }
        let next = self.continuation();
        Some(self.enter(next, 0.0))
    }

    fn enter(&mut self, to: CharacterState, duration: f64) -> StateChange {
        let from = self.current;
        self.previous = Some(from);
        self.current = to;
        self.timer = duration.max(0.0);
        StateChange { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_attack_locks_until_timer() {
        let mut machine = StateMachine::new();
        machine
            .request_timed(CharacterState::Attacking, 0.5)
            .unwrap();

        let err = machine.request(CharacterState::Moving).unwrap_err();
        assert_eq!(
            err,
            CombatError::IllegalStateTransition {
                from: CharacterState::Attacking,
                to: CharacterState::Moving
            }
        );

        assert!(machine.tick(0.3).is_none());
        let change = machine.tick(0.3).unwrap();
        assert_eq!(change.to, CharacterState::Idle);
        assert!(machine.request(CharacterState::Moving).is_ok());
    }

    #[test]
    fn test_lock_continues_into_movement() {
        let mut machine = StateMachine::new();
        machine.set_moving(true);
        machine.request_timed(CharacterState::Dashing, 0.2).unwrap();
        assert_eq!(machine.tick(0.25).unwrap().to, CharacterState::Moving);

        machine.request_timed(CharacterState::Dashing, 0.2).unwrap();
        machine.notify_airborne(false);
        assert_eq!(machine.tick(0.25).unwrap().to, CharacterState::Falling);
    }

    #[test]
    fn test_jump_fall_land() {
        let mut machine = StateMachine::new();
        machine.request(CharacterState::Jumping).unwrap();
        assert!(machine.is_airborne());

        assert_eq!(
            machine.notify_airborne(true).unwrap().to,
            CharacterState::Falling
        );
        assert_eq!(machine.notify_grounded().unwrap().to, CharacterState::Idle);
        assert!(machine.notify_grounded().is_none());
    }

    #[test]
    fn test_casting_is_timed_but_interruptible() {
        let mut machine = StateMachine::new();
        machine.request_timed(CharacterState::Casting, 1.0).unwrap();
        assert!(machine.can_transition_to(CharacterState::Moving));
        assert_eq!(machine.tick(1.0).unwrap().to, CharacterState::Idle);
    }

    #[test]
    fn test_stun_overrides_lock() {
        let mut machine = StateMachine::new();
        machine.request_timed(CharacterState::Attacking, 0.5).unwrap();
        let change = machine.force(CharacterState::Stunned, 2.0).unwrap();
        assert_eq!(change.from, CharacterState::Attacking);
        assert!(machine.request(CharacterState::Idle).is_err());
        assert!((machine.time_remaining() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dead_rejects_everything() {
        let mut machine = StateMachine::new();
        machine.request_timed(CharacterState::Dashing, 0.2).unwrap();
        assert!(machine.force_dead().is_some());
        assert!(machine.force_dead().is_none());

        for state in CharacterState::all() {
            assert!(machine.request(*state).is_err());
        }
        assert!(machine.force(CharacterState::Stunned, 1.0).is_none());
        assert!(machine.tick(10.0).is_none());
        assert!(machine.notify_grounded().is_none());
        assert_eq!(machine.current(), CharacterState::Dead);
    }

    #[test]
    fn test_respawn_only_from_dead() {
        let mut machine = StateMachine::new();
        assert!(machine.respawn().is_err());
        machine.force_dead();
        assert_eq!(machine.respawn().unwrap().to, CharacterState::Idle);
        assert_eq!(machine.previous(), Some(CharacterState::Dead));
    }

    proptest! {
        #[test]
        fn prop_dead_absorbs_any_sequence(ops in prop::collection::vec((0usize..9, 0u8..4, 0.0f64..2.0), 0..50)) {
            let mut machine = StateMachine::new();
            machine.force_dead();
            for (index, op, value) in ops {
                let target = CharacterState::all()[index];
                match op {
                    0 => { let _ = machine.request(target); }
                    1 => { machine.force(target, value); }
                    2 => { machine.tick(value); }
                    _ => { machine.notify_airborne(value > 1.0); machine.notify_grounded(); }
                }
                prop_assert_eq!(machine.current(), CharacterState::Dead);
            }
        }
    }
}
