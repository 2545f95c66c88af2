//! Character events for observers (renderer, audio, UI)
//!
//! Events are queued on the character and drained by collaborators after a
//! tick. The core never calls back into observers.

use crate::ability::PendingStrike;
use crate::state::CharacterState;
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CharacterEvent {
    StatsChanged,
    HealthChanged { current: u32, max: u32 },
    ManaChanged { current: u32, max: u32 },
    Death,
    StateExited { state: CharacterState },
    StateEntered { state: CharacterState },
    StateChanged { from: CharacterState, to: CharacterState },
    BuffApplied { buff_id: String, stacks: u32 },
    BuffRemoved { buff_id: String },
    Equipped { slot: EquipmentSlot, item_id: String },
    Unequipped { slot: EquipmentSlot, item_id: String },
    AbilityUsed { ability_id: String },
    StrikeReady(PendingStrike),
    ExperienceGained { amount: u64 },
    LevelUp { level: u32 },
}

/// FIFO of events produced by one character
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<CharacterEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CharacterEvent) {
        self.events.push_back(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<CharacterEvent> {
        self.events.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
