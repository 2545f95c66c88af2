//! Modifiers - Equipment and buff bonuses layered over base stats

mod bonus;
mod equipment;
mod stack;

pub use bonus::{apply, revert, StatBonus};
pub use equipment::{Equipment, EquipmentSet};
pub use stack::ModifierStack;
