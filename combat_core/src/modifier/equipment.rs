//! Equipment - Slot items with class and level gates

use super::StatBonus;
use crate::error::CombatError;
use crate::types::{CharacterClass, EquipmentSlot};
use serde::{Deserialize, Serialize};

fn default_required_level() -> u32 {
    1
}

/// An equippable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub required_class: CharacterClass,
    #[serde(default = "default_required_level")]
    pub required_level: u32,
    #[serde(default)]
    pub bonus: StatBonus,
    /// Buff ids active for as long as the item is worn
    #[serde(default)]
    pub passive_buffs: Vec<String>,
    #[serde(default)]
    pub set_id: Option<String>,
}

impl Equipment {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slot: EquipmentSlot) -> Self {
        Equipment {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            slot,
            required_class: CharacterClass::None,
            required_level: 1,
            bonus: StatBonus::default(),
            passive_buffs: Vec::new(),
            set_id: None,
        }
    }

    pub fn with_bonus(mut self, bonus: StatBonus) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn with_requirements(mut self, class: CharacterClass, level: u32) -> Self {
        self.required_class = class;
        self.required_level = level;
        self
    }

    pub fn with_passive_buff(mut self, buff_id: impl Into<String>) -> Self {
        self.passive_buffs.push(buff_id.into());
        self
    }

    pub fn in_set(mut self, set_id: impl Into<String>) -> Self {
        self.set_id = Some(set_id.into());
        self
    }

    /// Class is checked before level
    pub fn check_requirements(&self, class: CharacterClass, level: u32) -> Result<(), CombatError> {
        if !self.required_class.permits(class) {
            return Err(CombatError::ClassMismatch {
                required: self.required_class,
                actual: class,
            });
        }
        if level < self.required_level {
            return Err(CombatError::LevelTooLow {
                required: self.required_level,
                actual: level,
            });
        }
        Ok(())
    }

    pub fn can_equip(&self, class: CharacterClass, level: u32) -> bool {
        self.check_requirements(class, level).is_ok()
    }
}

/// Named group of items granting extra bonuses by piece count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pieces: Vec<String>,
    /// `bonuses[n - 1]` applies while `n` pieces are worn
    #[serde(default)]
    pub bonuses: Vec<StatBonus>,
}

impl EquipmentSet {
    pub fn bonus_for(&self, equipped_pieces: usize) -> StatBonus {
        if equipped_pieces == 0 {
            return StatBonus::default();
        }
        self.bonuses
            .get(equipped_pieces - 1)
            .copied()
            .unwrap_or_default()
    }
}
