//! Core types shared across the combat systems

use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Shield,
    Helmet,
    Chest,
    Legs,
    Boots,
    Gloves,
    Ring,
    Necklace,
    Consumable,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Shield,
            EquipmentSlot::Helmet,
            EquipmentSlot::Chest,
            EquipmentSlot::Legs,
            EquipmentSlot::Boots,
            EquipmentSlot::Gloves,
            EquipmentSlot::Ring,
            EquipmentSlot::Necklace,
            EquipmentSlot::Consumable,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Shield => "Shield",
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::Chest => "Chest",
            EquipmentSlot::Legs => "Legs",
            EquipmentSlot::Boots => "Boots",
            EquipmentSlot::Gloves => "Gloves",
            EquipmentSlot::Ring => "Ring",
            EquipmentSlot::Necklace => "Necklace",
            EquipmentSlot::Consumable => "Consumable",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Character class, used for ability and equipment gates
///
/// `None` on a requirement means "any class".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    #[default]
    None,
    Knight,
    Mage,
    Archer,
    Rogue,
}

impl CharacterClass {
    /// Check whether a requirement of `self` is satisfied by `actual`
    pub fn permits(self, actual: CharacterClass) -> bool {
        self == CharacterClass::None || self == actual
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What kind of entity a character is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterKind {
    #[default]
    Player,
    Enemy,
    Npc,
    Boss,
}

/// Damage kind, selects which armor applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    #[default]
    Physical,
    Magical,
}

impl fmt::Display for DamageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageKind::Physical => f.write_str("physical"),
            DamageKind::Magical => f.write_str("magical"),
        }
    }
}

/// 2D direction requested by a driver (input or AI)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
}

impl Direction {
    pub const ZERO: Direction = Direction { x: 0.0, y: 0.0 };
    pub const LEFT: Direction = Direction { x: -1.0, y: 0.0 };
    pub const RIGHT: Direction = Direction { x: 1.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Direction { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector
    pub fn normalized(&self) -> Direction {
        let m = self.magnitude();
        if m <= f64::EPSILON {
            Direction::ZERO
        } else {
            Direction::new(self.x / m, self.y / m)
        }
    }

    pub fn scaled(&self, factor: f64) -> Direction {
        Direction::new(self.x * factor, self.y * factor)
    }
}
