//! Character presets - Base stats and loadouts keyed by id

use crate::stats::CharacterStats;
use crate::types::{CharacterClass, CharacterKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: CharacterKind,
    #[serde(default)]
    pub class: CharacterClass,
    /// Unlisted fields keep their defaults
    #[serde(default)]
    pub stats: CharacterStats,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub starting_equipment: Vec<String>,
    /// Experience granted to whoever kills this character
    #[serde(default)]
    pub experience_reward: u64,
}
