//! GameData - Validated catalogue of abilities, buffs, equipment and presets

use super::{load_toml, parse_json, parse_toml, CharacterPreset, CombatConstants, ConfigError};
use crate::ability::AbilityDefinition;
use crate::buff::BuffTemplate;
use crate::character::Character;
use crate::error::CombatError;
use crate::modifier::{Equipment, EquipmentSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Raw records as they appear in a data file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameRecords {
    #[serde(default)]
    pub constants: Option<CombatConstants>,
    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,
    #[serde(default)]
    pub buffs: Vec<BuffTemplate>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub sets: Vec<EquipmentSet>,
    #[serde(default)]
    pub characters: Vec<CharacterPreset>,
}

impl GameRecords {
    /// Append another file's records. Later constants win.
    pub fn merge(&mut self, other: GameRecords) {
        if other.constants.is_some() {
            self.constants = other.constants;
        }
        self.abilities.extend(other.abilities);
        self.buffs.extend(other.buffs);
        self.equipment.extend(other.equipment);
        self.sets.extend(other.sets);
        self.characters.extend(other.characters);
    }
}

/// Data files read by [`GameData::load_from_dir`]
const DATA_FILES: [&str; 5] = [
    "constants.toml",
    "abilities.toml",
    "buffs.toml",
    "equipment.toml",
    "characters.toml",
];

/// Identifier-keyed game data, cross-references checked at load time
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub constants: CombatConstants,
    abilities: BTreeMap<String, AbilityDefinition>,
    buffs: BTreeMap<String, BuffTemplate>,
    equipment: BTreeMap<String, Equipment>,
    sets: BTreeMap<String, EquipmentSet>,
    characters: BTreeMap<String, CharacterPreset>,
}

impl GameData {
    /// Load every data file in `dir`. `constants.toml` may be absent.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let mut records = GameRecords::default();
        for file in DATA_FILES {
            let path = dir.join(file);
            if file == "constants.toml" {
                if path.exists() {
                    let constants: CombatConstants = load_toml(&path)?;
                    records.constants = Some(constants);
                }
                continue;
            }
            records.merge(load_toml(&path)?);
        }
        Self::from_records(records)
    }

    /// Parse a single TOML document holding any of the record sections
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_records(parse_toml(content)?)
    }

    /// Parse a single JSON document holding any of the record sections
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_records(parse_json(content)?)
    }

    /// The data files compiled into the crate
    pub fn bundled() -> Result<Self, ConfigError> {
        let mut records = GameRecords {
            constants: Some(parse_toml(include_str!("../../config/constants.toml"))?),
            ..Default::default()
        };
        for content in [
            include_str!("../../config/abilities.toml"),
            include_str!("../../config/buffs.toml"),
            include_str!("../../config/equipment.toml"),
            include_str!("../../config/characters.toml"),
        ] {
            records.merge(parse_toml(content)?);
        }
        Self::from_records(records)
    }

    pub fn from_records(records: GameRecords) -> Result<Self, ConfigError> {
        let constants = records.constants.unwrap_or_default();
        constants.validate().map_err(ConfigError::ValidationError)?;

        let data = GameData {
            constants,
            abilities: index("ability", records.abilities, |a| &a.id)?,
            buffs: index("buff", records.buffs, |b| &b.id)?,
            equipment: index("equipment", records.equipment, |e| &e.id)?,
            sets: index("set", records.sets, |s| &s.id)?,
            characters: index("character", records.characters, |c| &c.id)?,
        };
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for buff in self.buffs.values() {
            if buff.max_stacks == 0 {
                return invalid(format!("buff '{}' has max_stacks = 0", buff.id));
            }
        }

        for ability in self.abilities.values() {
            if ability.cooldown.is_nan() || ability.cooldown < 0.0 {
                return invalid(format!("ability '{}' has a negative cooldown", ability.id));
            }
            if let Some(buff) = &ability.buff {
                require("buff", buff, self.buffs.contains_key(buff), &ability.id)?;
            }
        }

        for item in self.equipment.values() {
            for buff in &item.passive_buffs {
                require("buff", buff, self.buffs.contains_key(buff), &item.id)?;
            }
            if let Some(set) = &item.set_id {
                require("set", set, self.sets.contains_key(set), &item.id)?;
            }
        }

        for set in self.sets.values() {
            for piece in &set.pieces {
                require("equipment", piece, self.equipment.contains_key(piece), &set.id)?;
            }
        }

        for preset in self.characters.values() {
            for ability in &preset.abilities {
                require("ability", ability, self.abilities.contains_key(ability), &preset.id)?;
            }
            for item in &preset.starting_equipment {
                require("equipment", item, self.equipment.contains_key(item), &preset.id)?;
            }
        }
        Ok(())
    }

    pub fn ability(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }

    pub fn buff(&self, id: &str) -> Option<&BuffTemplate> {
        self.buffs.get(id)
    }

    pub fn equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipment.get(id)
    }

    pub fn set(&self, id: &str) -> Option<&EquipmentSet> {
        self.sets.get(id)
    }

    pub fn preset(&self, id: &str) -> Option<&CharacterPreset> {
        self.characters.get(id)
    }

    pub fn abilities(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.values()
    }

    pub fn buffs(&self) -> impl Iterator<Item = &BuffTemplate> {
        self.buffs.values()
    }

    pub fn all_equipment(&self) -> impl Iterator<Item = &Equipment> {
        self.equipment.values()
    }

    pub fn presets(&self) -> impl Iterator<Item = &CharacterPreset> {
        self.characters.values()
    }

    /// Build a character from a preset, full hp and mana, wearing its
    /// starting equipment
    pub fn spawn(&self, preset_id: &str, instance_id: &str) -> Result<Character, CombatError> {
        let preset = self
            .preset(preset_id)
            .ok_or_else(|| CombatError::missing("character", preset_id))?;

        let abilities = preset
            .abilities
            .iter()
            .map(|id| {
                self.ability(id)
                    .cloned()
                    .ok_or_else(|| CombatError::missing("ability", id.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut stats = preset.stats.clone();
        stats.restore_all();

        let mut character = Character::new(instance_id, preset.name.as_str(), preset.class, stats)
            .with_kind(preset.kind)
            .with_constants(self.constants.clone())
            .with_abilities(abilities)
            .with_buffs(self.buffs.values().cloned())
            .with_sets(self.sets.values().cloned().collect())
            .with_experience_reward(preset.experience_reward);

        for item_id in &preset.starting_equipment {
            let item = self
                .equipment(item_id)
                .cloned()
                .ok_or_else(|| CombatError::missing("equipment", item_id.as_str()))?;
            character.equip(item)?;
        }
        character.drain_events();
        Ok(character)
    }
}

fn require(kind: &str, id: &str, present: bool, owner: &str) -> Result<(), ConfigError> {
    if present {
        Ok(())
    } else {
        invalid(format!("'{}' references unknown {} '{}'", owner, kind, id))
    }
}

fn invalid<T>(message: String) -> Result<T, ConfigError> {
    Err(ConfigError::ValidationError(message))
}

/// Key records by id, rejecting duplicates
fn index<T>(
    kind: &str,
    records: Vec<T>,
    id: impl Fn(&T) -> &String,
) -> Result<BTreeMap<String, T>, ConfigError> {
    let mut map = BTreeMap::new();
    for record in records {
        let key = id(&record).clone();
        if map.contains_key(&key) {
            return invalid(format!("duplicate {} id '{}'", kind, key));
        }
        map.insert(key, record);
    }
    Ok(map)
}

/// Bundled game data, or an empty catalogue if it fails to load
pub fn default_game_data() -> GameData {
    GameData::bundled().unwrap_or_else(|err| {
        warn!(error = %err, "bundled game data failed to load, using empty catalogue");
        GameData::default()
    })
}
