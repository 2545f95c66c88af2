//! AbilityDefinition - Immutable ability records

use crate::stats::CharacterStats;
use crate::types::{CharacterClass, DamageKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    /// Deals damage; the caster enters Attacking
    #[default]
    Attack,
    /// Grants a buff to the caster; the caster enters Casting
    Buff,
    /// Restores caster health; the caster enters Casting
    Heal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaOfEffect {
    pub radius: f64,
}

fn default_animation_duration() -> f64 {
    0.5
}

fn default_hit_count() -> u32 {
    1
}

fn default_range() -> f64 {
    1.0
}

/// Ability definition loaded from data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: AbilityKind,
    #[serde(default)]
    pub required_class: CharacterClass,
    #[serde(default)]
    pub cooldown: f64,
    #[serde(default)]
    pub mana_cost: u32,
    /// Flat damage; 0 scales off the caster's damage stat
    #[serde(default)]
    pub damage: f64,
    #[serde(default)]
    pub damage_kind: DamageKind,
    #[serde(default = "default_range")]
    pub range: f64,
    #[serde(default)]
    pub area: Option<AreaOfEffect>,
    /// Buff granted to the caster
    #[serde(default)]
    pub buff: Option<String>,
    #[serde(default)]
    pub heal_amount: u32,
    /// How long the caster is locked in Attacking/Casting
    #[serde(default = "default_animation_duration")]
    pub animation_duration: f64,
    /// Seconds before the first hit lands
    #[serde(default)]
    pub hit_delay: f64,
    #[serde(default = "default_hit_count")]
    pub hit_count: u32,
    /// Seconds between consecutive hits
    #[serde(default)]
    pub hit_interval: f64,
}

impl AbilityDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AbilityKind) -> Self {
        AbilityDefinition {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            required_class: CharacterClass::None,
            cooldown: 0.0,
            mana_cost: 0,
            damage: 0.0,
            damage_kind: DamageKind::Physical,
            range: default_range(),
            area: None,
            buff: None,
            heal_amount: 0,
            animation_duration: default_animation_duration(),
            hit_delay: 0.0,
            hit_count: 1,
            hit_interval: 0.0,
        }
    }

    pub fn with_cost(mut self, cooldown: f64, mana_cost: u32) -> Self {
        self.cooldown = cooldown;
        self.mana_cost = mana_cost;
        self
    }

    pub fn with_damage(mut self, damage: f64, kind: DamageKind) -> Self {
        self.damage = damage;
        self.damage_kind = kind;
        self
    }

    pub fn for_class(mut self, class: CharacterClass) -> Self {
        self.required_class = class;
        self
    }

    pub fn with_buff(mut self, buff_id: impl Into<String>) -> Self {
        self.buff = Some(buff_id.into());
        self
    }

    pub fn with_hits(mut self, delay: f64, count: u32, interval: f64) -> Self {
        self.hit_delay = delay;
        self.hit_count = count;
        self.hit_interval = interval;
        self
    }

    pub fn with_area(mut self, radius: f64) -> Self {
        self.area = Some(AreaOfEffect { radius });
        self
    }

    pub fn can_be_used_by(&self, class: CharacterClass) -> bool {
        self.required_class.permits(class)
    }

    /// Raw damage per hit before mitigation
    pub fn effective_damage(&self, caster: &CharacterStats) -> f64 {
        if self.damage > 0.0 {
            self.damage
        } else {
            caster.damage_of_kind(self.damage_kind)
        }
    }

    /// Hits this ability schedules when used, in landing order
    pub fn strikes(&self, caster: &CharacterStats) -> Vec<PendingStrike> {
        if self.kind != AbilityKind::Attack {
            return Vec::new();
        }
        let damage = self.effective_damage(caster);
        (0..self.hit_count.max(1))
            .map(|i| PendingStrike {
                ability_id: self.id.clone(),
                delay: self.hit_delay.max(0.0) + self.hit_interval.max(0.0) * i as f64,
                damage,
                damage_kind: self.damage_kind,
                range: self.range,
                area: self.area,
            })
            .collect()
    }
}

/// A hit waiting to land
///
/// The caster counts `delay` down on each tick and hands the strike to the
/// driver once it reaches zero. Target selection belongs to the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingStrike {
    pub ability_id: String,
    pub delay: f64,
    pub damage: f64,
    pub damage_kind: DamageKind,
    pub range: f64,
    pub area: Option<AreaOfEffect>,
}

impl PendingStrike {
    pub fn is_ready(&self) -> bool {
        self.delay <= 0.0
    }
}
