//! Buffs - Timed and permanent stat modifiers with stacking

use crate::modifier::StatBonus;
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};

fn default_max_stacks() -> u32 {
    1
}

/// Static buff definition loaded from data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Seconds; zero or negative means permanent
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default = "default_max_stacks")]
    pub max_stacks: u32,
    #[serde(default)]
    pub is_debuff: bool,
    /// Deltas applied once per stack
    #[serde(default)]
    pub modifiers: StatBonus,
}

impl BuffTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: f64) -> Self {
        BuffTemplate {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            duration,
            stackable: false,
            max_stacks: 1,
            is_debuff: false,
            modifiers: StatBonus::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: StatBonus) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Allow up to `max_stacks` stacks
    pub fn stacking(mut self, max_stacks: u32) -> Self {
        self.stackable = true;
        self.max_stacks = max_stacks.max(1);
        self
    }

    pub fn debuff(mut self) -> Self {
        self.is_debuff = true;
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.duration <= 0.0
    }
}

/// Where an active buff came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffOrigin {
    /// Applied directly (abilities, items, scripts)
    Applied,
    /// Passive buff of the item in this slot; lives until the item is removed
    Equipment(EquipmentSlot),
}

/// A buff currently affecting a character
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveBuff {
    pub template: BuffTemplate,
    pub origin: BuffOrigin,
    /// Seconds left, `None` for permanent buffs
    pub remaining: Option<f64>,
    stacks: u32,
}

impl ActiveBuff {
    pub fn new(template: BuffTemplate, origin: BuffOrigin) -> Self {
        let remaining = match origin {
            BuffOrigin::Equipment(_) => None,
            BuffOrigin::Applied if template.is_permanent() => None,
            BuffOrigin::Applied => Some(template.duration),
        };
        ActiveBuff {
            template,
            origin,
            remaining,
            stacks: 1,
        }
    }

    pub fn id(&self) -> &str {
        &self.template.id
    }

    pub fn stacks(&self) -> u32 {
        self.stacks
    }

    /// Stack count used for magnitude: 1 unless the buff stacks
    pub fn effective_stacks(&self) -> u32 {
        if self.template.stackable {
            self.stacks
        } else {
            1
        }
    }

    /// Total bonus contributed right now
    pub fn magnitude(&self) -> StatBonus {
        self.template.modifiers.scaled(self.effective_stacks())
    }

    /// Re-application: refresh the duration and, if stackable, add a stack
    /// up to the cap. Returns the new stack count.
    pub fn reapply(&mut self) -> u32 {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = self.template.duration;
        }
        if self.template.stackable {
            self.stacks = (self.stacks + 1).min(self.template.max_stacks.max(1));
        }
        self.stacks
    }

    /// Advance the timer. Returns true while the buff is still active.
    pub fn tick(&mut self, delta: f64) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= delta.max(0.0);
        }
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.remaining.map_or(true, |r| r > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rage() -> BuffTemplate {
        BuffTemplate::new("rage", "Rage", 5.0)
            .with_modifiers(StatBonus {
                attack_damage: 4.0,
                ..Default::default()
            })
            .stacking(3)
    }

    #[test]
    fn test_non_stackable_refreshes_only() {
        let template = BuffTemplate::new("guard", "Guard", 5.0);
        let mut buff = ActiveBuff::new(template, BuffOrigin::Applied);
        buff.tick(3.0);
        assert_eq!(buff.reapply(), 1);
        assert_eq!(buff.remaining, Some(5.0));
    }

    #[test]
    fn test_stackable_caps_at_max() {
        let mut buff = ActiveBuff::new(rage(), BuffOrigin::Applied);
        for _ in 0..5 {
            buff.reapply();
        }
        assert_eq!(buff.stacks(), 3);
        assert!((buff.magnitude().attack_damage - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_expires_after_duration() {
        let mut buff = ActiveBuff::new(rage(), BuffOrigin::Applied);
        assert!(buff.tick(4.9));
        assert!(!buff.tick(0.2));
    }

    #[test]
    fn test_permanent_buffs_never_expire() {
        let template = BuffTemplate::new("aura", "Aura", 0.0);
        let mut buff = ActiveBuff::new(template, BuffOrigin::Applied);
        assert_eq!(buff.remaining, None);
        assert!(buff.tick(1000.0));

        let mut passive = ActiveBuff::new(rage(), BuffOrigin::Equipment(EquipmentSlot::Ring));
        assert!(passive.tick(1000.0));
    }

    #[test]
    fn test_deserialize_defaults() {
        let template: BuffTemplate = toml::from_str(
            r#"
            id = "slow"
            name = "Slow"
            duration = 3.0
            is_debuff = true
            [modifiers]
            move_speed = -2.0
            "#,
        )
        .unwrap();
        assert_eq!(template.max_stacks, 1);
        assert!(!template.stackable);
        assert_eq!(template.modifiers.move_speed, -2.0);
    }

    proptest! {
        #[test]
        fn prop_stacks_within_bounds(max in 1u32..10, applications in 0usize..30, stackable in any::<bool>()) {
            let mut template = BuffTemplate::new("b", "B", 5.0);
            template.stackable = stackable;
            template.max_stacks = max;
            let mut buff = ActiveBuff::new(template, BuffOrigin::Applied);
            for _ in 0..applications {
                buff.reapply();
            }
            prop_assert!(buff.stacks() >= 1);
            prop_assert!(buff.stacks() <= max);
            if !stackable {
                prop_assert_eq!(buff.effective_stacks(), 1);
            }
        }
    }
}
