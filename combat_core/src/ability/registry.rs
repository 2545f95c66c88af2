//! AbilityRegistry - Validates and executes ability use

use super::{AbilityDefinition, AbilityKind, CooldownTracker, PendingStrike};
use crate::error::CombatError;
use crate::stats::CharacterStats;
use crate::types::CharacterClass;

/// What a successful ability use asks the caller to carry out
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityEffect {
    pub ability_id: String,
    pub kind: AbilityKind,
    /// Hits in landing order
    pub strikes: Vec<PendingStrike>,
    pub buff: Option<String>,
    pub heal: u32,
    pub animation_duration: f64,
}

/// Abilities known to one character, in slot order
#[derive(Debug, Clone, Default)]
pub struct AbilityRegistry {
    abilities: Vec<AbilityDefinition>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an ability
    pub fn register(&mut self, ability: AbilityDefinition) {
        match self.abilities.iter_mut().find(|a| a.id == ability.id) {
            Some(existing) => *existing = ability,
            None => self.abilities.push(ability),
        }
    }

    pub fn get(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.iter().find(|a| a.id == id)
    }

    /// Ability in the given slot (0-based)
    pub fn slot(&self, index: usize) -> Option<&AbilityDefinition> {
        self.abilities.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.iter()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Check class, then mana, then cooldown. Mutates nothing.
    pub fn can_use(
        &self,
        id: &str,
        class: CharacterClass,
        stats: &CharacterStats,
        cooldowns: &CooldownTracker,
    ) -> Result<&AbilityDefinition, CombatError> {
        let ability = self
            .get(id)
            .ok_or_else(|| CombatError::missing("ability", id))?;

        if !ability.can_be_used_by(class) {
            return Err(CombatError::ClassMismatch {
                required: ability.required_class,
                actual: class,
            });
        }
        if ability.mana_cost > stats.mana {
            return Err(CombatError::InsufficientResource {
                required: ability.mana_cost,
                available: stats.mana,
            });
        }
        let remaining = cooldowns.remaining(id);
        if remaining > 0.0 {
            return Err(CombatError::OnCooldown {
                id: id.to_string(),
                remaining,
            });
        }
        Ok(ability)
    }

    /// Start the cooldown, spend the mana and describe the effect
    pub fn use_ability(
        &self,
        id: &str,
        class: CharacterClass,
        stats: &mut CharacterStats,
        cooldowns: &mut CooldownTracker,
    ) -> Result<AbilityEffect, CombatError> {
        let ability = self.can_use(id, class, stats, cooldowns)?;

        cooldowns.start(&ability.id, ability.cooldown);
        stats.spend_mana(ability.mana_cost);

        Ok(AbilityEffect {
            ability_id: ability.id.clone(),
            kind: ability.kind,
            strikes: ability.strikes(stats),
            buff: ability.buff.clone(),
            heal: if ability.kind == AbilityKind::Heal {
                ability.heal_amount
            } else {
                0
            },
            animation_duration: ability.animation_duration,
        })
    }
}
