//! CharacterStats - Base and derived numeric attributes of a character

mod computed;

use serde::{Deserialize, Serialize};

/// Upper bound on critical strike chance
pub const MAX_CRITICAL_CHANCE: f64 = 0.5;

/// Complete stat snapshot for one character
///
/// This is a plain value type. A `Character` owns two of them (base and
/// effective) and only changes them through the modifier stack, the
/// progression tracker and combat resolution.
///
/// Invariants kept by every mutating entry point:
/// - `hp <= max_hp`
/// - `mana <= max_mana`
/// - `0 <= critical_chance <= MAX_CRITICAL_CHANCE`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    pub level: u32,

    // === Resources ===
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,

    // === Offense ===
    pub attack_damage: f64,
    pub magic_damage: f64,
    /// Attacks per second
    pub attack_speed: f64,
    pub attack_range: f64,
    /// Chance in [0, 0.5]
    pub critical_chance: f64,
    pub critical_multiplier: f64,

    // === Defense ===
    pub physical_armor: i32,
    pub magic_armor: i32,
    pub dodge_chance: f64,
    pub block_chance: f64,

    // === Movement ===
    pub move_speed: f64,
    pub jump_force: f64,
    pub dash_speed: f64,
    /// Seconds between dashes
    pub dash_cooldown: f64,

    // === Recovery ===
    /// Hp restored per regeneration interval
    pub hp_regen: f64,
    /// Mana restored per regeneration interval
    pub mana_regen: f64,
}

impl Default for CharacterStats {
    fn default() -> Self {
        CharacterStats {
            level: 1,
            hp: 100,
            max_hp: 100,
            mana: 50,
            max_mana: 50,
            attack_damage: 20.0,
            magic_damage: 10.0,
            attack_speed: 1.0,
            attack_range: 1.5,
            critical_chance: 0.05,
            critical_multiplier: 1.5,
            physical_armor: 5,
            magic_armor: 3,
            dodge_chance: 0.02,
            block_chance: 0.1,
            move_speed: 5.0,
            jump_force: 8.0,
            dash_speed: 10.0,
            dash_cooldown: 2.0,
            hp_regen: 1.0,
            mana_regen: 0.5,
        }
    }
}

impl CharacterStats {
    /// Create default stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the character is alive
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Restore hp by amount, capped at max. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Restore mana by amount, capped at max. Returns the amount restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let before = self.mana;
        self.mana = self.mana.saturating_add(amount).min(self.max_mana);
        self.mana - before
    }

    /// Remove hp, flooring at zero. Returns true if this reduced hp to zero.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.hp = self.hp.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    /// Spend mana. The caller has already checked the cost is affordable.
    pub(crate) fn spend_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_sub(amount);
    }

    /// Fill hp and mana to their maximums
    pub fn restore_all(&mut self) {
        self.hp = self.max_hp;
        self.mana = self.max_mana;
    }

    /// Re-establish the resource and critical chance bounds
    pub(crate) fn enforce_bounds(&mut self) {
        self.hp = self.hp.min(self.max_hp);
        self.mana = self.mana.min(self.max_mana);
        self.critical_chance = clamp_critical_chance(self.critical_chance);
    }
}

/// Clamp a critical chance into `[0, MAX_CRITICAL_CHANCE]`
pub fn clamp_critical_chance(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_CRITICAL_CHANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_respect_invariants() {
        let stats = CharacterStats::new();
        assert!(stats.hp <= stats.max_hp);
        assert!(stats.mana <= stats.max_mana);
        assert!(stats.critical_chance >= 0.0 && stats.critical_chance <= MAX_CRITICAL_CHANCE);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut stats = CharacterStats::new();
        assert!(!stats.take_damage(30));
        assert_eq!(stats.hp, 70);

        assert!(stats.take_damage(500));
        assert_eq!(stats.hp, 0);

        // Already dead: not a new kill
        assert!(!stats.take_damage(10));
    }

    #[test]
    fn test_heal_capped() {
        let mut stats = CharacterStats::new();
        stats.hp = 90;
        assert_eq!(stats.heal(25), 10);
        assert_eq!(stats.hp, 100);
    }

    #[test]
    fn test_clamp_critical_chance() {
        assert_eq!(clamp_critical_chance(0.7), 0.5);
        assert_eq!(clamp_critical_chance(-0.2), 0.0);
        assert_eq!(clamp_critical_chance(f64::NAN), 0.0);
        assert!((clamp_critical_chance(0.25) - 0.25).abs() < f64::EPSILON);
    }
}
