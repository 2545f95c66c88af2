//! Progression - Experience and level-ups
//!
//! Experience is spent on each level-up: crossing a threshold subtracts it and
//! the remainder carries toward the next level.

use crate::stats::{clamp_critical_chance, CharacterStats};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Flat stat gains applied on every level-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelUpGrowth {
    pub attack_damage: f64,
    pub magic_damage: f64,
    pub attack_speed: f64,
    pub physical_armor: i32,
    pub magic_armor: i32,
    pub critical_chance: f64,
    pub max_hp: u32,
    pub max_mana: u32,
}

impl Default for LevelUpGrowth {
    fn default() -> Self {
        LevelUpGrowth {
            attack_damage: 3.0,
            magic_damage: 1.0,
            attack_speed: 0.05,
            physical_armor: 1,
            magic_armor: 1,
            critical_chance: 0.01,
            max_hp: 15,
            max_mana: 5,
        }
    }
}

impl LevelUpGrowth {
    /// Raise `stats` by one level and refill hp and mana
    pub fn apply(&self, stats: &mut CharacterStats) {
        stats.level += 1;
        stats.attack_damage += self.attack_damage;
        stats.magic_damage += self.magic_damage;
        stats.attack_speed += self.attack_speed;
        stats.physical_armor += self.physical_armor;
        stats.magic_armor += self.magic_armor;
        stats.critical_chance = clamp_critical_chance(stats.critical_chance + self.critical_chance);
        stats.max_hp = stats.max_hp.saturating_add(self.max_hp);
        stats.max_mana = stats.max_mana.saturating_add(self.max_mana);
        stats.restore_all();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionTracker {
    experience: u64,
    experience_to_next_level: u64,
    pub growth: LevelUpGrowth,
    /// Threshold multiplier applied after each level-up
    pub growth_factor: f64,
    pub max_level: u32,
}

impl Default for ProgressionTracker {
    fn default() -> Self {
        ProgressionTracker::new(100, 1.2, 100)
    }
}

impl ProgressionTracker {
    pub fn new(experience_to_next_level: u64, growth_factor: f64, max_level: u32) -> Self {
        ProgressionTracker {
            experience: 0,
            experience_to_next_level: experience_to_next_level.max(1),
            growth: LevelUpGrowth::default(),
            growth_factor,
            max_level,
        }
    }

    pub fn with_growth(mut self, growth: LevelUpGrowth) -> Self {
        self.growth = growth;
        self
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u64 {
        self.experience_to_next_level
    }

    /// Fraction of the way to the next level
    pub fn progress(&self) -> f64 {
        (self.experience as f64 / self.experience_to_next_level as f64).min(1.0)
    }

    pub fn can_level_up(&self, stats: &CharacterStats) -> bool {
        stats.level < self.max_level && self.experience >= self.experience_to_next_level
    }

    /// Add experience and apply every level-up it pays for.
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u64, stats: &mut CharacterStats) -> u32 {
        self.experience = self.experience.saturating_add(amount);

        let mut levels = 0;
        while self.can_level_up(stats) {
            self.experience -= self.experience_to_next_level;
            self.growth.apply(stats);
            self.experience_to_next_level = self.next_threshold();
            levels += 1;
            info!(level = stats.level, next = self.experience_to_next_level, "level up");
        }
        levels
    }

    /// Start over from level-one thresholds
    pub fn reset(&mut self, experience_to_next_level: u64) {
        self.experience = 0;
        self.experience_to_next_level = experience_to_next_level.max(1);
    }

    fn next_threshold(&self) -> u64 {
        let next = (self.experience_to_next_level as f64 * self.growth_factor).round();
        (next as u64).max(1)
    }
}
