//! Combat tuning constants

use crate::progression::{LevelUpGrowth, ProgressionTracker};
use serde::{Deserialize, Serialize};

/// Timings and progression knobs shared by every character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Seconds a basic attack locks the attacker
    #[serde(default = "default_attack_duration")]
    pub attack_duration: f64,
    /// Seconds a dash locks the character
    #[serde(default = "default_dash_duration")]
    pub dash_duration: f64,
    /// Seconds a damaged character ignores further hits (0 disables)
    #[serde(default = "default_invulnerability_window")]
    pub invulnerability_window: f64,
    /// Seconds without damage before regeneration starts
    #[serde(default = "default_regen_delay")]
    pub regen_delay: f64,
    #[serde(default = "default_regen_interval")]
    pub regen_interval: f64,
    /// Move requests shorter than this count as "stop"
    #[serde(default = "default_move_threshold")]
    pub move_threshold: f64,
    /// Threshold multiplier after each level-up
    #[serde(default = "default_experience_growth")]
    pub experience_growth: f64,
    #[serde(default = "default_base_experience")]
    pub base_experience_to_next_level: u64,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default)]
    pub growth: LevelUpGrowth,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            attack_duration: default_attack_duration(),
            dash_duration: default_dash_duration(),
            invulnerability_window: default_invulnerability_window(),
            regen_delay: default_regen_delay(),
            regen_interval: default_regen_interval(),
            move_threshold: default_move_threshold(),
            experience_growth: default_experience_growth(),
            base_experience_to_next_level: default_base_experience(),
            max_level: default_max_level(),
            growth: LevelUpGrowth::default(),
        }
    }
}

impl CombatConstants {
    /// A fresh level-one progression tracker using these constants
    pub fn progression(&self) -> ProgressionTracker {
        ProgressionTracker::new(
            self.base_experience_to_next_level,
            self.experience_growth,
            self.max_level,
        )
        .with_growth(self.growth)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let durations = [
            ("attack_duration", self.attack_duration),
            ("dash_duration", self.dash_duration),
            ("invulnerability_window", self.invulnerability_window),
            ("regen_delay", self.regen_delay),
            ("regen_interval", self.regen_interval),
            ("move_threshold", self.move_threshold),
        ];
        for (name, value) in durations {
            if value.is_nan() || value < 0.0 {
                return Err(format!("{} must be non-negative, got {}", name, value));
            }
        }
        if self.base_experience_to_next_level == 0 {
            return Err("base_experience_to_next_level must be at least 1".to_string());
        }
        if self.experience_growth.is_nan() || self.experience_growth < 1.0 {
            return Err(format!(
                "experience_growth must be at least 1.0, got {}",
                self.experience_growth
            ));
        }
        Ok(())
    }
}

fn default_attack_duration() -> f64 {
    0.5
}
fn default_dash_duration() -> f64 {
    0.2
}
fn default_invulnerability_window() -> f64 {
    0.5
}
fn default_regen_delay() -> f64 {
    2.0
}
fn default_regen_interval() -> f64 {
    1.0
}
fn default_move_threshold() -> f64 {
    0.1
}
fn default_experience_growth() -> f64 {
    1.2
}
fn default_base_experience() -> u64 {
    100
}
fn default_max_level() -> u32 {
    100
}
