//! Derived queries for CharacterStats

use crate::stats::CharacterStats;
use crate::types::DamageKind;

impl CharacterStats {
    /// Armor that applies against a damage kind
    pub fn armor_against(&self, kind: DamageKind) -> i32 {
        match kind {
            DamageKind::Physical => self.physical_armor,
            DamageKind::Magical => self.magic_armor,
        }
    }

    /// Base damage the character deals with a damage kind
    pub fn damage_of_kind(&self, kind: DamageKind) -> f64 {
        match kind {
            DamageKind::Physical => self.attack_damage,
            DamageKind::Magical => self.magic_damage,
        }
    }

    /// Health as a fraction in [0, 1]
    pub fn health_percentage(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        (self.hp as f64 / self.max_hp as f64).clamp(0.0, 1.0)
    }

    /// Mana as a fraction in [0, 1]
    pub fn mana_percentage(&self) -> f64 {
        if self.max_mana == 0 {
            return 0.0;
        }
        (self.mana as f64 / self.max_mana as f64).clamp(0.0, 1.0)
    }

    /// Seconds between basic attacks
    pub fn attack_interval(&self) -> f64 {
        if self.attack_speed <= 0.0 {
            return f64::INFINITY;
        }
        1.0 / self.attack_speed
    }

    /// Average damage per basic attack including critical strikes
    pub fn expected_hit_damage(&self) -> f64 {
        let crit_bonus = self.critical_chance * (self.critical_multiplier - 1.0);
        self.attack_damage * (1.0 + crit_bonus)
    }
}
