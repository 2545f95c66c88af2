//! StatBonus - Additive stat deltas and their application

use crate::stats::{clamp_critical_chance, CharacterStats};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg};

/// Additive deltas carried by equipment and (per stack) by buffs
///
/// Every field is purely additive, so the inverse of a bonus is its
/// negation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonus {
    pub attack_damage: f64,
    pub magic_damage: f64,
    pub attack_speed: f64,
    pub physical_armor: i32,
    pub magic_armor: i32,
    pub critical_chance: f64,
    pub move_speed: f64,
}

impl StatBonus {
    /// The bonus that undoes this one
    pub fn negate(&self) -> StatBonus {
        -*self
    }

    /// Magnitude of `stacks` applications. Armor rounds to the nearest point.
    pub fn scaled(&self, stacks: u32) -> StatBonus {
        let k = stacks as f64;
        StatBonus {
            attack_damage: self.attack_damage * k,
            magic_damage: self.magic_damage * k,
            attack_speed: self.attack_speed * k,
            physical_armor: (self.physical_armor as f64 * k).round() as i32,
            magic_armor: (self.magic_armor as f64 * k).round() as i32,
            critical_chance: self.critical_chance * k,
            move_speed: self.move_speed * k,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == StatBonus::default()
    }

    /// Human-readable list of the non-zero fields
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.attack_damage != 0.0 {
            parts.push(format!("{:+.0} attack", self.attack_damage));
        }
        if self.magic_damage != 0.0 {
            parts.push(format!("{:+.0} magic", self.magic_damage));
        }
        if self.attack_speed != 0.0 {
            parts.push(format!("{:+.2} attack speed", self.attack_speed));
        }
        if self.physical_armor != 0 {
            parts.push(format!("{:+} armor", self.physical_armor));
        }
        if self.magic_armor != 0 {
            parts.push(format!("{:+} magic armor", self.magic_armor));
        }
        if self.critical_chance != 0.0 {
            parts.push(format!("{:+.0}% crit", self.critical_chance * 100.0));
        }
        if self.move_speed != 0.0 {
            parts.push(format!("{:+.1} move speed", self.move_speed));
        }

        if parts.is_empty() {
            "no bonus".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl Add for StatBonus {
    type Output = StatBonus;

    fn add(self, rhs: StatBonus) -> StatBonus {
        StatBonus {
            attack_damage: self.attack_damage + rhs.attack_damage,
            magic_damage: self.magic_damage + rhs.magic_damage,
            attack_speed: self.attack_speed + rhs.attack_speed,
            physical_armor: self.physical_armor + rhs.physical_armor,
            magic_armor: self.magic_armor + rhs.magic_armor,
            critical_chance: self.critical_chance + rhs.critical_chance,
            move_speed: self.move_speed + rhs.move_speed,
        }
    }
}

impl AddAssign for StatBonus {
    fn add_assign(&mut self, rhs: StatBonus) {
        *self = *self + rhs;
    }
}

impl Neg for StatBonus {
    type Output = StatBonus;

    fn neg(self) -> StatBonus {
        StatBonus {
            attack_damage: -self.attack_damage,
            magic_damage: -self.magic_damage,
            attack_speed: -self.attack_speed,
            physical_armor: -self.physical_armor,
            magic_armor: -self.magic_armor,
            critical_chance: -self.critical_chance,
            move_speed: -self.move_speed,
        }
    }
}

/// Return `stats` with every bonus field added, critical chance clamped
pub fn apply(stats: &CharacterStats, bonus: &StatBonus) -> CharacterStats {
    let mut next = stats.clone();
    next.attack_damage += bonus.attack_damage;
    next.magic_damage += bonus.magic_damage;
    next.attack_speed += bonus.attack_speed;
    next.physical_armor += bonus.physical_armor;
    next.magic_armor += bonus.magic_armor;
    next.move_speed += bonus.move_speed;
    next.critical_chance = clamp_critical_chance(next.critical_chance + bonus.critical_chance);
    next
}

/// Undo a previous `apply` of the same bonus
pub fn revert(stats: &CharacterStats, bonus: &StatBonus) -> CharacterStats {
    apply(stats, &bonus.negate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MAX_CRITICAL_CHANCE;
    use proptest::prelude::*;

    fn sword() -> StatBonus {
        StatBonus {
            attack_damage: 12.0,
            attack_speed: 0.1,
            critical_chance: 0.03,
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_adds_fields() {
        let stats = CharacterStats::new();
        let next = apply(&stats, &sword());
        assert!((next.attack_damage - 32.0).abs() < 1e-9);
        assert!((next.attack_speed - 1.1).abs() < 1e-9);
        assert!((next.critical_chance - 0.08).abs() < 1e-9);
        // Untouched fields
        assert_eq!(next.hp, stats.hp);
        assert_eq!(next.physical_armor, stats.physical_armor);
    }

    #[test]
    fn test_apply_then_revert() {
        let stats = CharacterStats::new();
        let bonus = StatBonus {
            physical_armor: 4,
            magic_armor: -2,
            ..sword()
        };
        let restored = revert(&apply(&stats, &bonus), &bonus);
        assert_eq!(restored.physical_armor, stats.physical_armor);
        assert_eq!(restored.magic_armor, stats.magic_armor);
        assert!((restored.attack_damage - stats.attack_damage).abs() < 1e-9);
        assert!((restored.critical_chance - stats.critical_chance).abs() < 1e-9);
    }

    #[test]
    fn test_critical_chance_clamped() {
        let stats = CharacterStats::new();
        let bonus = StatBonus {
            critical_chance: 0.9,
            ..Default::default()
        };
        assert_eq!(apply(&stats, &bonus).critical_chance, MAX_CRITICAL_CHANCE);
        assert_eq!(revert(&stats, &bonus).critical_chance, 0.0);
    }

    #[test]
    fn test_scaled_rounds_armor() {
        let bonus = StatBonus {
            physical_armor: 3,
            attack_damage: 2.5,
            ..Default::default()
        };
        let scaled = bonus.scaled(3);
        assert_eq!(scaled.physical_armor, 9);
        assert!((scaled.attack_damage - 7.5).abs() < 1e-9);
        assert!(bonus.scaled(0).is_zero());
    }

    #[test]
    fn test_describe() {
        assert_eq!(StatBonus::default().describe(), "no bonus");
        assert!(sword().describe().contains("+12 attack"));
    }

    fn arb_bonus() -> impl Strategy<Value = StatBonus> {
        (
            -50.0f64..50.0,
            -50.0f64..50.0,
            -0.5f64..0.5,
            -20i32..20,
            -20i32..20,
            -0.04f64..0.04,
            -3.0f64..3.0,
        )
            .prop_map(|(ad, md, aspd, pa, ma, crit, ms)| StatBonus {
                attack_damage: ad,
                magic_damage: md,
                attack_speed: aspd,
                physical_armor: pa,
                magic_armor: ma,
                critical_chance: crit,
                move_speed: ms,
            })
    }

    proptest! {
        #[test]
        fn prop_revert_restores_stats(bonus in arb_bonus(), crit in 0.05f64..0.45) {
            let mut stats = CharacterStats::new();
            stats.critical_chance = crit;
            let restored = revert(&apply(&stats, &bonus), &bonus);

            prop_assert_eq!(restored.physical_armor, stats.physical_armor);
            prop_assert_eq!(restored.magic_armor, stats.magic_armor);
            prop_assert!((restored.attack_damage - stats.attack_damage).abs() < 1e-9);
            prop_assert!((restored.magic_damage - stats.magic_damage).abs() < 1e-9);
            prop_assert!((restored.attack_speed - stats.attack_speed).abs() < 1e-9);
            prop_assert!((restored.critical_chance - stats.critical_chance).abs() < 1e-9);
            prop_assert!((restored.move_speed - stats.move_speed).abs() < 1e-9);
        }

        #[test]
        fn prop_critical_chance_in_bounds(crit in -5.0f64..5.0, base in 0.0f64..0.5) {
            let mut stats = CharacterStats::new();
            stats.critical_chance = base;
            let bonus = StatBonus { critical_chance: crit, ..Default::default() };
            let next = apply(&stats, &bonus);
            prop_assert!(next.critical_chance >= 0.0);
            prop_assert!(next.critical_chance <= MAX_CRITICAL_CHANCE);
        }
    }
}
