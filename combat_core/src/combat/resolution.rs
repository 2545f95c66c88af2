//! Damage resolution - Turn a raw hit into final integer damage

use super::result::{DamageOutcome, HitReport};
use crate::stats::CharacterStats;
use crate::types::DamageKind;
use rand::Rng;

/// Floor for a hit that isn't dodged
pub const MIN_DAMAGE: u32 = 1;

/// The two uniform [0, 1) draws a hit consumes
///
/// Dodge belongs to the defender and crit to the attacker; they are drawn
/// independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rolls {
    pub dodge: f64,
    pub crit: f64,
}

impl Rolls {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Rolls {
            dodge: rng.gen(),
            crit: rng.gen(),
        }
    }

    /// Rolls that neither dodge nor crit
    pub fn never() -> Self {
        Rolls {
            dodge: 1.0,
            crit: 1.0,
        }
    }

    /// Rolls that dodge whenever dodge chance is non-zero
    pub fn dodged() -> Self {
        Rolls {
            dodge: 0.0,
            crit: 1.0,
        }
    }

    /// Rolls that crit whenever critical chance is non-zero
    pub fn critical() -> Self {
        Rolls {
            dodge: 1.0,
            crit: 0.0,
        }
    }
}

/// Resolve a hit using the thread RNG
pub fn resolve_damage(
    base_damage: f64,
    kind: DamageKind,
    attacker: &CharacterStats,
    defender: &CharacterStats,
) -> DamageOutcome {
    let mut rng = rand::thread_rng();
    resolve_damage_with_rng(base_damage, kind, attacker, defender, &mut rng)
}

/// Resolve a hit with a provided RNG (for deterministic testing)
pub fn resolve_damage_with_rng<R: Rng + ?Sized>(
    base_damage: f64,
    kind: DamageKind,
    attacker: &CharacterStats,
    defender: &CharacterStats,
    rng: &mut R,
) -> DamageOutcome {
    resolve_damage_with_rolls(base_damage, kind, attacker, defender, Rolls::draw(rng))
}

/// Resolve a hit from already-drawn rolls
///
/// 1. Armor matching the damage kind is subtracted, floored at `MIN_DAMAGE`
/// 2. A successful dodge zeroes the hit
/// 3. Otherwise a successful crit multiplies it
/// 4. The result is rounded to whole hit points
pub fn resolve_damage_with_rolls(
    base_damage: f64,
    kind: DamageKind,
    attacker: &CharacterStats,
    defender: &CharacterStats,
    rolls: Rolls,
) -> DamageOutcome {
    let armor = defender.armor_against(kind);
    let mitigated = (base_damage - armor as f64).max(MIN_DAMAGE as f64);

    let dodged = rolls.dodge < defender.dodge_chance;
    let critical = rolls.crit < attacker.critical_chance;

    let final_damage = if dodged {
        0.0
    } else if critical {
        mitigated * attacker.critical_multiplier
    } else {
        mitigated
    };

    DamageOutcome {
        base_damage,
        kind,
        armor,
        mitigated,
        dodged,
        critical,
        damage: final_damage.round().max(0.0) as u32,
    }
}

/// Subtract a resolved hit from `defender`. Dead targets are left alone.
pub fn apply_hit(defender: &mut CharacterStats, outcome: DamageOutcome) -> Option<HitReport> {
    if !defender.is_alive() {
        return None;
    }
    let hp_before = defender.hp;
    let killing_blow = defender.take_damage(outcome.damage);
    Some(HitReport {
        outcome,
        hp_before,
        hp_after: defender.hp,
        killing_blow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn defender() -> CharacterStats {
        let mut stats = CharacterStats::new();
        stats.hp = 100;
        stats.max_hp = 100;
        stats.physical_armor = 8;
        stats
    }

    #[test]
    fn test_armor_mitigation() {
        let mut target = defender();
        let outcome = resolve_damage_with_rolls(
            20.0,
            DamageKind::Physical,
            &CharacterStats::new(),
            &target,
            Rolls::never(),
        );
        assert_eq!(outcome.mitigated, 12.0);
        assert_eq!(outcome.damage, 12);

        let report = apply_hit(&mut target, outcome).unwrap();
        assert_eq!(report.hp_before, 100);
        assert_eq!(target.hp, 88);
        assert!(!report.killing_blow);
    }

    #[test]
    fn test_dodge_zeroes_damage() {
        let mut target = defender();
        let attacker = CharacterStats::new();
        let outcome =
            resolve_damage_with_rolls(20.0, DamageKind::Physical, &attacker, &target, Rolls::dodged());
        assert!(outcome.dodged);
        assert_eq!(outcome.damage, 0);
        apply_hit(&mut target, outcome);
        assert_eq!(target.hp, 100);
    }

    #[test]
    fn test_dodge_overrides_crit() {
        let target = defender();
        let attacker = CharacterStats::new();
        let rolls = Rolls {
            dodge: 0.0,
            crit: 0.0,
        };
        let outcome = resolve_damage_with_rolls(20.0, DamageKind::Physical, &attacker, &target, rolls);
        assert!(outcome.dodged);
        assert!(outcome.critical);
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn test_minimum_damage_floor() {
        let mut target = defender();
        target.physical_armor = 50;
        let outcome = resolve_damage_with_rolls(
            20.0,
            DamageKind::Physical,
            &CharacterStats::new(),
            &target,
            Rolls::never(),
        );
        assert_eq!(outcome.damage, MIN_DAMAGE);
    }

    #[test]
    fn test_critical_multiplies_mitigated() {
        let target = defender();
        let attacker = CharacterStats::new();
        let outcome = resolve_damage_with_rolls(
            20.0,
            DamageKind::Physical,
            &attacker,
            &target,
            Rolls::critical(),
        );
        assert!(outcome.critical);
        assert_eq!(outcome.damage, 18);
    }

    #[test]
    fn test_magic_uses_magic_armor() {
        let mut target = defender();
        target.magic_armor = 2;
        let outcome = resolve_damage_with_rolls(
            20.0,
            DamageKind::Magical,
            &CharacterStats::new(),
            &target,
            Rolls::never(),
        );
        assert_eq!(outcome.armor, 2);
        assert_eq!(outcome.damage, 18);
    }

    #[test]
    fn test_killing_blow_and_dead_noop() {
        let mut target = defender();
        target.hp = 10;
        let attacker = CharacterStats::new();
        let outcome =
            resolve_damage_with_rolls(30.0, DamageKind::Physical, &attacker, &target, Rolls::never());
        let report = apply_hit(&mut target, outcome).unwrap();
        assert!(report.killing_blow);
        assert_eq!(target.hp, 0);

        assert!(apply_hit(&mut target, outcome).is_none());
        assert_eq!(target.hp, 0);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let target = defender();
        let attacker = CharacterStats::new();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                resolve_damage_with_rng(20.0, DamageKind::Physical, &attacker, &target, &mut a),
                resolve_damage_with_rng(20.0, DamageKind::Physical, &attacker, &target, &mut b)
            );
        }
    }

    proptest! {
        #[test]
        fn prop_undodged_hits_deal_at_least_one(
            base in -100.0f64..500.0,
            armor in -20i32..200,
            dodge in 0.0f64..1.0,
            crit in 0.0f64..1.0,
        ) {
            let mut target = defender();
            target.physical_armor = armor;
            let outcome = resolve_damage_with_rolls(
                base,
                DamageKind::Physical,
                &CharacterStats::new(),
                &target,
                Rolls { dodge, crit },
            );
            if outcome.dodged {
                prop_assert_eq!(outcome.damage, 0);
            } else {
                prop_assert!(outcome.damage >= MIN_DAMAGE);
            }
        }
    }
}
