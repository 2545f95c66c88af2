//! Exchange - One attacker hitting one defender, with kill credit

use super::{HitReport, Rolls};
use crate::character::{Damageable, Levelable, StatHolder};
use crate::types::DamageKind;
use rand::Rng;

/// Resolve a hit from `attacker` on `defender`. A killing blow credits the
/// defender's experience reward to the attacker.
pub fn exchange<A, D, R>(
    attacker: &mut A,
    defender: &mut D,
    base_damage: f64,
    kind: DamageKind,
    rng: &mut R,
) -> Option<HitReport>
where
    A: StatHolder + Levelable,
    D: Damageable,
    R: Rng + ?Sized,
{
    let rolls = Rolls::draw(rng);
    let attacker_stats = attacker.stats().clone();
    let report = defender.receive_hit(base_damage, kind, &attacker_stats, rolls)?;
    if report.killing_blow {
        attacker.gain_experience(defender.experience_reward());
    }
    Some(report)
}
