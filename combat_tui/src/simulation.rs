//! Duel simulation utilities

use combat_core::prelude::*;
use rand::Rng;

/// Seconds per simulation step
const STEP: f64 = 0.05;

/// Basic-attack duel between copies of two characters
#[derive(Debug, Clone, Default)]
pub struct DuelSimulation {
    /// Damage dealt by the attacker
    pub total_damage: u64,
    /// Damage the defender dealt back
    pub damage_taken: u64,
    pub total_time: f64,
    pub hit_count: u32,
    pub crit_count: u32,
    pub dodge_count: u32,
    /// Swings that met an invulnerable target
    pub absorbed_count: u32,
    pub kill_time: Option<f64>,
    /// Set when the defender won instead
    pub death_time: Option<f64>,
}

impl DuelSimulation {
    /// Both sides swing as fast as attack speed allows until one falls or
    /// `duration` runs out. The inputs are left untouched.
    pub fn run<R: Rng + ?Sized>(
        attacker: &Character,
        defender: &Character,
        duration: f64,
        rng: &mut R,
    ) -> Self {
        let mut attacker = attacker.clone();
        let mut defender = defender.clone();
        let mut result = DuelSimulation::default();
        let target = AttackTarget::Entity(defender.id().to_string());
        let retaliation = AttackTarget::Entity(attacker.id().to_string());

        let mut time = 0.0;
        while time < duration && defender.is_alive() && attacker.is_alive() {
            if let Ok(effect) = attacker.request_attack(target.clone()) {
                match exchange(&mut attacker, &mut defender, effect.damage, effect.damage_kind, rng) {
                    Some(report) => {
                        result.hit_count += 1;
                        if report.outcome.dodged {
                            result.dodge_count += 1;
                        }
                        if report.outcome.critical {
                            result.crit_count += 1;
                        }
                        result.total_damage += u64::from(report.damage_dealt());
                        if report.killing_blow {
                            result.kill_time = Some(time);
                        }
                    }
                    None => result.absorbed_count += 1,
                }
            }

            if defender.is_alive() {
                if let Ok(effect) = defender.request_attack(retaliation.clone()) {
                    if let Some(report) =
                        exchange(&mut defender, &mut attacker, effect.damage, effect.damage_kind, rng)
                    {
                        result.damage_taken += u64::from(report.damage_dealt());
                        if report.killing_blow {
                            result.death_time = Some(time);
                        }
                    }
                }
            }

            attacker.tick(STEP);
            defender.tick(STEP);
            time += STEP;
        }

        result.total_time = time.min(duration);
        result
    }

    pub fn dps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.total_damage as f64 / self.total_time
        } else {
            0.0
        }
    }

    /// Critical hits as a percentage of landed swings
    pub fn crit_rate(&self) -> f64 {
        if self.hit_count > 0 {
            self.crit_count as f64 / self.hit_count as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn dodge_rate(&self) -> f64 {
        if self.hit_count > 0 {
            self.dodge_count as f64 / self.hit_count as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_damage(&self) -> f64 {
        if self.hit_count > 0 {
            self.total_damage as f64 / self.hit_count as f64
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        let outcome = match (self.kill_time, self.death_time) {
            (Some(t), _) => format!("kill in {:.1}s", t),
            (None, Some(t)) => format!("defeated in {:.1}s", t),
            (None, None) => format!("no kill in {:.0}s", self.total_time),
        };
        format!(
            "{} | {:.1} DPS, {} swings, {:.1} avg, {:.0}% crit, {:.0}% dodged, {} taken",
            outcome,
            self.dps(),
            self.hit_count,
            self.avg_damage(),
            self.crit_rate(),
            self.dodge_rate(),
            self.damage_taken
        )
    }
}
