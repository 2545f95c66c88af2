//! DamageOutcome / HitReport - What a resolved hit did

use crate::types::DamageKind;
use serde::{Deserialize, Serialize};

/// Result of resolving one hit, before it is applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Damage before armor
    pub base_damage: f64,
    pub kind: DamageKind,
    /// Armor that applied to this hit
    pub armor: i32,
    /// Damage after armor, before dodge and crit
    pub mitigated: f64,
    pub dodged: bool,
    pub critical: bool,
    /// Final whole-point damage
    pub damage: u32,
}

impl DamageOutcome {
    /// Damage removed by armor
    pub fn reduced_by_armor(&self) -> f64 {
        (self.base_damage - self.mitigated).max(0.0)
    }

    pub fn summary(&self) -> String {
        if self.dodged {
            return "Dodged".to_string();
        }

        let mut parts = vec![format!("{} {} damage", self.damage, self.kind)];
        if self.reduced_by_armor() > 0.0 {
            parts.push(format!("{:.0} reduced by armor", self.reduced_by_armor()));
        }
        if self.critical {
            parts.push("CRIT".to_string());
        }
        parts.join(", ")
    }
}

/// A hit applied to a defender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitReport {
    pub outcome: DamageOutcome,
    pub hp_before: u32,
    pub hp_after: u32,
    pub killing_blow: bool,
}

impl HitReport {
    pub fn damage_dealt(&self) -> u32 {
        self.hp_before - self.hp_after
    }

    pub fn summary(&self) -> String {
        let mut summary = self.outcome.summary();
        if self.killing_blow {
            summary.push_str(", FATAL");
        }
        summary
    }
}
