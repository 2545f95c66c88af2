//! Abilities - Definitions, cooldown ledger and gated execution

mod cooldown;
mod definition;
mod registry;

pub use cooldown::{CooldownTracker, ATTACK_COOLDOWN_KEY, DASH_COOLDOWN_KEY};
pub use definition::{AbilityDefinition, AbilityKind, AreaOfEffect, PendingStrike};
pub use registry::{AbilityEffect, AbilityRegistry};
