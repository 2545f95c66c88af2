//! Combat resolution - Mitigation, dodge and critical rolls

mod exchange;
mod resolution;
mod result;

pub use exchange::exchange;
pub use resolution::{
    apply_hit, resolve_damage, resolve_damage_with_rng, resolve_damage_with_rolls, Rolls,
    MIN_DAMAGE,
};
pub use result::{DamageOutcome, HitReport};
