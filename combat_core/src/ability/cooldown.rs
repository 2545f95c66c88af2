//! CooldownTracker - Remaining cooldown per ability id

use std::collections::HashMap;

/// Cooldown key used for the character's dash
pub const DASH_COOLDOWN_KEY: &str = "dash";

/// Cooldown key used for basic attacks
pub const ATTACK_COOLDOWN_KEY: &str = "attack";

/// Remaining cooldown seconds keyed by ability id
///
/// Values only ever decrease toward zero; ready entries are dropped.
#[derive(Debug, Clone, Default)]
pub struct CooldownTracker {
    remaining: HashMap<String, f64>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `id` on cooldown for `duration` seconds
    pub fn start(&mut self, id: &str, duration: f64) {
        if duration > 0.0 {
            self.remaining.insert(id.to_string(), duration);
        } else {
            self.remaining.remove(id);
        }
    }

    /// Seconds until `id` is ready, 0 when ready or unknown
    pub fn remaining(&self, id: &str) -> f64 {
        self.remaining.get(id).copied().unwrap_or(0.0)
    }

    pub fn is_ready(&self, id: &str) -> bool {
        self.remaining(id) <= 0.0
    }

    /// Advance every cooldown by `delta` seconds, clamping at zero
    pub fn tick(&mut self, delta: f64) {
        let delta = delta.max(0.0);
        for value in self.remaining.values_mut() {
            *value = (*value - delta).max(0.0);
        }
        self.remaining.retain(|_, value| *value > 0.0);
    }

    pub fn reset(&mut self, id: &str) {
        self.remaining.remove(id);
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    /// Cooldowns still running
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.remaining.iter().map(|(id, value)| (id.as_str(), *value))
    }
}
