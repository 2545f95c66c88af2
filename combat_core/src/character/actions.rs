//! Action requests from drivers: move, jump, dash, attack, abilities

use super::traits::{AbilityUser, Attacker, Movable};
use super::Character;
use crate::ability::{
    AbilityEffect, AbilityKind, AreaOfEffect, ATTACK_COOLDOWN_KEY, DASH_COOLDOWN_KEY,
};
use crate::error::CombatError;
use crate::events::CharacterEvent;
use crate::state::CharacterState;
use crate::types::{DamageKind, Direction};
use tracing::debug;

/// What a basic attack is aimed at
#[derive(Debug, Clone, PartialEq)]
pub enum AttackTarget {
    /// A single character by id
    Entity(String),
    /// Everything within `radius` of the attacker
    Area { radius: f64 },
}

/// A basic attack the driver should deliver
#[derive(Debug, Clone, PartialEq)]
pub struct AttackEffect {
    pub target: AttackTarget,
    pub damage: f64,
    pub damage_kind: DamageKind,
    pub range: f64,
}

impl AttackEffect {
    pub fn area(&self) -> Option<AreaOfEffect> {
        match self.target {
            AttackTarget::Area { radius } => Some(AreaOfEffect { radius }),
            AttackTarget::Entity(_) => None,
        }
    }
}

impl Character {
    fn reject(&self, to: CharacterState) -> CombatError {
        let err = CombatError::IllegalStateTransition {
            from: self.state.current(),
            to,
        };
        debug!(character = %self.id, error = %err, "request rejected");
        err
    }

    fn face(&mut self, direction: Direction) {
        if direction.x < 0.0 {
            self.facing = Direction::LEFT;
        } else if direction.x > 0.0 {
            self.facing = Direction::RIGHT;
        }
    }

    fn state_for(kind: AbilityKind) -> CharacterState {
        match kind {
            AbilityKind::Attack => CharacterState::Attacking,
            AbilityKind::Buff | AbilityKind::Heal => CharacterState::Casting,
        }
    }
}

impl Movable for Character {
    /// Directions shorter than the move threshold count as "stop". Locks
    /// reject both, so a held move survives an attack.
    fn request_move(&mut self, direction: Direction) -> Result<(), CombatError> {
        if direction.magnitude() < self.constants.move_threshold {
            if !self.state.can_transition_to(CharacterState::Idle) {
                return Err(self.reject(CharacterState::Idle));
            }
            if self.state.current() == CharacterState::Moving {
                let change = self.state.request(CharacterState::Idle)?;
                self.push_state_change(change);
            }
            self.state.set_moving(false);
            self.move_direction = Direction::ZERO;
            return Ok(());
        }

        let current = self.state.current();
        if !current.is_airborne() && current != CharacterState::Moving {
            if !self.state.can_transition_to(CharacterState::Moving) {
                return Err(self.reject(CharacterState::Moving));
            }
            let change = self.state.request(CharacterState::Moving)?;
            self.push_state_change(change);
        }

        self.state.set_moving(true);
        self.move_direction = direction.normalized();
        self.face(direction);
        Ok(())
    }

    fn request_jump(&mut self) -> Result<(), CombatError> {
        if self.state.current().is_airborne() || !self.state.can_transition_to(CharacterState::Jumping)
        {
            return Err(self.reject(CharacterState::Jumping));
        }
        let change = self.state.request(CharacterState::Jumping)?;
        self.push_state_change(change);
        Ok(())
    }

    /// Dashes along `direction`, or the facing direction when it is zero
    fn request_dash(&mut self, direction: Direction) -> Result<(), CombatError> {
        if !self.state.can_transition_to(CharacterState::Dashing) {
            return Err(self.reject(CharacterState::Dashing));
        }
        let remaining = self.cooldowns.remaining(DASH_COOLDOWN_KEY);
        if remaining > 0.0 {
            return Err(CombatError::OnCooldown {
                id: DASH_COOLDOWN_KEY.to_string(),
                remaining,
            });
        }

        let change = self
            .state
            .request_timed(CharacterState::Dashing, self.constants.dash_duration)?;
        self.push_state_change(change);
        self.cooldowns
            .start(DASH_COOLDOWN_KEY, self.stats.dash_cooldown);

        let dash = direction.normalized();
        self.dash_direction = if dash == Direction::ZERO {
            self.facing
        } else {
            self.face(dash);
            dash
        };
        Ok(())
    }

    fn facing(&self) -> Direction {
        self.facing
    }
}

impl Attacker for Character {
    /// Basic attack. Locks into Attacking and starts the attack-speed cooldown.
    fn request_attack(&mut self, target: AttackTarget) -> Result<AttackEffect, CombatError> {
        if !self.state.can_transition_to(CharacterState::Attacking) {
            return Err(self.reject(CharacterState::Attacking));
        }
        let remaining = self.cooldowns.remaining(ATTACK_COOLDOWN_KEY);
        if remaining > 0.0 {
            return Err(CombatError::OnCooldown {
                id: ATTACK_COOLDOWN_KEY.to_string(),
                remaining,
            });
        }

        let change = self
            .state
            .request_timed(CharacterState::Attacking, self.constants.attack_duration)?;
        self.push_state_change(change);
        self.cooldowns
            .start(ATTACK_COOLDOWN_KEY, self.stats.attack_interval());

        Ok(AttackEffect {
            target,
            damage: self.stats.attack_damage,
            damage_kind: DamageKind::Physical,
            range: self.stats.attack_range,
        })
    }
}

impl AbilityUser for Character {
    fn can_use_ability(&self, id: &str) -> Result<(), CombatError> {
        let ability = self
            .abilities
            .get(id)
            .ok_or_else(|| CombatError::missing("ability", id))?;
        let target = Character::state_for(ability.kind);
        if !self.state.can_transition_to(target) {
            return Err(CombatError::IllegalStateTransition {
                from: self.state.current(),
                to: target,
            });
        }
        if let Some(buff_id) = &ability.buff {
            if !self.buff_book.contains_key(buff_id) {
                return Err(CombatError::missing("buff", buff_id.as_str()));
            }
        }
        self.abilities
            .can_use(id, self.class, &self.base, &self.cooldowns)
            .map(|_| ())
    }

    /// Use an ability. Strikes with no delay come back in the effect;
    /// delayed ones are held and returned from `tick` when they land.
    fn request_ability(&mut self, id: &str) -> Result<AbilityEffect, CombatError> {
        if let Err(err) = self.can_use_ability(id) {
            debug!(character = %self.id, ability = %id, error = %err, "ability rejected");
            return Err(err);
        }

        let mut effect =
            self.abilities
                .use_ability(id, self.class, &mut self.base, &mut self.cooldowns)?;
        let change = self
            .state
            .request_timed(Character::state_for(effect.kind), effect.animation_duration)?;
        debug!(character = %self.id, ability = %id, "ability used");

        self.push_state_change(change);
        self.events.push(CharacterEvent::AbilityUsed {
            ability_id: effect.ability_id.clone(),
        });

        let (ready, delayed): (Vec<_>, Vec<_>) =
            effect.strikes.drain(..).partition(|strike| strike.is_ready());
        effect.strikes = ready;
        self.pending_strikes.extend(delayed);

        if let Some(buff_id) = &effect.buff {
            self.apply_buff(buff_id)?;
        }
        if effect.heal > 0 {
            self.restore_health(effect.heal);
        }

        self.refresh();
        self.events.push(CharacterEvent::ManaChanged {
            current: self.stats.mana,
            max: self.stats.max_mana,
        });
        Ok(effect)
    }

    fn ability_cooldown(&self, id: &str) -> f64 {
        self.cooldowns.remaining(id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::knight;
    use super::*;
    use crate::ability::AbilityDefinition;
    use crate::character::{StatHolder, Stateful};
    use crate::types::CharacterClass;

    fn shield_bash() -> AbilityDefinition {
        AbilityDefinition::new("shield_bash", "Shield Bash", AbilityKind::Attack)
            .for_class(CharacterClass::Knight)
            .with_cost(8.0, 10)
            .with_damage(40.0, DamageKind::Physical)
            .with_hits(0.3, 1, 0.0)
    }

    fn whirlwind() -> AbilityDefinition {
        AbilityDefinition::new("whirlwind", "Whirlwind", AbilityKind::Attack)
            .with_cost(12.0, 20)
            .with_damage(30.0, DamageKind::Physical)
            .with_hits(0.0, 3, 0.2)
            .with_area(3.0)
    }

    fn stance() -> AbilityDefinition {
        AbilityDefinition::new("defensive_stance", "Defensive Stance", AbilityKind::Buff)
            .with_cost(15.0, 15)
            .with_buff("defensive_stance")
    }

    fn armed_knight() -> Character {
        knight().with_abilities([shield_bash(), whirlwind(), stance()])
    }

    #[test]
    fn test_move_and_stop() {
        let mut knight = armed_knight();
        knight.request_move(Direction::new(-1.0, 0.0)).unwrap();
        assert_eq!(knight.current_state(), CharacterState::Moving);
        assert_eq!(knight.facing(), Direction::LEFT);

        knight.request_move(Direction::new(0.05, 0.0)).unwrap();
        assert_eq!(knight.current_state(), CharacterState::Idle);
        assert_eq!(knight.move_direction(), Direction::ZERO);
    }

    #[test]
    fn test_stop_rejected_while_locked() {
        let mut knight = armed_knight();
        knight.request_move(Direction::RIGHT).unwrap();
        knight
            .request_attack(AttackTarget::Entity("skeleton".to_string()))
            .unwrap();

        let err = knight.request_move(Direction::ZERO).unwrap_err();
        assert_eq!(
            err,
            CombatError::IllegalStateTransition {
                from: CharacterState::Attacking,
                to: CharacterState::Idle
            }
        );
        assert!(knight.state.is_moving());
        assert_eq!(knight.move_direction(), Direction::RIGHT);

        knight.tick(0.5);
        assert_eq!(knight.current_state(), CharacterState::Moving);
        knight.request_move(Direction::ZERO).unwrap();
        assert_eq!(knight.current_state(), CharacterState::Idle);
    }

    #[test]
    fn test_attack_locks_out_movement() {
        let mut knight = armed_knight();
        let effect = knight
            .request_attack(AttackTarget::Entity("skeleton".to_string()))
            .unwrap();
        assert_eq!(effect.damage, 25.0);
        assert_eq!(knight.current_state(), CharacterState::Attacking);

        let err = knight.request_move(Direction::RIGHT).unwrap_err();
        assert_eq!(err.code(), "illegal_state_transition");
        assert!(knight.request_jump().is_err());

        knight.tick(0.5);
        assert_eq!(knight.current_state(), CharacterState::Idle);
        // attack speed 1.0 => 1s between swings
        assert!(matches!(
            knight.request_attack(AttackTarget::Area { radius: 2.0 }),
            Err(CombatError::OnCooldown { .. })
        ));
        knight.tick(0.5);
        let area = knight
            .request_attack(AttackTarget::Area { radius: 2.0 })
            .unwrap();
        assert_eq!(area.area(), Some(AreaOfEffect { radius: 2.0 }));
    }

    #[test]
    fn test_dash_uses_cooldown() {
        let mut knight = armed_knight();
        knight.request_dash(Direction::ZERO).unwrap();
        assert_eq!(knight.dash_direction(), Direction::RIGHT);
        assert_eq!(knight.current_state(), CharacterState::Dashing);

        knight.tick(0.2);
        assert_eq!(knight.current_state(), CharacterState::Idle);
        assert!(matches!(
            knight.request_dash(Direction::LEFT),
            Err(CombatError::OnCooldown { .. })
        ));
        assert!((knight.ability_cooldown(DASH_COOLDOWN_KEY) - 1.8).abs() < 1e-9);

        knight.tick(1.8);
        knight.request_dash(Direction::LEFT).unwrap();
        assert_eq!(knight.dash_direction(), Direction::LEFT);
    }

    #[test]
    fn test_ability_gating_on_character() {
        let mut knight = armed_knight();
        knight.base.mana = 5;
        knight.refresh();

        assert_eq!(
            knight.can_use_ability("shield_bash").unwrap_err(),
            CombatError::InsufficientResource {
                required: 10,
                available: 5
            }
        );
        knight.restore_mana(10);
        assert!(knight.can_use_ability("shield_bash").is_ok());

        let effect = knight.request_ability("shield_bash").unwrap();
        assert!(effect.strikes.is_empty());
        assert_eq!(knight.pending_strikes().len(), 1);
        assert_eq!(knight.stats().mana, 5);
        assert_eq!(knight.current_state(), CharacterState::Attacking);

        let ready = knight.tick(0.3);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].damage, 40.0);

        knight.tick(0.2);
        assert_eq!(knight.current_state(), CharacterState::Idle);
        knight.restore_mana(50);
        assert!(matches!(
            knight.can_use_ability("shield_bash"),
            Err(CombatError::OnCooldown { .. })
        ));
        knight.tick(7.6);
        assert!(knight.can_use_ability("shield_bash").is_ok());
    }

    #[test]
    fn test_multi_hit_strikes_land_over_ticks() {
        let mut knight = armed_knight();
        let effect = knight.request_ability("whirlwind").unwrap();
        assert_eq!(effect.strikes.len(), 1);
        assert_eq!(knight.pending_strikes().len(), 2);

        assert_eq!(knight.tick(0.2).len(), 1);
        assert_eq!(knight.tick(0.2).len(), 1);
        assert!(knight.pending_strikes().is_empty());
    }

    #[test]
    fn test_buff_ability_casts() {
        let mut knight = armed_knight();
        knight.request_ability("defensive_stance").unwrap();
        assert_eq!(knight.current_state(), CharacterState::Casting);
        assert_eq!(knight.stats().physical_armor, 18);
        assert!(knight.drain_events().contains(&CharacterEvent::AbilityUsed {
            ability_id: "defensive_stance".to_string()
        }));
    }

    #[test]
    fn test_rejected_ability_mutates_nothing() {
        let mut knight = armed_knight();
        knight.request_attack(AttackTarget::Entity("x".into())).unwrap();
        knight.drain_events();
        let mana = knight.stats().mana;

        let err = knight.request_ability("shield_bash").unwrap_err();
        assert!(matches!(err, CombatError::IllegalStateTransition { .. }));
        assert_eq!(knight.stats().mana, mana);
        assert_eq!(knight.ability_cooldown("shield_bash"), 0.0);
        assert!(knight.events().is_empty());

        assert!(matches!(
            knight.request_ability("meteor"),
            Err(CombatError::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_class_gate_on_character() {
        let mut mage = Character::new(
            "mage",
            "Mage",
            CharacterClass::Mage,
            crate::stats::CharacterStats::default(),
        )
        .with_abilities([shield_bash()]);
        assert!(matches!(
            mage.request_ability("shield_bash"),
            Err(CombatError::ClassMismatch { .. })
        ));
    }
}
