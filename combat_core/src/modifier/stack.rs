//! ModifierStack - Worn equipment plus active buffs
//!
//! Effective stats are always rebuilt as base + sum of every live bonus, so
//! removing a modifier restores exactly the stats it found.

use super::{apply, Equipment, EquipmentSet, StatBonus};
use crate::buff::{ActiveBuff, BuffOrigin, BuffTemplate};
use crate::error::CombatError;
use crate::stats::CharacterStats;
use crate::types::{CharacterClass, EquipmentSlot};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ModifierStack {
    equipped: BTreeMap<EquipmentSlot, Equipment>,
    buffs: Vec<ActiveBuff>,
    sets: Vec<EquipmentSet>,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register more sets, keeping equipment and buffs. A set with a known
    /// id replaces the old definition.
    pub fn set_sets(&mut self, sets: impl IntoIterator<Item = EquipmentSet>) {
        for set in sets {
            match self.sets.iter_mut().find(|s| s.id == set.id) {
                Some(existing) => *existing = set,
                None => self.sets.push(set),
            }
        }
    }

    /// Base stats with every live modifier applied
    pub fn effective(&self, base: &CharacterStats) -> CharacterStats {
        apply(base, &self.total_bonus())
    }

    pub fn total_bonus(&self) -> StatBonus {
        let mut total = StatBonus::default();
        for item in self.equipped.values() {
            total += item.bonus;
        }
        total += self.set_bonus();
        for buff in self.buffs.iter().filter(|b| b.is_active()) {
            total += buff.magnitude();
        }
        total
    }

    /// Sum of set bonuses for the pieces currently worn
    pub fn set_bonus(&self) -> StatBonus {
        let mut total = StatBonus::default();
        for set in &self.sets {
            let worn = self
                .equipped
                .values()
                .filter(|item| item.set_id.as_deref() == Some(set.id.as_str()))
                .count();
            total += set.bonus_for(worn);
        }
        total
    }

    /// Equip `item` into `slot`, returning what was there before.
    ///
    /// `passives` are the resolved templates for `item.passive_buffs`. Nothing
    /// changes when the slot or requirements don't match.
    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item: Equipment,
        class: CharacterClass,
        level: u32,
        passives: Vec<BuffTemplate>,
    ) -> Result<Option<Equipment>, CombatError> {
        if item.slot != slot {
            return Err(CombatError::InvalidSlot {
                requested: slot,
                expected: item.slot,
            });
        }
        item.check_requirements(class, level)?;

        let previous = self.unequip(slot);
        debug!(slot = %slot, item = %item.id, "equipped");
        self.buffs.extend(
            passives
                .into_iter()
                .map(|template| ActiveBuff::new(template, BuffOrigin::Equipment(slot))),
        );
        self.equipped.insert(slot, item);
        Ok(previous)
    }

    /// Remove the item in `slot` along with its passive buffs
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        let item = self.equipped.remove(&slot)?;
        self.buffs.retain(|b| b.origin != BuffOrigin::Equipment(slot));
        debug!(slot = %slot, item = %item.id, "unequipped");
        Some(item)
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        self.equipped.get(&slot)
    }

    pub fn all_equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &Equipment)> {
        self.equipped.iter().map(|(slot, item)| (*slot, item))
    }

    /// Apply or re-apply a buff. Returns the resulting stack count.
    pub fn apply_buff(&mut self, template: &BuffTemplate) -> u32 {
        let existing = self
            .buffs
            .iter_mut()
            .find(|b| b.origin == BuffOrigin::Applied && b.id() == template.id);

        match existing {
            Some(buff) => buff.reapply(),
            None => {
                self.buffs
                    .push(ActiveBuff::new(template.clone(), BuffOrigin::Applied));
                1
            }
        }
    }

    /// Remove an applied buff. Equipment passives only leave with their item.
    pub fn remove_buff(&mut self, buff_id: &str) -> Option<ActiveBuff> {
        let index = self
            .buffs
            .iter()
            .position(|b| b.origin == BuffOrigin::Applied && b.id() == buff_id)?;
        Some(self.buffs.remove(index))
    }

    /// Advance buff timers and drop the ones that ran out
    pub fn tick_buffs(&mut self, delta: f64) -> Vec<ActiveBuff> {
        let mut expired = Vec::new();
        let mut kept = Vec::with_capacity(self.buffs.len());
        for mut buff in self.buffs.drain(..) {
            if buff.tick(delta) {
                kept.push(buff);
            } else {
                expired.push(buff);
            }
        }
        self.buffs = kept;
        expired
    }

    pub fn active_buffs(&self) -> &[ActiveBuff] {
        &self.buffs
    }

    pub fn buff(&self, buff_id: &str) -> Option<&ActiveBuff> {
        self.buffs.iter().find(|b| b.id() == buff_id)
    }

    pub fn has_buff(&self, buff_id: &str) -> bool {
        self.buff(buff_id).is_some()
    }

    /// Drop every applied buff, keeping equipment passives
    pub fn clear_applied_buffs(&mut self) -> Vec<ActiveBuff> {
        let (applied, kept): (Vec<_>, Vec<_>) = self
            .buffs
            .drain(..)
            .partition(|b| b.origin == BuffOrigin::Applied);
        self.buffs = kept;
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn iron_helm() -> Equipment {
        Equipment::new("iron_helm", "Iron Helm", EquipmentSlot::Helmet)
            .with_bonus(StatBonus {
                physical_armor: 4,
                ..Default::default()
            })
            .in_set("iron")
    }

    fn iron_plate() -> Equipment {
        Equipment::new("iron_plate", "Iron Plate", EquipmentSlot::Chest)
            .with_bonus(StatBonus {
                physical_armor: 10,
                move_speed: -0.5,
                ..Default::default()
            })
            .in_set("iron")
    }

    fn iron_set() -> EquipmentSet {
        EquipmentSet {
            id: "iron".to_string(),
            name: "Iron".to_string(),
            pieces: vec!["iron_helm".into(), "iron_plate".into()],
            bonuses: vec![
                StatBonus::default(),
                StatBonus {
                    attack_damage: 5.0,
                    ..Default::default()
                },
            ],
        }
    }

    fn wear(stack: &mut ModifierStack, item: Equipment) -> Option<Equipment> {
        stack
            .equip(item.slot, item, CharacterClass::Knight, 1, Vec::new())
            .unwrap()
    }

    #[test]
    fn test_equip_and_unequip_restores_base() {
        let base = CharacterStats::new();
        let mut stack = ModifierStack::new();
        wear(&mut stack, iron_helm());
        assert_eq!(stack.effective(&base).physical_armor, base.physical_armor + 4);

        let removed = stack.unequip(EquipmentSlot::Helmet).unwrap();
        assert_eq!(removed.id, "iron_helm");
        assert_eq!(stack.effective(&base), base);
        assert!(stack.unequip(EquipmentSlot::Helmet).is_none());
    }

    #[test]
    fn test_equip_replaces_previous() {
        let mut stack = ModifierStack::new();
        wear(&mut stack, iron_helm());
        let other = Equipment::new("leather_cap", "Leather Cap", EquipmentSlot::Helmet);
        let previous = wear(&mut stack, other);
        assert_eq!(previous.map(|i| i.id), Some("iron_helm".to_string()));
        assert_eq!(stack.equipped(EquipmentSlot::Helmet).unwrap().id, "leather_cap");
    }

    #[test]
    fn test_wrong_slot_rejected() {
        let mut stack = ModifierStack::new();
        let result = stack.equip(
            EquipmentSlot::Boots,
            iron_helm(),
            CharacterClass::Knight,
            1,
            Vec::new(),
        );
        assert_eq!(
            result,
            Err(CombatError::InvalidSlot {
                requested: EquipmentSlot::Boots,
                expected: EquipmentSlot::Helmet
            })
        );
        assert_eq!(stack.all_equipped().count(), 0);
    }

    #[test]
    fn test_requirements_leave_stack_untouched() {
        let mut stack = ModifierStack::new();
        wear(&mut stack, iron_helm());
        let gated = Equipment::new("crown", "Crown", EquipmentSlot::Helmet)
            .with_requirements(CharacterClass::None, 10);
        let result = stack.equip(
            EquipmentSlot::Helmet,
            gated,
            CharacterClass::Knight,
            2,
            Vec::new(),
        );
        assert!(matches!(result, Err(CombatError::LevelTooLow { .. })));
        assert_eq!(stack.equipped(EquipmentSlot::Helmet).unwrap().id, "iron_helm");
    }

    #[test]
    fn test_set_bonus_needs_both_pieces() {
        let base = CharacterStats::new();
        let mut stack = ModifierStack::new();
        stack.set_sets([iron_set()]);
        wear(&mut stack, iron_helm());
        assert!(stack.set_bonus().is_zero());

        wear(&mut stack, iron_plate());
        let effective = stack.effective(&base);
        assert!((effective.attack_damage - (base.attack_damage + 5.0)).abs() < 1e-9);
        assert_eq!(effective.physical_armor, base.physical_armor + 14);

        stack.unequip(EquipmentSlot::Chest);
        assert!(stack.set_bonus().is_zero());
    }

    #[test]
    fn test_late_sets_keep_worn_items() {
        let base = CharacterStats::new();
        let mut stack = ModifierStack::new();
        wear(&mut stack, iron_helm());
        wear(&mut stack, iron_plate());
        assert!(stack.set_bonus().is_zero());

        stack.set_sets([iron_set()]);
        assert_eq!(stack.all_equipped().count(), 2);
        let effective = stack.effective(&base);
        assert!((effective.attack_damage - (base.attack_damage + 5.0)).abs() < 1e-9);

        // same id replaces rather than doubles
        stack.set_sets([iron_set()]);
        let effective = stack.effective(&base);
        assert!((effective.attack_damage - (base.attack_damage + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_passive_buffs_follow_item() {
        let mut stack = ModifierStack::new();
        let ward = BuffTemplate::new("ward", "Ward", 0.0).with_modifiers(StatBonus {
            magic_armor: 3,
            ..Default::default()
        });
        let amulet = Equipment::new("amulet", "Amulet", EquipmentSlot::Necklace)
            .with_passive_buff("ward");
        stack
            .equip(
                EquipmentSlot::Necklace,
                amulet,
                CharacterClass::None,
                1,
                vec![ward],
            )
            .unwrap();
        assert!(stack.has_buff("ward"));
        assert!(stack.remove_buff("ward").is_none());
        assert!(stack.tick_buffs(100.0).is_empty());

        stack.unequip(EquipmentSlot::Necklace);
        assert!(!stack.has_buff("ward"));
    }

    #[test]
    fn test_buff_expiry_restores_stats() {
        let base = CharacterStats::new();
        let mut stack = ModifierStack::new();
        let haste = BuffTemplate::new("haste", "Haste", 2.0).with_modifiers(StatBonus {
            attack_speed: 0.2,
            ..Default::default()
        });
        stack.apply_buff(&haste);
        assert!((stack.effective(&base).attack_speed - 1.2).abs() < 1e-9);

        assert!(stack.tick_buffs(1.0).is_empty());
        let expired = stack.tick_buffs(1.5);
        assert_eq!(expired.len(), 1);
        assert_eq!(stack.effective(&base), base);
    }

    #[test]
    fn test_clear_keeps_passives() {
        let mut stack = ModifierStack::new();
        stack.apply_buff(&BuffTemplate::new("a", "A", 5.0));
        let amulet = Equipment::new("amulet", "Amulet", EquipmentSlot::Necklace);
        stack
            .equip(
                EquipmentSlot::Necklace,
                amulet,
                CharacterClass::None,
                1,
                vec![BuffTemplate::new("ward", "Ward", 0.0)],
            )
            .unwrap();
        let cleared = stack.clear_applied_buffs();
        assert_eq!(cleared.len(), 1);
        assert!(stack.has_buff("ward"));
    }

    proptest! {
        #[test]
        fn prop_stacked_buff_reverts_exactly(stacks in 1u32..8, armor in -5i32..5, ad in -10.0f64..10.0) {
            let base = CharacterStats::new();
            let mut stack = ModifierStack::new();
            let template = BuffTemplate::new("rage", "Rage", 5.0)
                .with_modifiers(StatBonus { physical_armor: armor, attack_damage: ad, ..Default::default() })
                .stacking(10);
            for _ in 0..stacks {
                stack.apply_buff(&template);
            }
            let effective = stack.effective(&base);
            prop_assert_eq!(effective.physical_armor, base.physical_armor + armor * stacks as i32);

            stack.remove_buff("rage");
            prop_assert_eq!(stack.effective(&base), base);
        }
    }
}
