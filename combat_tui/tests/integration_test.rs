//! Integration test: Load data -> Spawn -> Equip -> Fight -> Level up
//!
//! Drives bundled characters through a full arena session the way the TUI does.

use combat_core::prelude::*;
use combat_core::CharacterKind;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn print_stats(character: &Character) {
    let stats = character.stats();
    println!("  {} (Lv {}):", character.name(), stats.level);
    println!("    HP: {}/{}", stats.hp, stats.max_hp);
    println!("    Mana: {}/{}", stats.mana, stats.max_mana);
    println!("    Attack Damage: {:.1}", stats.attack_damage);
    println!("    Armor: {} / {}", stats.physical_armor, stats.magic_armor);
    println!(
        "    XP: {}/{}",
        character.experience(),
        character.experience_to_next_level()
    );
}

/// Swing until the defender dies, one second per round
fn fight(player: &mut Character, enemy: &mut Character, rng: &mut ChaCha8Rng) -> u32 {
    let mut rounds = 0;
    while enemy.is_alive() && rounds < 100 {
        let target = AttackTarget::Entity(enemy.id().to_string());
        if let Ok(effect) = player.request_attack(target) {
            if let Some(report) = exchange(player, enemy, effect.damage, effect.damage_kind, rng) {
                println!("    {}", report.summary());
            }
        }
        player.tick(1.0);
        enemy.tick(1.0);
        rounds += 1;
    }
    rounds
}

#[test]
fn test_full_session() {
    let data = GameData::bundled().expect("bundled data should load");
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    separator("SPAWN");
    let mut knight = data.spawn("knight", "player").unwrap();
    print_stats(&knight);
    assert_eq!(knight.kind(), CharacterKind::Player);
    assert_eq!(knight.level(), 1);
    assert!(knight.equipped(EquipmentSlot::Weapon).is_some());
    assert!(knight.stats().attack_damage > knight.base_stats().attack_damage);

    separator("EQUIP GATES");
    let helm = data.equipment("iron_helm").cloned().unwrap();
    let err = knight.equip(helm.clone()).unwrap_err();
    println!("  iron_helm: {}", err);
    assert!(matches!(err, CombatError::LevelTooLow { required: 2, actual: 1 }));

    separator("FIGHT");
    for n in 1..=3 {
        let mut skeleton = data.spawn("skeleton", &format!("skeleton_{}", n)).unwrap();
        let rounds = fight(&mut knight, &mut skeleton, &mut rng);
        println!("  Skeleton {} down after {} rounds", n, rounds);
        assert!(skeleton.is_dead());
        assert_eq!(skeleton.current_state(), CharacterState::Dead);
    }

    separator("LEVEL UP");
    print_stats(&knight);
    // Three skeletons at 40 xp against a 100 xp first level
    assert_eq!(knight.level(), 2);
    assert_eq!(knight.experience(), 20);
    assert_eq!(knight.experience_to_next_level(), 120);
    let events = knight.drain_events();
    assert!(events.contains(&CharacterEvent::LevelUp { level: 2 }));

    let armor_before = knight.stats().physical_armor;
    assert!(knight.equip(helm).unwrap().is_none());
    assert!(knight.stats().physical_armor > armor_before);
}

#[test]
fn test_whirlwind_lands_over_time() {
    let data = GameData::bundled().unwrap();
    let mut knight = data.spawn("knight", "player").unwrap();
    let mut dummy = data.spawn("bone_lord", "dummy").unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let effect = knight.request_ability("whirlwind").unwrap();
    assert_eq!(effect.strikes.len(), 1);
    assert_eq!(knight.pending_strikes().len(), 2);
    assert_eq!(knight.current_state(), CharacterState::Attacking);

    let mut landed = effect.strikes.len();
    for _ in 0..10 {
        landed += knight.tick(0.1).len();
    }
    assert_eq!(landed, 3);
    assert!(knight.pending_strikes().is_empty());

    // Casting again is blocked by the cooldown
    let err = knight.request_ability("whirlwind").unwrap_err();
    assert_eq!(err.code(), "on_cooldown");

    let hp_before = dummy.stats().hp;
    let strike = &effect.strikes[0];
    exchange(&mut knight, &mut dummy, strike.damage, strike.damage_kind, &mut rng);
    assert!(dummy.stats().hp <= hp_before);
}

#[test]
fn test_death_and_respawn() {
    let data = GameData::bundled().unwrap();
    let mut knight = data.spawn("knight", "player").unwrap();
    let lord = data.spawn("bone_lord", "lord").unwrap();

    while knight.is_alive() {
        knight.receive_hit(200.0, DamageKind::Physical, lord.stats(), Rolls::never());
        knight.tick(1.0);
    }
    assert_eq!(knight.current_state(), CharacterState::Dead);
    assert!(knight.request_attack(AttackTarget::Area { radius: 2.0 }).is_err());
    assert!(!knight.apply_stun(1.0));

    knight.respawn().unwrap();
    assert_eq!(knight.current_state(), CharacterState::Idle);
    assert_eq!(knight.stats().hp, knight.stats().max_hp);
}
