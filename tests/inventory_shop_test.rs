//! Integration test: shop, inventory and equipment
//!
//! Buys, equips, swaps and sells items from the bundled catalog and checks
//! that gold, stats and the pack stay consistent.

use quest_chronicles::character::{Character, CharacterClass};
use quest_chronicles::constants::MAX_INVENTORY_SIZE;
use quest_chronicles::items::{self, EquipSlot};
use quest_chronicles::session::GameSession;
use quest_chronicles::{Catalog, ErrorKind, GameError};

fn stats(character: &Character) -> (i32, i32, i32, i32) {
    (
        character.health,
        character.max_health,
        character.strength,
        character.magic,
    )
}

#[test]
fn test_equip_unequip_round_trip_is_neutral() {
    let catalog = Catalog::bundled().unwrap();
    for item_id in ["iron_sword", "magic_staff", "leather_armor", "chain_mail"] {
        let item = catalog.item(item_id).unwrap();
        let mut hero = Character::new("Hero", CharacterClass::Cleric);
        hero.gold = 1_000;
        items::purchase(&mut hero, item_id, item).unwrap();
        let before = stats(&hero);
        let count_before = hero.inventory.len();

        items::equip(&mut hero, item_id, item).unwrap();
        assert!(hero.equipment.get(item.item_type.slot().unwrap()).is_some());
        assert_eq!(hero.inventory.len(), count_before - 1);

        items::unequip(&mut hero, item.item_type.slot().unwrap()).unwrap();
        assert_eq!(stats(&hero), before, "{} left a stat change", item_id);
        assert_eq!(hero.inventory.len(), count_before);
        hero.check_invariants().unwrap();
    }
}

#[test]
fn test_weapon_swap_returns_old_weapon() {
    let catalog = Catalog::bundled().unwrap();
    let mut hero = Character::new("Hero", CharacterClass::Warrior);
    hero.gold = 500;
    let mut session = GameSession::new(hero, &catalog);

    session.buy_item("iron_sword").unwrap();
    session.buy_item("steel_sword").unwrap();
    session.equip_item("iron_sword").unwrap();
    assert_eq!(session.character().strength, 20);

    let replaced = session.equip_item("steel_sword").unwrap();
    assert_eq!(replaced.as_deref(), Some("iron_sword"));
    assert_eq!(session.character().strength, 25);
    assert_eq!(session.character().inventory, vec!["iron_sword".to_string()]);
    assert_eq!(
        session
            .character()
            .equipment
            .get(EquipSlot::Weapon)
            .map(|e| e.item_id.as_str()),
        Some("steel_sword")
    );
}

#[test]
fn test_purchase_without_gold_changes_nothing() {
    let catalog = Catalog::bundled().unwrap();
    let mut hero = Character::new("Hero", CharacterClass::Rogue);
    hero.gold = 30;
    let before = hero.clone();

    let err = items::purchase(&mut hero, "steel_sword", catalog.item("steel_sword").unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::InsufficientGold {
            needed: 120,
            available: 30
        }
    ));
    assert_eq!(err.kind(), ErrorKind::ResourceInsufficient);
    assert_eq!(hero, before);
}

#[test]
fn test_full_pack_blocks_purchase() {
    let catalog = Catalog::bundled().unwrap();
    let potion = catalog.item("health_potion").unwrap();
    let mut hero = Character::new("Hero", CharacterClass::Warrior);
    hero.gold = 10_000;
    for _ in 0..MAX_INVENTORY_SIZE {
        items::purchase(&mut hero, "health_potion", potion).unwrap();
    }
    let gold = hero.gold;

    let err = items::purchase(&mut hero, "health_potion", potion).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(hero.gold, gold);
    assert_eq!(hero.inventory.len(), MAX_INVENTORY_SIZE);
    assert_eq!(items::space_remaining(&hero), 0);
}

#[test]
fn test_potion_heals_up_to_max() {
    let catalog = Catalog::bundled().unwrap();
    let mut hero = Character::new("Hero", CharacterClass::Warrior);
    hero.health = 110;
    let mut session = GameSession::new(hero, &catalog);

    session.buy_item("health_potion").unwrap();
    session.use_item("health_potion").unwrap();
    assert_eq!(session.character().health, 120);
    assert!(session.character().inventory.is_empty());

    let err = session.use_item("health_potion").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_wrong_item_type_is_rejected() {
    let catalog = Catalog::bundled().unwrap();
    let mut hero = Character::new("Hero", CharacterClass::Mage);
    hero.gold = 500;
    let mut session = GameSession::new(hero, &catalog);

    session.buy_item("magic_staff").unwrap();
    session.buy_item("health_potion").unwrap();
    let before = session.character().clone();

    let err = session.use_item("magic_staff").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    let err = session.equip_item("health_potion").unwrap_err();
    assert!(matches!(err, GameError::InvalidItemType { .. }));
    assert_eq!(session.character(), &before);
}

#[test]
fn test_sell_pays_half_rounded_down() {
    let catalog = Catalog::bundled().unwrap();
    let mut hero = Character::new("Hero", CharacterClass::Warrior);
    hero.gold = 500;
    let mut session = GameSession::new(hero, &catalog);

    session.buy_item("health_potion").unwrap();
    session.buy_item("health_potion").unwrap();
    assert_eq!(items::count_item(session.character(), "health_potion"), 2);

    assert_eq!(session.sell_item("health_potion").unwrap(), 12);
    assert_eq!(session.character().gold, 500 - 50 + 12);
    assert_eq!(items::count_item(session.character(), "health_potion"), 1);

    let err = session.sell_item("iron_sword").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
