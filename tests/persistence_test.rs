//! Integration test: save files and data files on disk
//!
//! Plays a short session, saves and reloads the character, and loads the
//! quest and item catalogs from a data directory.

use std::fs;

use quest_chronicles::catalog::{self, load_items};
use quest_chronicles::character::{Character, CharacterClass, CharacterManager};
use quest_chronicles::items::EquipSlot;
use quest_chronicles::record::RecordError;
use quest_chronicles::session::GameSession;
use quest_chronicles::{Catalog, ErrorKind, GameError};

// =============================================================================
// Character saves
// =============================================================================

#[test]
fn test_played_character_survives_reload() {
    let catalog = Catalog::bundled().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let manager = CharacterManager::new(dir.path());

    let mut hero = Character::new("Sir Galahad", CharacterClass::Warrior);
    hero.gold = 300;
    let mut session = GameSession::new(hero, &catalog);
    session.buy_item("iron_sword").unwrap();
    session.buy_item("leather_armor").unwrap();
    session.buy_item("health_potion").unwrap();
    session.equip_item("iron_sword").unwrap();
    session.equip_item("leather_armor").unwrap();
    session.accept_quest("first_steps").unwrap();
    session.complete_quest("first_steps").unwrap();
    session.accept_quest("goblin_trouble").unwrap();

    let path = session.save(&manager).unwrap();
    assert_eq!(path, dir.path().join("sir_galahad_save.txt"));

    let saved = session.into_character();
    let loaded = manager.load_character("Sir Galahad").unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.completed_quests, vec!["first_steps".to_string()]);
    assert_eq!(loaded.active_quests, vec!["goblin_trouble".to_string()]);
    assert_eq!(loaded.inventory, vec!["health_potion".to_string()]);

    // Unequipping after a reload removes exactly the bonus that was granted
    let mut session = GameSession::new(loaded, &catalog);
    session.unequip(EquipSlot::Weapon).unwrap();
    session.unequip(EquipSlot::Armor).unwrap();
    assert_eq!(session.character().strength, 15);
    assert_eq!(session.character().max_health, 120);
}

#[test]
fn test_listing_reports_corrupted_saves() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CharacterManager::new(dir.path());
    manager
        .save_character(&Character::new("Aria", CharacterClass::Cleric))
        .unwrap();
    fs::write(dir.path().join("broken_save.txt"), "NAME: Broken\nLEVEL: many\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a save").unwrap();

    let characters = manager.list_characters().unwrap();
    assert_eq!(characters.len(), 2);

    let aria = characters.iter().find(|c| !c.is_corrupted).unwrap();
    assert_eq!(aria.name, "Aria");
    assert_eq!(aria.class, Some(CharacterClass::Cleric));
    assert_eq!(aria.level, 1);

    let broken = characters.iter().find(|c| c.is_corrupted).unwrap();
    assert_eq!(broken.name, "[CORRUPTED]");
    assert_eq!(broken.filename, "broken_save.txt");

    let err = manager.load_character("broken").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataCorrupt);

    // A corrupted save can still be removed by its file stem
    manager.delete_character("broken").unwrap();
    assert_eq!(manager.list_characters().unwrap().len(), 1);
}

#[test]
fn test_missing_and_invalid_names() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CharacterManager::new(dir.path());

    let err = manager.load_character("Nobody").unwrap_err();
    assert!(matches!(err, GameError::CharacterNotFound(_)));
    let err = manager.delete_character("Nobody").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = manager
        .save_character(&Character::new("bad/name", CharacterClass::Rogue))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(manager.list_characters().unwrap().is_empty());
}

// =============================================================================
// Data files
// =============================================================================

#[test]
fn test_default_data_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let written = catalog::create_default_data_files(dir.path()).unwrap();
    assert_eq!(written.len(), 2);

    let loaded = Catalog::load(dir.path()).unwrap();
    let bundled = Catalog::bundled().unwrap();
    assert_eq!(
        loaded.quests.keys().collect::<Vec<_>>(),
        bundled.quests.keys().collect::<Vec<_>>()
    );
    assert_eq!(loaded.items, bundled.items);
}

#[test]
fn test_existing_data_files_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let custom = "ITEM_ID: stick\nNAME: Stick\nTYPE: weapon\nEFFECT: strength:1\n\
                  COST: 1\nDESCRIPTION: A stick.\n";
    fs::write(dir.path().join("items.txt"), custom).unwrap();

    let written = catalog::create_default_data_files(dir.path()).unwrap();
    assert_eq!(written, vec![dir.path().join("quests.txt")]);

    let catalog = Catalog::load(dir.path()).unwrap();
    assert_eq!(catalog.items.len(), 1);
    assert_eq!(catalog.shop_items()[0].id, "stick");
}

#[test]
fn test_missing_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(dir.path()).unwrap_err();
    assert!(matches!(err, GameError::MissingDataFile(ref path) if path.ends_with("quests.txt")));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_duplicate_item_ids_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let block = "ITEM_ID: stick\nNAME: Stick\nTYPE: weapon\nEFFECT: strength:1\n\
                 COST: 1\nDESCRIPTION: A stick.\n";
    let path = dir.path().join("items.txt");
    fs::write(&path, format!("{}\n{}", block, block)).unwrap();

    let err = load_items(&path).unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidDataFormat {
            source: RecordError::DuplicateId(ref id),
            ..
        } if id == "stick"
    ));
    assert_eq!(err.kind(), ErrorKind::DataCorrupt);
}

#[test]
fn test_unknown_item_type_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.txt");
    fs::write(
        &path,
        "ITEM_ID: ring\nNAME: Ring\nTYPE: jewelry\nEFFECT: magic:1\nCOST: 5\nDESCRIPTION: Shiny.\n",
    )
    .unwrap();

    let err = load_items(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataCorrupt);
}
