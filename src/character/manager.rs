use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::constants::{MAX_NAME_LENGTH, SAVE_FILE_SUFFIX};
use crate::error::GameError;
use crate::items::StatEffect;
use crate::record::{Record, RecordError, RecordWriter};

use super::types::{Character, CharacterClass, EquippedItem, Equipment};

#[derive(Debug, Clone)]
pub struct CharacterInfo {
    pub name: String,
    pub class: Option<CharacterClass>,
    pub level: u32,
    pub filename: String,
    pub last_played: Option<DateTime<Local>>,
    pub is_corrupted: bool,
}

/// Stores one flat save file per character in a save directory.
pub struct CharacterManager {
    save_dir: PathBuf,
}

impl CharacterManager {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Path of the save file for a character name.
    pub fn save_path(&self, name: &str) -> PathBuf {
        self.save_dir
            .join(format!("{}{}", sanitize_name(name), SAVE_FILE_SUFFIX))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.save_path(name).is_file()
    }

    pub fn save_character(&self, character: &Character) -> Result<PathBuf, GameError> {
        validate_name(&character.name)?;
        fs::create_dir_all(&self.save_dir)?;

        let path = self.save_path(&character.name);
        fs::write(&path, encode_character(character))?;
        log::info!("Saved {} to {}", character.name, path.display());
        Ok(path)
    }

    pub fn load_character(&self, name: &str) -> Result<Character, GameError> {
        self.load_path(name, &self.save_path(name))
    }

    fn load_path(&self, name: &str, path: &Path) -> Result<Character, GameError> {
        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => GameError::CharacterNotFound(name.to_string()),
            _ => GameError::SaveFileCorrupted {
                name: name.to_string(),
                source,
            },
        })?;

        let character = decode_character(&text).map_err(|source| GameError::InvalidSaveData {
            name: name.to_string(),
            source,
        })?;
        log::debug!("Loaded {} from {}", character.name, path.display());
        Ok(character)
    }

    /// Every save file in the directory, most recently played first. Files that
    /// fail to load are listed as corrupted.
    pub fn list_characters(&self) -> Result<Vec<CharacterInfo>, GameError> {
        let entries = match fs::read_dir(&self.save_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut characters = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let filename = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();
            let Some(stem) = filename.strip_suffix(SAVE_FILE_SUFFIX) else {
                continue;
            };

            let last_played = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .ok()
                .map(DateTime::<Local>::from);

            match self.load_path(stem, &path) {
                Ok(character) => characters.push(CharacterInfo {
                    name: character.name,
                    class: Some(character.class),
                    level: character.level,
                    filename,
                    last_played,
                    is_corrupted: false,
                }),
                Err(e) => {
                    log::warn!("Skipping unreadable save {}: {}", path.display(), e);
                    characters.push(CharacterInfo {
                        name: "[CORRUPTED]".to_string(),
                        class: None,
                        level: 0,
                        filename,
                        last_played,
                        is_corrupted: true,
                    });
                }
            }
        }

        characters.sort_by(|a, b| b.last_played.cmp(&a.last_played));
        Ok(characters)
    }

    pub fn delete_character(&self, name: &str) -> Result<(), GameError> {
        let path = self.save_path(name);
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GameError::CharacterNotFound(name.to_string()),
            _ => GameError::Io(e),
        })?;
        log::info!("Deleted save {}", path.display());
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), GameError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(GameError::InvalidName("Name cannot be empty".to_string()));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(GameError::InvalidName(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        )));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(GameError::InvalidName(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        ));
    }

    Ok(())
}

pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn encode_equipped(item: Option<&EquippedItem>) -> String {
    item.map(|item| format!("{}|{}", item.item_id, item.effect))
        .unwrap_or_default()
}

fn decode_equipped(record: &Record, key: &str) -> Result<Option<EquippedItem>, RecordError> {
    let value = match record.optional(key) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };
    let invalid = || RecordError::InvalidValue {
        field: key.to_string(),
        value: value.to_string(),
    };
    let (item_id, effect) = value.split_once('|').ok_or_else(invalid)?;
    let effect: StatEffect = effect.parse().map_err(|_| invalid())?;
    if item_id.trim().is_empty() {
        return Err(invalid());
    }
    Ok(Some(EquippedItem {
        item_id: item_id.trim().to_string(),
        effect,
    }))
}

pub fn encode_character(character: &Character) -> String {
    RecordWriter::new()
        .field("NAME", &character.name)
        .field("CLASS", character.class)
        .field("LEVEL", character.level)
        .field("HEALTH", character.health)
        .field("MAX_HEALTH", character.max_health)
        .field("STRENGTH", character.strength)
        .field("MAGIC", character.magic)
        .field("EXPERIENCE", character.experience)
        .field("GOLD", character.gold)
        .list("INVENTORY", &character.inventory)
        .list("ACTIVE_QUESTS", &character.active_quests)
        .list("COMPLETED_QUESTS", &character.completed_quests)
        .field("EQUIPPED_WEAPON", encode_equipped(character.equipment.weapon.as_ref()))
        .field("EQUIPPED_ARMOR", encode_equipped(character.equipment.armor.as_ref()))
        .finish()
}

pub fn decode_character(text: &str) -> Result<Character, RecordError> {
    let record = Record::parse(text)?;

    let raw_class = record.text("class")?;
    let class: CharacterClass = raw_class.parse().map_err(|_| RecordError::InvalidValue {
        field: "class".to_string(),
        value: raw_class.to_string(),
    })?;

    let character = Character {
        name: record.text("name")?.to_string(),
        class,
        level: record.number("level")?,
        health: record.number("health")?,
        max_health: record.number("max_health")?,
        strength: record.number("strength")?,
        magic: record.number("magic")?,
        experience: record.number("experience")?,
        gold: record.number("gold")?,
        inventory: record.list("inventory")?,
        equipment: Equipment {
            weapon: decode_equipped(&record, "equipped_weapon")?,
            armor: decode_equipped(&record, "equipped_armor")?,
        },
        active_quests: record.list("active_quests")?,
        completed_quests: record.list("completed_quests")?,
    };

    character
        .check_invariants()
        .map_err(|reason| RecordError::InvalidValue {
            field: "character".to_string(),
            value: reason,
        })?;
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::items::EquipSlot;

    fn manager() -> (tempfile::TempDir, CharacterManager) {
        let dir = tempfile::tempdir().unwrap();
        let manager = CharacterManager::new(dir.path().join("saves"));
        (dir, manager)
    }

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Hero").is_ok());
        assert!(validate_name("Test 123").is_ok());
        assert!(validate_name("Warrior-2").is_ok());
        assert!(validate_name("under_score").is_ok());
    }

    #[test]
    fn test_validate_name_too_short() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_too_long() {
        assert!(validate_name("12345678901234567").is_err()); // 17 chars
        assert!(validate_name("1234567890123456").is_ok());
    }

    #[test]
    fn test_validate_name_invalid_chars() {
        assert!(validate_name("test@123").is_err());
        assert!(validate_name("hello!world").is_err());
        assert!(validate_name("a|b").is_err());
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Hero"), "hero");
        assert_eq!(sanitize_name("Mage the Great"), "mage_the_great");
        assert_eq!(sanitize_name("Warrior-2"), "warrior-2");
        assert_eq!(sanitize_name("   Spaces   "), "spaces");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, manager) = manager();
        let mut character = Character::new("Test Hero", CharacterClass::Rogue);
        character.level = 3;
        character.experience = 40;
        character.gold = 7;
        character.health = 55;
        character.inventory = vec!["health_potion".to_string(), "health_potion".to_string()];
        character.active_quests = vec!["goblin_trouble".to_string()];
        character.completed_quests = vec!["first_steps".to_string()];
        character.equipment.set(
            EquipSlot::Weapon,
            Some(EquippedItem {
                item_id: "iron_sword".to_string(),
                effect: StatEffect::new("strength", 5),
            }),
        );

        let path = manager.save_character(&character).unwrap();
        assert!(path.ends_with("test_hero_save.txt"));
        assert!(manager.exists("Test Hero"));

        let loaded = manager.load_character("Test Hero").unwrap();
        assert_eq!(loaded, character);
    }

    #[test]
    fn test_saved_format_is_flat_key_value() {
        let character = Character::new("Hero", CharacterClass::Warrior);
        let text = encode_character(&character);
        assert!(text.starts_with("NAME: Hero\nCLASS: Warrior\nLEVEL: 1\n"));
        assert!(text.contains("INVENTORY: \n"));
        assert!(text.contains("EQUIPPED_WEAPON: \n"));
    }

    #[test]
    fn test_load_missing_character() {
        let (_dir, manager) = manager();
        let err = manager.load_character("Nobody").unwrap_err();
        assert!(matches!(err, GameError::CharacterNotFound(_)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_load_invalid_data() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.save_dir()).unwrap();

        fs::write(manager.save_path("Broken"), "NAME: Broken\nCLASS: Bard\n").unwrap();
        let err = manager.load_character("Broken").unwrap_err();
        assert!(matches!(err, GameError::InvalidSaveData { .. }));
        assert_eq!(err.kind(), ErrorKind::DataCorrupt);

        let mut text = encode_character(&Character::new("Broken", CharacterClass::Mage));
        text = text.replace("GOLD: 100", "GOLD: lots");
        fs::write(manager.save_path("Broken"), text).unwrap();
        assert!(matches!(
            manager.load_character("Broken"),
            Err(GameError::InvalidSaveData { .. })
        ));
    }

    #[test]
    fn test_load_rejects_health_above_max() {
        let character = Character::new("Hero", CharacterClass::Mage);
        let text = encode_character(&character).replace("\nHEALTH: 80\n", "\nHEALTH: 500\n");
        assert!(matches!(
            decode_character(&text),
            Err(RecordError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let character = Character::new("Hero", CharacterClass::Cleric);
        let text = encode_character(&character).to_lowercase();
        let loaded = decode_character(&text.replace("class: cleric", "class: Cleric"));
        assert!(loaded.is_ok());
    }

    #[test]
    fn test_list_marks_corrupted_saves() {
        let (_dir, manager) = manager();
        manager
            .save_character(&Character::new("Alpha", CharacterClass::Warrior))
            .unwrap();
        fs::write(manager.save_path("Beta"), "garbage without separator").unwrap();
        fs::write(manager.save_dir().join("notes.txt"), "ignored").unwrap();

        let list = manager.list_characters().unwrap();
        assert_eq!(list.len(), 2);
        let alpha = list.iter().find(|c| c.name == "Alpha").unwrap();
        assert_eq!(alpha.class, Some(CharacterClass::Warrior));
        assert_eq!(alpha.level, 1);
        assert!(!alpha.is_corrupted);
        assert!(list.iter().any(|c| c.is_corrupted && c.filename == "beta_save.txt"));
    }

    #[test]
    fn test_list_without_directory_is_empty() {
        let (_dir, manager) = manager();
        assert!(manager.list_characters().unwrap().is_empty());
    }

    #[test]
    fn test_delete_character() {
        let (_dir, manager) = manager();
        manager
            .save_character(&Character::new("ToDelete", CharacterClass::Mage))
            .unwrap();
        manager.delete_character("ToDelete").unwrap();
        assert!(!manager.exists("ToDelete"));

        let err = manager.delete_character("ToDelete").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
