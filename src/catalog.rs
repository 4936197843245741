//! Quest and item catalogs loaded from block-structured text files.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{ITEMS_FILE, NO_PREREQUISITE, QUESTS_FILE};
use crate::error::GameError;
use crate::items::{ItemDefinition, ItemType, StatEffect};
use crate::quests::{validate_prerequisites, QuestCatalog, QuestDefinition};
use crate::record::{parse_blocks, Record, RecordError};

const DEFAULT_QUESTS: &str = include_str!("../data/quests.txt");
const DEFAULT_ITEMS: &str = include_str!("../data/items.txt");

/// Item definitions keyed by id.
pub type ItemCatalog = BTreeMap<String, ItemDefinition>;

/// The read-only game data shared by a session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub quests: QuestCatalog,
    pub items: ItemCatalog,
}

impl Catalog {
    /// Loads `quests.txt` and `items.txt` from `data_dir` and validates the
    /// quest prerequisite graph.
    pub fn load(data_dir: &Path) -> Result<Self, GameError> {
        let quests = load_quests(&data_dir.join(QUESTS_FILE))?;
        let items = load_items(&data_dir.join(ITEMS_FILE))?;
        validate_prerequisites(&quests)?;
        log::info!(
            "Loaded catalog from {}: {} quests, {} items",
            data_dir.display(),
            quests.len(),
            items.len()
        );
        Ok(Self { quests, items })
    }

    /// Catalog built from the bundled default data.
    pub fn bundled() -> Result<Self, GameError> {
        let quests = parse_quests(DEFAULT_QUESTS).map_err(|source| GameError::InvalidDataFormat {
            path: PathBuf::from(QUESTS_FILE),
            source,
        })?;
        let items = parse_items(DEFAULT_ITEMS).map_err(|source| GameError::InvalidDataFormat {
            path: PathBuf::from(ITEMS_FILE),
            source,
        })?;
        validate_prerequisites(&quests)?;
        Ok(Self { quests, items })
    }

    pub fn item(&self, item_id: &str) -> Result<&ItemDefinition, GameError> {
        self.items
            .get(item_id)
            .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))
    }

    pub fn quest(&self, quest_id: &str) -> Result<&QuestDefinition, GameError> {
        self.quests
            .get(quest_id)
            .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))
    }

    /// Items for sale, cheapest first.
    pub fn shop_items(&self) -> Vec<&ItemDefinition> {
        let mut items: Vec<_> = self.items.values().collect();
        items.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.id.cmp(&b.id)));
        items
    }
}

fn read_data_file(path: &Path) -> Result<String, GameError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(GameError::MissingDataFile(path.to_path_buf()))
        }
        Err(source) => Err(GameError::CorruptedData {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn load_quests(path: &Path) -> Result<QuestCatalog, GameError> {
    let text = read_data_file(path)?;
    let quests = parse_quests(&text).map_err(|source| GameError::InvalidDataFormat {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Parsed {} quests from {}", quests.len(), path.display());
    Ok(quests)
}

pub fn load_items(path: &Path) -> Result<ItemCatalog, GameError> {
    let text = read_data_file(path)?;
    let items = parse_items(&text).map_err(|source| GameError::InvalidDataFormat {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Parsed {} items from {}", items.len(), path.display());
    Ok(items)
}

pub fn parse_quests(text: &str) -> Result<QuestCatalog, RecordError> {
    let mut quests = QuestCatalog::new();
    for record in parse_blocks(text)? {
        let quest = quest_from_record(&record)?;
        if quests.contains_key(&quest.id) {
            return Err(RecordError::DuplicateId(quest.id));
        }
        quests.insert(quest.id.clone(), quest);
    }
    Ok(quests)
}

pub fn parse_items(text: &str) -> Result<ItemCatalog, RecordError> {
    let mut items = ItemCatalog::new();
    for record in parse_blocks(text)? {
        let item = item_from_record(&record)?;
        if items.contains_key(&item.id) {
            return Err(RecordError::DuplicateId(item.id));
        }
        items.insert(item.id.clone(), item);
    }
    Ok(items)
}

fn quest_from_record(record: &Record) -> Result<QuestDefinition, RecordError> {
    let required_level: u32 = record.number("required_level")?;
    if required_level < 1 {
        return Err(RecordError::InvalidValue {
            field: "required_level".to_string(),
            value: required_level.to_string(),
        });
    }
    let prerequisite = record.text("prerequisite")?;
    let prerequisite = if prerequisite.is_empty() || prerequisite.eq_ignore_ascii_case(NO_PREREQUISITE)
    {
        None
    } else {
        Some(prerequisite.to_string())
    };

    Ok(QuestDefinition {
        id: record.text("quest_id")?.to_string(),
        title: record.text("title")?.to_string(),
        description: record.text("description")?.to_string(),
        reward_xp: record.number("reward_xp")?,
        reward_gold: record.number("reward_gold")?,
        required_level,
        prerequisite,
    })
}

fn item_from_record(record: &Record) -> Result<ItemDefinition, RecordError> {
    let raw_type = record.text("type")?;
    let item_type: ItemType = raw_type.parse().map_err(|_| RecordError::InvalidValue {
        field: "type".to_string(),
        value: raw_type.to_string(),
    })?;
    let raw_effect = record.text("effect")?;
    let effect: StatEffect = raw_effect.parse().map_err(|_| RecordError::InvalidValue {
        field: "effect".to_string(),
        value: raw_effect.to_string(),
    })?;

    Ok(ItemDefinition {
        id: record.text("item_id")?.to_string(),
        name: record.text("name")?.to_string(),
        item_type,
        effect,
        cost: record.number("cost")?,
        description: record.text("description")?.to_string(),
    })
}

/// Writes the bundled catalogs into `data_dir`, leaving existing files alone.
/// Returns the paths that were written.
pub fn create_default_data_files(data_dir: &Path) -> Result<Vec<PathBuf>, GameError> {
    fs::create_dir_all(data_dir)?;

    let mut written = Vec::new();
    for (name, contents) in [(QUESTS_FILE, DEFAULT_QUESTS), (ITEMS_FILE, DEFAULT_ITEMS)] {
        let path = data_dir.join(name);
        if path.exists() {
            log::debug!("Keeping existing data file {}", path.display());
            continue;
        }
        fs::write(&path, contents)?;
        log::info!("Wrote default data file {}", path.display());
        written.push(path);
    }
    Ok(written)
}
