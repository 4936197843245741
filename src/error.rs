use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordError;

/// Broad classification of a [`GameError`], used by the shell to pick how a
/// failure is presented and by tests to assert on failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character, item, quest, enemy or file is absent.
    NotFound,
    /// The quest is already completed or already active.
    AlreadyInState,
    /// A level or prerequisite requirement is not met.
    RequirementNotMet,
    /// The inventory is full.
    CapacityExceeded,
    /// Not enough gold.
    ResourceInsufficient,
    /// The action is not valid in the current state (dead character, battle not
    /// active, wrong item type).
    InvalidState,
    /// A save or catalog file is malformed.
    DataCorrupt,
    /// An argument is out of range or malformed.
    Validation,
    /// An underlying I/O failure.
    Io,
}

/// Errors produced by the game engines, the character manager and the catalog.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("{0} cannot act while dead")]
    CharacterDead(String),

    #[error("amount must not be negative: {0}")]
    NegativeAmount(i64),

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },

    #[error("inventory is full (capacity {capacity})")]
    InventoryFull { capacity: usize },

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("{item_id} is a {actual} and cannot be {action}")]
    InvalidItemType {
        item_id: String,
        actual: &'static str,
        action: &'static str,
    },

    #[error("malformed item effect: {0:?}")]
    InvalidEffect(String),

    #[error("quest not found: {0}")]
    QuestNotFound(String),

    #[error("quest already completed: {0}")]
    QuestAlreadyCompleted(String),

    #[error("quest already active: {0}")]
    QuestAlreadyActive(String),

    #[error("quest {quest_id} requires {prerequisite} to be completed first")]
    PrerequisiteNotMet {
        quest_id: String,
        prerequisite: String,
    },

    #[error("level {required} required, character is level {actual}")]
    InsufficientLevel { required: u32, actual: u32 },

    #[error("quest is not active: {0}")]
    QuestNotActive(String),

    #[error("prerequisite cycle involving quest {0}")]
    PrerequisiteCycle(String),

    #[error("combat is not active")]
    CombatNotActive,

    #[error("unknown enemy type: {0}")]
    UnknownEnemy(String),

    #[error("invalid character class: {0}")]
    InvalidCharacterClass(String),

    #[error("invalid character name: {0}")]
    InvalidName(String),

    #[error("no save file for character: {0}")]
    CharacterNotFound(String),

    #[error("save file for {name} could not be read: {source}")]
    SaveFileCorrupted {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid save data for {name}: {source}")]
    InvalidSaveData {
        name: String,
        #[source]
        source: RecordError,
    },

    #[error("data file not found: {}", .0.display())]
    MissingDataFile(PathBuf),

    #[error("data file {} could not be read: {source}", .path.display())]
    CorruptedData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data in {}: {source}", .path.display())]
    InvalidDataFormat {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::ItemNotFound(_)
            | GameError::QuestNotFound(_)
            | GameError::UnknownEnemy(_)
            | GameError::CharacterNotFound(_)
            | GameError::MissingDataFile(_) => ErrorKind::NotFound,
            GameError::QuestAlreadyCompleted(_) | GameError::QuestAlreadyActive(_) => {
                ErrorKind::AlreadyInState
            }
            GameError::PrerequisiteNotMet { .. } | GameError::InsufficientLevel { .. } => {
                ErrorKind::RequirementNotMet
            }
            GameError::InventoryFull { .. } => ErrorKind::CapacityExceeded,
            GameError::InsufficientGold { .. } => ErrorKind::ResourceInsufficient,
            GameError::CharacterDead(_)
            | GameError::CombatNotActive
            | GameError::InvalidItemType { .. }
            | GameError::QuestNotActive(_) => ErrorKind::InvalidState,
            GameError::SaveFileCorrupted { .. }
            | GameError::InvalidSaveData { .. }
            | GameError::CorruptedData { .. }
            | GameError::InvalidDataFormat { .. }
            | GameError::PrerequisiteCycle(_) => ErrorKind::DataCorrupt,
            GameError::NegativeAmount(_)
            | GameError::InvalidEffect(_)
            | GameError::InvalidCharacterClass(_)
            | GameError::InvalidName(_) => ErrorKind::Validation,
            GameError::Io(_) => ErrorKind::Io,
        }
    }
}
