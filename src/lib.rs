//! Quest Chronicles - Terminal Text RPG Library
//!
//! Character progression, inventory and equipment, the quest graph and the
//! turn-based battle engine, plus save files and catalogs. Exposed for the
//! binary and for integration tests.

pub mod catalog;
pub mod character;
pub mod combat;
pub mod config;
pub mod constants;
pub mod error;
pub mod items;
pub mod quests;
pub mod record;
pub mod session;

pub use catalog::Catalog;
pub use character::{Character, CharacterClass, CharacterManager};
pub use error::{ErrorKind, GameError};
pub use session::GameSession;
