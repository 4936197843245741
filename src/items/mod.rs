//! Item system: definitions, inventory, equipment and shop transactions.

pub mod inventory;
pub mod types;

pub use inventory::*;
pub use types::*;
