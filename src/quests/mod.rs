//! Quest definitions and the accept/complete/abandon graph.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
