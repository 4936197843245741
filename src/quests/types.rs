use std::collections::BTreeMap;

use crate::character::Reward;

/// An immutable quest entry from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: u32,
    pub reward_gold: u32,
    pub required_level: u32,
    /// Quest that must be completed first, `None` for a root quest.
    pub prerequisite: Option<String>,
}

impl QuestDefinition {
    pub fn reward(&self) -> Reward {
        Reward {
            xp: self.reward_xp,
            gold: self.reward_gold,
        }
    }
}

/// Quest definitions keyed by id.
pub type QuestCatalog = BTreeMap<String, QuestDefinition>;
