use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
}

impl ItemType {
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Consumable => "consumable",
        }
    }

    /// The equipment slot this item type occupies, if it can be equipped.
    pub fn slot(&self) -> Option<EquipSlot> {
        match self {
            ItemType::Weapon => Some(EquipSlot::Weapon),
            ItemType::Armor => Some(EquipSlot::Armor),
            ItemType::Consumable => None,
        }
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Ok(ItemType::Weapon),
            "armor" => Ok(ItemType::Armor),
            "consumable" => Ok(ItemType::Consumable),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipSlot {
    Weapon,
    Armor,
}

impl EquipSlot {
    pub fn all() -> [EquipSlot; 2] {
        [EquipSlot::Weapon, EquipSlot::Armor]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "weapon",
            EquipSlot::Armor => "armor",
        }
    }
}

/// Character stats an item effect can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Health,
    MaxHealth,
    Strength,
    Magic,
}

impl Stat {
    pub fn from_name(name: &str) -> Option<Stat> {
        match name {
            "health" => Some(Stat::Health),
            "max_health" => Some(Stat::MaxHealth),
            "strength" => Some(Stat::Strength),
            "magic" => Some(Stat::Magic),
            _ => None,
        }
    }
}

/// A signed change to one stat, written `stat:delta` (e.g. `strength:+5`).
///
/// The stat name is kept verbatim so unknown stats survive a save round trip;
/// applying an effect on an unknown stat does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEffect {
    pub stat_name: String,
    pub delta: i32,
}

impl StatEffect {
    pub fn new(stat_name: &str, delta: i32) -> Self {
        Self {
            stat_name: stat_name.to_lowercase(),
            delta,
        }
    }

    pub fn stat(&self) -> Option<Stat> {
        Stat::from_name(&self.stat_name)
    }

    pub fn reversed(&self) -> Self {
        Self {
            stat_name: self.stat_name.clone(),
            delta: -self.delta,
        }
    }
}

impl FromStr for StatEffect {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidEffect(s.to_string());
        let (name, value) = s.split_once(':').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }
        let delta = value.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(StatEffect::new(name, delta))
    }
}

impl fmt::Display for StatEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stat_name, self.delta)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub effect: StatEffect,
    pub cost: u32,
    pub description: String,
}

impl ItemDefinition {
    pub fn sell_price(&self) -> u32 {
        self.cost / 2
    }
}
