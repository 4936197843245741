use std::fmt;
use std::str::FromStr;

use crate::constants::{STARTING_GOLD, STARTING_LEVEL};
use crate::error::GameError;
use crate::items::{EquipSlot, StatEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

/// Starting vitals and combat stats for a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub health: i32,
    pub strength: i32,
    pub magic: i32,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 4] {
        [
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Cleric,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            CharacterClass::Warrior => BaseStats {
                health: 120,
                strength: 15,
                magic: 5,
            },
            CharacterClass::Mage => BaseStats {
                health: 80,
                strength: 8,
                magic: 20,
            },
            CharacterClass::Rogue => BaseStats {
                health: 90,
                strength: 12,
                magic: 10,
            },
            CharacterClass::Cleric => BaseStats {
                health: 100,
                strength: 10,
                magic: 15,
            },
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Sturdy fighter. Special: Power Strike",
            CharacterClass::Mage => "Fragile spellcaster. Special: Fireball",
            CharacterClass::Rogue => "Quick and risky. Special: Critical Strike",
            CharacterClass::Cleric => "Resilient healer. Special: Heal",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterClass::all()
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidCharacterClass(s.to_string()))
    }
}

/// An item sitting in an equipment slot together with the bonus it granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquippedItem {
    pub item_id: String,
    pub effect: StatEffect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    pub weapon: Option<EquippedItem>,
    pub armor: Option<EquippedItem>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&EquippedItem> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
        }
    }

    pub fn set(&mut self, slot: EquipSlot, item: Option<EquippedItem>) {
        match slot {
            EquipSlot::Weapon => self.weapon = item,
            EquipSlot::Armor => self.armor = item,
        }
    }

    pub fn take(&mut self, slot: EquipSlot) -> Option<EquippedItem> {
        match slot {
            EquipSlot::Weapon => self.weapon.take(),
            EquipSlot::Armor => self.armor.take(),
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = (EquipSlot, &EquippedItem)> {
        EquipSlot::all()
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }
}

/// The player's persistent game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub magic: i32,
    pub experience: u32,
    pub gold: u32,
    pub inventory: Vec<String>,
    pub equipment: Equipment,
    pub active_quests: Vec<String>,
    pub completed_quests: Vec<String>,
}

impl Character {
    pub fn new(name: &str, class: CharacterClass) -> Self {
        let base = class.base_stats();
        Self {
            name: name.trim().to_string(),
            class,
            level: STARTING_LEVEL,
            health: base.health,
            max_health: base.health,
            strength: base.strength,
            magic: base.magic,
            experience: 0,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            equipment: Equipment::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
        }
    }

    /// Checks the record-level invariants a loaded character must satisfy.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.level < 1 {
            return Err("level must be at least 1".to_string());
        }
        if self.max_health < 1 {
            return Err("max_health must be positive".to_string());
        }
        if self.health < 0 || self.health > self.max_health {
            return Err(format!(
                "health {} outside 0..={}",
                self.health, self.max_health
            ));
        }
        if self.strength < 1 {
            return Err("strength must be positive".to_string());
        }
        if self.magic < 0 {
            return Err("magic must not be negative".to_string());
        }
        if self.inventory.len() > crate::constants::MAX_INVENTORY_SIZE {
            return Err(format!("inventory holds {} items", self.inventory.len()));
        }
        if let Some(id) = self
            .active_quests
            .iter()
            .find(|id| self.completed_quests.contains(id))
        {
            return Err(format!("quest {} is both active and completed", id));
        }
        if has_duplicates(&self.active_quests) || has_duplicates(&self.completed_quests) {
            return Err("quest lists contain duplicates".to_string());
        }
        Ok(())
    }

    /// Experience needed to advance from the current level.
    pub fn xp_to_next_level(&self) -> u32 {
        self.level.saturating_mul(crate::constants::XP_PER_LEVEL)
    }
}

fn has_duplicates(ids: &[String]) -> bool {
    ids.iter()
        .enumerate()
        .any(|(i, id)| ids[..i].contains(id))
}
