//! The game-session context: the loaded character, the shared catalog and the
//! battle currently in progress.

use std::path::PathBuf;

use rand::Rng;

use crate::catalog::Catalog;
use crate::character::{self, Character, CharacterManager, Reward};
use crate::combat::{Battle, BattleEvent, BattleOutcome, Enemy, PlayerAction};
use crate::error::GameError;
use crate::items::{self, EquipSlot};
use crate::quests;

/// What one battle turn produced, as seen by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    pub events: Vec<BattleEvent>,
    /// Set once the battle has ended.
    pub outcome: Option<BattleOutcome>,
    pub levels_gained: u32,
}

pub struct GameSession<'a> {
    character: Character,
    catalog: &'a Catalog,
    battle: Option<Battle>,
}

impl<'a> GameSession<'a> {
    pub fn new(character: Character, catalog: &'a Catalog) -> Self {
        log::info!(
            "Session started for {} (level {} {})",
            character.name,
            character.level,
            character.class
        );
        Self {
            character,
            catalog,
            battle: None,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn is_dead(&self) -> bool {
        character::is_dead(&self.character)
    }

    /// Ends the session, handing back the character record.
    pub fn into_character(self) -> Character {
        self.character
    }

    // ------------------------------------------------------------------
    // Exploration and combat
    // ------------------------------------------------------------------

    /// Starts an encounter with an enemy suited to the character's level.
    pub fn explore(&mut self) -> Result<&Battle, GameError> {
        self.start_battle(Enemy::for_level(self.character.level))
    }

    pub fn start_battle(&mut self, enemy: Enemy) -> Result<&Battle, GameError> {
        if self.battle.as_ref().is_some_and(Battle::is_active) {
            return Err(GameError::CombatNotActive);
        }
        let mut battle = Battle::new(enemy);
        battle.start(&self.character)?;
        log::info!(
            "{} encounters a {}",
            self.character.name,
            battle.enemy.name
        );
        Ok(self.battle.insert(battle))
    }

    /// Plays one turn of the current battle. When the battle ends, a victory
    /// reward is applied and the battle is cleared.
    pub fn battle_turn(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<TurnSummary, GameError> {
        let battle = self.battle.as_mut().ok_or(GameError::CombatNotActive)?;
        let events = battle.take_turn(&mut self.character, action, rng)?;
        let outcome = battle.outcome();
        log::debug!("Turn resolved with {} events", events.len());

        let mut levels_gained = 0;
        if let Some(outcome) = outcome {
            self.battle = None;
            levels_gained = self.finish_battle(outcome)?;
        }

        Ok(TurnSummary {
            events,
            outcome,
            levels_gained,
        })
    }

    fn finish_battle(&mut self, outcome: BattleOutcome) -> Result<u32, GameError> {
        match outcome {
            BattleOutcome::Victory(reward) => {
                let levels = character::apply_reward(&mut self.character, reward)?;
                log::info!(
                    "{} won: +{} xp, +{} gold, {} level(s) gained",
                    self.character.name,
                    reward.xp,
                    reward.gold,
                    levels
                );
                Ok(levels)
            }
            BattleOutcome::Defeat => {
                log::info!("{} was defeated", self.character.name);
                Ok(0)
            }
            BattleOutcome::Escaped => {
                log::info!("{} escaped", self.character.name);
                Ok(0)
            }
        }
    }

    /// Pays `cost` gold to revive a dead character. Returns false if the
    /// character was alive, leaving gold untouched.
    pub fn revive_for_gold(&mut self, cost: u32) -> Result<bool, GameError> {
        if !self.is_dead() {
            return Ok(false);
        }
        character::add_gold(&mut self.character, -i64::from(cost))?;
        character::revive(&mut self.character);
        log::info!(
            "{} revived for {} gold at {} health",
            self.character.name,
            cost,
            self.character.health
        );
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------

    pub fn accept_quest(&mut self, quest_id: &str) -> Result<(), GameError> {
        quests::accept(&mut self.character, quest_id, &self.catalog.quests)?;
        log::info!("{} accepted quest {}", self.character.name, quest_id);
        Ok(())
    }

    pub fn complete_quest(&mut self, quest_id: &str) -> Result<Reward, GameError> {
        let reward = quests::complete(&mut self.character, quest_id, &self.catalog.quests)?;
        log::info!("{} completed quest {}", self.character.name, quest_id);
        Ok(reward)
    }

    pub fn abandon_quest(&mut self, quest_id: &str) -> Result<(), GameError> {
        quests::abandon(&mut self.character, quest_id)?;
        log::info!("{} abandoned quest {}", self.character.name, quest_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Items and shop
    // ------------------------------------------------------------------

    pub fn buy_item(&mut self, item_id: &str) -> Result<(), GameError> {
        let item = self.catalog.item(item_id)?;
        items::purchase(&mut self.character, item_id, item)?;
        log::debug!("{} bought {} for {}", self.character.name, item_id, item.cost);
        Ok(())
    }

    pub fn sell_item(&mut self, item_id: &str) -> Result<u32, GameError> {
        let item = self.catalog.item(item_id)?;
        let price = items::sell(&mut self.character, item_id, item)?;
        log::debug!("{} sold {} for {}", self.character.name, item_id, price);
        Ok(price)
    }

    pub fn use_item(&mut self, item_id: &str) -> Result<(), GameError> {
        let item = self.catalog.item(item_id)?;
        items::use_item(&mut self.character, item_id, item)?;
        log::debug!("{} used {}", self.character.name, item_id);
        Ok(())
    }

    pub fn equip_item(&mut self, item_id: &str) -> Result<Option<String>, GameError> {
        let item = self.catalog.item(item_id)?;
        let replaced = items::equip(&mut self.character, item_id, item)?;
        log::debug!("{} equipped {}", self.character.name, item_id);
        Ok(replaced)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<Option<String>, GameError> {
        items::unequip(&mut self.character, slot)
    }

    /// Discards one copy of an item from the inventory.
    pub fn drop_item(&mut self, item_id: &str) -> Result<(), GameError> {
        items::remove_item(&mut self.character, item_id)?;
        log::debug!("{} dropped {}", self.character.name, item_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn save(&self, manager: &CharacterManager) -> Result<PathBuf, GameError> {
        manager.save_character(&self.character)
    }
}
