//! Experience, leveling, gold, healing and death handling.

use crate::constants::{LEVEL_UP_MAGIC, LEVEL_UP_MAX_HEALTH, LEVEL_UP_STRENGTH};
use crate::error::GameError;

use super::types::Character;

/// Experience and gold granted by a won battle or a completed quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reward {
    pub xp: u32,
    pub gold: u32,
}

pub fn is_dead(character: &Character) -> bool {
    character.health <= 0
}

/// Adds experience, leveling up as many times as the total allows.
///
/// Each level-up consumes `level * 100` experience and raises max health,
/// strength and magic before fully healing. Returns the experience left over.
pub fn gain_experience(character: &mut Character, amount: i64) -> Result<u32, GameError> {
    if is_dead(character) {
        return Err(GameError::CharacterDead(character.name.clone()));
    }
    if amount < 0 {
        return Err(GameError::NegativeAmount(amount));
    }
    let amount = u32::try_from(amount).unwrap_or(u32::MAX);
    character.experience = character.experience.saturating_add(amount);

    loop {
        let xp_needed = character.xp_to_next_level();
        if character.experience >= xp_needed {
            character.experience -= xp_needed;
            level_up(character);
        } else {
            break;
        }
    }

    Ok(character.experience)
}

fn level_up(character: &mut Character) {
    character.level += 1;
    character.max_health += LEVEL_UP_MAX_HEALTH;
    character.strength += LEVEL_UP_STRENGTH;
    character.magic += LEVEL_UP_MAGIC;
    character.health = character.max_health;
}

/// Adds (or with a negative amount, spends) gold. Gold never goes negative
/// and saturates at `u32::MAX`.
pub fn add_gold(character: &mut Character, amount: i64) -> Result<u32, GameError> {
    let new_gold = i64::from(character.gold).saturating_add(amount);
    if new_gold < 0 {
        return Err(GameError::InsufficientGold {
            needed: u32::try_from(amount.unsigned_abs()).unwrap_or(u32::MAX),
            available: character.gold,
        });
    }
    character.gold = u32::try_from(new_gold).unwrap_or(u32::MAX);
    Ok(character.gold)
}

/// Heals up to `amount`, never past max health. Returns the amount healed.
pub fn heal_character(character: &mut Character, amount: u32) -> u32 {
    let missing = (character.max_health - character.health).max(0) as u32;
    let healed = amount.min(missing);
    character.health += healed as i32;
    healed
}

/// Brings a dead character back at half max health. Returns false if alive.
pub fn revive(character: &mut Character) -> bool {
    if !is_dead(character) {
        return false;
    }
    character.health = character.max_health / 2;
    true
}

/// Applies a reward's experience then its gold. Returns the levels gained.
pub fn apply_reward(character: &mut Character, reward: Reward) -> Result<u32, GameError> {
    let level_before = character.level;
    gain_experience(character, i64::from(reward.xp))?;
    add_gold(character, i64::from(reward.gold))?;
    Ok(character.level - level_before)
}
