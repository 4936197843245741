use std::fmt;
use std::str::FromStr;

use crate::character::Character;
use crate::constants::{GOBLIN_MAX_LEVEL, ORC_MAX_LEVEL};
use crate::error::GameError;

/// Anything that can deal and take damage in a battle.
pub trait Combatant {
    fn name(&self) -> &str;
    fn health(&self) -> i32;
    fn max_health(&self) -> i32;
    fn strength(&self) -> i32;
    fn set_health(&mut self, health: i32);

    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn strength(&self) -> i32 {
        self.strength
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

impl EnemyKind {
    pub fn all() -> [EnemyKind; 3] {
        [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Dragon]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Dragon => "Dragon",
        }
    }

    /// Picks the enemy tier for a character level.
    pub fn for_level(level: u32) -> EnemyKind {
        if level <= GOBLIN_MAX_LEVEL {
            EnemyKind::Goblin
        } else if level <= ORC_MAX_LEVEL {
            EnemyKind::Orc
        } else {
            EnemyKind::Dragon
        }
    }

    /// Builds a fresh enemy at full health.
    pub fn spawn(&self) -> Enemy {
        // (health, strength, magic, xp_reward, gold_reward)
        let (health, strength, magic, xp_reward, gold_reward) = match self {
            EnemyKind::Goblin => (50, 8, 2, 25, 10),
            EnemyKind::Orc => (80, 12, 5, 50, 25),
            EnemyKind::Dragon => (200, 25, 15, 200, 100),
        };
        Enemy {
            kind: *self,
            name: self.name().to_string(),
            health,
            max_health: health,
            strength,
            magic,
            xp_reward,
            gold_reward,
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnemyKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnemyKind::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownEnemy(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub magic: i32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

impl Enemy {
    /// Creates an enemy from its kind name, ignoring case.
    pub fn create(kind_name: &str) -> Result<Self, GameError> {
        Ok(kind_name.parse::<EnemyKind>()?.spawn())
    }

    pub fn for_level(level: u32) -> Self {
        EnemyKind::for_level(level).spawn()
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn strength(&self) -> i32 {
        self.strength
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }
}
