//! Turn-based battle resolution between a character and a single enemy.

use rand::Rng;

use crate::character::{heal_character, Character, CharacterClass, Reward};
use crate::constants::*;
use crate::error::GameError;

use super::types::{Combatant, Enemy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    NotStarted,
    Active,
    PlayerWon,
    EnemyWon,
    Escaped,
}

impl BattleState {
    pub fn is_over(&self) -> bool {
        matches!(
            self,
            BattleState::PlayerWon | BattleState::EnemyWon | BattleState::Escaped
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Special,
    Escape,
}

/// The one special ability each class owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    PowerStrike,
    Fireball,
    CriticalStrike,
    Heal,
}

impl Ability {
    pub fn for_class(class: CharacterClass) -> Ability {
        match class {
            CharacterClass::Warrior => Ability::PowerStrike,
            CharacterClass::Mage => Ability::Fireball,
            CharacterClass::Rogue => Ability::CriticalStrike,
            CharacterClass::Cleric => Ability::Heal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::PowerStrike => "Power Strike",
            Ability::Fireball => "Fireball",
            Ability::CriticalStrike => "Critical Strike",
            Ability::Heal => "Heal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    PlayerAttack { damage: i32 },
    PowerStrike { damage: i32 },
    Fireball { damage: i32 },
    CriticalStrike { damage: i32, critical: bool },
    Healed { amount: u32 },
    EscapeFailed,
    Escaped,
    EnemyAttack { damage: i32 },
    EnemyDefeated { reward: Reward },
    PlayerDefeated,
}

impl BattleEvent {
    /// One line of battle log text for this event.
    pub fn describe(&self, enemy_name: &str) -> String {
        match self {
            BattleEvent::PlayerAttack { damage } => {
                format!("You hit the {} for {} damage.", enemy_name, damage)
            }
            BattleEvent::PowerStrike { damage } => {
                format!("Power Strike! The {} takes {} damage.", enemy_name, damage)
            }
            BattleEvent::Fireball { damage } => {
                format!("Fireball engulfs the {} for {} damage.", enemy_name, damage)
            }
            BattleEvent::CriticalStrike { damage, critical } => {
                if *critical {
                    format!("Critical hit! The {} takes {} damage.", enemy_name, damage)
                } else {
                    format!("Normal hit. The {} takes {} damage.", enemy_name, damage)
                }
            }
            BattleEvent::Healed { amount } => format!("You recover {} health.", amount),
            BattleEvent::EscapeFailed => "You fail to get away!".to_string(),
            BattleEvent::Escaped => "You escape safely.".to_string(),
            BattleEvent::EnemyAttack { damage } => {
                format!("The {} hits you for {} damage.", enemy_name, damage)
            }
            BattleEvent::EnemyDefeated { reward } => format!(
                "The {} is defeated! +{} XP, +{} gold.",
                enemy_name, reward.xp, reward.gold
            ),
            BattleEvent::PlayerDefeated => "You have been defeated...".to_string(),
        }
    }
}

/// Terminal result of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory(Reward),
    Defeat,
    Escaped,
}

impl BattleOutcome {
    pub fn reward(&self) -> Reward {
        match self {
            BattleOutcome::Victory(reward) => *reward,
            BattleOutcome::Defeat | BattleOutcome::Escaped => Reward::default(),
        }
    }
}

/// `max(1, attacker.strength - defender.strength / 4)`
pub fn calculate_damage(attacker: &impl Combatant, defender: &impl Combatant) -> i32 {
    damage_from_strength(attacker.strength(), defender)
}

fn damage_from_strength(strength: i32, defender: &impl Combatant) -> i32 {
    (strength - defender.strength().div_euclid(DEFENSE_DIVISOR)).max(MIN_DAMAGE)
}

/// Lowers health by `amount`, stopping at zero.
pub fn apply_damage(target: &mut impl Combatant, amount: i32) {
    target.set_health((target.health() - amount).max(0));
}

/// One encounter. The battle owns the enemy; the character is lent per turn so
/// the caller keeps ownership of the record.
#[derive(Debug, Clone)]
pub struct Battle {
    pub enemy: Enemy,
    state: BattleState,
    turn: u32,
}

impl Battle {
    pub fn new(enemy: Enemy) -> Self {
        Self {
            enemy,
            state: BattleState::NotStarted,
            turn: 0,
        }
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_active(&self) -> bool {
        self.state == BattleState::Active
    }

    pub fn start(&mut self, character: &Character) -> Result<(), GameError> {
        if !character.is_alive() {
            return Err(GameError::CharacterDead(character.name.clone()));
        }
        if self.state != BattleState::NotStarted {
            return Err(GameError::CombatNotActive);
        }
        self.state = BattleState::Active;
        self.turn = 1;
        Ok(())
    }

    /// Resolves the player's action and, if the battle is still going, the
    /// enemy's reply.
    pub fn take_turn(
        &mut self,
        character: &mut Character,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<Vec<BattleEvent>, GameError> {
        if !self.is_active() {
            return Err(GameError::CombatNotActive);
        }

        let mut events = Vec::new();

        match action {
            PlayerAction::Attack => {
                let damage = calculate_damage(character, &self.enemy);
                apply_damage(&mut self.enemy, damage);
                events.push(BattleEvent::PlayerAttack { damage });
            }
            PlayerAction::Special => {
                events.push(self.use_special(character, rng));
            }
            PlayerAction::Escape => {
                if rng.gen::<f64>() < ESCAPE_CHANCE {
                    self.state = BattleState::Escaped;
                    events.push(BattleEvent::Escaped);
                    return Ok(events);
                }
                events.push(BattleEvent::EscapeFailed);
            }
        }

        if self.check_end(character, &mut events) {
            return Ok(events);
        }

        let damage = calculate_damage(&self.enemy, character);
        apply_damage(character, damage);
        events.push(BattleEvent::EnemyAttack { damage });

        if !self.check_end(character, &mut events) {
            self.turn += 1;
        }
        Ok(events)
    }

    fn use_special(&mut self, character: &mut Character, rng: &mut impl Rng) -> BattleEvent {
        match Ability::for_class(character.class) {
            Ability::PowerStrike => {
                let damage = damage_from_strength(
                    character.strength * POWER_STRIKE_MULTIPLIER,
                    &self.enemy,
                );
                apply_damage(&mut self.enemy, damage);
                BattleEvent::PowerStrike { damage }
            }
            Ability::Fireball => {
                let damage = (character.magic * FIREBALL_MULTIPLIER).max(MIN_DAMAGE);
                apply_damage(&mut self.enemy, damage);
                BattleEvent::Fireball { damage }
            }
            Ability::CriticalStrike => {
                let critical = rng.gen::<f64>() < CRITICAL_STRIKE_CHANCE;
                let strength = if critical {
                    character.strength * CRITICAL_STRIKE_MULTIPLIER
                } else {
                    character.strength
                };
                let damage = damage_from_strength(strength, &self.enemy);
                apply_damage(&mut self.enemy, damage);
                BattleEvent::CriticalStrike { damage, critical }
            }
            Ability::Heal => {
                let amount = heal_character(character, CLERIC_HEAL_AMOUNT);
                BattleEvent::Healed { amount }
            }
        }
    }

    /// Moves to a terminal state if either side is down. Enemy death is
    /// checked first.
    fn check_end(&mut self, character: &Character, events: &mut Vec<BattleEvent>) -> bool {
        if !self.enemy.is_alive() {
            self.state = BattleState::PlayerWon;
            events.push(BattleEvent::EnemyDefeated {
                reward: self.reward(),
            });
            true
        } else if !character.is_alive() {
            self.state = BattleState::EnemyWon;
            events.push(BattleEvent::PlayerDefeated);
            true
        } else {
            false
        }
    }

    fn reward(&self) -> Reward {
        Reward {
            xp: self.enemy.xp_reward,
            gold: self.enemy.gold_reward,
        }
    }

    /// The result once the battle has ended, `None` while it is still open.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state {
            BattleState::PlayerWon => Some(BattleOutcome::Victory(self.reward())),
            BattleState::EnemyWon => Some(BattleOutcome::Defeat),
            BattleState::Escaped => Some(BattleOutcome::Escaped),
            BattleState::NotStarted | BattleState::Active => None,
        }
    }

    /// Fights to the end, asking `decide` for each player action.
    pub fn run<F>(
        &mut self,
        character: &mut Character,
        mut decide: F,
        rng: &mut impl Rng,
    ) -> Result<BattleOutcome, GameError>
    where
        F: FnMut(&Character, &Enemy) -> PlayerAction,
    {
        if self.state == BattleState::NotStarted {
            self.start(character)?;
        }
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            let action = decide(character, &self.enemy);
            self.take_turn(character, action, rng)?;
        }
    }
}
