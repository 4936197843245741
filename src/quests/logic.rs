//! Quest lifecycle: accept, complete and abandon, plus read-only queries.
//!
//! Accept checks run in a fixed order: unknown quest, already completed,
//! already active, missing prerequisite, then level.

use std::collections::HashSet;

use crate::character::{apply_reward, is_dead, Character, Reward};
use crate::error::GameError;

use super::types::{QuestCatalog, QuestDefinition};

fn lookup<'a>(quest_id: &str, catalog: &'a QuestCatalog) -> Result<&'a QuestDefinition, GameError> {
    catalog
        .get(quest_id)
        .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))
}

fn check_accept<'a>(
    character: &Character,
    quest_id: &str,
    catalog: &'a QuestCatalog,
) -> Result<&'a QuestDefinition, GameError> {
    let quest = lookup(quest_id, catalog)?;

    if is_completed(character, quest_id) {
        return Err(GameError::QuestAlreadyCompleted(quest_id.to_string()));
    }
    if is_active(character, quest_id) {
        return Err(GameError::QuestAlreadyActive(quest_id.to_string()));
    }
    if let Some(prerequisite) = &quest.prerequisite {
        if !is_completed(character, prerequisite) {
            return Err(GameError::PrerequisiteNotMet {
                quest_id: quest_id.to_string(),
                prerequisite: prerequisite.clone(),
            });
        }
    }
    if character.level < quest.required_level {
        return Err(GameError::InsufficientLevel {
            required: quest.required_level,
            actual: character.level,
        });
    }

    Ok(quest)
}

pub fn accept(
    character: &mut Character,
    quest_id: &str,
    catalog: &QuestCatalog,
) -> Result<(), GameError> {
    check_accept(character, quest_id, catalog)?;
    character.active_quests.push(quest_id.to_string());
    Ok(())
}

/// Completes an active quest, granting its reward. Returns the reward granted.
pub fn complete(
    character: &mut Character,
    quest_id: &str,
    catalog: &QuestCatalog,
) -> Result<Reward, GameError> {
    let quest = lookup(quest_id, catalog)?;
    let Some(index) = character.active_quests.iter().position(|id| id == quest_id) else {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    };
    if is_dead(character) {
        return Err(GameError::CharacterDead(character.name.clone()));
    }

    let reward = quest.reward();
    apply_reward(character, reward)?;

    let id = character.active_quests.remove(index);
    character.completed_quests.push(id);
    Ok(reward)
}

/// Drops an active quest. Nothing is refunded.
pub fn abandon(character: &mut Character, quest_id: &str) -> Result<(), GameError> {
    let Some(index) = character.active_quests.iter().position(|id| id == quest_id) else {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    };
    character.active_quests.remove(index);
    Ok(())
}

// ============================================================================
// Queries
// ============================================================================

pub fn is_completed(character: &Character, quest_id: &str) -> bool {
    character.completed_quests.iter().any(|id| id == quest_id)
}

pub fn is_active(character: &Character, quest_id: &str) -> bool {
    character.active_quests.iter().any(|id| id == quest_id)
}

pub fn can_accept(character: &Character, quest_id: &str, catalog: &QuestCatalog) -> bool {
    check_accept(character, quest_id, catalog).is_ok()
}

/// Quests the character could accept right now, lowest level first.
pub fn available_quests<'a>(
    character: &Character,
    catalog: &'a QuestCatalog,
) -> Vec<&'a QuestDefinition> {
    let mut quests: Vec<_> = catalog
        .values()
        .filter(|quest| can_accept(character, &quest.id, catalog))
        .collect();
    quests.sort_by_key(|quest| quest.required_level);
    quests
}

fn materialize<'a>(ids: &[String], catalog: &'a QuestCatalog) -> Vec<&'a QuestDefinition> {
    ids.iter().filter_map(|id| catalog.get(id)).collect()
}

pub fn active_quests<'a>(
    character: &Character,
    catalog: &'a QuestCatalog,
) -> Vec<&'a QuestDefinition> {
    materialize(&character.active_quests, catalog)
}

pub fn completed_quests<'a>(
    character: &Character,
    catalog: &'a QuestCatalog,
) -> Vec<&'a QuestDefinition> {
    materialize(&character.completed_quests, catalog)
}

/// Definitions whose required level falls within `min..=max`.
pub fn quests_by_level(catalog: &QuestCatalog, min: u32, max: u32) -> Vec<&QuestDefinition> {
    let mut quests: Vec<_> = catalog
        .values()
        .filter(|quest| (min..=max).contains(&quest.required_level))
        .collect();
    quests.sort_by_key(|quest| quest.required_level);
    quests
}

pub fn completion_percentage(character: &Character, catalog: &QuestCatalog) -> f64 {
    if catalog.is_empty() {
        return 0.0;
    }
    100.0 * character.completed_quests.len() as f64 / catalog.len() as f64
}

/// Sum of rewards over completed quests still present in the catalog.
pub fn total_rewards_earned(character: &Character, catalog: &QuestCatalog) -> Reward {
    completed_quests(character, catalog)
        .into_iter()
        .fold(Reward::default(), |total, quest| Reward {
            xp: total.xp.saturating_add(quest.reward_xp),
            gold: total.gold.saturating_add(quest.reward_gold),
        })
}

/// Walks prerequisites back to a root quest. Returns ids oldest first, ending
/// with `quest_id`.
pub fn prerequisite_chain(quest_id: &str, catalog: &QuestCatalog) -> Result<Vec<String>, GameError> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = lookup(quest_id, catalog)?;

    loop {
        if !seen.insert(current.id.as_str()) {
            return Err(GameError::PrerequisiteCycle(current.id.clone()));
        }
        chain.push(current.id.clone());
        match &current.prerequisite {
            Some(prerequisite) => current = lookup(prerequisite, catalog)?,
            None => break,
        }
    }

    chain.reverse();
    Ok(chain)
}

/// Checks every prerequisite names a catalog quest and no chain loops.
pub fn validate_prerequisites(catalog: &QuestCatalog) -> Result<(), GameError> {
    for quest in catalog.values() {
        if let Some(prerequisite) = &quest.prerequisite {
            lookup(prerequisite, catalog)?;
        }
    }
    for quest_id in catalog.keys() {
        prerequisite_chain(quest_id, catalog)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::error::ErrorKind;

    fn quest(id: &str, level: u32, prerequisite: Option<&str>) -> QuestDefinition {
        QuestDefinition {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            reward_xp: 50,
            reward_gold: 20,
            required_level: level,
            prerequisite: prerequisite.map(str::to_string),
        }
    }

    fn catalog(quests: Vec<QuestDefinition>) -> QuestCatalog {
        quests.into_iter().map(|q| (q.id.clone(), q)).collect()
    }

    fn sample() -> QuestCatalog {
        catalog(vec![
            quest("first_steps", 1, None),
            quest("goblin_trouble", 1, Some("first_steps")),
            quest("the_lost_amulet", 3, Some("goblin_trouble")),
        ])
    }

    fn hero() -> Character {
        Character::new("Hero", CharacterClass::Warrior)
    }

    #[test]
    fn test_accept_then_complete_moves_once() {
        let quests = sample();
        let mut c = hero();

        accept(&mut c, "first_steps", &quests).unwrap();
        assert!(is_active(&c, "first_steps"));

        let reward = complete(&mut c, "first_steps", &quests).unwrap();
        assert_eq!(reward, Reward { xp: 50, gold: 20 });
        assert!(!is_active(&c, "first_steps"));
        assert_eq!(c.completed_quests, vec!["first_steps"]);
        assert_eq!(c.experience, 50);
        assert_eq!(c.gold, 120);

        let err = complete(&mut c, "first_steps", &quests).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(c.completed_quests.len(), 1);
    }

    #[test]
    fn test_accept_check_order() {
        let quests = sample();
        let mut c = hero();

        let err = accept(&mut c, "missing", &quests).unwrap_err();
        assert!(matches!(err, GameError::QuestNotFound(_)));

        let err = accept(&mut c, "goblin_trouble", &quests).unwrap_err();
        assert!(matches!(err, GameError::PrerequisiteNotMet { .. }));

        accept(&mut c, "first_steps", &quests).unwrap();
        let err = accept(&mut c, "first_steps", &quests).unwrap_err();
        assert!(matches!(err, GameError::QuestAlreadyActive(_)));
        assert_eq!(err.kind(), ErrorKind::AlreadyInState);

        complete(&mut c, "first_steps", &quests).unwrap();
        let err = accept(&mut c, "first_steps", &quests).unwrap_err();
        assert!(matches!(err, GameError::QuestAlreadyCompleted(_)));
    }

    #[test]
    fn test_prerequisite_checked_before_level() {
        let quests = sample();
        let c = hero();
        let err = check_accept(&c, "the_lost_amulet", &quests).unwrap_err();
        assert!(matches!(err, GameError::PrerequisiteNotMet { .. }));
    }

    #[test]
    fn test_level_gate() {
        let quests = catalog(vec![quest("hard", 3, None)]);
        let mut c = hero();

        let err = accept(&mut c, "hard", &quests).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequirementNotMet);
        assert!(c.active_quests.is_empty());

        c.level = 3;
        accept(&mut c, "hard", &quests).unwrap();
        assert!(is_active(&c, "hard"));
    }

    #[test]
    fn test_complete_while_dead_changes_nothing() {
        let quests = sample();
        let mut c = hero();
        accept(&mut c, "first_steps", &quests).unwrap();
        c.health = 0;
        let before = c.clone();

        let err = complete(&mut c, "first_steps", &quests).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(c, before);
    }

    #[test]
    fn test_abandon() {
        let quests = sample();
        let mut c = hero();
        accept(&mut c, "first_steps", &quests).unwrap();
        abandon(&mut c, "first_steps").unwrap();
        assert!(c.active_quests.is_empty());
        assert!(c.completed_quests.is_empty());
        assert!(abandon(&mut c, "first_steps").is_err());
    }

    #[test]
    fn test_available_quests_follow_progress() {
        let quests = sample();
        let mut c = hero();
        let ids: Vec<_> = available_quests(&c, &quests)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first_steps"]);

        c.completed_quests.push("first_steps".to_string());
        let ids: Vec<_> = available_quests(&c, &quests)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["goblin_trouble"]);
    }

    #[test]
    fn test_materialized_lists_skip_unknown_ids() {
        let quests = sample();
        let mut c = hero();
        c.completed_quests = vec!["first_steps".to_string(), "retired_quest".to_string()];
        assert_eq!(completed_quests(&c, &quests).len(), 1);
        assert_eq!(
            total_rewards_earned(&c, &quests),
            Reward { xp: 50, gold: 20 }
        );
        assert!(active_quests(&c, &quests).is_empty());
    }

    #[test]
    fn test_completion_percentage() {
        let quests = sample();
        let mut c = hero();
        assert_eq!(completion_percentage(&c, &QuestCatalog::new()), 0.0);
        assert_eq!(completion_percentage(&c, &quests), 0.0);
        c.completed_quests.push("first_steps".to_string());
        let pct = completion_percentage(&c, &quests);
        assert!((pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_quests_by_level() {
        let quests = sample();
        assert_eq!(quests_by_level(&quests, 1, 2).len(), 2);
        assert_eq!(quests_by_level(&quests, 3, 10).len(), 1);
        assert!(quests_by_level(&quests, 4, 10).is_empty());
    }

    #[test]
    fn test_prerequisite_chain_oldest_first() {
        let chain = prerequisite_chain("the_lost_amulet", &sample()).unwrap();
        assert_eq!(chain, vec!["first_steps", "goblin_trouble", "the_lost_amulet"]);
        assert_eq!(
            prerequisite_chain("first_steps", &sample()).unwrap(),
            vec!["first_steps"]
        );
    }

    #[test]
    fn test_dangling_prerequisite() {
        let quests = catalog(vec![quest("orphan", 1, Some("ghost"))]);
        let err = validate_prerequisites(&quests).unwrap_err();
        assert!(matches!(err, GameError::QuestNotFound(ref id) if id == "ghost"));
        assert!(prerequisite_chain("orphan", &quests).is_err());
    }

    #[test]
    fn test_prerequisite_cycle_detected() {
        let quests = catalog(vec![
            quest("a", 1, Some("b")),
            quest("b", 1, Some("c")),
            quest("c", 1, Some("a")),
        ]);
        let err = validate_prerequisites(&quests).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataCorrupt);
        assert!(matches!(
            prerequisite_chain("a", &quests),
            Err(GameError::PrerequisiteCycle(_))
        ));
        assert!(validate_prerequisites(&sample()).is_ok());
    }
}
