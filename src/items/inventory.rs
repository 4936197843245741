//! Inventory, equipment and shop transactions.
//!
//! Every operation validates before it mutates, so a failed call leaves the
//! character exactly as it was.

use crate::character::{Character, EquippedItem};
use crate::constants::MAX_INVENTORY_SIZE;
use crate::error::GameError;

use super::types::{EquipSlot, ItemDefinition, ItemType, Stat, StatEffect};

// ============================================================================
// Inventory Operations
// ============================================================================

pub fn add_item(character: &mut Character, item_id: &str) -> Result<(), GameError> {
    ensure_space(character)?;
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Removes the first occurrence of `item_id`.
pub fn remove_item(character: &mut Character, item_id: &str) -> Result<(), GameError> {
    let index = find_item(character, item_id)?;
    character.inventory.remove(index);
    Ok(())
}

pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|id| id == item_id)
}

pub fn count_item(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|id| *id == item_id).count()
}

pub fn space_remaining(character: &Character) -> usize {
    MAX_INVENTORY_SIZE.saturating_sub(character.inventory.len())
}

/// Empties the inventory and returns what was in it. Equipment is untouched.
pub fn clear_inventory(character: &mut Character) -> Vec<String> {
    std::mem::take(&mut character.inventory)
}

fn find_item(character: &Character, item_id: &str) -> Result<usize, GameError> {
    character
        .inventory
        .iter()
        .position(|id| id == item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))
}

fn ensure_space(character: &Character) -> Result<(), GameError> {
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull {
            capacity: MAX_INVENTORY_SIZE,
        });
    }
    Ok(())
}

// ============================================================================
// Stat Effects
// ============================================================================

/// Applies a stat change, keeping every stat inside its valid range.
/// Effects on stats the game does not know are ignored.
///
/// Returns the change that actually landed after clamping, which reverses
/// exactly.
pub fn apply_effect(character: &mut Character, effect: &StatEffect) -> StatEffect {
    let Some(stat) = effect.stat() else {
        return StatEffect::new(&effect.stat_name, 0);
    };
    let delta = effect.delta;
    let applied = match stat {
        Stat::Health => {
            let before = character.health;
            character.health = (character.health + delta).clamp(0, character.max_health);
            character.health - before
        }
        Stat::MaxHealth => {
            let before = character.max_health;
            character.max_health = (character.max_health + delta).max(1);
            character.health = character.health.min(character.max_health);
            character.max_health - before
        }
        Stat::Strength => {
            let before = character.strength;
            character.strength = (character.strength + delta).max(1);
            character.strength - before
        }
        Stat::Magic => {
            let before = character.magic;
            character.magic = (character.magic + delta).max(0);
            character.magic - before
        }
    };
    StatEffect::new(&effect.stat_name, applied)
}

/// Consumes one consumable, applying its effect.
pub fn use_item(
    character: &mut Character,
    item_id: &str,
    item: &ItemDefinition,
) -> Result<(), GameError> {
    let index = find_item(character, item_id)?;
    if item.item_type != ItemType::Consumable {
        return Err(GameError::InvalidItemType {
            item_id: item_id.to_string(),
            actual: item.item_type.name(),
            action: "used",
        });
    }

    apply_effect(character, &item.effect);
    character.inventory.remove(index);
    Ok(())
}

// ============================================================================
// Equipment
// ============================================================================

/// Equips a weapon or armor from the inventory into its slot.
///
/// Whatever occupied the slot has its bonus removed and goes back to the
/// inventory. Returns the id of the replaced item, if any.
pub fn equip(
    character: &mut Character,
    item_id: &str,
    item: &ItemDefinition,
) -> Result<Option<String>, GameError> {
    let index = find_item(character, item_id)?;
    let slot = item
        .item_type
        .slot()
        .ok_or_else(|| GameError::InvalidItemType {
            item_id: item_id.to_string(),
            actual: item.item_type.name(),
            action: "equipped",
        })?;
    if character.equipment.get(slot).is_some() {
        ensure_space(character)?;
    }

    character.inventory.remove(index);
    let replaced = character.equipment.take(slot).map(|old| {
        apply_effect(character, &old.effect.reversed());
        character.inventory.push(old.item_id.clone());
        old.item_id
    });

    let granted = apply_effect(character, &item.effect);
    character.equipment.set(
        slot,
        Some(EquippedItem {
            item_id: item_id.to_string(),
            effect: granted,
        }),
    );

    Ok(replaced)
}

/// Returns the item in `slot` to the inventory, removing its bonus.
/// `Ok(None)` means the slot was already empty.
pub fn unequip(character: &mut Character, slot: EquipSlot) -> Result<Option<String>, GameError> {
    if character.equipment.get(slot).is_none() {
        return Ok(None);
    }
    ensure_space(character)?;

    let Some(old) = character.equipment.take(slot) else {
        return Ok(None);
    };
    apply_effect(character, &old.effect.reversed());
    character.inventory.push(old.item_id.clone());
    Ok(Some(old.item_id))
}

// ============================================================================
// Shop
// ============================================================================

pub fn purchase(
    character: &mut Character,
    item_id: &str,
    item: &ItemDefinition,
) -> Result<(), GameError> {
    if character.gold < item.cost {
        return Err(GameError::InsufficientGold {
            needed: item.cost,
            available: character.gold,
        });
    }
    ensure_space(character)?;

    character.gold -= item.cost;
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Sells one copy for half its cost (rounded down). Returns the price paid.
pub fn sell(
    character: &mut Character,
    item_id: &str,
    item: &ItemDefinition,
) -> Result<u32, GameError> {
    let index = find_item(character, item_id)?;
    let price = item.sell_price();

    character.inventory.remove(index);
    character.gold = character.gold.saturating_add(price);
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::error::ErrorKind;

    fn item(id: &str, item_type: ItemType, effect: &str, cost: u32) -> ItemDefinition {
        ItemDefinition {
            id: id.to_string(),
            name: id.to_string(),
            item_type,
            effect: effect.parse().unwrap(),
            cost,
            description: String::new(),
        }
    }

    fn hero() -> Character {
        Character::new("Hero", CharacterClass::Warrior)
    }

    fn fill_inventory(character: &mut Character) {
        while space_remaining(character) > 0 {
            add_item(character, "pebble").unwrap();
        }
    }

    #[test]
    fn test_add_item_respects_capacity() {
        let mut c = hero();
        fill_inventory(&mut c);
        assert_eq!(c.inventory.len(), MAX_INVENTORY_SIZE);

        let err = add_item(&mut c, "potion").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(c.inventory.len(), MAX_INVENTORY_SIZE);
    }

    #[test]
    fn test_remove_item_first_occurrence() {
        let mut c = hero();
        add_item(&mut c, "potion").unwrap();
        add_item(&mut c, "sword").unwrap();
        add_item(&mut c, "potion").unwrap();

        remove_item(&mut c, "potion").unwrap();
        assert_eq!(c.inventory, vec!["sword", "potion"]);
        assert_eq!(count_item(&c, "potion"), 1);

        let err = remove_item(&mut c, "shield").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_clear_inventory_returns_items() {
        let mut c = hero();
        add_item(&mut c, "potion").unwrap();
        add_item(&mut c, "sword").unwrap();
        let removed = clear_inventory(&mut c);
        assert_eq!(removed.len(), 2);
        assert!(c.inventory.is_empty());
        assert!(!has_item(&c, "potion"));
        assert_eq!(space_remaining(&c), MAX_INVENTORY_SIZE);
    }

    #[test]
    fn test_use_consumable_heals_and_clamps() {
        let mut c = hero();
        let potion = item("health_potion", ItemType::Consumable, "health:20", 25);
        c.health = 110;
        add_item(&mut c, "health_potion").unwrap();

        use_item(&mut c, "health_potion", &potion).unwrap();
        assert_eq!(c.health, 120);
        assert!(!has_item(&c, "health_potion"));
    }

    #[test]
    fn test_use_non_consumable_fails() {
        let mut c = hero();
        let sword = item("iron_sword", ItemType::Weapon, "strength:5", 50);
        add_item(&mut c, "iron_sword").unwrap();

        let err = use_item(&mut c, "iron_sword", &sword).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert!(has_item(&c, "iron_sword"));
        assert_eq!(c.strength, 15);
    }

    #[test]
    fn test_unknown_stat_effect_is_ignored() {
        let mut c = hero();
        let charm = item("charm", ItemType::Consumable, "luck:5", 5);
        let before = c.clone();
        add_item(&mut c, "charm").unwrap();
        use_item(&mut c, "charm", &charm).unwrap();
        assert_eq!(c, before);
    }

    #[test]
    fn test_equip_unequip_round_trip() {
        let mut c = hero();
        let sword = item("iron_sword", ItemType::Weapon, "strength:5", 50);
        add_item(&mut c, "iron_sword").unwrap();
        let before = c.clone();

        assert_eq!(equip(&mut c, "iron_sword", &sword).unwrap(), None);
        assert_eq!(c.strength, 20);
        assert!(c.inventory.is_empty());
        assert_eq!(
            c.equipment.get(EquipSlot::Weapon).map(|e| e.item_id.as_str()),
            Some("iron_sword")
        );

        assert_eq!(
            unequip(&mut c, EquipSlot::Weapon).unwrap().as_deref(),
            Some("iron_sword")
        );
        assert_eq!(c, before);
    }

    #[test]
    fn test_equip_replaces_and_returns_old_item() {
        let mut c = hero();
        let iron = item("iron_sword", ItemType::Weapon, "strength:5", 50);
        let steel = item("steel_sword", ItemType::Weapon, "strength:10", 120);
        add_item(&mut c, "iron_sword").unwrap();
        add_item(&mut c, "steel_sword").unwrap();

        equip(&mut c, "iron_sword", &iron).unwrap();
        let replaced = equip(&mut c, "steel_sword", &steel).unwrap();
        assert_eq!(replaced.as_deref(), Some("iron_sword"));
        assert_eq!(c.strength, 25);
        assert_eq!(c.inventory, vec!["iron_sword"]);
    }

    #[test]
    fn test_equip_full_inventory_with_occupied_slot_changes_nothing() {
        let mut c = hero();
        let iron = item("iron_sword", ItemType::Weapon, "strength:5", 50);
        let steel = item("steel_sword", ItemType::Weapon, "strength:10", 120);
        add_item(&mut c, "iron_sword").unwrap();
        equip(&mut c, "iron_sword", &iron).unwrap();
        add_item(&mut c, "steel_sword").unwrap();
        fill_inventory(&mut c);
        let before = c.clone();

        let err = equip(&mut c, "steel_sword", &steel).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(c, before);
    }

    #[test]
    fn test_equip_consumable_fails() {
        let mut c = hero();
        let potion = item("health_potion", ItemType::Consumable, "health:20", 25);
        add_item(&mut c, "health_potion").unwrap();
        let err = equip(&mut c, "health_potion", &potion).unwrap_err();
        assert!(matches!(err, GameError::InvalidItemType { .. }));
    }

    #[test]
    fn test_armor_max_health_bonus_and_removal() {
        let mut c = hero();
        let armor = item("leather_armor", ItemType::Armor, "max_health:10", 40);
        add_item(&mut c, "leather_armor").unwrap();

        equip(&mut c, "leather_armor", &armor).unwrap();
        assert_eq!(c.max_health, 130);
        assert_eq!(c.health, 120);

        c.health = 130;
        unequip(&mut c, EquipSlot::Armor).unwrap();
        assert_eq!(c.max_health, 120);
        assert_eq!(c.health, 120);
    }

    #[test]
    fn test_cursed_gear_round_trips_when_clamped() {
        let mut mage = Character::new("Ember", CharacterClass::Mage);
        let blade = item("cursed_blade", ItemType::Weapon, "strength:-10", 5);
        let shroud = item("cursed_shroud", ItemType::Armor, "max_health:-200", 5);
        add_item(&mut mage, "cursed_blade").unwrap();
        add_item(&mut mage, "cursed_shroud").unwrap();
        let (strength, max_health) = (mage.strength, mage.max_health);

        equip(&mut mage, "cursed_blade", &blade).unwrap();
        assert_eq!(mage.strength, 1);
        assert_eq!(
            mage.equipment.get(EquipSlot::Weapon).map(|e| e.effect.delta),
            Some(1 - strength)
        );
        equip(&mut mage, "cursed_shroud", &shroud).unwrap();
        assert_eq!(mage.max_health, 1);
        assert_eq!(mage.health, 1);

        unequip(&mut mage, EquipSlot::Weapon).unwrap();
        unequip(&mut mage, EquipSlot::Armor).unwrap();
        assert_eq!(mage.strength, strength);
        assert_eq!(mage.max_health, max_health);
        mage.check_invariants().unwrap();
    }

    #[test]
    fn test_magic_penalty_round_trips_when_clamped() {
        let mut c = hero();
        let staff = item("hollow_staff", ItemType::Weapon, "magic:-50", 5);
        add_item(&mut c, "hollow_staff").unwrap();

        equip(&mut c, "hollow_staff", &staff).unwrap();
        assert_eq!(c.magic, 0);
        unequip(&mut c, EquipSlot::Weapon).unwrap();
        assert_eq!(c.magic, 5);
    }

    #[test]
    fn test_unequip_empty_slot_is_nothing_equipped() {
        let mut c = hero();
        assert_eq!(unequip(&mut c, EquipSlot::Armor).unwrap(), None);
    }

    #[test]
    fn test_unequip_with_full_inventory_keeps_slot() {
        let mut c = hero();
        let sword = item("iron_sword", ItemType::Weapon, "strength:5", 50);
        add_item(&mut c, "iron_sword").unwrap();
        equip(&mut c, "iron_sword", &sword).unwrap();
        fill_inventory(&mut c);

        let err = unequip(&mut c, EquipSlot::Weapon).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert!(c.equipment.get(EquipSlot::Weapon).is_some());
        assert_eq!(c.strength, 20);
    }

    #[test]
    fn test_purchase_and_sell() {
        let mut c = hero();
        let potion = item("health_potion", ItemType::Consumable, "health:20", 25);

        purchase(&mut c, "health_potion", &potion).unwrap();
        assert_eq!(c.gold, 75);
        assert!(has_item(&c, "health_potion"));

        let price = sell(&mut c, "health_potion", &potion).unwrap();
        assert_eq!(price, 12);
        assert_eq!(c.gold, 87);
        assert!(c.inventory.is_empty());
    }

    #[test]
    fn test_purchase_without_gold_changes_nothing() {
        let mut c = hero();
        let staff = item("magic_staff", ItemType::Weapon, "magic:8", 150);
        let before = c.clone();

        let err = purchase(&mut c, "magic_staff", &staff).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceInsufficient);
        assert_eq!(c, before);
    }

    #[test]
    fn test_purchase_full_inventory_keeps_gold() {
        let mut c = hero();
        let potion = item("health_potion", ItemType::Consumable, "health:20", 25);
        fill_inventory(&mut c);

        let err = purchase(&mut c, "health_potion", &potion).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(c.gold, 100);
    }

    #[test]
    fn test_sell_missing_item() {
        let mut c = hero();
        let potion = item("health_potion", ItemType::Consumable, "health:20", 25);
        let err = sell(&mut c, "health_potion", &potion).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(c.gold, 100);
    }
}
