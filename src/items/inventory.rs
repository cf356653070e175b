//! Inventory storage and item-use effect application.

#![allow(dead_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::data::{get_item, ItemEffect};
use crate::character::{Character, StatChange};
use crate::combat::{BuffKind, CombatResolver};
use crate::core::constants::INVENTORY_MAX_SLOTS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The catalog does not know this id; a content or caller bug.
    UnknownItem(String),
    InventoryFull,
    StackLimit(String),
    NotOwned(String),
    /// Trade goods and key items have no use effect.
    NotUsable(String),
}

/// What using an item actually did, for the caller to render.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUseOutcome {
    EnduranceRestored(StatChange),
    StressRestored(StatChange),
    FullyRestored,
    BuffApplied { kind: BuffKind, turns: u32 },
}

/// Slot-limited, stack-limited item storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: HashMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.quantity(item_id) > 0
    }

    pub fn slots_used(&self) -> usize {
        self.items.len()
    }

    /// Iterates over held (item id, quantity) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    /// Adds items, respecting the slot cap and the item's stack limit.
    pub fn add_item(&mut self, item_id: &str, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Ok(());
        }
        let def = get_item(item_id).ok_or_else(|| InventoryError::UnknownItem(item_id.into()))?;

        let current = self.quantity(item_id);
        if current == 0 && self.items.len() >= INVENTORY_MAX_SLOTS {
            return Err(InventoryError::InventoryFull);
        }
        if current + quantity > def.max_stack {
            return Err(InventoryError::StackLimit(item_id.into()));
        }

        *self.items.entry(item_id.to_string()).or_insert(0) += quantity;
        Ok(())
    }

    /// Removes items; the slot disappears when the stack empties.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> Result<(), InventoryError> {
        let current = self.quantity(item_id);
        if current < quantity {
            return Err(InventoryError::NotOwned(item_id.into()));
        }
        if current == quantity {
            self.items.remove(item_id);
        } else if let Some(count) = self.items.get_mut(item_id) {
            *count -= quantity;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Consumes one unit of an item and applies its effect.
///
/// Restores go straight to the character (respecting any max-endurance
/// buff headroom); booster effects become timed buffs on the resolver.
pub fn use_item(
    inventory: &mut Inventory,
    item_id: &str,
    character: &mut Character,
    resolver: &mut CombatResolver,
) -> Result<ItemUseOutcome, InventoryError> {
    let def = get_item(item_id).ok_or_else(|| InventoryError::UnknownItem(item_id.into()))?;
    if !inventory.has_item(item_id) {
        return Err(InventoryError::NotOwned(item_id.into()));
    }
    let Some(effect) = def.effect else {
        return Err(InventoryError::NotUsable(item_id.into()));
    };

    inventory.remove_item(item_id, 1)?;

    let outcome = match effect {
        ItemEffect::RestoreEndurance(amount) => {
            let headroom = resolver.buffs().max_endurance_bonus();
            let change = character.change_endurance_with_bonus_max(amount as i64, headroom);
            ItemUseOutcome::EnduranceRestored(change)
        }
        ItemEffect::RestoreStress(amount) => {
            let change = character.change_stress_resistance(amount as i64);
            ItemUseOutcome::StressRestored(change)
        }
        ItemEffect::RestoreAll => {
            character.restore_stats();
            ItemUseOutcome::FullyRestored
        }
        ItemEffect::BoostMaxEndurance { value, turns } => {
            resolver.add_buff(BuffKind::MaxEnduranceBoost, value as f64, turns);
            ItemUseOutcome::BuffApplied {
                kind: BuffKind::MaxEnduranceBoost,
                turns,
            }
        }
        ItemEffect::SkillPowerBoost { value, turns } => {
            resolver.add_buff(BuffKind::SkillPowerBoost, value, turns);
            ItemUseOutcome::BuffApplied {
                kind: BuffKind::SkillPowerBoost,
                turns,
            }
        }
        ItemEffect::SuccessChanceBoost { value, turns } => {
            resolver.add_buff(BuffKind::SuccessChanceBoost, value, turns);
            ItemUseOutcome::BuffApplied {
                kind: BuffKind::SuccessChanceBoost,
                turns,
            }
        }
        ItemEffect::CooldownReduction { value, turns } => {
            resolver.add_buff(BuffKind::CooldownReduction, value, turns);
            ItemUseOutcome::BuffApplied {
                kind: BuffKind::CooldownReduction,
                turns,
            }
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query() {
        let mut inventory = Inventory::new();
        inventory.add_item("herbs", 3).unwrap();
        assert_eq!(inventory.quantity("herbs"), 3);
        assert!(inventory.has_item("herbs"));
        assert_eq!(inventory.slots_used(), 1);
    }

    #[test]
    fn test_add_unknown_item_rejected() {
        let mut inventory = Inventory::new();
        assert_eq!(
            inventory.add_item("unobtainium", 1),
            Err(InventoryError::UnknownItem("unobtainium".into()))
        );
    }

    #[test]
    fn test_stack_limit_enforced() {
        let mut inventory = Inventory::new();
        inventory.add_item("full_restore", 5).unwrap();
        assert_eq!(
            inventory.add_item("full_restore", 1),
            Err(InventoryError::StackLimit("full_restore".into()))
        );
        assert_eq!(inventory.quantity("full_restore"), 5);
    }

    #[test]
    fn test_key_items_unique() {
        let mut inventory = Inventory::new();
        inventory.add_item("vip_card", 1).unwrap();
        assert_eq!(
            inventory.add_item("vip_card", 1),
            Err(InventoryError::StackLimit("vip_card".into()))
        );
    }

    #[test]
    fn test_remove_clears_empty_slot() {
        let mut inventory = Inventory::new();
        inventory.add_item("rope", 2).unwrap();
        inventory.remove_item("rope", 2).unwrap();
        assert_eq!(inventory.slots_used(), 0);
        assert_eq!(
            inventory.remove_item("rope", 1),
            Err(InventoryError::NotOwned("rope".into()))
        );
    }

    #[test]
    fn test_use_restore_endurance() {
        let mut inventory = Inventory::new();
        let mut character = Character::new();
        let mut resolver = CombatResolver::new();
        character.endurance = 50;
        inventory.add_item("energy_drink", 1).unwrap();

        let outcome = use_item(&mut inventory, "energy_drink", &mut character, &mut resolver)
            .unwrap();
        match outcome {
            ItemUseOutcome::EnduranceRestored(change) => {
                assert_eq!(change.old_value, 50);
                assert_eq!(change.new_value, 80);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!inventory.has_item("energy_drink"));
    }

    #[test]
    fn test_use_restore_clamped_at_max() {
        let mut inventory = Inventory::new();
        let mut character = Character::new();
        let mut resolver = CombatResolver::new();
        character.endurance = 90;
        inventory.add_item("energy_drink", 1).unwrap();

        let outcome = use_item(&mut inventory, "energy_drink", &mut character, &mut resolver)
            .unwrap();
        assert_eq!(
            outcome,
            ItemUseOutcome::EnduranceRestored(StatChange {
                old_value: 90,
                new_value: 100,
                change: 30,
                is_zero: false,
            })
        );
    }

    #[test]
    fn test_endurance_buff_raises_restore_ceiling() {
        let mut inventory = Inventory::new();
        let mut character = Character::new();
        let mut resolver = CombatResolver::new();
        character.endurance = 95;
        inventory.add_item("endurance_booster", 1).unwrap();
        inventory.add_item("energy_drink", 1).unwrap();

        use_item(&mut inventory, "endurance_booster", &mut character, &mut resolver).unwrap();
        let outcome = use_item(&mut inventory, "energy_drink", &mut character, &mut resolver)
            .unwrap();
        match outcome {
            ItemUseOutcome::EnduranceRestored(change) => assert_eq!(change.new_value, 120),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_use_booster_applies_buff() {
        let mut inventory = Inventory::new();
        let mut character = Character::new();
        let mut resolver = CombatResolver::new();
        inventory.add_item("success_booster", 1).unwrap();

        let outcome = use_item(&mut inventory, "success_booster", &mut character, &mut resolver)
            .unwrap();
        assert_eq!(
            outcome,
            ItemUseOutcome::BuffApplied {
                kind: BuffKind::SuccessChanceBoost,
                turns: 2,
            }
        );
        assert!((resolver.buffs().success_chance_bonus() - 0.20).abs() < 1e-9);
    }

    #[test]
    fn test_use_full_restore() {
        let mut inventory = Inventory::new();
        let mut character = Character::new();
        let mut resolver = CombatResolver::new();
        character.endurance = 1;
        character.stress_resistance = 1;
        inventory.add_item("full_restore", 1).unwrap();

        let outcome =
            use_item(&mut inventory, "full_restore", &mut character, &mut resolver).unwrap();
        assert_eq!(outcome, ItemUseOutcome::FullyRestored);
        assert_eq!(character.endurance, character.max_endurance);
        assert_eq!(character.stress_resistance, character.max_stress_resistance);
    }

    #[test]
    fn test_use_trade_good_rejected() {
        let mut inventory = Inventory::new();
        let mut character = Character::new();
        let mut resolver = CombatResolver::new();
        inventory.add_item("herbs", 1).unwrap();

        assert_eq!(
            use_item(&mut inventory, "herbs", &mut character, &mut resolver),
            Err(InventoryError::NotUsable("herbs".into()))
        );
        // Rejected use consumes nothing.
        assert!(inventory.has_item("herbs"));
    }

    #[test]
    fn test_use_unowned_item_rejected() {
        let mut inventory = Inventory::new();
        let mut character = Character::new();
        let mut resolver = CombatResolver::new();
        assert_eq!(
            use_item(&mut inventory, "energy_drink", &mut character, &mut resolver),
            Err(InventoryError::NotOwned("energy_drink".into()))
        );
    }
}
