//! Item definitions.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// One-shot restore or temporary stat item.
    Consumable,
    /// One-shot combat buff item.
    Booster,
    /// Resale stock; no use effect.
    TradeGood,
    /// Unique progression token; no use effect, gates unlocks.
    KeyItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

/// What using an item does. Closed enum so every consumer dispatch is
/// compiler-checked when a new effect lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemEffect {
    RestoreEndurance(u32),
    RestoreStress(u32),
    RestoreAll,
    BoostMaxEndurance { value: u32, turns: u32 },
    SkillPowerBoost { value: f64, turns: u32 },
    SuccessChanceBoost { value: f64, turns: u32 },
    CooldownReduction { value: f64, turns: u32 },
}

/// Static definition of one item.
#[derive(Debug, Clone)]
pub struct ItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ItemKind,
    pub effect: Option<ItemEffect>,
    pub price: u64,
    pub rarity: Rarity,
    pub max_stack: u32,
}

/// Returns all items in the catalog.
pub fn get_all_items() -> Vec<ItemDef> {
    vec![
        // Consumables
        ItemDef {
            id: "energy_drink",
            name: "Energy Drink",
            description: "Restores 30 endurance",
            kind: ItemKind::Consumable,
            effect: Some(ItemEffect::RestoreEndurance(30)),
            price: 50,
            rarity: Rarity::Common,
            max_stack: 10,
        },
        ItemDef {
            id: "stress_pills",
            name: "Calming Pills",
            description: "Restores 25 stress resistance",
            kind: ItemKind::Consumable,
            effect: Some(ItemEffect::RestoreStress(25)),
            price: 60,
            rarity: Rarity::Common,
            max_stack: 10,
        },
        ItemDef {
            id: "full_restore",
            name: "Full Recovery Kit",
            description: "Fully restores endurance and stress resistance",
            kind: ItemKind::Consumable,
            effect: Some(ItemEffect::RestoreAll),
            price: 150,
            rarity: Rarity::Rare,
            max_stack: 5,
        },
        ItemDef {
            id: "endurance_booster",
            name: "Endurance Booster",
            description: "+20 max endurance for 5 turns",
            kind: ItemKind::Consumable,
            effect: Some(ItemEffect::BoostMaxEndurance {
                value: 20,
                turns: 5,
            }),
            price: 120,
            rarity: Rarity::Uncommon,
            max_stack: 5,
        },
        // Boosters
        ItemDef {
            id: "persuasion_booster",
            name: "Persuasion Amplifier",
            description: "+15% skill power for 3 turns",
            kind: ItemKind::Booster,
            effect: Some(ItemEffect::SkillPowerBoost {
                value: 0.15,
                turns: 3,
            }),
            price: 80,
            rarity: Rarity::Uncommon,
            max_stack: 8,
        },
        ItemDef {
            id: "success_booster",
            name: "Lucky Charm",
            description: "+20% success chance for 2 turns",
            kind: ItemKind::Booster,
            effect: Some(ItemEffect::SuccessChanceBoost {
                value: 0.20,
                turns: 2,
            }),
            price: 100,
            rarity: Rarity::Uncommon,
            max_stack: 8,
        },
        ItemDef {
            id: "cooldown_reducer",
            name: "Quick Patter",
            description: "-50% skill cooldowns for 4 turns",
            kind: ItemKind::Booster,
            effect: Some(ItemEffect::CooldownReduction {
                value: 0.5,
                turns: 4,
            }),
            price: 120,
            rarity: Rarity::Rare,
            max_stack: 5,
        },
        // Trade goods
        ItemDef {
            id: "herbs",
            name: "Healing Herbs",
            description: "Sought-after resale stock",
            kind: ItemKind::TradeGood,
            effect: None,
            price: 25,
            rarity: Rarity::Common,
            max_stack: 20,
        },
        ItemDef {
            id: "rope",
            name: "Sturdy Rope",
            description: "Always in household demand",
            kind: ItemKind::TradeGood,
            effect: None,
            price: 40,
            rarity: Rarity::Common,
            max_stack: 15,
        },
        ItemDef {
            id: "water",
            name: "Spring Water",
            description: "Never goes out of fashion",
            kind: ItemKind::TradeGood,
            effect: None,
            price: 15,
            rarity: Rarity::Common,
            max_stack: 25,
        },
        ItemDef {
            id: "paper",
            name: "Fine Paper",
            description: "Essential for paperwork",
            kind: ItemKind::TradeGood,
            effect: None,
            price: 30,
            rarity: Rarity::Common,
            max_stack: 20,
        },
        ItemDef {
            id: "rare_herbs",
            name: "Rare Herbs",
            description: "A very valuable lot",
            kind: ItemKind::TradeGood,
            effect: None,
            price: 80,
            rarity: Rarity::Rare,
            max_stack: 10,
        },
        // Key items
        ItemDef {
            id: "business_license",
            name: "Trading License",
            description: "Opens the door to premium venues",
            kind: ItemKind::KeyItem,
            effect: None,
            price: 0,
            rarity: Rarity::Epic,
            max_stack: 1,
        },
        ItemDef {
            id: "vip_card",
            name: "VIP Card",
            description: "Grants access to exclusive stock",
            kind: ItemKind::KeyItem,
            effect: None,
            price: 0,
            rarity: Rarity::Epic,
            max_stack: 1,
        },
    ]
}

/// Looks up an item by id.
pub fn get_item(id: &str) -> Option<ItemDef> {
    get_all_items().into_iter().find(|i| i.id == id)
}
