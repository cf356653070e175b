//! Customer template definitions.
//!
//! A template is immutable catalog data; every combat instantiates its own
//! working copy (see `combat::types::Opponent::from_template`). Dialogue,
//! portraits and backgrounds stay with the front-end content tables.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// What a drop-table entry yields when it lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropKind {
    /// A random whole amount of money in `[min, max]`.
    Currency { min: u64, max: u64 },
    /// Exactly one unit of the named item.
    Item { item_id: String },
}

/// One independently rolled entry of a customer's drop table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub kind: DropKind,
    /// Success chance in percent, 0-100.
    pub chance: f64,
}

impl DropEntry {
    pub fn currency(min: u64, max: u64, chance: f64) -> Self {
        Self {
            kind: DropKind::Currency { min, max },
            chance,
        }
    }

    pub fn item(item_id: &str, chance: f64) -> Self {
        Self {
            kind: DropKind::Item {
                item_id: item_id.to_string(),
            },
            chance,
        }
    }
}

/// Customer personality archetype. Flavor today; matchup bonuses later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerArchetype {
    BusinessWoman,
    BusinessMan,
    Student,
    Technician,
    Chef,
    Investor,
    ArtCritic,
    Tycoon,
}

/// How tough a customer is; scales spawn rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
    Boss,
}

impl Difficulty {
    /// Spawn weight factor: harder customers show up less often.
    pub fn spawn_factor(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 0.8,
            Difficulty::Hard => 0.6,
            Difficulty::Expert => 0.4,
            Difficulty::Boss => 0.1,
        }
    }
}

/// Which customer pool a template belongs to; locations pick pools by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerClass {
    Basic,
    Intermediate,
    Advanced,
    Boss,
}

/// Immutable catalog entry for one customer.
#[derive(Debug, Clone)]
pub struct OpponentTemplate {
    pub id: u32,
    pub name: &'static str,
    pub archetype: CustomerArchetype,
    pub class: CustomerClass,
    pub difficulty: Difficulty,
    pub level: u32,
    /// The customer's resolve; persuasion "damage" wears it down, and a
    /// fully recovered resolve means they walk away with the upper hand.
    pub max_health: i64,
    pub money: u64,
    pub drops: Vec<DropEntry>,
}

/// Returns all customer templates.
pub fn get_all_opponents() -> Vec<OpponentTemplate> {
    vec![
        OpponentTemplate {
            id: 1,
            name: "Katherine Marlowe",
            archetype: CustomerArchetype::BusinessWoman,
            class: CustomerClass::Basic,
            difficulty: Difficulty::Easy,
            level: 1,
            max_health: 100,
            money: 150,
            drops: vec![
                DropEntry::currency(25, 37, 100.0),
                DropEntry::item("herbs", 10.0),
                DropEntry::item("rope", 15.0),
            ],
        },
        OpponentTemplate {
            id: 2,
            name: "Alexander Sargent",
            archetype: CustomerArchetype::BusinessMan,
            class: CustomerClass::Basic,
            difficulty: Difficulty::Easy,
            level: 2,
            max_health: 120,
            money: 200,
            drops: vec![
                DropEntry::currency(30, 50, 100.0),
                DropEntry::item("water", 20.0),
                DropEntry::item("paper", 15.0),
            ],
        },
        OpponentTemplate {
            id: 3,
            name: "Irene Pruitt",
            archetype: CustomerArchetype::Student,
            class: CustomerClass::Basic,
            difficulty: Difficulty::Easy,
            level: 1,
            max_health: 90,
            money: 100,
            drops: vec![
                DropEntry::currency(20, 35, 100.0),
                DropEntry::item("herbs", 15.0),
                DropEntry::item("energy_drink", 5.0),
            ],
        },
        OpponentTemplate {
            id: 4,
            name: "Derek Walsh",
            archetype: CustomerArchetype::Technician,
            class: CustomerClass::Intermediate,
            difficulty: Difficulty::Medium,
            level: 12,
            max_health: 180,
            money: 300,
            drops: vec![
                DropEntry::currency(45, 70, 100.0),
                DropEntry::item("rope", 25.0),
                DropEntry::item("persuasion_booster", 10.0),
            ],
        },
        OpponentTemplate {
            id: 5,
            name: "Olivia Sandoval",
            archetype: CustomerArchetype::Chef,
            class: CustomerClass::Intermediate,
            difficulty: Difficulty::Medium,
            level: 15,
            max_health: 160,
            money: 350,
            drops: vec![
                DropEntry::currency(50, 80, 100.0),
                DropEntry::item("rare_herbs", 15.0),
                DropEntry::item("stress_pills", 20.0),
            ],
        },
        OpponentTemplate {
            id: 6,
            name: "Victor Orwell",
            archetype: CustomerArchetype::Investor,
            class: CustomerClass::Advanced,
            difficulty: Difficulty::Hard,
            level: 25,
            max_health: 250,
            money: 600,
            drops: vec![
                DropEntry::currency(80, 120, 100.0),
                DropEntry::item("vip_card", 5.0),
                DropEntry::item("full_restore", 15.0),
                DropEntry::item("cooldown_reducer", 10.0),
            ],
        },
        OpponentTemplate {
            id: 7,
            name: "Miriam Zhukov",
            archetype: CustomerArchetype::ArtCritic,
            class: CustomerClass::Advanced,
            difficulty: Difficulty::Expert,
            level: 30,
            max_health: 300,
            money: 800,
            drops: vec![
                DropEntry::currency(100, 150, 100.0),
                DropEntry::item("business_license", 3.0),
                DropEntry::item("success_booster", 20.0),
                DropEntry::item("rare_herbs", 25.0),
            ],
        },
        OpponentTemplate {
            id: 8,
            name: "Arthur Novak",
            archetype: CustomerArchetype::Tycoon,
            class: CustomerClass::Boss,
            difficulty: Difficulty::Boss,
            level: 50,
            max_health: 500,
            money: 2000,
            drops: vec![
                DropEntry::currency(300, 500, 100.0),
                DropEntry::item("business_license", 50.0),
                DropEntry::item("vip_card", 50.0),
                DropEntry::item("full_restore", 30.0),
                DropEntry::item("cooldown_reducer", 25.0),
            ],
        },
    ]
}

/// Looks up a customer template by id.
pub fn get_opponent(id: u32) -> Option<OpponentTemplate> {
    get_all_opponents().into_iter().find(|o| o.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_ids_unique() {
        let opponents = get_all_opponents();
        for opponent in &opponents {
            let count = opponents.iter().filter(|o| o.id == opponent.id).count();
            assert_eq!(count, 1, "duplicate opponent id {}", opponent.id);
        }
    }

    #[test]
    fn test_get_opponent_unknown() {
        assert!(get_opponent(0).is_none());
        assert!(get_opponent(999).is_none());
    }

    #[test]
    fn test_every_template_has_guaranteed_currency_drop() {
        for opponent in get_all_opponents() {
            let has_guaranteed_money = opponent.drops.iter().any(|d| {
                matches!(d.kind, DropKind::Currency { .. }) && d.chance >= 100.0
            });
            assert!(has_guaranteed_money, "{} pays nothing", opponent.name);
        }
    }

    #[test]
    fn test_currency_ranges_ordered() {
        for opponent in get_all_opponents() {
            for drop in &opponent.drops {
                if let DropKind::Currency { min, max } = drop.kind {
                    assert!(min <= max, "{} has inverted range", opponent.name);
                }
            }
        }
    }

    #[test]
    fn test_drop_item_ids_exist_in_catalog() {
        for opponent in get_all_opponents() {
            for drop in &opponent.drops {
                if let DropKind::Item { item_id } = &drop.kind {
                    assert!(
                        crate::items::get_item(item_id).is_some(),
                        "{} drops unknown item {}",
                        opponent.name,
                        item_id
                    );
                }
            }
        }
    }

    #[test]
    fn test_difficulty_spawn_factors_decrease() {
        assert!(Difficulty::Easy.spawn_factor() > Difficulty::Medium.spawn_factor());
        assert!(Difficulty::Medium.spawn_factor() > Difficulty::Hard.spawn_factor());
        assert!(Difficulty::Hard.spawn_factor() > Difficulty::Expert.spawn_factor());
        assert!(Difficulty::Expert.spawn_factor() > Difficulty::Boss.spawn_factor());
    }
}
