//! Victory reward resolution: payout, drop rolls and experience.

#![allow(dead_code)]

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::{
    REWARD_MONEY_VARIANCE_MAX, REWARD_MONEY_VARIANCE_MIN, REWARD_XP_RESOLVE_DIVISOR,
};
use crate::opponents::DropKind;

use super::types::Opponent;

/// The spoils of one won negotiation. Immutable once resolved; applying it
/// to the character, wallet and inventory is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBundle {
    pub money: u64,
    /// One entry per landed item drop, in drop-table order. Repeated drops
    /// of the same id are deliberately not merged here.
    pub items: Vec<String>,
    pub experience: u64,
}

/// Rolls the full reward bundle for a beaten customer.
///
/// The base payout varies ±30% around the customer's money. Every drop
/// table entry is rolled independently in declaration order: currency
/// entries add a whole amount in `[min, max]`, item entries contribute
/// exactly one unit. Experience scales with the customer's toughness,
/// not with how the fight went.
pub fn resolve_victory_rewards(opponent: &Opponent, rng: &mut impl Rng) -> RewardBundle {
    let variance = rng.gen_range(REWARD_MONEY_VARIANCE_MIN..REWARD_MONEY_VARIANCE_MAX);
    let mut money = (opponent.money as f64 * variance).floor() as u64;
    let mut items = Vec::new();

    for entry in &opponent.drops {
        let roll = rng.gen_range(0.0..100.0);
        if roll <= entry.chance {
            match &entry.kind {
                DropKind::Currency { min, max } => {
                    money += rng.gen_range(*min..=*max);
                }
                DropKind::Item { item_id } => {
                    items.push(item_id.clone());
                }
            }
        }
    }

    let experience = (opponent.max_health / REWARD_XP_RESOLVE_DIVISOR).max(0) as u64;

    RewardBundle {
        money,
        items,
        experience,
    }
}
