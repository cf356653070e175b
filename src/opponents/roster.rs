//! Weighted customer selection and encounter history.

#![allow(dead_code)]

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::data::{get_all_opponents, CustomerClass, OpponentTemplate};
use crate::core::constants::{
    SPAWN_BASE_WEIGHT, SPAWN_ENCOUNTER_DAMPING, SPAWN_LEVEL_DIFF_PENALTY, SPAWN_LEVEL_RANGE,
};
use crate::locations::LocationTier;

/// How often each customer has been haggled with. Repeat encounters lower
/// a customer's spawn weight so the pool feels varied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterHistory {
    counts: HashMap<u32, u32>,
}

impl EncounterHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, opponent_id: u32) {
        *self.counts.entry(opponent_id).or_insert(0) += 1;
    }

    pub fn count(&self, opponent_id: u32) -> u32 {
        self.counts.get(&opponent_id).copied().unwrap_or(0)
    }

    pub fn total_encounters(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn unique_customers(&self) -> usize {
        self.counts.len()
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }
}

/// Customer pool for a location tier. Adjacent tiers overlap so moving up
/// never makes familiar faces vanish all at once.
pub fn candidates_for_tier(tier: LocationTier) -> Vec<OpponentTemplate> {
    let classes: &[CustomerClass] = match tier {
        LocationTier::Basic => &[CustomerClass::Basic],
        LocationTier::Intermediate => &[CustomerClass::Basic, CustomerClass::Intermediate],
        LocationTier::Advanced => &[CustomerClass::Intermediate, CustomerClass::Advanced],
        LocationTier::Premium => &[CustomerClass::Advanced, CustomerClass::Boss],
    };
    get_all_opponents()
        .into_iter()
        .filter(|o| classes.contains(&o.class))
        .collect()
}

/// Spawn weight of one template for a character of the given level.
pub fn spawn_weight(
    template: &OpponentTemplate,
    character_level: u32,
    history: &EncounterHistory,
) -> f64 {
    let level_diff = template.level.abs_diff(character_level) as f64;
    let mut weight = SPAWN_BASE_WEIGHT - level_diff * SPAWN_LEVEL_DIFF_PENALTY;
    weight *= template.difficulty.spawn_factor();
    weight /= 1.0 + history.count(template.id) as f64 * SPAWN_ENCOUNTER_DAMPING;
    weight.max(1.0)
}

/// Picks a random customer for a location tier.
///
/// Candidates outside ±[`SPAWN_LEVEL_RANGE`] levels of the character are
/// filtered out; if nothing survives the filter, the nearest-level
/// candidate is returned instead. Returns None only for an empty pool.
pub fn pick_random_opponent(
    tier: LocationTier,
    character_level: u32,
    history: &EncounterHistory,
    rng: &mut impl Rng,
) -> Option<OpponentTemplate> {
    let candidates = candidates_for_tier(tier);
    if candidates.is_empty() {
        return None;
    }

    let in_range: Vec<&OpponentTemplate> = candidates
        .iter()
        .filter(|o| o.level.abs_diff(character_level) <= SPAWN_LEVEL_RANGE)
        .collect();

    if in_range.is_empty() {
        return candidates
            .into_iter()
            .min_by_key(|o| o.level.abs_diff(character_level));
    }

    let weights: Vec<f64> = in_range
        .iter()
        .map(|o| spawn_weight(o, character_level, history))
        .collect();
    let total: f64 = weights.iter().sum();

    let mut roll = rng.gen_range(0.0..total);
    for (template, weight) in in_range.iter().zip(&weights) {
        if roll < *weight {
            return Some((*template).clone());
        }
        roll -= weight;
    }
    // Floating point drift can walk past the last bucket.
    in_range.last().map(|o| (*o).clone())
}
