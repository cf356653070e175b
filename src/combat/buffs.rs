//! Timed combat modifiers.
//!
//! Buffs live for a number of turns, not wall-clock time; the enclosing
//! game loop advances them once per resolved turn via
//! [`BuffLedger::advance_turn`].

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Closed set of buff effects. Matching on this enum is how every consumer
/// dispatches, so adding a variant forces each site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    /// Additive bonus to the final success chance (e.g. 0.20 = +20%).
    SuccessChanceBoost,
    /// Multiplicative bonus to skill power (e.g. 0.15 = +15%).
    SkillPowerBoost,
    /// Multiplicative reduction of per-skill cooldowns (e.g. 0.5 = half).
    CooldownReduction,
    /// Flat temporary headroom above max endurance.
    MaxEnduranceBoost,
}

/// One active timed modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub kind: BuffKind,
    pub value: f64,
    pub turns_remaining: u32,
}

/// All buffs currently in effect for the active combat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuffLedger {
    active: Vec<Buff>,
}

impl BuffLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: BuffKind, value: f64, duration_turns: u32) {
        self.active.push(Buff {
            kind,
            value,
            turns_remaining: duration_turns,
        });
    }

    /// Counts down one turn; buffs that reach zero expire.
    pub fn advance_turn(&mut self) {
        for buff in &mut self.active {
            buff.turns_remaining = buff.turns_remaining.saturating_sub(1);
        }
        self.active.retain(|buff| buff.turns_remaining > 0);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn active(&self) -> &[Buff] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Sum of all additive success-chance bonuses.
    pub fn success_chance_bonus(&self) -> f64 {
        self.active
            .iter()
            .filter(|b| b.kind == BuffKind::SuccessChanceBoost)
            .map(|b| b.value)
            .sum()
    }

    /// Product of all power multipliers, `1.0` when none are active.
    pub fn power_multiplier(&self) -> f64 {
        self.active
            .iter()
            .filter(|b| b.kind == BuffKind::SkillPowerBoost)
            .map(|b| 1.0 + b.value)
            .product()
    }

    /// Product of all cooldown reductions, floored at zero so stacked
    /// reducers can at most zero a cooldown, never invert it.
    pub fn cooldown_multiplier(&self) -> f64 {
        self.active
            .iter()
            .filter(|b| b.kind == BuffKind::CooldownReduction)
            .map(|b| (1.0 - b.value).max(0.0))
            .product()
    }

    /// Total temporary headroom above max endurance.
    pub fn max_endurance_bonus(&self) -> u32 {
        self.active
            .iter()
            .filter(|b| b.kind == BuffKind::MaxEnduranceBoost)
            .map(|b| b.value as u32)
            .sum()
    }
}
