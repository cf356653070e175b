//! Combat-facing types: the live opponent, turn results and rejections.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::opponents::{DropEntry, OpponentTemplate};

use super::rewards::RewardBundle;

/// A live customer in an active negotiation.
///
/// Created fresh from a template at combat start and discarded when the
/// combat ends; never persisted. `health` models the customer's remaining
/// resolve: 0 means they are won over, a full recovery to `max_health`
/// means they walked away unconvinced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opponent {
    pub id: u32,
    pub name: String,
    pub health: i64,
    pub max_health: i64,
    pub money: u64,
    pub drops: Vec<DropEntry>,
}

impl Opponent {
    /// Structural copy of the template's defined fields; cheap, and immune
    /// to whatever extra data the catalog grows later.
    pub fn from_template(template: &OpponentTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name.to_string(),
            health: template.max_health,
            max_health: template.max_health,
            money: template.money,
            drops: template.drops.clone(),
        }
    }

    pub fn health_percent(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64 * 100.0
    }
}

/// Everything a caller needs to render one resolved turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnResult {
    /// Whether the persuasion roll landed.
    pub hit: bool,
    /// Resolve damage dealt on a hit; zero on a miss.
    pub damage: i64,
    /// Stress resistance lost this turn.
    pub stress_damage: u32,
    pub opponent_health: i64,
    pub opponent_max_health: i64,
    pub endurance_cost: u32,
}

/// Why a skill use was refused. All variants are non-fatal: the same call
/// may succeed later once the blocking condition clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseSkillError {
    CombatNotActive,
    GlobalCooldown,
    SkillCooldown,
    NoEndurance,
}

impl UseSkillError {
    /// Stable tag for front-ends and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            UseSkillError::CombatNotActive => "combat_not_active",
            UseSkillError::GlobalCooldown => "global_cooldown",
            UseSkillError::SkillCooldown => "skill_cooldown",
            UseSkillError::NoEndurance => "no_endurance",
        }
    }
}

/// Outcome of the end-of-turn combat check.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatOutcome {
    Continue,
    /// The player ran out of endurance.
    DefeatEndurance,
    /// The player's stress resistance collapsed.
    DefeatStress,
    /// The customer recovered full resolve and walked away on their terms.
    DefeatOpponentStrong,
    Victory { rewards: RewardBundle },
}

impl CombatOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CombatOutcome::Continue)
    }
}

/// Cooldown readout for one skill at a caller-supplied instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownState {
    /// Whole seconds until the global lock clears; 0 when clear.
    pub global_seconds_remaining: u64,
    /// Whole seconds until this skill's own lock clears; 0 when clear.
    pub skill_seconds_remaining: u64,
    /// Whether a use would pass both cooldown gates right now, counting
    /// the repeat-use exemption from the global lock.
    pub can_use: bool,
}
