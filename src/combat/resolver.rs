//! Turn resolution for one negotiation.
//!
//! The resolver owns the live opponent, cooldown bookkeeping and the buff
//! ledger for exactly one combat at a time. It has no internal timers:
//! every call takes a caller-supplied `now` in seconds and compares
//! monotonically, so the enclosing loop decides what time it is.

#![allow(dead_code)]

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::core::constants::*;
use crate::opponents::OpponentTemplate;
use crate::skills::{SkillId, SkillStats};

use super::buffs::{BuffKind, BuffLedger};
use super::rewards::resolve_victory_rewards;
use super::types::{CombatOutcome, CooldownState, Opponent, TurnResult, UseSkillError};

/// Snapshot of the resolver for rendering.
#[derive(Debug, Clone)]
pub struct CombatInfo<'a> {
    pub opponent: Option<&'a Opponent>,
    pub is_active: bool,
    pub active_buffs: &'a [super::buffs::Buff],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatResolver {
    current_opponent: Option<Opponent>,
    is_active: bool,
    global_cooldown_until: f64,
    skill_cooldowns: HashMap<SkillId, f64>,
    last_used_skill: Option<SkillId>,
    buffs: BuffLedger,
}

impl CombatResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a negotiation with a fresh copy of the template.
    ///
    /// Cooldowns, buffs and the last-used marker are cleared so nothing
    /// leaks between encounters. Returns a snapshot of the instantiated
    /// opponent.
    pub fn start_combat(&mut self, template: &OpponentTemplate) -> Opponent {
        let opponent = Opponent::from_template(template);
        self.current_opponent = Some(opponent.clone());
        self.is_active = true;
        self.skill_cooldowns.clear();
        self.global_cooldown_until = 0.0;
        self.last_used_skill = None;
        self.buffs.clear();
        opponent
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn opponent(&self) -> Option<&Opponent> {
        self.current_opponent.as_ref()
    }

    pub fn combat_info(&self) -> CombatInfo<'_> {
        CombatInfo {
            opponent: self.current_opponent.as_ref(),
            is_active: self.is_active,
            active_buffs: self.buffs.active(),
        }
    }

    /// Final success chance for a skill against the current character
    /// state: base chance plus the per-level bonus, scaled by how steady
    /// the seller's nerves are, plus additive buffs, hard-capped at 95%.
    pub fn success_chance(&self, stats: &SkillStats, character: &Character) -> f64 {
        let mut chance =
            stats.success_chance + (stats.level - 1) as f64 * SUCCESS_CHANCE_PER_SKILL_LEVEL;
        let stress_factor = character.stress_resistance as f64 / 100.0;
        chance *= SUCCESS_STRESS_BASE_FACTOR + stress_factor * SUCCESS_STRESS_SCALE;
        chance += self.buffs.success_chance_bonus();
        chance.min(SUCCESS_CHANCE_CAP)
    }

    /// Resolves one skill use against the current opponent.
    ///
    /// Preconditions are checked in order and each failure returns its own
    /// tagged rejection; a rejected call changes nothing and may simply be
    /// retried later. The global cooldown does not block an immediate
    /// repeat of the skill that set it: only that skill's own cooldown
    /// gates chaining it.
    pub fn use_skill(
        &mut self,
        skill_id: SkillId,
        stats: &SkillStats,
        character: &mut Character,
        now: f64,
        rng: &mut impl Rng,
    ) -> Result<TurnResult, UseSkillError> {
        if !self.is_active || self.current_opponent.is_none() {
            return Err(UseSkillError::CombatNotActive);
        }
        if self.global_cooldown_until > now && self.last_used_skill != Some(skill_id) {
            return Err(UseSkillError::GlobalCooldown);
        }
        if let Some(&until) = self.skill_cooldowns.get(&skill_id) {
            if until > now {
                return Err(UseSkillError::SkillCooldown);
            }
        }
        if character.endurance < stats.endurance_cost {
            return Err(UseSkillError::NoEndurance);
        }

        let chance = self.success_chance(stats, character);
        let hit = rng.gen::<f64>() <= chance;
        let power_multiplier = self.buffs.power_multiplier();
        let endurance_headroom = self.buffs.max_endurance_bonus();

        let Some(opponent) = self.current_opponent.as_mut() else {
            return Err(UseSkillError::CombatNotActive);
        };

        let mut damage = 0i64;
        let stress_damage;
        if hit {
            let stress_factor = character.stress_resistance as f64 / 100.0;
            let base = stats.power as f64
                * (1.0 + (stats.level - 1) as f64 * DAMAGE_PER_SKILL_LEVEL)
                * (DAMAGE_STRESS_BASE_FACTOR + stress_factor * DAMAGE_STRESS_SCALE)
                * power_multiplier;
            let variance = rng.gen_range(DAMAGE_VARIANCE_MIN..DAMAGE_VARIANCE_MAX);
            damage = (base * variance).floor() as i64;
            opponent.health -= damage;

            stress_damage =
                (stats.endurance_cost as f64 * STRESS_FACTOR_ON_SUCCESS).floor() as u32;
        } else {
            // The customer shrugs the pitch off and their resolve firms up.
            let resistance = (stats.power as f64 * RESISTANCE_POWER_FACTOR
                + rng.gen_range(0.0..RESISTANCE_RANDOM_MAX))
            .floor() as i64;
            opponent.health += resistance;

            stress_damage =
                (stats.endurance_cost as f64 * STRESS_FACTOR_ON_FAILURE).floor() as u32;
        }

        opponent.health = opponent.health.clamp(0, opponent.max_health);
        let opponent_health = opponent.health;
        let opponent_max_health = opponent.max_health;

        character.change_stress_resistance(-(stress_damage as i64));
        character.change_endurance_with_bonus_max(
            -(stats.endurance_cost as i64),
            endurance_headroom,
        );

        self.set_cooldowns(skill_id, stats.cooldown_seconds, now);

        Ok(TurnResult {
            hit,
            damage,
            stress_damage,
            opponent_health,
            opponent_max_health,
            endurance_cost: stats.endurance_cost,
        })
    }

    fn set_cooldowns(&mut self, skill_id: SkillId, cooldown_seconds: f64, now: f64) {
        self.global_cooldown_until = now + GLOBAL_COOLDOWN_SECONDS;
        let effective = (cooldown_seconds * self.buffs.cooldown_multiplier()).max(0.0);
        self.skill_cooldowns.insert(skill_id, now + effective);
        self.last_used_skill = Some(skill_id);
    }

    /// Evaluates whether the negotiation has ended.
    ///
    /// Checked in strict precedence: the seller's endurance, then stress
    /// resistance, then the customer's resolve. A turn that empties the
    /// seller and the customer at once therefore counts as a defeat. Any
    /// terminal outcome deactivates the combat and clears buffs; the
    /// beaten opponent stays readable until `reset`.
    pub fn check_combat_end(
        &mut self,
        character: &Character,
        rng: &mut impl Rng,
    ) -> CombatOutcome {
        if !self.is_active {
            return CombatOutcome::Continue;
        }
        let Some(opponent) = self.current_opponent.as_ref() else {
            return CombatOutcome::Continue;
        };

        let outcome = if character.endurance == 0 {
            CombatOutcome::DefeatEndurance
        } else if character.stress_resistance == 0 {
            CombatOutcome::DefeatStress
        } else if opponent.health <= 0 {
            CombatOutcome::Victory {
                rewards: resolve_victory_rewards(opponent, rng),
            }
        } else if opponent.health >= opponent.max_health {
            CombatOutcome::DefeatOpponentStrong
        } else {
            CombatOutcome::Continue
        };

        if outcome.is_terminal() {
            self.end_combat();
        }
        outcome
    }

    fn end_combat(&mut self) {
        self.is_active = false;
        self.buffs.clear();
    }

    /// Cooldown readout for one skill at `now`. A skill never put on
    /// cooldown reads as ready.
    pub fn get_cooldown_state(&self, skill_id: SkillId, now: f64) -> CooldownState {
        let global_remaining = self.global_cooldown_until - now;
        let skill_remaining = self
            .skill_cooldowns
            .get(&skill_id)
            .map_or(0.0, |&until| until - now);

        let global_blocks =
            global_remaining > 0.0 && self.last_used_skill != Some(skill_id);

        CooldownState {
            global_seconds_remaining: seconds_remaining(global_remaining),
            skill_seconds_remaining: seconds_remaining(skill_remaining),
            can_use: !global_blocks && skill_remaining <= 0.0,
        }
    }

    pub fn add_buff(&mut self, kind: BuffKind, value: f64, duration_turns: u32) {
        self.buffs.add(kind, value, duration_turns);
    }

    /// Advances buff durations by one turn.
    pub fn update_buffs(&mut self) {
        self.buffs.advance_turn();
    }

    pub fn buffs(&self) -> &BuffLedger {
        &self.buffs
    }

    /// Returns the resolver to its inactive, cleared state. Safe to call
    /// at any time and as often as needed.
    pub fn reset(&mut self) {
        self.current_opponent = None;
        self.is_active = false;
        self.skill_cooldowns.clear();
        self.global_cooldown_until = 0.0;
        self.last_used_skill = None;
        self.buffs.clear();
    }
}

fn seconds_remaining(remaining: f64) -> u64 {
    if remaining > 0.0 {
        remaining.ceil() as u64
    } else {
        0
    }
}
