//! The player character: resource pools, leveling curve, money and unlocks.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::locations::locations_unlocked_at;
use crate::skills::SkillId;

/// Total experience needed to leave `level`. The curve is
/// `floor(100 * level^1.5)`; experience is cumulative and never reset,
/// so the threshold is re-derived from the curve after every level-up.
pub fn xp_for_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)) as u64
}

/// Result of a bounded stat mutation, enough for the caller to render the
/// change and detect depletion without re-reading the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatChange {
    pub old_value: u32,
    pub new_value: u32,
    pub change: i64,
    pub is_zero: bool,
}

/// Result of an experience award.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpReport {
    pub leveled_up: bool,
    pub old_level: u32,
    pub new_level: u32,
    pub experience_gained: u64,
    /// Location ids unlocked by the levels crossed, in unlock order.
    pub locations_unlocked: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    InvalidAmount,
    NotEnoughMoney,
}

/// Result of a successful money mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyChange {
    pub old_amount: u64,
    pub new_amount: u64,
}

/// Persistent state of the player character.
///
/// Endurance and stress resistance are always clamped into `[0, max]`;
/// depletion of either means defeat. The record holds plain data only so
/// it round-trips through the save system unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub endurance: u32,
    pub max_endurance: u32,
    pub stress_resistance: u32,
    pub max_stress_resistance: u32,

    pub level: u32,
    pub experience: u64,
    pub experience_to_next_level: u64,

    pub money: u64,
    #[serde(default)]
    pub total_money_earned: u64,

    #[serde(default)]
    pub battles_won: u32,
    #[serde(default)]
    pub battles_lost: u32,
    #[serde(default)]
    pub skills_used: u64,

    pub unlocked_locations: Vec<String>,
    pub unlocked_skills: Vec<SkillId>,
    #[serde(default)]
    pub completed_tutorials: Vec<String>,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    /// A fresh level-1 character with full resources. Also the fallback
    /// when a save file is missing or unreadable.
    pub fn new() -> Self {
        Self {
            endurance: BASE_ENDURANCE,
            max_endurance: BASE_ENDURANCE,
            stress_resistance: BASE_STRESS_RESISTANCE,
            max_stress_resistance: BASE_STRESS_RESISTANCE,
            level: 1,
            experience: 0,
            experience_to_next_level: xp_for_level(1),
            money: STARTING_MONEY,
            total_money_earned: 0,
            battles_won: 0,
            battles_lost: 0,
            skills_used: 0,
            unlocked_locations: vec!["products".to_string(), "clothing".to_string()],
            unlocked_skills: vec![1, 2, 3],
            completed_tutorials: Vec::new(),
        }
    }

    /// Awards experience and processes every level-up it pays for.
    ///
    /// A single large award can cross several thresholds; each level-up
    /// raises both stat maximums, fully restores resources and applies the
    /// level-keyed location unlocks before the next threshold is checked.
    pub fn add_experience(&mut self, experience: u64) -> LevelUpReport {
        let old_level = self.level;
        let mut locations_unlocked = Vec::new();

        if experience == 0 {
            return LevelUpReport {
                leveled_up: false,
                old_level,
                new_level: old_level,
                experience_gained: 0,
                locations_unlocked,
            };
        }

        self.experience += experience;
        while self.experience >= self.experience_to_next_level {
            self.level += 1;
            self.max_endurance += LEVEL_UP_STAT_GAIN;
            self.max_stress_resistance += LEVEL_UP_STAT_GAIN;
            // Full restore on level-up is intentional.
            self.endurance = self.max_endurance;
            self.stress_resistance = self.max_stress_resistance;
            self.experience_to_next_level = xp_for_level(self.level);

            for location in locations_unlocked_at(self.level) {
                if self.unlock_location(location) {
                    locations_unlocked.push(location.to_string());
                }
            }
        }

        LevelUpReport {
            leveled_up: self.level > old_level,
            old_level,
            new_level: self.level,
            experience_gained: experience,
            locations_unlocked,
        }
    }

    /// Adjusts endurance by `amount`, clamped into `[0, max]`.
    pub fn change_endurance(&mut self, amount: i64) -> StatChange {
        self.change_endurance_with_bonus_max(amount, 0)
    }

    /// Like [`Self::change_endurance`], but with extra headroom above the
    /// base maximum from active max-endurance buffs.
    pub fn change_endurance_with_bonus_max(&mut self, amount: i64, bonus_max: u32) -> StatChange {
        let old_value = self.endurance;
        let cap = (self.max_endurance + bonus_max) as i64;
        let new_value = (old_value as i64 + amount).clamp(0, cap) as u32;
        self.endurance = new_value;
        StatChange {
            old_value,
            new_value,
            change: amount,
            is_zero: new_value == 0,
        }
    }

    /// Adjusts stress resistance by `amount`, clamped into `[0, max]`.
    pub fn change_stress_resistance(&mut self, amount: i64) -> StatChange {
        let old_value = self.stress_resistance;
        let new_value =
            (old_value as i64 + amount).clamp(0, self.max_stress_resistance as i64) as u32;
        self.stress_resistance = new_value;
        StatChange {
            old_value,
            new_value,
            change: amount,
            is_zero: new_value == 0,
        }
    }

    /// Restores both resource pools to their maximums.
    pub fn restore_stats(&mut self) {
        self.endurance = self.max_endurance;
        self.stress_resistance = self.max_stress_resistance;
    }

    /// Adds money to the wallet. Zero is rejected so accidental no-op
    /// payouts surface as caller bugs rather than silent successes.
    pub fn add_money(&mut self, amount: u64) -> Result<MoneyChange, MoneyError> {
        if amount == 0 {
            return Err(MoneyError::InvalidAmount);
        }
        let old_amount = self.money;
        self.money += amount;
        self.total_money_earned += amount;
        Ok(MoneyChange {
            old_amount,
            new_amount: self.money,
        })
    }

    /// Spends money if the balance covers it; the wallet never goes
    /// negative.
    pub fn spend_money(&mut self, amount: u64) -> Result<MoneyChange, MoneyError> {
        if amount == 0 {
            return Err(MoneyError::InvalidAmount);
        }
        if self.money < amount {
            return Err(MoneyError::NotEnoughMoney);
        }
        let old_amount = self.money;
        self.money -= amount;
        Ok(MoneyChange {
            old_amount,
            new_amount: self.money,
        })
    }

    /// Records a location unlock. Returns false if already unlocked.
    pub fn unlock_location(&mut self, location_id: &str) -> bool {
        if self.unlocked_locations.iter().any(|l| l == location_id) {
            return false;
        }
        self.unlocked_locations.push(location_id.to_string());
        true
    }

    /// Records a skill unlock. Returns false if already unlocked.
    pub fn unlock_skill(&mut self, skill_id: SkillId) -> bool {
        if self.unlocked_skills.contains(&skill_id) {
            return false;
        }
        self.unlocked_skills.push(skill_id);
        true
    }

    /// Marks a tutorial as completed. Returns false if already done.
    pub fn complete_tutorial(&mut self, tutorial_id: &str) -> bool {
        if self.completed_tutorials.iter().any(|t| t == tutorial_id) {
            return false;
        }
        self.completed_tutorials.push(tutorial_id.to_string());
        true
    }

    pub fn is_tutorial_completed(&self, tutorial_id: &str) -> bool {
        self.completed_tutorials.iter().any(|t| t == tutorial_id)
    }

    /// Records a finished battle in the statistics counters.
    pub fn record_battle(&mut self, won: bool) {
        if won {
            self.battles_won += 1;
        } else {
            self.battles_lost += 1;
        }
    }

    pub fn endurance_percent(&self) -> f64 {
        self.endurance as f64 / self.max_endurance as f64 * 100.0
    }

    pub fn stress_percent(&self) -> f64 {
        self.stress_resistance as f64 / self.max_stress_resistance as f64 * 100.0
    }
}
