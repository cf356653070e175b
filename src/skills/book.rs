//! Per-character skill progress: levels, experience and usage history.

#![allow(dead_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::data::{get_skill, SkillId, SkillStats};
use crate::core::constants::{SKILL_XP_BASE, SKILL_XP_GROWTH};

/// XP required to advance a skill from `level` to `level + 1`.
pub fn skill_xp_for_level(level: u32) -> u64 {
    (SKILL_XP_BASE * SKILL_XP_GROWTH.powi(level as i32 - 1)) as u64
}

/// Progress of one skill for one character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillProgress {
    pub level: u32,
    pub experience: u64,
    pub experience_to_next_level: u64,
}

impl Default for SkillProgress {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next_level: skill_xp_for_level(1),
        }
    }
}

/// Usage statistics for one skill.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SkillUsage {
    pub total_uses: u64,
    pub successful_uses: u64,
}

impl SkillUsage {
    pub fn success_rate(&self) -> f64 {
        if self.total_uses == 0 {
            return 0.0;
        }
        self.successful_uses as f64 / self.total_uses as f64
    }
}

/// Outcome of feeding experience to a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillLevelUpReport {
    pub leveled_up: bool,
    pub old_level: u32,
    pub new_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillBookError {
    UnknownSkill(SkillId),
}

/// All skill progress and usage history for one character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillBook {
    progress: HashMap<SkillId, SkillProgress>,
    #[serde(default)]
    usage: HashMap<SkillId, SkillUsage>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of a skill; skills start at level 1.
    pub fn level(&self, id: SkillId) -> u32 {
        self.progress.get(&id).map_or(1, |p| p.level)
    }

    pub fn progress(&self, id: SkillId) -> SkillProgress {
        self.progress.get(&id).cloned().unwrap_or_default()
    }

    pub fn usage(&self, id: SkillId) -> SkillUsage {
        self.usage.get(&id).copied().unwrap_or_default()
    }

    /// Effective combat stats of a skill at this character's progress.
    /// Fails loudly on ids the catalog does not know.
    pub fn stats(&self, id: SkillId) -> Result<SkillStats, SkillBookError> {
        let def = get_skill(id).ok_or(SkillBookError::UnknownSkill(id))?;
        Ok(def.stats_at_level(self.level(id)))
    }

    /// Adds experience to a skill, leveling it up as thresholds are crossed.
    /// A single large award can cross several levels; progress stops at the
    /// skill's max level and further experience is discarded.
    pub fn add_experience(
        &mut self,
        id: SkillId,
        experience: u64,
    ) -> Result<SkillLevelUpReport, SkillBookError> {
        let def = get_skill(id).ok_or(SkillBookError::UnknownSkill(id))?;
        let entry = self.progress.entry(id).or_default();
        let old_level = entry.level;

        if entry.level >= def.max_level {
            return Ok(SkillLevelUpReport {
                leveled_up: false,
                old_level,
                new_level: old_level,
            });
        }

        entry.experience += experience;
        while entry.level < def.max_level && entry.experience >= entry.experience_to_next_level {
            entry.experience -= entry.experience_to_next_level;
            entry.level += 1;
            entry.experience_to_next_level = skill_xp_for_level(entry.level);
        }
        if entry.level >= def.max_level {
            entry.experience = 0;
        }

        Ok(SkillLevelUpReport {
            leveled_up: entry.level > old_level,
            old_level,
            new_level: entry.level,
        })
    }

    /// Records one use of a skill and whether the persuasion landed.
    pub fn record_usage(&mut self, id: SkillId, hit: bool) {
        let usage = self.usage.entry(id).or_default();
        usage.total_uses += 1;
        if hit {
            usage.successful_uses += 1;
        }
    }

    /// Resets all progress and history to a fresh book.
    pub fn reset(&mut self) {
        self.progress.clear();
        self.usage.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_xp_curve() {
        assert_eq!(skill_xp_for_level(1), 100);
        assert_eq!(skill_xp_for_level(2), 150);
        assert_eq!(skill_xp_for_level(3), 225);
        assert_eq!(skill_xp_for_level(4), 337);
    }

    #[test]
    fn test_fresh_book_level_one() {
        let book = SkillBook::new();
        assert_eq!(book.level(1), 1);
        assert_eq!(book.usage(1).total_uses, 0);
    }

    #[test]
    fn test_unknown_skill_rejected() {
        let mut book = SkillBook::new();
        assert_eq!(
            book.add_experience(999, 100),
            Err(SkillBookError::UnknownSkill(999))
        );
        assert_eq!(book.stats(999), Err(SkillBookError::UnknownSkill(999)));
    }

    #[test]
    fn test_single_level_up() {
        let mut book = SkillBook::new();
        let report = book.add_experience(1, 100).unwrap();
        assert!(report.leveled_up);
        assert_eq!(report.old_level, 1);
        assert_eq!(report.new_level, 2);
        assert_eq!(book.progress(1).experience_to_next_level, 150);
    }

    #[test]
    fn test_multi_level_up_from_one_award() {
        // 100 + 150 = 250 XP reaches level 3 exactly; 300 leaves 50 spare.
        let mut book = SkillBook::new();
        let report = book.add_experience(1, 300).unwrap();
        assert_eq!(report.new_level, 3);
        assert_eq!(book.progress(1).experience, 50);
        assert_eq!(book.progress(1).experience_to_next_level, 225);
    }

    #[test]
    fn test_level_capped_at_max() {
        let mut book = SkillBook::new();
        let report = book.add_experience(1, 1_000_000).unwrap();
        assert_eq!(report.new_level, 5);

        // Further awards are a no-op once capped.
        let report = book.add_experience(1, 1_000_000).unwrap();
        assert!(!report.leveled_up);
        assert_eq!(book.level(1), 5);
    }

    #[test]
    fn test_stats_follow_book_level() {
        let mut book = SkillBook::new();
        book.add_experience(1, 100).unwrap();
        let stats = book.stats(1).unwrap();
        assert_eq!(stats.level, 2);
        assert_eq!(stats.power, 23);
    }

    #[test]
    fn test_usage_tracking() {
        let mut book = SkillBook::new();
        book.record_usage(2, true);
        book.record_usage(2, false);
        book.record_usage(2, true);
        let usage = book.usage(2);
        assert_eq!(usage.total_uses, 3);
        assert_eq!(usage.successful_uses, 2);
        assert!((usage.success_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut book = SkillBook::new();
        book.add_experience(1, 500).unwrap();
        book.record_usage(1, true);
        book.reset();
        assert_eq!(book.level(1), 1);
        assert_eq!(book.usage(1).total_uses, 0);
    }
}
