//! Persuasion skill definitions and per-level upgrade tables.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::core::unlocks::RequirementResolver;

pub type SkillId = u32;

/// Broad style of a persuasion technique. Purely descriptive today, but
/// customer archetypes key off it for flavor and future matchup bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillStyle {
    Persuasion,
    Aggressive,
    Emotional,
    Logical,
    Comparative,
    Psychological,
    Closing,
    Golden,
}

/// A single row of a skill's upgrade table. Each row overrides a subset of
/// the base stats; rows apply cumulatively up to the skill's current level,
/// so later rows only need to name the fields they change.
#[derive(Debug, Clone, Copy)]
pub struct SkillUpgrade {
    pub level: u32,
    pub power: Option<u32>,
    pub endurance_cost: Option<u32>,
    pub success_chance: Option<f64>,
    pub cooldown_seconds: Option<f64>,
}

/// Immutable catalog entry for one persuasion skill.
#[derive(Debug, Clone)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: &'static str,
    pub description: &'static str,
    pub style: SkillStyle,
    pub power: u32,
    pub endurance_cost: u32,
    pub success_chance: f64,
    pub cooldown_seconds: f64,
    pub max_level: u32,
    pub default_unlocked: bool,
    pub unlock_level: Option<u32>,
    pub special_requirement: Option<&'static str>,
    pub upgrades: Vec<SkillUpgrade>,
}

/// Effective combat stats of a skill at a given progress level, after the
/// upgrade table has been folded in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillStats {
    pub power: u32,
    pub endurance_cost: u32,
    pub success_chance: f64,
    pub cooldown_seconds: f64,
    pub level: u32,
}

impl SkillDef {
    /// Folds the upgrade table into the base stats for the given level.
    /// Rows above `level` are ignored; rows at or below apply in order.
    pub fn stats_at_level(&self, level: u32) -> SkillStats {
        let level = level.clamp(1, self.max_level);
        let mut stats = SkillStats {
            power: self.power,
            endurance_cost: self.endurance_cost,
            success_chance: self.success_chance,
            cooldown_seconds: self.cooldown_seconds,
            level,
        };
        for upgrade in self.upgrades.iter().filter(|u| u.level <= level) {
            if let Some(power) = upgrade.power {
                stats.power = power;
            }
            if let Some(cost) = upgrade.endurance_cost {
                stats.endurance_cost = cost;
            }
            if let Some(chance) = upgrade.success_chance {
                stats.success_chance = chance;
            }
            if let Some(cooldown) = upgrade.cooldown_seconds {
                stats.cooldown_seconds = cooldown;
            }
        }
        stats
    }
}

/// Checks whether a skill can be used by a character.
///
/// Available when the catalog marks it default-unlocked, the character has
/// explicitly learned it, the level gate is met, or its special requirement
/// is satisfied by the resolver.
pub fn is_skill_available(
    def: &SkillDef,
    character_level: u32,
    unlocked_skills: &[SkillId],
    resolver: &dyn RequirementResolver,
) -> bool {
    if def.default_unlocked || unlocked_skills.contains(&def.id) {
        return true;
    }
    if let Some(min_level) = def.unlock_level {
        if character_level >= min_level {
            return true;
        }
    }
    if let Some(requirement) = def.special_requirement {
        return resolver.is_satisfied(requirement);
    }
    false
}

/// Returns all skills in the catalog, in id order.
pub fn get_all_skills() -> Vec<SkillDef> {
    vec![
        SkillDef {
            id: 1,
            name: "Convincing Argument",
            description: "Baseline pitch with a solid balance of punch and reliability",
            style: SkillStyle::Persuasion,
            power: 20,
            endurance_cost: 10,
            success_chance: 0.55,
            cooldown_seconds: 3.0,
            max_level: 5,
            default_unlocked: true,
            unlock_level: None,
            special_requirement: None,
            upgrades: vec![
                SkillUpgrade { level: 2, power: Some(23), endurance_cost: None, success_chance: Some(0.57), cooldown_seconds: None },
                SkillUpgrade { level: 3, power: Some(26), endurance_cost: Some(9), success_chance: None, cooldown_seconds: None },
                SkillUpgrade { level: 4, power: Some(30), endurance_cost: None, success_chance: Some(0.60), cooldown_seconds: None },
                SkillUpgrade { level: 5, power: Some(35), endurance_cost: None, success_chance: None, cooldown_seconds: Some(2.0) },
            ],
        },
        SkillDef {
            id: 2,
            name: "Hard Sell",
            description: "Forceful pitch that hits hard but misses more often",
            style: SkillStyle::Aggressive,
            power: 30,
            endurance_cost: 15,
            success_chance: 0.45,
            cooldown_seconds: 5.0,
            max_level: 5,
            default_unlocked: true,
            unlock_level: None,
            special_requirement: None,
            upgrades: vec![
                SkillUpgrade { level: 2, power: Some(34), endurance_cost: None, success_chance: Some(0.47), cooldown_seconds: None },
                SkillUpgrade { level: 3, power: Some(38), endurance_cost: Some(14), success_chance: None, cooldown_seconds: None },
                SkillUpgrade { level: 4, power: Some(43), endurance_cost: None, success_chance: Some(0.50), cooldown_seconds: None },
                SkillUpgrade { level: 5, power: Some(50), endurance_cost: None, success_chance: None, cooldown_seconds: Some(4.0) },
            ],
        },
        SkillDef {
            id: 3,
            name: "Emotional Appeal",
            description: "Speaks to the customer's feelings; reliable, slow to recharge",
            style: SkillStyle::Emotional,
            power: 25,
            endurance_cost: 12,
            success_chance: 0.60,
            cooldown_seconds: 15.0,
            max_level: 5,
            default_unlocked: true,
            unlock_level: None,
            special_requirement: None,
            upgrades: vec![
                SkillUpgrade { level: 2, power: Some(28), endurance_cost: None, success_chance: Some(0.63), cooldown_seconds: None },
                SkillUpgrade { level: 3, power: Some(31), endurance_cost: Some(11), success_chance: None, cooldown_seconds: None },
                SkillUpgrade { level: 4, power: Some(35), endurance_cost: None, success_chance: Some(0.66), cooldown_seconds: None },
                SkillUpgrade { level: 5, power: Some(40), endurance_cost: None, success_chance: None, cooldown_seconds: Some(12.0) },
            ],
        },
        SkillDef {
            id: 4,
            name: "Logical Chain",
            description: "Step-by-step reasoning for technically minded customers",
            style: SkillStyle::Logical,
            power: 22,
            endurance_cost: 11,
            success_chance: 0.65,
            cooldown_seconds: 20.0,
            max_level: 5,
            default_unlocked: false,
            unlock_level: Some(5),
            special_requirement: None,
            upgrades: vec![
                SkillUpgrade { level: 2, power: Some(25), endurance_cost: None, success_chance: Some(0.68), cooldown_seconds: None },
                SkillUpgrade { level: 3, power: Some(28), endurance_cost: Some(10), success_chance: None, cooldown_seconds: None },
                SkillUpgrade { level: 4, power: Some(32), endurance_cost: None, success_chance: Some(0.71), cooldown_seconds: None },
                SkillUpgrade { level: 5, power: Some(37), endurance_cost: None, success_chance: None, cooldown_seconds: Some(16.0) },
            ],
        },
        SkillDef {
            id: 5,
            name: "Edge Over Rivals",
            description: "Side-by-side comparison that shows where the deal wins",
            style: SkillStyle::Comparative,
            power: 28,
            endurance_cost: 14,
            success_chance: 0.50,
            cooldown_seconds: 30.0,
            max_level: 5,
            default_unlocked: false,
            unlock_level: Some(8),
            special_requirement: None,
            upgrades: vec![
                SkillUpgrade { level: 2, power: Some(32), endurance_cost: None, success_chance: Some(0.53), cooldown_seconds: None },
                SkillUpgrade { level: 3, power: Some(36), endurance_cost: Some(13), success_chance: None, cooldown_seconds: None },
                SkillUpgrade { level: 4, power: Some(41), endurance_cost: None, success_chance: Some(0.56), cooldown_seconds: None },
                SkillUpgrade { level: 5, power: Some(47), endurance_cost: None, success_chance: None, cooldown_seconds: Some(25.0) },
            ],
        },
        SkillDef {
            id: 6,
            name: "Pressure Play",
            description: "Psychological squeeze; high risk, high reward",
            style: SkillStyle::Psychological,
            power: 35,
            endurance_cost: 20,
            success_chance: 0.40,
            cooldown_seconds: 45.0,
            max_level: 5,
            default_unlocked: false,
            unlock_level: Some(15),
            special_requirement: None,
            upgrades: vec![
                SkillUpgrade { level: 2, power: Some(40), endurance_cost: None, success_chance: Some(0.43), cooldown_seconds: None },
                SkillUpgrade { level: 3, power: Some(45), endurance_cost: Some(18), success_chance: None, cooldown_seconds: None },
                SkillUpgrade { level: 4, power: Some(51), endurance_cost: None, success_chance: Some(0.46), cooldown_seconds: None },
                SkillUpgrade { level: 5, power: Some(58), endurance_cost: None, success_chance: None, cooldown_seconds: Some(35.0) },
            ],
        },
        SkillDef {
            id: 7,
            name: "Seal the Deal",
            description: "The closing offer that is hard to walk away from",
            style: SkillStyle::Closing,
            power: 40,
            endurance_cost: 25,
            success_chance: 0.35,
            cooldown_seconds: 60.0,
            max_level: 5,
            default_unlocked: false,
            unlock_level: Some(20),
            special_requirement: None,
            upgrades: vec![
                SkillUpgrade { level: 2, power: Some(46), endurance_cost: None, success_chance: Some(0.38), cooldown_seconds: None },
                SkillUpgrade { level: 3, power: Some(52), endurance_cost: Some(23), success_chance: None, cooldown_seconds: None },
                SkillUpgrade { level: 4, power: Some(59), endurance_cost: None, success_chance: Some(0.41), cooldown_seconds: None },
                SkillUpgrade { level: 5, power: Some(67), endurance_cost: None, success_chance: None, cooldown_seconds: Some(50.0) },
            ],
        },
        SkillDef {
            id: 8,
            name: "Golden Tongue",
            description: "The signature move of a master trader",
            style: SkillStyle::Golden,
            power: 50,
            endurance_cost: 30,
            success_chance: 0.30,
            cooldown_seconds: 90.0,
            max_level: 5,
            default_unlocked: false,
            unlock_level: None,
            special_requirement: Some("reach_level_30"),
            upgrades: vec![
                SkillUpgrade { level: 2, power: Some(58), endurance_cost: None, success_chance: Some(0.33), cooldown_seconds: None },
                SkillUpgrade { level: 3, power: Some(66), endurance_cost: Some(27), success_chance: None, cooldown_seconds: None },
                SkillUpgrade { level: 4, power: Some(75), endurance_cost: None, success_chance: Some(0.36), cooldown_seconds: None },
                SkillUpgrade { level: 5, power: Some(85), endurance_cost: None, success_chance: None, cooldown_seconds: Some(75.0) },
            ],
        },
    ]
}

/// Looks up a skill definition by id.
pub fn get_skill(id: SkillId) -> Option<SkillDef> {
    get_all_skills().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{SUCCESS_CHANCE_CAP, SUCCESS_CHANCE_PER_SKILL_LEVEL};
    use crate::core::unlocks::NoRequirements;

    #[test]
    fn test_catalog_ids_unique_and_ordered() {
        let skills = get_all_skills();
        for (i, skill) in skills.iter().enumerate() {
            assert_eq!(skill.id, i as u32 + 1);
        }
    }

    #[test]
    fn test_get_skill_unknown_id() {
        assert!(get_skill(999).is_none());
    }

    #[test]
    fn test_stats_at_level_one_match_base() {
        let skill = get_skill(1).unwrap();
        let stats = skill.stats_at_level(1);
        assert_eq!(stats.power, 20);
        assert_eq!(stats.endurance_cost, 10);
        assert_eq!(stats.success_chance, 0.55);
        assert_eq!(stats.cooldown_seconds, 3.0);
    }

    #[test]
    fn test_upgrades_fold_cumulatively() {
        // At level 3, the level-2 success chance bump must survive the
        // level-3 row that only touches power and cost.
        let skill = get_skill(1).unwrap();
        let stats = skill.stats_at_level(3);
        assert_eq!(stats.power, 26);
        assert_eq!(stats.endurance_cost, 9);
        assert_eq!(stats.success_chance, 0.57);
        assert_eq!(stats.cooldown_seconds, 3.0);
    }

    #[test]
    fn test_stats_at_max_level() {
        let skill = get_skill(1).unwrap();
        let stats = skill.stats_at_level(5);
        assert_eq!(stats.power, 35);
        assert_eq!(stats.endurance_cost, 9);
        assert_eq!(stats.success_chance, 0.60);
        assert_eq!(stats.cooldown_seconds, 2.0);
    }

    #[test]
    fn test_stats_level_clamped_to_max() {
        let skill = get_skill(2).unwrap();
        assert_eq!(skill.stats_at_level(99), skill.stats_at_level(5));
        assert_eq!(skill.stats_at_level(0), skill.stats_at_level(1));
    }

    #[test]
    fn test_upgrades_are_monotonic() {
        for skill in get_all_skills() {
            let mut prev = skill.stats_at_level(1);
            for level in 2..=skill.max_level {
                let next = skill.stats_at_level(level);
                assert!(next.power >= prev.power, "{} power regressed", skill.name);
                assert!(
                    next.endurance_cost <= prev.endurance_cost,
                    "{} cost increased",
                    skill.name
                );
                assert!(
                    next.success_chance >= prev.success_chance,
                    "{} success chance regressed",
                    skill.name
                );
                assert!(
                    next.cooldown_seconds <= prev.cooldown_seconds,
                    "{} cooldown increased",
                    skill.name
                );
                prev = next;
            }
        }
    }

    #[test]
    fn test_default_skills_available_at_level_one() {
        for id in [1, 2, 3] {
            let skill = get_skill(id).unwrap();
            assert!(is_skill_available(&skill, 1, &[], &NoRequirements));
        }
    }

    #[test]
    fn test_level_gated_skill_availability() {
        let skill = get_skill(4).unwrap();
        assert!(!is_skill_available(&skill, 4, &[], &NoRequirements));
        assert!(is_skill_available(&skill, 5, &[], &NoRequirements));
    }

    #[test]
    fn test_explicitly_learned_skill_available() {
        let skill = get_skill(7).unwrap();
        assert!(!is_skill_available(&skill, 1, &[], &NoRequirements));
        assert!(is_skill_available(&skill, 1, &[7], &NoRequirements));
    }

    #[test]
    fn test_special_requirement_gating() {
        let skill = get_skill(8).unwrap();
        assert!(!is_skill_available(&skill, 29, &[], &NoRequirements));
        let resolver = |req: &str| req == "reach_level_30";
        assert!(is_skill_available(&skill, 1, &[], &resolver));
    }

    #[test]
    fn test_base_chances_below_cap() {
        // Even a max-level skill's table chance plus the per-level bonus
        // stays below the hard cap; the cap only matters once buffs stack.
        for skill in get_all_skills() {
            let stats = skill.stats_at_level(skill.max_level);
            let with_level_bonus = stats.success_chance
                + (skill.max_level - 1) as f64 * SUCCESS_CHANCE_PER_SKILL_LEVEL;
            assert!(with_level_bonus < SUCCESS_CHANCE_CAP);
        }
    }
}
