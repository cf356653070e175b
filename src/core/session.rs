//! The game session: one owner for every engine component.
//!
//! A [`GameSession`] wires the character, skill book, inventory, combat
//! resolver and encounter history together with plain synchronous calls.
//! There are no globals and no callback fields; orchestration order is
//! explicit in the method bodies, and the front-end drives everything
//! through this one handle.

#![allow(dead_code)]

use rand::Rng;

use crate::character::Character;
use crate::combat::{
    CombatOutcome, CombatResolver, CooldownState, Opponent, TurnResult, UseSkillError,
};
use crate::core::unlocks::RequirementResolver;
use crate::items::{self, get_item, Inventory, InventoryError, ItemUseOutcome};
use crate::locations::{get_all_locations, get_location, is_location_available, LocationDef};
use crate::opponents::{get_opponent, pick_random_opponent, EncounterHistory};
use crate::skills::{get_skill, is_skill_available, SkillBook, SkillDef, SkillId};

/// Errors from session-level operations that wrap a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No opponent template with this id; a content or caller bug.
    UnknownOpponent(u32),
    /// Tried to fight in a location with an empty customer pool.
    NoCandidates,
}

/// Errors from a session-level skill use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// No skill with this id in the catalog; a content or caller bug.
    UnknownSkill(SkillId),
    /// The skill exists but this character has not unlocked it.
    SkillLocked(SkillId),
    /// The resolver refused the turn; retryable.
    Rejected(UseSkillError),
}

/// Errors from buying at a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    NotEnoughMoney,
    Inventory(InventoryError),
}

/// Resolves special unlock requirements from session state: key items in
/// the inventory, finished tutorials, and level milestones.
struct SessionRequirements<'a> {
    character: &'a Character,
    inventory: &'a Inventory,
}

impl RequirementResolver for SessionRequirements<'_> {
    fn is_satisfied(&self, requirement: &str) -> bool {
        match requirement {
            "reach_level_30" => self.character.level >= 30,
            "has_business_license" => self.inventory.has_item("business_license"),
            "has_vip_card" => self.inventory.has_item("vip_card"),
            other => other
                .strip_prefix("tutorial:")
                .is_some_and(|id| self.character.is_tutorial_completed(id)),
        }
    }
}

/// One player's complete game state and the operations that drive it.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub character_id: String,
    pub character_name: String,
    pub character: Character,
    pub skills: SkillBook,
    pub inventory: Inventory,
    pub combat: CombatResolver,
    pub encounters: EncounterHistory,
    pub last_save_time: i64,
}

impl GameSession {
    /// A fresh session for a new player.
    pub fn new(character_name: String, created_at: i64) -> Self {
        Self {
            character_id: uuid::Uuid::new_v4().to_string(),
            character_name,
            character: Character::new(),
            skills: SkillBook::new(),
            inventory: Inventory::new(),
            combat: CombatResolver::new(),
            encounters: EncounterHistory::new(),
            last_save_time: created_at,
        }
    }

    // === Encounters ===

    /// Starts a negotiation against a specific customer template.
    pub fn begin_encounter(&mut self, opponent_id: u32) -> Result<Opponent, SessionError> {
        let template =
            get_opponent(opponent_id).ok_or(SessionError::UnknownOpponent(opponent_id))?;
        let snapshot = self.combat.start_combat(&template);
        self.encounters.record(template.id);
        Ok(snapshot)
    }

    /// Starts a negotiation against a random customer from a location's
    /// pool, weighted by level fit, difficulty and encounter history.
    pub fn begin_random_encounter(
        &mut self,
        location_id: &str,
        rng: &mut impl Rng,
    ) -> Result<Opponent, SessionError> {
        let location = get_location(location_id).ok_or(SessionError::NoCandidates)?;
        let template =
            pick_random_opponent(location.tier, self.character.level, &self.encounters, rng)
                .ok_or(SessionError::NoCandidates)?;
        let snapshot = self.combat.start_combat(&template);
        self.encounters.record(template.id);
        Ok(snapshot)
    }

    /// Resolves one skill use at the caller-supplied time.
    pub fn use_skill(
        &mut self,
        skill_id: SkillId,
        now: f64,
        rng: &mut impl Rng,
    ) -> Result<TurnResult, TurnError> {
        let def = get_skill(skill_id).ok_or(TurnError::UnknownSkill(skill_id))?;
        if !self.skill_available(&def) {
            return Err(TurnError::SkillLocked(skill_id));
        }

        let stats = def.stats_at_level(self.skills.level(skill_id));
        let result = self
            .combat
            .use_skill(skill_id, &stats, &mut self.character, now, rng)
            .map_err(TurnError::Rejected)?;

        self.character.skills_used += 1;
        self.skills.record_usage(skill_id, result.hit);
        Ok(result)
    }

    /// Advances buff durations by one turn. Call once per resolved turn.
    pub fn end_turn(&mut self) {
        self.combat.update_buffs();
    }

    /// Checks for a finished negotiation and applies the consequences.
    ///
    /// On victory the reward bundle is applied here: money and experience
    /// to the character, items to the inventory. Reward items that do not
    /// fit (full slots, stack caps) are discarded, mirroring a market
    /// stall with no room for more stock. Defeats only update statistics.
    pub fn resolve_outcome(&mut self, rng: &mut impl Rng) -> CombatOutcome {
        let outcome = self.combat.check_combat_end(&self.character, rng);
        match &outcome {
            CombatOutcome::Victory { rewards } => {
                if rewards.money > 0 {
                    let _ = self.character.add_money(rewards.money);
                }
                self.character.add_experience(rewards.experience);
                for item_id in &rewards.items {
                    let _ = self.inventory.add_item(item_id, 1);
                }
                self.character.record_battle(true);
            }
            CombatOutcome::DefeatEndurance
            | CombatOutcome::DefeatStress
            | CombatOutcome::DefeatOpponentStrong => {
                self.character.record_battle(false);
            }
            CombatOutcome::Continue => {}
        }
        outcome
    }

    /// Cooldown readout for a skill at the caller-supplied time.
    pub fn cooldown_state(&self, skill_id: SkillId, now: f64) -> CooldownState {
        self.combat.get_cooldown_state(skill_id, now)
    }

    /// Discards any in-progress combat state.
    pub fn reset_combat(&mut self) {
        self.combat.reset();
    }

    // === Items ===

    /// Uses one unit of an owned item.
    pub fn use_item(&mut self, item_id: &str) -> Result<ItemUseOutcome, InventoryError> {
        items::use_item(&mut self.inventory, item_id, &mut self.character, &mut self.combat)
    }

    /// Buys an item from a vendor at its catalog price. The wallet is
    /// only debited once the item has a place in the inventory.
    pub fn buy_item(&mut self, item_id: &str) -> Result<(), PurchaseError> {
        let def = get_item(item_id)
            .ok_or_else(|| PurchaseError::Inventory(InventoryError::UnknownItem(item_id.into())))?;
        if self.character.money < def.price {
            return Err(PurchaseError::NotEnoughMoney);
        }
        self.inventory
            .add_item(item_id, 1)
            .map_err(PurchaseError::Inventory)?;
        if def.price > 0 {
            let _ = self.character.spend_money(def.price);
        }
        Ok(())
    }

    // === Availability ===

    pub fn skill_available(&self, def: &SkillDef) -> bool {
        let resolver = SessionRequirements {
            character: &self.character,
            inventory: &self.inventory,
        };
        is_skill_available(
            def,
            self.character.level,
            &self.character.unlocked_skills,
            &resolver,
        )
    }

    pub fn location_available(&self, def: &LocationDef) -> bool {
        let resolver = SessionRequirements {
            character: &self.character,
            inventory: &self.inventory,
        };
        is_location_available(
            def,
            self.character.level,
            &self.character.unlocked_locations,
            &resolver,
        )
    }

    /// All locations currently open to this character.
    pub fn available_locations(&self) -> Vec<LocationDef> {
        get_all_locations()
            .into_iter()
            .filter(|l| self.location_available(l))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn seeded_rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(42)
    }

    fn new_session() -> GameSession {
        GameSession::new("Test Seller".to_string(), 0)
    }

    #[test]
    fn test_new_session_defaults() {
        let session = new_session();
        assert_eq!(session.character.level, 1);
        assert!(!session.combat.is_active());
        assert!(!session.character_id.is_empty());
    }

    #[test]
    fn test_begin_encounter_unknown_opponent_fails_loudly() {
        let mut session = new_session();
        assert_eq!(
            session.begin_encounter(999).unwrap_err(),
            SessionError::UnknownOpponent(999)
        );
    }

    #[test]
    fn test_begin_encounter_records_history() {
        let mut session = new_session();
        session.begin_encounter(1).unwrap();
        assert_eq!(session.encounters.count(1), 1);
        assert!(session.combat.is_active());
    }

    #[test]
    fn test_use_skill_unknown_id() {
        let mut session = new_session();
        session.begin_encounter(1).unwrap();
        let mut rng = seeded_rng();
        assert_eq!(
            session.use_skill(999, 0.0, &mut rng).unwrap_err(),
            TurnError::UnknownSkill(999)
        );
    }

    #[test]
    fn test_use_skill_locked_for_low_level() {
        let mut session = new_session();
        session.begin_encounter(1).unwrap();
        let mut rng = seeded_rng();
        // Skill 6 unlocks at level 15.
        assert_eq!(
            session.use_skill(6, 0.0, &mut rng).unwrap_err(),
            TurnError::SkillLocked(6)
        );
    }

    #[test]
    fn test_use_skill_outside_combat_rejected() {
        let mut session = new_session();
        let mut rng = seeded_rng();
        assert_eq!(
            session.use_skill(1, 0.0, &mut rng).unwrap_err(),
            TurnError::Rejected(UseSkillError::CombatNotActive)
        );
    }

    #[test]
    fn test_use_skill_updates_statistics() {
        let mut session = new_session();
        session.begin_encounter(1).unwrap();
        let mut rng = seeded_rng();
        session.use_skill(1, 0.0, &mut rng).unwrap();
        assert_eq!(session.character.skills_used, 1);
        assert_eq!(session.skills.usage(1).total_uses, 1);
    }

    #[test]
    fn test_random_encounter_from_basic_location() {
        let mut session = new_session();
        let mut rng = seeded_rng();
        let opponent = session.begin_random_encounter("products", &mut rng).unwrap();
        // The basic pool holds customers 1-3 only.
        assert!(opponent.id <= 3);
        assert!(session.combat.is_active());
    }

    #[test]
    fn test_buy_item_spends_money() {
        let mut session = new_session();
        session.buy_item("energy_drink").unwrap();
        assert_eq!(session.character.money, 50);
        assert!(session.inventory.has_item("energy_drink"));
    }

    #[test]
    fn test_buy_item_insufficient_funds() {
        let mut session = new_session();
        session.character.money = 10;
        assert!(session.buy_item("energy_drink").is_err());
        assert_eq!(session.character.money, 10);
    }

    #[test]
    fn test_requirement_resolver_sees_key_items() {
        let mut session = new_session();
        let depot = get_location("wholesale_depot").unwrap();
        assert!(!session.location_available(&depot));
        session.inventory.add_item("business_license", 1).unwrap();
        assert!(session.location_available(&depot));
    }

    #[test]
    fn test_requirement_resolver_sees_tutorials() {
        let session = new_session();
        let resolver = SessionRequirements {
            character: &session.character,
            inventory: &session.inventory,
        };
        assert!(!resolver.is_satisfied("tutorial:first_sale"));

        let mut session = new_session();
        session.character.complete_tutorial("first_sale");
        let resolver = SessionRequirements {
            character: &session.character,
            inventory: &session.inventory,
        };
        assert!(resolver.is_satisfied("tutorial:first_sale"));
        assert!(!resolver.is_satisfied("something_unknown"));
    }

    #[test]
    fn test_available_locations_grow_with_level() {
        let mut session = new_session();
        let before = session.available_locations().len();
        session.character.add_experience(100); // level 2 unlocks electronics
        let after = session.available_locations().len();
        assert!(after > before);
    }

    #[test]
    fn test_defeat_records_loss_without_rewards() {
        let mut session = new_session();
        session.begin_encounter(1).unwrap();
        let mut rng = seeded_rng();
        let starting_money = session.character.money;

        session.character.endurance = 0;
        let outcome = session.resolve_outcome(&mut rng);
        assert_eq!(outcome, CombatOutcome::DefeatEndurance);
        assert_eq!(session.character.battles_lost, 1);
        assert_eq!(session.character.money, starting_money);
        assert!(!session.combat.is_active());
    }

    #[test]
    fn test_first_turn_outcome_matches_roll() {
        let mut session = new_session();
        session.begin_encounter(1).unwrap();
        let mut rng = seeded_rng();
        let result = session.use_skill(1, 0.0, &mut rng).unwrap();
        session.end_turn();
        let outcome = session.resolve_outcome(&mut rng);
        if result.hit {
            // A landed pitch leaves the customer short of full resolve.
            assert_eq!(outcome, CombatOutcome::Continue);
            assert!(session.combat.is_active());
        } else {
            // A first-pitch miss lets the customer recover to full resolve
            // and walk away on their own terms.
            assert_eq!(outcome, CombatOutcome::DefeatOpponentStrong);
            assert!(!session.combat.is_active());
        }
    }
}
