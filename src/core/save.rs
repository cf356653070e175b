//! Save data and the save manager.
//!
//! Only durable progress is persisted: character, skill progress,
//! inventory and encounter history. Combat state is ephemeral by design;
//! an opponent or a running cooldown never outlives the process.

#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::items::Inventory;
use crate::opponents::EncounterHistory;
use crate::skills::SkillBook;
use crate::utils::persistence::haggle_dir;

use super::session::GameSession;

pub const SAVE_VERSION: u32 = 1;

/// The on-disk shape of one player's progress.
///
/// When adding fields, use `#[serde(default)]` so older save files keep
/// loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub character_id: String,
    pub character_name: String,
    pub last_save_time: i64,
    pub character: Character,
    pub skills: SkillBook,
    pub inventory: Inventory,
    #[serde(default)]
    pub encounters: EncounterHistory,
}

impl SaveData {
    /// Captures the durable state of a session.
    pub fn from_session(session: &GameSession, saved_at: i64) -> Self {
        Self {
            version: SAVE_VERSION,
            character_id: session.character_id.clone(),
            character_name: session.character_name.clone(),
            last_save_time: saved_at,
            character: session.character.clone(),
            skills: session.skills.clone(),
            inventory: session.inventory.clone(),
            encounters: session.encounters.clone(),
        }
    }

    /// Rebuilds a session. Combat always comes back inactive and cleared.
    pub fn into_session(self) -> GameSession {
        GameSession {
            character_id: self.character_id,
            character_name: self.character_name,
            character: self.character,
            skills: self.skills,
            inventory: self.inventory,
            combat: crate::combat::CombatResolver::new(),
            encounters: self.encounters,
            last_save_time: self.last_save_time,
        }
    }
}

/// Saves and loads sessions under ~/.haggle/.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            save_dir: haggle_dir()?,
        })
    }

    /// A manager rooted at an explicit directory, for tests and tools.
    pub fn with_dir(save_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    fn file_path(&self, character_name: &str) -> PathBuf {
        self.save_dir
            .join(format!("{}.json", sanitize_name(character_name)))
    }

    /// Writes a session's durable state to disk.
    pub fn save_session(&self, session: &GameSession) -> io::Result<()> {
        let data = SaveData::from_session(session, chrono::Utc::now().timestamp());
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.file_path(&session.character_name), json)?;
        Ok(())
    }

    /// Loads a session by character name.
    pub fn load_session(&self, character_name: &str) -> io::Result<GameSession> {
        let json = fs::read_to_string(self.file_path(character_name))?;
        let data: SaveData = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(data.into_session())
    }

    /// Loads a session, falling back to a fresh one when the save file is
    /// missing or unreadable. Corrupt saves never take the game down.
    pub fn load_or_new(&self, character_name: &str, now: i64) -> GameSession {
        self.load_session(character_name)
            .unwrap_or_else(|_| GameSession::new(character_name.to_string(), now))
    }

    /// Deletes a character's save file if present.
    pub fn delete_save(&self, character_name: &str) -> io::Result<()> {
        let path = self.file_path(character_name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_manager(tag: &str) -> SaveManager {
        let dir = std::env::temp_dir().join(format!("haggle_save_test_{tag}"));
        fs::remove_dir_all(&dir).ok();
        SaveManager::with_dir(dir).unwrap()
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Rex Trader"), "Rex_Trader");
        assert_eq!(sanitize_name("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_name("plain-name_1"), "plain-name_1");
    }

    #[test]
    fn test_save_data_excludes_combat() {
        let mut session = GameSession::new("Combatant".to_string(), 0);
        session.begin_encounter(1).unwrap();
        let data = SaveData::from_session(&session, 123);
        let restored = data.into_session();
        assert!(!restored.combat.is_active());
        assert!(restored.combat.opponent().is_none());
    }

    #[test]
    fn test_roundtrip_preserves_progress() {
        let manager = temp_manager("roundtrip");
        let mut session = GameSession::new("Rex".to_string(), 0);
        session.character.add_experience(600);
        session.skills.add_experience(1, 150).unwrap();
        session.inventory.add_item("herbs", 3).unwrap();
        session.encounters.record(2);
        session.character.complete_tutorial("first_sale");

        manager.save_session(&session).unwrap();
        let restored = manager.load_session("Rex").unwrap();

        assert_eq!(restored.character_id, session.character_id);
        assert_eq!(restored.character.level, session.character.level);
        assert_eq!(
            restored.character.unlocked_locations,
            session.character.unlocked_locations
        );
        assert_eq!(restored.skills.level(1), session.skills.level(1));
        assert_eq!(restored.inventory.quantity("herbs"), 3);
        assert_eq!(restored.encounters.count(2), 1);
        assert!(restored.character.is_tutorial_completed("first_sale"));
    }

    #[test]
    fn test_load_missing_falls_back_to_new() {
        let manager = temp_manager("missing");
        let session = manager.load_or_new("Nobody", 7);
        assert_eq!(session.character_name, "Nobody");
        assert_eq!(session.character.level, 1);
        assert_eq!(session.character.endurance, 100);
    }

    #[test]
    fn test_load_corrupt_falls_back_to_new() {
        let manager = temp_manager("corrupt");
        fs::write(manager.file_path("Broken"), "{not valid json").unwrap();
        let session = manager.load_or_new("Broken", 0);
        assert_eq!(session.character.level, 1);
        assert_eq!(session.character.stress_resistance, 100);
    }
}
