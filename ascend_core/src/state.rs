//! User state persistence with file locking.
//!
//! This module handles saving and loading the character, equipment inventory
//! and training level with proper file locking to prevent concurrent access
//! issues.

use crate::equipment::Inventory;
use crate::progression::level_for_experience;
use crate::{Character, Config, Error, FitnessLevel, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Everything persisted between runs
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct UserState {
    pub character: Character,
    #[serde(default)]
    pub equipment: Inventory,
    #[serde(default)]
    pub fitness_level: FitnessLevel,
}

impl UserState {
    /// Fresh state seeded from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            character: Character::new(),
            equipment: Inventory::with_available(&config.equipment.available),
            fitness_level: config.training.fitness_level,
        }
    }

    /// Re-derive the level from experience
    ///
    /// Stored files can be edited by hand, so the saved level is never trusted.
    pub fn reconciled(mut self) -> Self {
        let level = level_for_experience(self.character.experience);
        if level != self.character.level {
            tracing::warn!(
                "Stored level {} does not match {} XP, using level {}",
                self.character.level,
                self.character.experience,
                level
            );
            self.character.level = level;
        }
        self
    }
}

/// Loads and saves [`UserState`]
pub trait CharacterStore {
    fn load(&self) -> Result<UserState>;
    fn save(&self, state: &UserState) -> Result<()>;
    /// Remove all stored state
    fn reset(&self) -> Result<()>;
    /// Whether anything has been saved yet
    fn has_state(&self) -> bool;
}

/// JSON file store with shared/exclusive locks and atomic replace
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CharacterStore for JsonFileStore {
    /// Returns default state if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns default state.
    fn load(&self) -> Result<UserState> {
        let path = &self.path;
        if !path.exists() {
            tracing::info!("No state file found, starting a new character");
            return Ok(UserState::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(UserState::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(UserState::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(UserState::default());
        }

        file.unlock()?;

        match serde_json::from_str::<UserState>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded user state from {:?}", path);
                Ok(state.reconciled())
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(UserState::default())
            }
        }
    }

    /// Atomically writes state by writing a temp file, syncing it and
    /// renaming it over the original.
    fn save(&self, state: &UserState) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::State(format!("state path {:?} has no parent", self.path)))?;
        std::fs::create_dir_all(parent)?;

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(parent)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(state)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved user state to {:?}", self.path);
        Ok(())
    }

    fn has_state(&self) -> bool {
        self.path.exists()
    }

    fn reset(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            tracing::info!("Removed state file {:?}", self.path);
        }
        Ok(())
    }
}

/// In-memory store, shareable between handles
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<Option<UserState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: UserState) -> Self {
        Self {
            state: Arc::new(Mutex::new(Some(state))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<UserState>>> {
        self.state
            .lock()
            .map_err(|_| Error::State("memory store lock poisoned".into()))
    }
}

impl CharacterStore for MemoryStore {
    fn load(&self) -> Result<UserState> {
        Ok(self.lock()?.clone().unwrap_or_default().reconciled())
    }

    fn save(&self, state: &UserState) -> Result<()> {
        *self.lock()? = Some(state.clone());
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }

    fn has_state(&self) -> bool {
        self.lock().map_or(false, |state| state.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EquipmentKind;

    fn sample_state() -> UserState {
        let mut state = UserState::default();
        state.character.experience = 450;
        state.character.level = 3;
        state.character.strength = 12;
        state.fitness_level = FitnessLevel::Intermediate;
        state.equipment = Inventory::with_available(&[EquipmentKind::Barbell]);
        state
    }

    #[test]
    fn test_from_config_seeds_equipment() {
        let mut config = Config::default();
        config.equipment.available = vec![EquipmentKind::Kettlebell];
        config.training.fitness_level = FitnessLevel::Advanced;

        let state = UserState::from_config(&config);
        assert!(state.equipment.get(EquipmentKind::Kettlebell).unwrap().available);
        assert!(!state.equipment.get(EquipmentKind::Barbell).unwrap().available);
        assert_eq!(state.fitness_level, FitnessLevel::Advanced);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("state.json"));

        let state = sample_state();
        store.save(&state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("nonexistent.json"));

        let state = store.load().unwrap();
        assert_eq!(state.character.level, 1);
        assert_eq!(state.character.experience, 0);
    }

    #[test]
    fn test_load_rederives_stale_level() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let store = JsonFileStore::new(&path);

        let mut state = sample_state();
        state.character.level = 50;
        store.save(&state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.character.level, 3);
        assert_eq!(loaded.character.experience, 450);

        let memory = MemoryStore::with_state(state);
        assert_eq!(memory.load().unwrap().character.level, 3);
    }

    #[test]
    fn test_corrupted_state_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corrupted.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let state = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(state.character.experience, 0);
    }

    #[test]
    fn test_atomic_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("state.json"));

        store.save(&UserState::default()).unwrap();

        // Verify state file exists and no stray temp files remain
        assert!(store.has_state());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "state.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only state.json, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_reset_removes_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("state.json"));

        store.save(&sample_state()).unwrap();
        store.reset().unwrap();
        assert!(!store.has_state());

        // Resetting twice is fine
        store.reset().unwrap();
    }

    #[test]
    fn test_memory_store_shared_between_clones() {
        let store = MemoryStore::new();
        let handle = store.clone();

        let state = sample_state();
        store.save(&state).unwrap();
        assert_eq!(handle.load().unwrap(), state);

        handle.reset().unwrap();
        assert!(!store.has_state());
        let fresh = store.load().unwrap();
        assert_eq!(fresh.character.experience, 0);
        assert_eq!(fresh.fitness_level, FitnessLevel::Beginner);
    }
}
