//! Core domain types for Ascend.
//!
//! This module defines the fundamental types used throughout the system:
//! - The RPG character and its tiers
//! - Exercises, sets and their properties
//! - Equipment and the equipment inventory
//! - Workout sessions and their flat summaries

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Character Types
// ============================================================================

/// Coarse classification of character level, used for theming and titles
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CharacterTier {
    Beginner,
    Intermediate,
    Advanced,
    Elite,
    Legendary,
}

impl CharacterTier {
    /// Derive the tier from a level. Bands are inclusive:
    /// 1-25, 26-50, 51-75, 76-100, 101+.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=25 => CharacterTier::Beginner,
            26..=50 => CharacterTier::Intermediate,
            51..=75 => CharacterTier::Advanced,
            76..=100 => CharacterTier::Elite,
            _ => CharacterTier::Legendary,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterTier::Beginner => "Novice",
            CharacterTier::Intermediate => "Warrior",
            CharacterTier::Advanced => "Champion",
            CharacterTier::Elite => "Elite Beast",
            CharacterTier::Legendary => "Shadow Monarch",
        }
    }
}

impl fmt::Display for CharacterTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The player's character
///
/// `level` is always derived from `experience`; see
/// [`crate::progression::level_for_experience`]. Values are only ever replaced
/// through the progression functions, never edited in place.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub level: u32,
    pub experience: u64,
    pub strength: u32,
    pub endurance: u32,
    pub total_weight_lifted: f64,
    pub created_at: DateTime<Utc>,
}

impl Character {
    pub fn new() -> Self {
        Self {
            level: 1,
            experience: 0,
            strength: 0,
            endurance: 0,
            total_weight_lifted: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn tier(&self) -> CharacterTier {
        CharacterTier::for_level(self.level)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Muscle groups targeted by an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Shoulders,
    Triceps,
    Back,
    Biceps,
    Forearms,
    Core,
    Quadriceps,
    Hamstrings,
    Glutes,
    Calves,
    FullBody,
}

/// Intrinsic difficulty of an exercise variant
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Movement pattern classification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Compound,
    Isolation,
    Power,
    Cardio,
}

/// One prescribed set, plus what was actually performed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub target_reps: u32,
    pub target_weight: Option<f64>,
    pub rest_seconds: u32,
    #[serde(default)]
    pub actual_reps: Option<u32>,
    #[serde(default)]
    pub actual_weight: Option<f64>,
}

impl ExerciseSet {
    pub fn new(target_reps: u32, rest_seconds: u32) -> Self {
        Self {
            target_reps,
            target_weight: None,
            rest_seconds,
            actual_reps: None,
            actual_weight: None,
        }
    }

    pub fn is_performed(&self) -> bool {
        self.actual_reps.is_some()
    }

    /// Weight moved in this set (reps × load); bodyweight sets count as zero
    pub fn volume(&self) -> f64 {
        match (self.actual_reps, self.actual_weight) {
            (Some(reps), Some(weight)) => reps as f64 * weight,
            _ => 0.0,
        }
    }
}

/// A generated exercise instance
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub muscle_groups: Vec<MuscleGroup>,
    pub equipment: Vec<EquipmentKind>,
    pub sets: Vec<ExerciseSet>,
    pub instructions: String,
    pub difficulty: Difficulty,
    pub movement_type: MovementType,
}

impl Exercise {
    /// Record the reps (and optional load) actually performed for one set
    pub fn record_set(&mut self, index: usize, reps: u32, weight: Option<f64>) -> Result<()> {
        if let Some(w) = weight {
            validate_weight(w)?;
        }

        let set_count = self.sets.len();
        let set = self.sets.get_mut(index).ok_or_else(|| {
            Error::Validation(format!(
                "set index {} out of range for '{}' ({} sets)",
                index, self.name, set_count
            ))
        })?;

        set.actual_reps = Some(reps);
        set.actual_weight = weight;
        tracing::debug!("Recorded set {} of {}: {} reps", index + 1, self.name, reps);
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.sets.iter().any(ExerciseSet::is_performed)
    }

    pub fn is_bodyweight(&self) -> bool {
        self.equipment.iter().all(|e| *e == EquipmentKind::Bodyweight)
    }
}

/// Reject weights that would corrupt cumulative totals
pub fn validate_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::Validation(format!(
            "weight must be a non-negative number, got {}",
            weight
        )));
    }
    Ok(())
}

// ============================================================================
// Workout Types
// ============================================================================

/// Workout day category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutDay {
    UpperPush,
    LowerPower,
    UpperPull,
    FullBody,
}

impl WorkoutDay {
    pub const ALL: [WorkoutDay; 4] = [
        WorkoutDay::UpperPush,
        WorkoutDay::LowerPower,
        WorkoutDay::UpperPull,
        WorkoutDay::FullBody,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutDay::UpperPush => "Upper Body Push",
            WorkoutDay::LowerPower => "Lower Body Power",
            WorkoutDay::UpperPull => "Upper Body Pull",
            WorkoutDay::FullBody => "Full Body",
        }
    }
}

/// Trainee fitness level used to scale sets, reps and rest
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// A performed workout, as persisted to the session log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub day: WorkoutDay,
    pub level: FitnessLevel,
    pub performed_at: DateTime<Utc>,
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub xp_awarded: u64,
}

impl WorkoutSession {
    pub fn new(day: WorkoutDay, level: FitnessLevel, exercises: Vec<Exercise>) -> Self {
        Self {
            id: Uuid::new_v4(),
            day,
            level,
            performed_at: Utc::now(),
            exercises,
            xp_awarded: 0,
        }
    }

    /// Total load moved across all performed sets
    pub fn total_weight(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(ExerciseSet::volume)
            .sum()
    }

    /// Number of exercises with at least one performed set
    pub fn completed_exercise_count(&self) -> u32 {
        self.exercises.iter().filter(|e| e.is_completed()).count() as u32
    }

    pub fn summary(&self) -> WorkoutSummary {
        WorkoutSummary {
            id: self.id,
            day: self.day,
            level: self.level,
            performed_at: self.performed_at,
            exercise_count: self.completed_exercise_count(),
            total_weight: self.total_weight(),
            xp_awarded: self.xp_awarded,
        }
    }
}

/// Flat projection of a session for archives and listings
#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutSummary {
    pub id: Uuid,
    pub day: WorkoutDay,
    pub level: FitnessLevel,
    pub performed_at: DateTime<Utc>,
    pub exercise_count: u32,
    pub total_weight: f64,
    pub xp_awarded: u64,
}

// ============================================================================
// Equipment Types
// ============================================================================

/// Equipment identifier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Barbell,
    Dumbbells,
    Kettlebell,
    PullUpBar,
    ResistanceBands,
    CableMachine,
    Bench,
    Bodyweight,
}

impl EquipmentKind {
    pub const ALL: [EquipmentKind; 8] = [
        EquipmentKind::Barbell,
        EquipmentKind::Dumbbells,
        EquipmentKind::Kettlebell,
        EquipmentKind::PullUpBar,
        EquipmentKind::ResistanceBands,
        EquipmentKind::CableMachine,
        EquipmentKind::Bench,
        EquipmentKind::Bodyweight,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentKind::Barbell => "Barbell",
            EquipmentKind::Dumbbells => "Dumbbells",
            EquipmentKind::Kettlebell => "Kettlebell",
            EquipmentKind::PullUpBar => "Pull-up Bar",
            EquipmentKind::ResistanceBands => "Resistance Bands",
            EquipmentKind::CableMachine => "Cable Machine",
            EquipmentKind::Bench => "Bench",
            EquipmentKind::Bodyweight => "Bodyweight",
        }
    }

    pub fn category(&self) -> EquipmentCategory {
        match self {
            EquipmentKind::Barbell | EquipmentKind::Dumbbells | EquipmentKind::Kettlebell => {
                EquipmentCategory::FreeWeights
            }
            EquipmentKind::CableMachine => EquipmentCategory::Machines,
            EquipmentKind::PullUpBar | EquipmentKind::ResistanceBands | EquipmentKind::Bench => {
                EquipmentCategory::Accessories
            }
            EquipmentKind::Bodyweight => EquipmentCategory::Bodyweight,
        }
    }
}

/// Equipment category tag
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    FreeWeights,
    Machines,
    Accessories,
    Bodyweight,
}

/// A piece of equipment and whether the user currently has access to it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub name: String,
    pub kind: EquipmentKind,
    pub category: EquipmentCategory,
    pub available: bool,
}

impl Equipment {
    pub fn new(kind: EquipmentKind, available: bool) -> Self {
        Self {
            name: kind.display_name().to_string(),
            kind,
            category: kind.category(),
            available,
        }
    }

    /// Flip availability; returns the new value
    pub fn toggle(&mut self) -> bool {
        self.available = !self.available;
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench_press() -> Exercise {
        Exercise {
            name: "Barbell Bench Press".into(),
            muscle_groups: vec![MuscleGroup::Chest, MuscleGroup::Triceps],
            equipment: vec![EquipmentKind::Barbell],
            sets: vec![ExerciseSet::new(8, 120), ExerciseSet::new(8, 120)],
            instructions: "Lower to chest, press up".into(),
            difficulty: Difficulty::Intermediate,
            movement_type: MovementType::Compound,
        }
    }

    #[test]
    fn test_tier_band_boundaries() {
        assert_eq!(CharacterTier::for_level(1), CharacterTier::Beginner);
        assert_eq!(CharacterTier::for_level(25), CharacterTier::Beginner);
        assert_eq!(CharacterTier::for_level(26), CharacterTier::Intermediate);
        assert_eq!(CharacterTier::for_level(50), CharacterTier::Intermediate);
        assert_eq!(CharacterTier::for_level(51), CharacterTier::Advanced);
        assert_eq!(CharacterTier::for_level(75), CharacterTier::Advanced);
        assert_eq!(CharacterTier::for_level(76), CharacterTier::Elite);
        assert_eq!(CharacterTier::for_level(100), CharacterTier::Elite);
        assert_eq!(CharacterTier::for_level(101), CharacterTier::Legendary);
        assert_eq!(CharacterTier::for_level(u32::MAX), CharacterTier::Legendary);
    }

    #[test]
    fn test_tier_display_names() {
        assert_eq!(CharacterTier::Beginner.to_string(), "Novice");
        assert_eq!(CharacterTier::Intermediate.to_string(), "Warrior");
        assert_eq!(CharacterTier::Advanced.to_string(), "Champion");
        assert_eq!(CharacterTier::Elite.to_string(), "Elite Beast");
        assert_eq!(CharacterTier::Legendary.to_string(), "Shadow Monarch");
    }

    #[test]
    fn test_new_character() {
        let character = Character::new();
        assert_eq!(character.level, 1);
        assert_eq!(character.experience, 0);
        assert_eq!(character.tier(), CharacterTier::Beginner);
    }

    #[test]
    fn test_record_set_and_volume() {
        let mut exercise = bench_press();
        exercise.record_set(0, 8, Some(60.0)).unwrap();
        exercise.record_set(1, 6, Some(60.0)).unwrap();

        assert!(exercise.is_completed());
        let session = WorkoutSession::new(
            WorkoutDay::UpperPush,
            FitnessLevel::Intermediate,
            vec![exercise],
        );
        assert_eq!(session.total_weight(), 840.0);
        assert_eq!(session.completed_exercise_count(), 1);
    }

    #[test]
    fn test_record_set_rejects_negative_weight() {
        let mut exercise = bench_press();
        let result = exercise.record_set(0, 8, Some(-5.0));
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(!exercise.is_completed());
    }

    #[test]
    fn test_record_set_rejects_bad_index() {
        let mut exercise = bench_press();
        assert!(exercise.record_set(5, 8, None).is_err());
    }

    #[test]
    fn test_unperformed_exercises_not_counted() {
        let session = WorkoutSession::new(
            WorkoutDay::UpperPush,
            FitnessLevel::Beginner,
            vec![bench_press(), bench_press()],
        );
        assert_eq!(session.completed_exercise_count(), 0);
        assert_eq!(session.total_weight(), 0.0);
    }

    #[test]
    fn test_equipment_toggle() {
        let mut barbell = Equipment::new(EquipmentKind::Barbell, false);
        assert_eq!(barbell.category, EquipmentCategory::FreeWeights);
        assert!(barbell.toggle());
        assert!(!barbell.toggle());
    }
}
