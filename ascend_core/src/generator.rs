//! Workout generator.
//!
//! Fills each slot of a workout day with the highest-priority variant the
//! available equipment supports, then scales sets, reps and rest by fitness
//! level. Generation is pure: identical inputs always give identical output.

use crate::catalog::{get_default_catalog, Catalog, ExerciseVariant};
use crate::{EquipmentKind, Exercise, ExerciseSet, FitnessLevel, MovementType, WorkoutDay};
use std::collections::HashSet;

/// Set count and rest period for a fitness level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelParameters {
    pub sets: u32,
    pub rest_seconds: u32,
}

pub fn level_parameters(level: FitnessLevel) -> LevelParameters {
    match level {
        FitnessLevel::Beginner => LevelParameters {
            sets: 3,
            rest_seconds: 90,
        },
        FitnessLevel::Intermediate => LevelParameters {
            sets: 4,
            rest_seconds: 120,
        },
        FitnessLevel::Advanced => LevelParameters {
            sets: 5,
            rest_seconds: 150,
        },
    }
}

/// Target reps per set
///
/// Loaded movements drop reps as level rises (heavier work); bodyweight
/// movements add reps instead since load cannot increase.
pub fn target_reps(movement_type: MovementType, bodyweight: bool, level: FitnessLevel) -> u32 {
    use FitnessLevel::*;

    match (movement_type, bodyweight) {
        (MovementType::Cardio, _) => match level {
            Beginner => 20,
            Intermediate => 30,
            Advanced => 40,
        },
        (_, true) => match level {
            Beginner => 10,
            Intermediate => 15,
            Advanced => 20,
        },
        (MovementType::Compound, false) => match level {
            Beginner => 10,
            Intermediate => 8,
            Advanced => 6,
        },
        (MovementType::Isolation, false) => match level {
            Beginner => 12,
            Intermediate => 12,
            Advanced => 10,
        },
        (MovementType::Power, false) => match level {
            Beginner => 8,
            Intermediate => 6,
            Advanced => 5,
        },
    }
}

fn instantiate(variant: &ExerciseVariant, level: FitnessLevel) -> Exercise {
    let params = level_parameters(level);
    let reps = target_reps(variant.movement_type, variant.is_bodyweight(), level);

    Exercise {
        name: variant.name.clone(),
        muscle_groups: variant.muscle_groups.clone(),
        equipment: variant.requires.clone(),
        sets: (0..params.sets)
            .map(|_| ExerciseSet::new(reps, params.rest_seconds))
            .collect(),
        instructions: variant.instructions.clone(),
        difficulty: variant.difficulty,
        movement_type: variant.movement_type,
    }
}

/// Generate a workout from the default catalog
///
/// Always returns one exercise per slot; with no equipment every slot falls
/// back to its bodyweight variant.
pub fn generate_exercises(
    day: WorkoutDay,
    equipment: &[EquipmentKind],
    level: FitnessLevel,
) -> Vec<Exercise> {
    generate_with_catalog(get_default_catalog(), day, equipment, level)
}

/// Generate a workout from a specific catalog
///
/// Slots without any satisfiable variant are skipped with a warning; a
/// catalog that passes `Catalog::validate` never has such slots.
pub fn generate_with_catalog(
    catalog: &Catalog,
    day: WorkoutDay,
    equipment: &[EquipmentKind],
    level: FitnessLevel,
) -> Vec<Exercise> {
    let available: HashSet<EquipmentKind> = equipment.iter().copied().collect();

    let exercises: Vec<Exercise> = catalog
        .slots(day)
        .iter()
        .filter_map(|slot| {
            let chosen = slot.variants.iter().find(|v| v.is_satisfied_by(&available));
            match chosen {
                Some(variant) => {
                    tracing::debug!("Slot '{}' -> {}", slot.role, variant.name);
                    Some(instantiate(variant, level))
                }
                None => {
                    tracing::warn!("No variant for slot '{}' fits available equipment", slot.role);
                    None
                }
            }
        })
        .collect();

    tracing::info!(
        "Generated {} exercises for {} ({:?})",
        exercises.len(),
        day.display_name(),
        level
    );

    exercises
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;

    fn all_equipment() -> Vec<EquipmentKind> {
        EquipmentKind::ALL.to_vec()
    }

    #[test]
    fn test_empty_equipment_gives_bodyweight_workout() {
        let exercises = generate_exercises(WorkoutDay::UpperPush, &[], FitnessLevel::Beginner);

        assert_eq!(exercises.len(), 4);
        for exercise in &exercises {
            assert!(exercise.is_bodyweight(), "{} is not bodyweight", exercise.name);
            assert_eq!(exercise.sets.len(), 3);
            assert!(exercise.sets.iter().all(|s| s.rest_seconds == 90));
        }
    }

    #[test]
    fn test_barbell_has_priority_over_dumbbells() {
        let exercises = generate_exercises(
            WorkoutDay::UpperPush,
            &[EquipmentKind::Barbell, EquipmentKind::Dumbbells],
            FitnessLevel::Advanced,
        );

        let first = &exercises[0];
        assert_eq!(first.name, "Barbell Bench Press");
        assert_eq!(first.equipment, vec![EquipmentKind::Barbell]);
        assert_eq!(first.sets.len(), 5);
        assert!(first.sets.iter().all(|s| s.rest_seconds == 150));
    }

    #[test]
    fn test_intermediate_parameters() {
        let exercises =
            generate_exercises(WorkoutDay::UpperPull, &all_equipment(), FitnessLevel::Intermediate);
        for exercise in &exercises {
            assert_eq!(exercise.sets.len(), 4);
            assert!(exercise.sets.iter().all(|s| s.rest_seconds == 120));
        }
    }

    #[test]
    fn test_partial_equipment_mixes_variants() {
        let exercises = generate_exercises(
            WorkoutDay::UpperPush,
            &[EquipmentKind::Dumbbells],
            FitnessLevel::Beginner,
        );

        let names: Vec<_> = exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Dumbbell Bench Press",
                "Dumbbell Shoulder Press",
                "Dumbbell Overhead Tricep Extension",
                "Dumbbell Lateral Raise",
            ]
        );

        let bands = generate_exercises(
            WorkoutDay::UpperPush,
            &[EquipmentKind::ResistanceBands],
            FitnessLevel::Beginner,
        );
        let names: Vec<_> = bands.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Push-Ups",
                "Pike Push-Ups",
                "Band Tricep Pushdown",
                "Band Lateral Raise",
            ]
        );
    }

    #[test]
    fn test_irrelevant_equipment_is_ignored() {
        let bare = generate_exercises(WorkoutDay::UpperPush, &[], FitnessLevel::Beginner);
        let with_kettlebell = generate_exercises(
            WorkoutDay::UpperPush,
            &[EquipmentKind::Kettlebell, EquipmentKind::Bench],
            FitnessLevel::Beginner,
        );
        assert_eq!(bare, with_kettlebell);
    }

    #[test]
    fn test_multi_requirement_variant() {
        let dumbbells = generate_exercises(
            WorkoutDay::LowerPower,
            &[EquipmentKind::Dumbbells],
            FitnessLevel::Beginner,
        );
        assert_eq!(dumbbells[3].name, "Dumbbell Walking Lunge");

        let with_bench = generate_exercises(
            WorkoutDay::LowerPower,
            &[EquipmentKind::Dumbbells, EquipmentKind::Bench],
            FitnessLevel::Beginner,
        );
        assert_eq!(with_bench[3].name, "Dumbbell Bulgarian Split Squat");
    }

    #[test]
    fn test_generation_is_deterministic() {
        for day in WorkoutDay::ALL {
            let a = generate_exercises(day, &[EquipmentKind::Kettlebell], FitnessLevel::Advanced);
            let b = generate_exercises(day, &[EquipmentKind::Kettlebell], FitnessLevel::Advanced);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_every_combination_is_non_empty() {
        let levels = [
            FitnessLevel::Beginner,
            FitnessLevel::Intermediate,
            FitnessLevel::Advanced,
        ];
        for day in WorkoutDay::ALL {
            for level in levels {
                assert!(!generate_exercises(day, &[], level).is_empty());
                assert!(!generate_exercises(day, &all_equipment(), level).is_empty());
            }
        }
    }

    #[test]
    fn test_rep_scaling() {
        assert_eq!(target_reps(MovementType::Compound, false, FitnessLevel::Beginner), 10);
        assert_eq!(target_reps(MovementType::Compound, false, FitnessLevel::Advanced), 6);
        assert_eq!(target_reps(MovementType::Compound, true, FitnessLevel::Advanced), 20);
        assert_eq!(target_reps(MovementType::Cardio, true, FitnessLevel::Beginner), 20);
    }

    #[test]
    fn test_slot_without_fallback_is_skipped() {
        crate::logging::init_test();

        let mut catalog = build_default_catalog();
        if let Some(slots) = catalog.templates.get_mut(&WorkoutDay::UpperPush) {
            slots[0].variants.pop();
        }

        let exercises =
            generate_with_catalog(&catalog, WorkoutDay::UpperPush, &[], FitnessLevel::Beginner);
        assert_eq!(exercises.len(), 3);
        assert_eq!(exercises[0].name, "Pike Push-Ups");
    }
}
