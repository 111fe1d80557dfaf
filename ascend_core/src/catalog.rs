//! Default catalog of workout templates.
//!
//! Each workout day is an ordered list of exercise slots. A slot lists its
//! variants in equipment priority order; the last variant of every slot
//! needs nothing but bodyweight, so any equipment set can fill it.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// One way to fill a slot, and what it needs
#[derive(Clone, Debug)]
pub struct ExerciseVariant {
    pub name: String,
    pub muscle_groups: Vec<MuscleGroup>,
    pub requires: Vec<EquipmentKind>,
    pub instructions: String,
    pub difficulty: Difficulty,
    pub movement_type: MovementType,
}

impl ExerciseVariant {
    /// Bodyweight is always considered available
    pub fn is_satisfied_by(&self, available: &HashSet<EquipmentKind>) -> bool {
        self.requires
            .iter()
            .all(|kind| *kind == EquipmentKind::Bodyweight || available.contains(kind))
    }

    pub fn is_bodyweight(&self) -> bool {
        self.requires.iter().all(|kind| *kind == EquipmentKind::Bodyweight)
    }
}

/// A named role within a workout day (e.g. "Primary Push")
#[derive(Clone, Debug)]
pub struct ExerciseSlot {
    pub role: String,
    pub variants: Vec<ExerciseVariant>,
}

/// Workout templates for every day
#[derive(Clone, Debug)]
pub struct Catalog {
    pub templates: HashMap<WorkoutDay, Vec<ExerciseSlot>>,
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

fn variant(
    name: &str,
    muscle_groups: &[MuscleGroup],
    requires: &[EquipmentKind],
    difficulty: Difficulty,
    movement_type: MovementType,
    instructions: &str,
) -> ExerciseVariant {
    ExerciseVariant {
        name: name.into(),
        muscle_groups: muscle_groups.to_vec(),
        requires: requires.to_vec(),
        instructions: instructions.into(),
        difficulty,
        movement_type,
    }
}

fn slot(role: &str, variants: Vec<ExerciseVariant>) -> ExerciseSlot {
    ExerciseSlot {
        role: role.into(),
        variants,
    }
}

/// Builds a fresh copy of the default catalog
///
/// Prefer `get_default_catalog()` outside of tests.
pub fn build_default_catalog() -> Catalog {
    use Difficulty::*;
    use EquipmentKind::*;
    use MovementType::*;
    use MuscleGroup::*;

    let mut templates = HashMap::new();

    // ========================================================================
    // Upper Body Push
    // ========================================================================

    templates.insert(
        WorkoutDay::UpperPush,
        vec![
            slot(
                "Primary Push",
                vec![
                    variant(
                        "Barbell Bench Press",
                        &[Chest, Triceps, Shoulders],
                        &[Barbell],
                        Intermediate,
                        Compound,
                        "Lie flat, lower the bar to mid-chest with elbows at 45 degrees, press to lockout.",
                    ),
                    variant(
                        "Dumbbell Bench Press",
                        &[Chest, Triceps, Shoulders],
                        &[Dumbbells],
                        Beginner,
                        Compound,
                        "Press both dumbbells from chest level until arms are straight, lower under control.",
                    ),
                    variant(
                        "Push-Ups",
                        &[Chest, Triceps, Shoulders],
                        &[Bodyweight],
                        Beginner,
                        Compound,
                        "Hands just wider than shoulders, body in a straight line, chest to the floor.",
                    ),
                ],
            ),
            slot(
                "Shoulder Press",
                vec![
                    variant(
                        "Barbell Overhead Press",
                        &[Shoulders, Triceps, Core],
                        &[Barbell],
                        Intermediate,
                        Compound,
                        "Brace the core and press the bar from the front rack to overhead lockout.",
                    ),
                    variant(
                        "Dumbbell Shoulder Press",
                        &[Shoulders, Triceps],
                        &[Dumbbells],
                        Beginner,
                        Compound,
                        "Press the dumbbells from ear height to overhead without arching the back.",
                    ),
                    variant(
                        "Pike Push-Ups",
                        &[Shoulders, Triceps],
                        &[Bodyweight],
                        Intermediate,
                        Compound,
                        "Hips high in an inverted V, lower the head toward the floor and press back up.",
                    ),
                ],
            ),
            slot(
                "Triceps",
                vec![
                    variant(
                        "Dumbbell Overhead Tricep Extension",
                        &[Triceps],
                        &[Dumbbells],
                        Beginner,
                        Isolation,
                        "Hold one dumbbell overhead, lower behind the head keeping elbows in, extend.",
                    ),
                    variant(
                        "Band Tricep Pushdown",
                        &[Triceps],
                        &[ResistanceBands],
                        Beginner,
                        Isolation,
                        "Anchor the band high, pin elbows to your sides and push down to full extension.",
                    ),
                    variant(
                        "Diamond Push-Ups",
                        &[Triceps, Chest],
                        &[Bodyweight],
                        Intermediate,
                        Compound,
                        "Hands together under the chest forming a diamond, lower and press back up.",
                    ),
                ],
            ),
            slot(
                "Lateral Accessory",
                vec![
                    variant(
                        "Cable Lateral Raise",
                        &[Shoulders],
                        &[CableMachine],
                        Beginner,
                        Isolation,
                        "Raise the handle out to the side to shoulder height, lower slowly.",
                    ),
                    variant(
                        "Dumbbell Lateral Raise",
                        &[Shoulders],
                        &[Dumbbells],
                        Beginner,
                        Isolation,
                        "Slight bend in the elbows, raise the dumbbells out to shoulder height.",
                    ),
                    variant(
                        "Band Lateral Raise",
                        &[Shoulders],
                        &[ResistanceBands],
                        Beginner,
                        Isolation,
                        "Stand on the band and raise the handles out to the sides.",
                    ),
                    variant(
                        "Plank Shoulder Taps",
                        &[Shoulders, Core],
                        &[Bodyweight],
                        Beginner,
                        Isolation,
                        "From a high plank, tap each shoulder with the opposite hand without rocking the hips.",
                    ),
                ],
            ),
        ],
    );

    // ========================================================================
    // Lower Body Power
    // ========================================================================

    templates.insert(
        WorkoutDay::LowerPower,
        vec![
            slot(
                "Primary Squat",
                vec![
                    variant(
                        "Barbell Back Squat",
                        &[Quadriceps, Glutes, Hamstrings],
                        &[Barbell],
                        Intermediate,
                        Compound,
                        "Bar on the upper back, sit down between the heels to parallel, drive up.",
                    ),
                    variant(
                        "Dumbbell Goblet Squat",
                        &[Quadriceps, Glutes],
                        &[Dumbbells],
                        Beginner,
                        Compound,
                        "Hold one dumbbell at the chest, squat deep keeping the torso upright.",
                    ),
                    variant(
                        "Kettlebell Goblet Squat",
                        &[Quadriceps, Glutes],
                        &[Kettlebell],
                        Beginner,
                        Compound,
                        "Hold the kettlebell by the horns at the chest, squat deep and stand tall.",
                    ),
                    variant(
                        "Bodyweight Squats",
                        &[Quadriceps, Glutes],
                        &[Bodyweight],
                        Beginner,
                        Compound,
                        "Feet shoulder width, sit back and down to parallel, stand up fully.",
                    ),
                ],
            ),
            slot(
                "Hip Hinge",
                vec![
                    variant(
                        "Barbell Romanian Deadlift",
                        &[Hamstrings, Glutes, Back],
                        &[Barbell],
                        Intermediate,
                        Compound,
                        "Soft knees, push the hips back and slide the bar down the thighs, stand up.",
                    ),
                    variant(
                        "Dumbbell Romanian Deadlift",
                        &[Hamstrings, Glutes],
                        &[Dumbbells],
                        Beginner,
                        Compound,
                        "Hinge at the hips with dumbbells close to the legs until the hamstrings stretch.",
                    ),
                    variant(
                        "Single-Leg Glute Bridge",
                        &[Glutes, Hamstrings],
                        &[Bodyweight],
                        Beginner,
                        Isolation,
                        "On your back, one foot planted, drive the hips up and squeeze the glutes.",
                    ),
                ],
            ),
            slot(
                "Explosive Power",
                vec![
                    variant(
                        "Kettlebell Swing",
                        &[Glutes, Hamstrings, Core],
                        &[Kettlebell],
                        Intermediate,
                        Power,
                        "Hike the bell back and snap the hips forward to float it to chest height.",
                    ),
                    variant(
                        "Dumbbell Jump Squat",
                        &[Quadriceps, Glutes, Calves],
                        &[Dumbbells],
                        Advanced,
                        Power,
                        "Light dumbbells at the sides, quarter squat and jump, land softly.",
                    ),
                    variant(
                        "Jump Squats",
                        &[Quadriceps, Glutes, Calves],
                        &[Bodyweight],
                        Intermediate,
                        Power,
                        "Squat to parallel and explode upward, land softly and reset.",
                    ),
                ],
            ),
            slot(
                "Single-Leg",
                vec![
                    variant(
                        "Dumbbell Bulgarian Split Squat",
                        &[Quadriceps, Glutes],
                        &[Dumbbells, Bench],
                        Intermediate,
                        Compound,
                        "Rear foot on the bench, dumbbells at the sides, lower the back knee toward the floor.",
                    ),
                    variant(
                        "Dumbbell Walking Lunge",
                        &[Quadriceps, Glutes, Hamstrings],
                        &[Dumbbells],
                        Beginner,
                        Compound,
                        "Step forward into a lunge, drive through the front heel into the next step.",
                    ),
                    variant(
                        "Reverse Lunges",
                        &[Quadriceps, Glutes],
                        &[Bodyweight],
                        Beginner,
                        Compound,
                        "Step back and lower the rear knee toward the floor, return to standing.",
                    ),
                ],
            ),
        ],
    );

    // ========================================================================
    // Upper Body Pull
    // ========================================================================

    templates.insert(
        WorkoutDay::UpperPull,
        vec![
            slot(
                "Vertical Pull",
                vec![
                    variant(
                        "Pull-Ups",
                        &[Back, Biceps],
                        &[PullUpBar],
                        Intermediate,
                        Compound,
                        "Dead hang, pull until the chin clears the bar, lower all the way down.",
                    ),
                    variant(
                        "Lat Pulldown",
                        &[Back, Biceps],
                        &[CableMachine],
                        Beginner,
                        Compound,
                        "Pull the bar to the upper chest leading with the elbows, control the return.",
                    ),
                    variant(
                        "Doorway Rows",
                        &[Back, Biceps],
                        &[Bodyweight],
                        Beginner,
                        Compound,
                        "Grip a sturdy door frame, lean back with straight body and pull yourself in.",
                    ),
                ],
            ),
            slot(
                "Horizontal Row",
                vec![
                    variant(
                        "Barbell Bent-Over Row",
                        &[Back, Biceps],
                        &[Barbell],
                        Intermediate,
                        Compound,
                        "Hinge to 45 degrees, row the bar to the lower ribs, lower with control.",
                    ),
                    variant(
                        "Dumbbell One-Arm Row",
                        &[Back, Biceps],
                        &[Dumbbells],
                        Beginner,
                        Compound,
                        "Brace one hand on a support, row the dumbbell to the hip.",
                    ),
                    variant(
                        "Band Seated Row",
                        &[Back, Biceps],
                        &[ResistanceBands],
                        Beginner,
                        Compound,
                        "Loop the band around the feet, row the handles to the torso squeezing the shoulder blades.",
                    ),
                    variant(
                        "Superman Pulls",
                        &[Back],
                        &[Bodyweight],
                        Beginner,
                        Isolation,
                        "Lie face down, lift chest and arms, pull the elbows down to the ribs.",
                    ),
                ],
            ),
            slot(
                "Rear Delts",
                vec![
                    variant(
                        "Cable Face Pull",
                        &[Shoulders, Back],
                        &[CableMachine],
                        Beginner,
                        Isolation,
                        "Rope at face height, pull toward the forehead and spread the hands apart.",
                    ),
                    variant(
                        "Band Pull-Apart",
                        &[Shoulders, Back],
                        &[ResistanceBands],
                        Beginner,
                        Isolation,
                        "Arms straight in front, pull the band apart until it touches the chest.",
                    ),
                    variant(
                        "Dumbbell Reverse Fly",
                        &[Shoulders, Back],
                        &[Dumbbells],
                        Beginner,
                        Isolation,
                        "Hinge forward and raise the dumbbells out to the sides, squeeze the shoulder blades.",
                    ),
                    variant(
                        "Reverse Snow Angels",
                        &[Shoulders, Back],
                        &[Bodyweight],
                        Beginner,
                        Isolation,
                        "Face down, sweep the arms from the hips to overhead keeping them off the floor.",
                    ),
                ],
            ),
            slot(
                "Biceps",
                vec![
                    variant(
                        "Barbell Curl",
                        &[Biceps, Forearms],
                        &[Barbell],
                        Beginner,
                        Isolation,
                        "Elbows pinned at the sides, curl the bar to the shoulders without swinging.",
                    ),
                    variant(
                        "Dumbbell Hammer Curl",
                        &[Biceps, Forearms],
                        &[Dumbbells],
                        Beginner,
                        Isolation,
                        "Neutral grip, curl the dumbbells up and lower slowly.",
                    ),
                    variant(
                        "Band Curl",
                        &[Biceps],
                        &[ResistanceBands],
                        Beginner,
                        Isolation,
                        "Stand on the band and curl the handles to the shoulders.",
                    ),
                    variant(
                        "Towel Isometric Curl",
                        &[Biceps, Forearms],
                        &[Bodyweight],
                        Beginner,
                        Isolation,
                        "Stand on a towel and curl against it as hard as possible for each rep.",
                    ),
                ],
            ),
        ],
    );

    // ========================================================================
    // Full Body
    // ========================================================================

    templates.insert(
        WorkoutDay::FullBody,
        vec![
            slot(
                "Total-Body Pull",
                vec![
                    variant(
                        "Barbell Deadlift",
                        &[FullBody, Back, Hamstrings, Glutes],
                        &[Barbell],
                        Advanced,
                        Compound,
                        "Bar over midfoot, flat back, push the floor away and lock out the hips.",
                    ),
                    variant(
                        "Dumbbell Deadlift",
                        &[Back, Hamstrings, Glutes],
                        &[Dumbbells],
                        Beginner,
                        Compound,
                        "Dumbbells at the sides, hinge and stand tall driving through the heels.",
                    ),
                    variant(
                        "Kettlebell Deadlift",
                        &[Back, Hamstrings, Glutes],
                        &[Kettlebell],
                        Beginner,
                        Compound,
                        "Bell between the feet, hinge to grip it and stand up with a neutral spine.",
                    ),
                    variant(
                        "Good Mornings",
                        &[Hamstrings, Glutes, Back],
                        &[Bodyweight],
                        Beginner,
                        Compound,
                        "Hands behind the head, hinge at the hips until the torso is near parallel.",
                    ),
                ],
            ),
            slot(
                "Squat to Press",
                vec![
                    variant(
                        "Barbell Thruster",
                        &[FullBody, Quadriceps, Shoulders],
                        &[Barbell],
                        Advanced,
                        Power,
                        "Front squat the bar and use the drive out of the hole to press it overhead.",
                    ),
                    variant(
                        "Dumbbell Thruster",
                        &[FullBody, Quadriceps, Shoulders],
                        &[Dumbbells],
                        Intermediate,
                        Power,
                        "Dumbbells on the shoulders, squat and press overhead in one motion.",
                    ),
                    variant(
                        "Burpees",
                        &[FullBody],
                        &[Bodyweight],
                        Intermediate,
                        Cardio,
                        "Squat, kick back to a plank, push-up, jump the feet in and leap up.",
                    ),
                ],
            ),
            slot(
                "Loaded Carry",
                vec![
                    variant(
                        "Dumbbell Farmer's Carry",
                        &[Forearms, Core, Back],
                        &[Dumbbells],
                        Beginner,
                        Compound,
                        "Heavy dumbbells at the sides, walk tall with short quick steps.",
                    ),
                    variant(
                        "Kettlebell Suitcase Carry",
                        &[Core, Forearms],
                        &[Kettlebell],
                        Beginner,
                        Compound,
                        "One bell in one hand, walk without leaning toward it. Switch hands each set.",
                    ),
                    variant(
                        "Bear Crawl",
                        &[FullBody, Core, Shoulders],
                        &[Bodyweight],
                        Beginner,
                        Compound,
                        "Knees hovering an inch off the floor, crawl forward moving opposite hand and foot.",
                    ),
                ],
            ),
            slot(
                "Conditioning",
                vec![
                    variant(
                        "Kettlebell Clean and Press",
                        &[FullBody, Shoulders],
                        &[Kettlebell],
                        Intermediate,
                        Power,
                        "Clean the bell to the rack position, press overhead, lower and repeat.",
                    ),
                    variant(
                        "Dumbbell Snatch",
                        &[FullBody, Shoulders, Glutes],
                        &[Dumbbells],
                        Advanced,
                        Power,
                        "Drive the dumbbell from the floor to overhead in one explosive pull.",
                    ),
                    variant(
                        "Mountain Climbers",
                        &[Core, FullBody],
                        &[Bodyweight],
                        Beginner,
                        Cardio,
                        "From a high plank, drive the knees to the chest alternately at pace.",
                    ),
                ],
            ),
        ],
    );

    Catalog { templates }
}

impl Catalog {
    /// Slots for a day, in workout order
    pub fn slots(&self, day: WorkoutDay) -> &[ExerciseSlot] {
        self.templates
            .get(&day)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for day in WorkoutDay::ALL {
            let slots = self.slots(day);
            if slots.is_empty() {
                errors.push(format!("Workout day {:?} has no exercise slots", day));
            }

            for slot in slots {
                if slot.role.is_empty() {
                    errors.push(format!("{:?} has a slot with empty role", day));
                }

                if slot.variants.is_empty() {
                    errors.push(format!("{:?} slot '{}' has no variants", day, slot.role));
                    continue;
                }

                for v in &slot.variants {
                    if v.name.is_empty() {
                        errors.push(format!(
                            "{:?} slot '{}' has a variant with empty name",
                            day, slot.role
                        ));
                    }
                    if v.requires.is_empty() {
                        errors.push(format!(
                            "Variant '{}' lists no equipment (use bodyweight)",
                            v.name
                        ));
                    }
                    if v.muscle_groups.is_empty() {
                        errors.push(format!("Variant '{}' targets no muscle groups", v.name));
                    }
                }

                let has_fallback = slot.variants.last().map_or(false, |v| v.is_bodyweight());
                if !has_fallback {
                    errors.push(format!(
                        "{:?} slot '{}' has no bodyweight fallback as its last variant",
                        day, slot.role
                    ));
                }
            }
        }

        errors
    }
}
