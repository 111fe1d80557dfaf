//! Progression engine: experience, levels and tiers.
//!
//! Every operation takes the current [`Character`] by reference and returns a
//! [`ProgressUpdate`] holding the new character plus the events the change
//! produced. Level is always recomputed from total experience:
//!
//! `level = floor(sqrt(experience / 100)) + 1`

use crate::config::ProgressionConfig;
use crate::events::ProgressEvent;
use crate::types::validate_weight;
use crate::{Character, CharacterTier, Error, Result};

/// Experience per "unit" of the level curve
const XP_PER_LEVEL_UNIT: u64 = 100;

/// Result of a progression operation
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressUpdate {
    pub character: Character,
    pub events: Vec<ProgressEvent>,
}

impl ProgressUpdate {
    pub fn tier_changed(&self) -> Option<CharacterTier> {
        self.events.iter().find_map(|e| match e {
            ProgressEvent::TierChanged { to, .. } => Some(*to),
            _ => None,
        })
    }

    pub fn leveled_up(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, ProgressEvent::LevelUp { .. }))
    }
}

/// Floor of the square root, exact for all u64
fn integer_sqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= n) {
        root += 1;
    }
    root
}

/// Level for a total experience value
pub fn level_for_experience(experience: u64) -> u32 {
    let root = integer_sqrt(experience / XP_PER_LEVEL_UNIT);
    u32::try_from(root + 1).unwrap_or(u32::MAX)
}

/// Minimum total experience required to be at `level`
pub fn experience_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    steps.saturating_mul(steps).saturating_mul(XP_PER_LEVEL_UNIT)
}

/// (experience into the current level, experience the level spans)
pub fn progress_to_next_level(character: &Character) -> (u64, u64) {
    let floor = experience_for_level(character.level);
    let ceiling = experience_for_level(character.level.saturating_add(1));
    (
        character.experience.saturating_sub(floor),
        ceiling.saturating_sub(floor),
    )
}

/// Apply `amount` experience and recompute level/tier
pub fn add_experience(character: &Character, amount: u64) -> ProgressUpdate {
    let mut next = character.clone();
    let mut events = Vec::new();

    if amount == 0 {
        tracing::debug!("Ignoring zero experience grant");
        return ProgressUpdate {
            character: next,
            events,
        };
    }

    next.experience = character.experience.saturating_add(amount);
    next.level = level_for_experience(next.experience);

    if next.level > character.level {
        events.push(ProgressEvent::LevelUp {
            from: character.level,
            to: next.level,
        });
    } else if next.level < character.level {
        tracing::warn!(
            "Stored level {} did not match {} XP, corrected to {}",
            character.level,
            character.experience,
            next.level
        );
    }

    // Compared on every path: a stale stored level can move the tier either way
    let old_tier = character.tier();
    let new_tier = next.tier();
    if new_tier != old_tier {
        tracing::info!("Tier transition {} -> {}", old_tier, new_tier);
        events.push(ProgressEvent::TierChanged {
            from: old_tier,
            to: new_tier,
        });
    }

    tracing::debug!(
        "Granted {} XP: total {}, level {}",
        amount,
        next.experience,
        next.level
    );

    ProgressUpdate {
        character: next,
        events,
    }
}

/// Raise strength and grant the strength XP bonus
pub fn add_strength(character: &Character, amount: u32, config: &ProgressionConfig) -> ProgressUpdate {
    let mut raised = character.clone();
    raised.strength = character.strength.saturating_add(amount);
    let bonus = u64::from(amount).saturating_mul(config.strength_xp_multiplier);
    tracing::debug!("Strength +{} ({} bonus XP)", amount, bonus);
    add_experience(&raised, bonus)
}

/// Raise endurance and grant the endurance XP bonus
pub fn add_endurance(character: &Character, amount: u32, config: &ProgressionConfig) -> ProgressUpdate {
    let mut raised = character.clone();
    raised.endurance = character.endurance.saturating_add(amount);
    let bonus = u64::from(amount).saturating_mul(config.endurance_xp_multiplier);
    tracing::debug!("Endurance +{} ({} bonus XP)", amount, bonus);
    add_experience(&raised, bonus)
}

/// Experience earned by a workout
pub fn workout_experience(
    total_weight: f64,
    exercise_count: u32,
    config: &ProgressionConfig,
) -> Result<u64> {
    validate_weight(total_weight)?;
    let from_exercises = u64::from(exercise_count).saturating_mul(config.xp_per_exercise);
    // f64 -> u64 `as` saturates
    let from_weight = (total_weight / config.weight_per_xp).floor() as u64;
    Ok(from_exercises.saturating_add(from_weight))
}

/// Credit a completed workout
///
/// XP = exercise_count × xp_per_exercise + floor(total_weight / weight_per_xp).
/// Negative or non-finite weight is rejected and the character is untouched.
pub fn record_workout(
    character: &Character,
    total_weight: f64,
    exercise_count: u32,
    config: &ProgressionConfig,
) -> Result<ProgressUpdate> {
    let xp = workout_experience(total_weight, exercise_count, config)?;

    let mut lifted = character.clone();
    lifted.total_weight_lifted += total_weight;
    if !lifted.total_weight_lifted.is_finite() {
        return Err(Error::Validation(format!(
            "total weight lifted would overflow ({} + {})",
            character.total_weight_lifted, total_weight
        )));
    }

    let mut update = add_experience(&lifted, xp);
    update.events.insert(
        0,
        ProgressEvent::WorkoutRecorded {
            xp,
            total_weight,
            exercise_count,
        },
    );

    tracing::info!(
        "Recorded workout: {} exercises, {:.1} weight, {} XP (level {})",
        exercise_count,
        total_weight,
        xp,
        update.character.level
    );

    Ok(update)
}
