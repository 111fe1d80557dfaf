//! Tracker: the explicit handle tying state, progression and events together.
//!
//! Construct it with a store and an event bus, call the `apply_*` methods as
//! the user trains, and `close()` it to persist the final state.

use crate::config::ProgressionConfig;
use crate::events::{EventBus, ProgressEvent};
use crate::progression::{self, ProgressUpdate};
use crate::state::{CharacterStore, UserState};
use crate::wal::SessionSink;
use crate::{Character, Result, WorkoutSession};

pub struct Tracker<S: CharacterStore> {
    store: S,
    bus: EventBus,
    config: ProgressionConfig,
    state: UserState,
}

impl<S: CharacterStore> Tracker<S> {
    /// Load state from `store`
    pub fn open(store: S, bus: EventBus, config: ProgressionConfig) -> Result<Self> {
        Self::open_or_else(store, bus, config, UserState::default)
    }

    /// Load state from `store`, or start from `seed()` if nothing is saved
    ///
    /// A seeded state is not written until the first change or `close()`.
    pub fn open_or_else<F>(store: S, bus: EventBus, config: ProgressionConfig, seed: F) -> Result<Self>
    where
        F: FnOnce() -> UserState,
    {
        let state = if store.has_state() {
            store.load()?
        } else {
            tracing::info!("No saved progress, starting a new character");
            seed()
        };
        tracing::debug!(
            "Tracker opened at level {} ({} XP)",
            state.character.level,
            state.character.experience
        );
        Ok(Self {
            store,
            bus,
            config,
            state,
        })
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn character(&self) -> &Character {
        &self.state.character
    }

    /// Replace the whole state (e.g. after editing equipment) and persist it
    pub fn replace_state(&mut self, state: UserState) -> Result<()> {
        self.store.save(&state)?;
        self.state = state;
        Ok(())
    }

    /// Save the updated character
    fn persist(&mut self, update: &ProgressUpdate) -> Result<()> {
        let mut next = self.state.clone();
        next.character = update.character.clone();
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }

    /// Persist the update, then dispatch its events
    fn commit(&mut self, update: ProgressUpdate) -> Result<Vec<ProgressEvent>> {
        self.persist(&update)?;
        self.bus.dispatch(&update.events);
        Ok(update.events)
    }

    pub fn apply_experience(&mut self, amount: u64) -> Result<Vec<ProgressEvent>> {
        let update = progression::add_experience(&self.state.character, amount);
        self.commit(update)
    }

    pub fn apply_strength(&mut self, amount: u32) -> Result<Vec<ProgressEvent>> {
        let update = progression::add_strength(&self.state.character, amount, &self.config);
        self.commit(update)
    }

    pub fn apply_endurance(&mut self, amount: u32) -> Result<Vec<ProgressEvent>> {
        let update = progression::add_endurance(&self.state.character, amount, &self.config);
        self.commit(update)
    }

    pub fn apply_workout(
        &mut self,
        total_weight: f64,
        exercise_count: u32,
    ) -> Result<Vec<ProgressEvent>> {
        let update = progression::record_workout(
            &self.state.character,
            total_weight,
            exercise_count,
            &self.config,
        )?;
        self.commit(update)
    }

    /// Credit a performed session and append it to history
    ///
    /// The session's `xp_awarded` is filled in before it is written. The
    /// character is saved first, so a failed save leaves history untouched;
    /// events are dispatched only once both writes succeed.
    pub fn complete_workout(
        &mut self,
        mut session: WorkoutSession,
        sink: &mut dyn SessionSink,
    ) -> Result<(WorkoutSession, Vec<ProgressEvent>)> {
        let total_weight = session.total_weight();
        let exercise_count = session.completed_exercise_count();

        let mut update = progression::record_workout(
            &self.state.character,
            total_weight,
            exercise_count,
            &self.config,
        )?;

        session.xp_awarded = update.character.experience - self.state.character.experience;
        update.events.push(ProgressEvent::WorkoutCompleted {
            session_id: session.id,
            day: session.day,
        });

        self.persist(&update)?;
        sink.append(&session)?;

        self.bus.dispatch(&update.events);
        Ok((session, update.events))
    }

    /// Wipe all stored progress and start over
    pub fn reset(&mut self, fresh: UserState) -> Result<()> {
        self.store.reset()?;
        self.state = fresh;
        tracing::info!("Progress reset");
        Ok(())
    }

    /// Save and hand back the final state
    pub fn close(self) -> Result<UserState> {
        self.store.save(&self.state)?;
        Ok(self.state)
    }
}
