#![forbid(unsafe_code)]

//! Core domain model and business logic for Ascend.
//!
//! This crate provides:
//! - Domain types (character, tiers, exercises, equipment, sessions)
//! - Progression engine (experience, levels, tiers)
//! - Workout templates and the workout generator
//! - Typed progression events
//! - Persistence (state, WAL, CSV)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod events;
pub mod equipment;
pub mod wal;
pub mod csv_rollup;
pub mod state;
pub mod history;
pub mod progression;
pub mod generator;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::Config;
pub use equipment::{EquipmentSource, Inventory};
pub use events::{EventBus, EventSubscriber, ProgressEvent};
pub use wal::{JsonlSink, SessionSink};
pub use state::{CharacterStore, JsonFileStore, UserState};
pub use history::load_recent_summaries;
pub use progression::{level_for_experience, ProgressUpdate};
pub use generator::generate_exercises;
pub use tracker::Tracker;
