//! CSV rollup functionality for archiving WAL sessions.
//!
//! Sessions are flattened to [`WorkoutSummary`] rows; per-set detail stays in
//! the archived WAL.

use crate::{Result, WorkoutSession, WorkoutSummary};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV archive
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    pub id: String,
    pub day: String,
    pub level: String,
    pub performed_at: String,
    pub exercise_count: u32,
    pub total_weight: f64,
    pub xp_awarded: u64,
}

impl From<&WorkoutSummary> for CsvRow {
    fn from(summary: &WorkoutSummary) -> Self {
        CsvRow {
            id: summary.id.to_string(),
            day: enum_label(&summary.day),
            level: enum_label(&summary.level),
            performed_at: summary.performed_at.to_rfc3339(),
            exercise_count: summary.exercise_count,
            total_weight: summary.total_weight,
            xp_awarded: summary.xp_awarded,
        }
    }
}

/// snake_case serde name of a unit enum variant
pub(crate) fn enum_label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Roll up WAL sessions into CSV and archive the WAL
///
/// This function:
/// 1. Reads all sessions from the WAL
/// 2. Appends their summaries to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the WAL to .processed
/// 5. Returns the number of sessions processed
///
/// The CSV is fsynced before the WAL is renamed, and the WAL is renamed
/// rather than deleted so it can be recovered by hand.
pub fn wal_to_csv_and_archive(wal_path: &Path, csv_path: &Path) -> Result<usize> {
    let sessions: Vec<WorkoutSession> = crate::wal::read_sessions(wal_path)?;

    if sessions.is_empty() {
        tracing::info!("No sessions in WAL to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Only a brand-new file gets a header row
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for session in &sessions {
        writer.serialize(CsvRow::from(&session.summary()))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Wrote {} sessions to CSV", sessions.len());

    let processed_path = wal_path.with_extension("wal.processed");
    std::fs::rename(wal_path, &processed_path)?;

    tracing::info!("Archived WAL to {:?}", processed_path);

    Ok(sessions.len())
}

/// Clean up old processed WAL files
///
/// This removes all .wal.processed files in the given directory.
pub fn cleanup_processed_wals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension().map_or(false, |ext| ext == "processed") {
            std::fs::remove_file(&path)?;
            tracing::debug!("Removed processed WAL: {:?}", path);
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed WAL files", count);
    }

    Ok(count)
}
