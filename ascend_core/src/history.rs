//! Workout history loading.
//!
//! Merges sessions still in the WAL with summaries archived to CSV.

use crate::csv_rollup::CsvRow;
use crate::{Error, Result, WorkoutSummary};
use chrono::{DateTime, TimeDelta, Utc};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

impl TryFrom<CsvRow> for WorkoutSummary {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| Error::Other(format!("Invalid UUID: {}", e)))?;

        let performed_at = DateTime::parse_from_rfc3339(&row.performed_at)
            .map_err(|e| Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        let day = serde_json::from_value(serde_json::Value::String(row.day))?;
        let level = serde_json::from_value(serde_json::Value::String(row.level))?;

        Ok(WorkoutSummary {
            id,
            day,
            level,
            performed_at,
            exercise_count: row.exercise_count,
            total_weight: row.total_weight,
            xp_awarded: row.xp_awarded,
        })
    }
}

/// Load summaries of sessions from the last N days from both WAL and CSV
///
/// Returns summaries sorted by performed_at (newest first), de-duplicated
/// by session id.
pub fn load_recent_summaries(
    wal_path: &Path,
    csv_path: &Path,
    days: u32,
) -> Result<Vec<WorkoutSummary>> {
    let cutoff = TimeDelta::try_days(i64::from(days))
        .and_then(|window| Utc::now().checked_sub_signed(window))
        .ok_or_else(|| {
            Error::Validation(format!("history window of {} days is out of range", days))
        })?;
    let mut summaries = Vec::new();
    let mut seen_ids = HashSet::new();

    if wal_path.exists() {
        for session in crate::wal::read_sessions(wal_path)? {
            if session.performed_at >= cutoff && seen_ids.insert(session.id) {
                summaries.push(session.summary());
            }
        }
        tracing::debug!("Loaded {} sessions from WAL", summaries.len());
    }

    if csv_path.exists() {
        let mut csv_count = 0;
        for summary in load_summaries_from_csv(csv_path)? {
            if summary.performed_at >= cutoff && seen_ids.insert(summary.id) {
                summaries.push(summary);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} sessions from CSV", csv_count);
    }

    summaries.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));

    tracing::info!(
        "Loaded {} total sessions from last {} days",
        summaries.len(),
        days
    );

    Ok(summaries)
}

/// Load all summaries from a CSV file, skipping malformed rows
fn load_summaries_from_csv(path: &Path) -> Result<Vec<WorkoutSummary>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut summaries = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match WorkoutSummary::try_from(row) {
                Ok(summary) => summaries.push(summary),
                Err(e) => tracing::warn!("Failed to parse CSV row: {}", e),
            },
            Err(e) => tracing::warn!("Failed to deserialize CSV row: {}", e),
        }
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wal::{JsonlSink, SessionSink};
    use crate::{generate_exercises, FitnessLevel, WorkoutDay, WorkoutSession};
    use chrono::Duration;

    fn create_test_session(day: WorkoutDay, days_ago: i64) -> WorkoutSession {
        let exercises = generate_exercises(day, &[], FitnessLevel::Beginner);
        let mut session = WorkoutSession::new(day, FitnessLevel::Beginner, exercises);
        session.performed_at = Utc::now() - Duration::days(days_ago);
        session
    }

    #[test]
    fn test_load_recent_from_wal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("sessions.wal");
        let csv_path = temp_dir.path().join("sessions.csv");

        let mut sink = JsonlSink::new(&wal_path);
        sink.append(&create_test_session(WorkoutDay::UpperPush, 1)).unwrap();
        sink.append(&create_test_session(WorkoutDay::UpperPull, 3)).unwrap();
        sink.append(&create_test_session(WorkoutDay::FullBody, 10)).unwrap(); // Too old

        let summaries = load_recent_summaries(&wal_path, &csv_path, 7).unwrap();
        assert_eq!(summaries.len(), 2);
    }

    #[test]
    fn test_csv_and_wal_are_merged_without_duplicates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("sessions.wal");
        let csv_path = temp_dir.path().join("sessions.csv");

        let archived = create_test_session(WorkoutDay::LowerPower, 2);
        let archived_id = archived.id;
        let mut sink = JsonlSink::new(&wal_path);
        sink.append(&archived).unwrap();
        crate::csv_rollup::wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();

        // Same session re-appended plus a new one
        let mut sink = JsonlSink::new(&wal_path);
        sink.append(&archived).unwrap();
        sink.append(&create_test_session(WorkoutDay::UpperPush, 0)).unwrap();

        let summaries = load_recent_summaries(&wal_path, &csv_path, 7).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries.iter().filter(|s| s.id == archived_id).count(), 1);

        let from_csv_only =
            load_recent_summaries(&temp_dir.path().join("none.wal"), &csv_path, 7).unwrap();
        assert_eq!(from_csv_only.len(), 1);
        assert_eq!(from_csv_only[0].day, WorkoutDay::LowerPower);
    }

    #[test]
    fn test_summaries_sorted_newest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("sessions.wal");
        let csv_path = temp_dir.path().join("sessions.csv");

        let mut sink = JsonlSink::new(&wal_path);
        sink.append(&create_test_session(WorkoutDay::UpperPull, 5)).unwrap();
        sink.append(&create_test_session(WorkoutDay::UpperPush, 1)).unwrap();

        let summaries = load_recent_summaries(&wal_path, &csv_path, 7).unwrap();
        assert_eq!(summaries[0].day, WorkoutDay::UpperPush);
        assert_eq!(summaries[1].day, WorkoutDay::UpperPull);
    }

    #[test]
    fn test_malformed_csv_rows_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("sessions.csv");
        let good_id = Uuid::new_v4();
        let csv = format!(
            "id,day,level,performed_at,exercise_count,total_weight,xp_awarded\n\
             not-a-uuid,upper_push,beginner,{now},4,0.0,200\n\
             {good_id},sideways_day,beginner,{now},4,0.0,200\n\
             {good_id},full_body,advanced,{now},4,500.0,250\n",
            now = Utc::now().to_rfc3339(),
            good_id = good_id,
        );
        std::fs::write(&csv_path, csv).unwrap();

        let summaries =
            load_recent_summaries(&temp_dir.path().join("none.wal"), &csv_path, 7).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, good_id);
        assert_eq!(summaries[0].level, FitnessLevel::Advanced);
        assert_eq!(summaries[0].total_weight, 500.0);
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("sessions.wal");
        let csv_path = temp_dir.path().join("sessions.csv");

        let result = load_recent_summaries(&wal_path, &csv_path, u32::MAX);
        assert!(matches!(result, Err(Error::Validation(_))));

        assert!(load_recent_summaries(&wal_path, &csv_path, 0).unwrap().is_empty());
    }
}
