//! CSV rollup functionality for archiving the analytics event log.
//!
//! The live JSONL log is append-only and grows with every calculation;
//! rollup moves its records into a long-term CSV archive atomically so no
//! event is lost if the process dies mid-way.

use crate::{CalculationRecord, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    recorded_at: String,
    bmi: f64,
    category: String,
    weight_kg: f64,
    height_m: f64,
    weight_unit: String,
    height_unit: String,
}

impl From<&CalculationRecord> for CsvRow {
    fn from(record: &CalculationRecord) -> Self {
        CsvRow {
            id: record.id.to_string(),
            recorded_at: record.recorded_at.to_rfc3339(),
            bmi: record.bmi,
            category: record.category.as_str().to_string(),
            weight_kg: record.weight_kg,
            height_m: record.height_m,
            weight_unit: record.weight_unit.as_str().to_string(),
            height_unit: record.height_unit.as_str().to_string(),
        }
    }
}

/// Roll up logged events into CSV and archive the log atomically
///
/// This function:
/// 1. Reads all records from the JSONL event log
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the log to .processed
/// 5. Returns the number of records processed
///
/// # Safety
/// - CSV is fsynced before the log is renamed
/// - The log is renamed (not deleted) to allow manual recovery if needed
/// - Processed log files can be cleaned up with `cleanup_processed_logs`
pub fn log_to_csv_and_archive(log_path: &Path, csv_path: &Path) -> Result<usize> {
    // Read all records from the event log
    let records = crate::analytics::read_records(log_path)?;

    if records.is_empty() {
        tracing::info!("No calculations in event log to roll up");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Open CSV file for appending
    let file = OpenOptions::new().create(true).append(true).open(csv_path)?;

    // Headers only when the file is brand new
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for record in &records {
        let row = CsvRow::from(record);
        writer.serialize(row)?;
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} calculations to CSV", records.len());

    // Atomically archive the log by renaming it
    let processed_path = log_path.with_extension("jsonl.processed");
    std::fs::rename(log_path, &processed_path)?;

    tracing::info!("Archived event log to {:?}", processed_path);

    Ok(records.len())
}

/// Clean up old processed log files
///
/// This removes all .jsonl.processed files in the given directory.
pub fn cleanup_processed_logs(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed log: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed log files", count);
    }

    Ok(count)
}
