//! Calculation history loading with a day window.
//!
//! History merges the live JSONL event log with the CSV archive so recent
//! calculations stay visible across rollups.

use crate::{BmiCategory, CalculationRecord, HeightUnit, Result, WeightUnit};
use chrono::{DateTime, Duration, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use uuid::Uuid;

/// CSV row format for reading archived calculations
#[derive(Debug, Deserialize)]
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

impl TryFrom<CsvRow> for CalculationRecord {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let recorded_at = DateTime::parse_from_rfc3339(&row.recorded_at)
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        let category = BmiCategory::parse(&row.category)
            .ok_or_else(|| crate::Error::Other(format!("Unknown category: {}", row.category)))?;

        let weight_unit = WeightUnit::parse(&row.weight_unit)
            .ok_or_else(|| crate::Error::Other(format!("Unknown unit: {}", row.weight_unit)))?;

        let height_unit = HeightUnit::parse(&row.height_unit)
            .ok_or_else(|| crate::Error::Other(format!("Unknown unit: {}", row.height_unit)))?;

        Ok(CalculationRecord {
            id,
            recorded_at,
            bmi: row.bmi,
            category,
            weight_kg: row.weight_kg,
            height_m: row.height_m,
            weight_unit,
            height_unit,
        })
    }
}

/// Load calculations from the last N days from both the event log and CSV
///
/// Returns records sorted by recorded_at (newest first). Automatically
/// deduplicates records that appear in both the log and the archive.
pub fn load_recent_records(
    log_path: &Path,
    csv_path: &Path,
    days: i64,
) -> Result<Vec<CalculationRecord>> {
    let cutoff = Utc::now() - Duration::days(days);
    let mut records = Vec::new();
    let mut seen_ids = HashSet::new();

    // Load from the live log first (most recent)
    if log_path.exists() {
        let log_records = crate::analytics::read_records(log_path)?;
        for record in log_records {
            if record.recorded_at >= cutoff {
                seen_ids.insert(record.id);
                records.push(record);
            }
        }
        tracing::debug!("Loaded {} calculations from event log", records.len());
    }

    // Load from CSV (archived)
    if csv_path.exists() {
        let csv_records = load_records_from_csv(csv_path)?;
        let mut csv_count = 0;
        for record in csv_records {
            if record.recorded_at >= cutoff && !seen_ids.contains(&record.id) {
                seen_ids.insert(record.id);
                records.push(record);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} calculations from CSV", csv_count);
    }

    // Sort by recorded_at, newest first
    records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    tracing::info!(
        "Loaded {} total calculations from last {} days",
        records.len(),
        days
    );

    Ok(records)
}

/// Load all calculations from a CSV archive
fn load_records_from_csv(path: &Path) -> Result<Vec<CalculationRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut records = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match CalculationRecord::try_from(row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(records)
}

/// Count calculations per category
pub fn category_counts(records: &[CalculationRecord]) -> HashMap<BmiCategory, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.category).or_insert(0) += 1;
    }
    counts
}
