//! Local analytics event log.
//!
//! Every computed result may be recorded as a `bmi_calculation` event.
//! Records are appended to a JSONL (JSON Lines) file with file locking so
//! concurrent invocations cannot interleave partial lines. The log is
//! fire-and-forget from the calculator's point of view: delivery to any
//! remote analytics service is a separate collaborator's concern.

use crate::{CalculationRecord, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Event sink trait for recording calculations
pub trait EventSink {
    fn append(&mut self, record: &CalculationRecord) -> Result<()>;
}

/// JSONL-based event sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl EventSink for JsonlSink {
    fn append(&mut self, record: &CalculationRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        // Open file for appending
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        // Write record as JSON line
        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended calculation {} to event log", record.id);
        Ok(())
    }
}

/// Read all calculation records from an event log file
///
/// Malformed lines (e.g. a partial line from an interrupted write) are
/// logged as warnings and skipped.
pub fn read_records(path: &Path) -> Result<Vec<CalculationRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<CalculationRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse event at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} calculations from event log", records.len());
    Ok(records)
}
