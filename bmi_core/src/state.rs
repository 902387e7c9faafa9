//! User preference persistence with file locking.
//!
//! The calculator remembers the last-used units so the next invocation
//! defaults to them. A missing or corrupted preferences file must never
//! block a calculation, so loading degrades to defaults with a warning.

use crate::{Error, Result, UserPrefs};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl UserPrefs {
    /// Load preferences from a file with shared locking
    ///
    /// Returns defaults if the file doesn't exist or cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No preferences file found, using defaults");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open preferences file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock preferences file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read preferences file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<UserPrefs>(&contents) {
            Ok(prefs) => {
                tracing::debug!("Loaded preferences from {:?}", path);
                Ok(prefs)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse preferences file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save preferences to a file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "preferences path missing parent")
        })?)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old preferences file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Load preferences, modify them, and save them back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut UserPrefs) -> Result<()>,
    {
        let mut prefs = Self::load(path)?;
        f(&mut prefs)?;
        prefs.save(path)?;
        Ok(prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HeightUnit, WeightUnit};

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefs_path = temp_dir.path().join("prefs.json");

        let prefs = UserPrefs {
            weight_unit: WeightUnit::Lbs,
            height_unit: HeightUnit::Ft,
        };

        prefs.save(&prefs_path).unwrap();
        let loaded = UserPrefs::load(&prefs_path).unwrap();

        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefs_path = temp_dir.path().join("nonexistent.json");

        let prefs = UserPrefs::load(&prefs_path).unwrap();
        assert_eq!(prefs, UserPrefs::default());
        assert_eq!(prefs.weight_unit, WeightUnit::Kg);
        assert_eq!(prefs.height_unit, HeightUnit::Cm);
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefs_path = temp_dir.path().join("prefs.json");

        UserPrefs::default().save(&prefs_path).unwrap();

        UserPrefs::update(&prefs_path, |prefs| {
            prefs.weight_unit = WeightUnit::Lbs;
            Ok(())
        })
        .unwrap();

        let loaded = UserPrefs::load(&prefs_path).unwrap();
        assert_eq!(loaded.weight_unit, WeightUnit::Lbs);
    }

    #[test]
    fn test_corrupted_prefs_fall_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefs_path = temp_dir.path().join("corrupted.json");

        std::fs::write(&prefs_path, "{ invalid json }").unwrap();

        let prefs = UserPrefs::load(&prefs_path).unwrap();
        assert_eq!(prefs, UserPrefs::default());
    }

    #[test]
    fn test_atomic_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefs_path = temp_dir.path().join("prefs.json");

        UserPrefs::default().save(&prefs_path).unwrap();

        // Verify the file exists and no stray temp files remain
        assert!(prefs_path.exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "prefs.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only prefs.json, found extras: {:?}",
            extras
        );
    }
}
