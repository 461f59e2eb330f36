//! JSON archive of decoded observations
//!
//! One document per `(station, date, hour)` at
//! `{root}/{station}/{YYYY-MM-DD}_{HH}.json`. Writes go through a temporary
//! file in the same directory and are renamed into place, so readers never
//! see a partial document.

use crate::app::models::{ObservationResult, SynopHour};
use crate::config::ArchiveConfig;
use crate::constants::ARCHIVE_DATE_FORMAT;
use crate::{Error, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Whether an upsert wrote a new document or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Filesystem store keyed by station, date and hour
#[derive(Debug, Clone)]
pub struct ObservationArchive {
    root: PathBuf,
}

impl ObservationArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &ArchiveConfig) -> Self {
        Self::new(&config.path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Document path for a key
    pub fn path_for(&self, station: u32, date: NaiveDate, hour: SynopHour) -> PathBuf {
        self.root.join(station.to_string()).join(format!(
            "{}_{}.json",
            date.format(ARCHIVE_DATE_FORMAT),
            hour.as_str()
        ))
    }

    /// Whether a document exists for the key
    pub async fn exists(&self, station: u32, date: NaiveDate, hour: SynopHour) -> bool {
        tokio::fs::try_exists(self.path_for(station, date, hour))
            .await
            .unwrap_or(false)
    }

    /// Store a successful observation, replacing any previous document for its key
    ///
    /// The date comes from the observation time; only `success` envelopes
    /// are archived.
    pub async fn upsert(&self, result: &ObservationResult, hour: SynopHour) -> Result<UpsertOutcome> {
        let observation = result.observation.as_ref().ok_or_else(|| {
            Error::archive(format!(
                "station {}: only successful observations are archived ({})",
                result.station, result.message
            ))
        })?;

        let date = observation.observed_at.date_naive();
        let path = self.path_for(result.station, date, hour);
        let existed = tokio::fs::try_exists(&path).await.unwrap_or(false);

        let json = serde_json::to_vec_pretty(result)?;
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&target, &json))
            .await
            .map_err(|e| Error::archive(format!("archive write task failed: {}", e)))??;

        let outcome = if existed {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        };
        debug!("{:?} {}", outcome, path.display());
        Ok(outcome)
    }

    /// Read back a stored document
    pub async fn load(
        &self,
        station: u32,
        date: NaiveDate,
        hour: SynopHour,
    ) -> Result<Option<ObservationResult>> {
        let path = self.path_for(station, date, hour);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(
                format!("Failed to read archived observation '{}'", path.display()),
                e,
            )),
        }
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::archive(format!("invalid archive path {}", path.display())))?;
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::io(format!("Failed to create archive directory '{}'", dir.display()), e)
    })?;

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| Error::io("Failed to create temporary archive file", e))?;
    file.write_all(contents)
        .map_err(|e| Error::io("Failed to write archive file", e))?;
    file.persist(path)
        .map_err(|e| Error::io(format!("Failed to persist '{}'", path.display()), e.error))?;
    Ok(())
}
