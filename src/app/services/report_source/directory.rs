//! Local directory source

use super::{ReportSource, decode_text};
use crate::app::models::SynopHour;
use crate::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads `SM`/`SI` files dropped into a directory by an external downloader
#[derive(Debug, Clone)]
pub struct DirectorySource {
    directory: PathBuf,
}

impl DirectorySource {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Path of the file published for `station` at `hour`
    pub fn report_path(&self, hour: SynopHour, station: u32) -> PathBuf {
        self.directory.join(hour.report_file_name(station))
    }
}

#[async_trait]
impl ReportSource for DirectorySource {
    async fn fetch(&self, hour: SynopHour, station: u32) -> Result<String> {
        let path = self.report_path(hour, station);
        debug!("Reading bulletin from {}", path.display());

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(decode_text(&bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::retrieval(
                station,
                format!("report file not found: {}", path.display()),
            )),
            Err(e) => Err(Error::io(
                format!("Failed to read report file '{}'", path.display()),
                e,
            )),
        }
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}
