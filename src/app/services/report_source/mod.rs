//! Raw bulletin retrieval
//!
//! A [`ReportSource`] turns `(hour, station)` into the raw bulletin text the
//! decoder consumes. Retries, locking and timeouts live here, never in the
//! decoding pipeline.
//!
//! - [`directory`] - Reads files already present in a local directory
//! - [`lftp`] - Downloads files over explicit FTPS with the `lftp` client

pub mod directory;
pub mod lftp;

pub use directory::DirectorySource;
pub use lftp::LftpSource;

use crate::Result;
use crate::app::models::SynopHour;
use crate::config::{RetrievalConfig, RetrievalMode};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Provider of raw SYNOP bulletins
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the bulletin published for `station` at `hour`
    async fn fetch(&self, hour: SynopHour, station: u32) -> Result<String>;

    /// Short name for logs and summaries
    fn name(&self) -> &'static str;
}

/// Build the source selected by the retrieval configuration
pub fn from_config(config: &RetrievalConfig) -> Result<Arc<dyn ReportSource>> {
    let source: Arc<dyn ReportSource> = match config.mode {
        RetrievalMode::Directory => Arc::new(DirectorySource::new(&config.directory)),
        RetrievalMode::Lftp => Arc::new(LftpSource::new(config.clone())?),
    };
    debug!("Using {} report source", source.name());
    Ok(source)
}

/// Decode raw file bytes, replacing invalid UTF-8 rather than failing
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
