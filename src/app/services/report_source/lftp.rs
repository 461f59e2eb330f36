//! FTPS download source backed by the `lftp` client
//!
//! Only one download runs at a time. Each attempt gets a fresh scratch
//! directory under the configured temp directory; the downloaded file is
//! then copied into the observations directory, so a `DirectorySource`
//! pointed at the same place sees everything fetched here.

use super::{ReportSource, decode_text};
use crate::app::models::SynopHour;
use crate::config::RetrievalConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Environment variable `lftp --env-password` reads the password from
const LFTP_PASSWORD_ENV: &str = "LFTP_PASSWORD";

/// Downloads reports over explicit FTPS, one at a time, with bounded retries
pub struct LftpSource {
    config: RetrievalConfig,
    host: String,
    user: String,
    lock: Mutex<()>,
}

impl LftpSource {
    pub fn new(config: RetrievalConfig) -> Result<Self> {
        let host = config
            .host
            .clone()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::configuration("lftp retrieval requires a host"))?;
        let user = config
            .user
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::configuration("lftp retrieval requires a user"))?;

        Ok(Self {
            config,
            host,
            user,
            lock: Mutex::new(()),
        })
    }

    /// lftp command script fetching `file_name` into `target_dir`
    pub fn script(&self, file_name: &str, target_dir: &Path) -> String {
        [
            "set ftp:ssl-allow yes".to_string(),
            "set ssl:verify-certificate no".to_string(),
            "set ftp:ssl-protect-data yes".to_string(),
            "set ftp:ssl-protect-list yes".to_string(),
            "set ftp:ssl-force yes".to_string(),
            "set ftp:ssl-auth TLS".to_string(),
            "set net:connection-limit 1".to_string(),
            "set net:timeout 60".to_string(),
            "set net:max-retries 2".to_string(),
            "set xfer:clobber on".to_string(),
            format!("cd \"{}\"", self.config.remote_dir),
            format!(
                "get \"{}\" -o \"{}\"",
                file_name,
                target_dir.join(file_name).display()
            ),
            "bye".to_string(),
        ]
        .join("; ")
    }

    /// Fresh scratch directory under the temp directory, removed on drop
    async fn scratch_dir(&self, station: u32) -> Result<tempfile::TempDir> {
        tokio::fs::create_dir_all(&self.config.temp_dir)
            .await
            .map_err(|e| Error::io("Failed to create temp directory", e))?;
        let temp_dir = self.config.temp_dir.clone();
        tokio::task::spawn_blocking(move || {
            tempfile::Builder::new().prefix("synop-").tempdir_in(temp_dir)
        })
        .await
        .map_err(|e| Error::retrieval(station, format!("scratch directory task failed: {}", e)))?
        .map_err(|e| Error::io("Failed to create scratch directory", e))
    }

    /// One download attempt; callers hold the download lock
    async fn download(&self, file_name: &str, station: u32) -> Result<String> {
        let scratch = self.scratch_dir(station).await?;

        let mut command = Command::new("lftp");
        command
            .arg("-p")
            .arg(self.config.port.to_string())
            .arg("-u")
            .arg(&self.user)
            .arg("--env-password")
            .arg(format!("ftps://{}", self.host))
            .arg("-e")
            .arg(self.script(file_name, scratch.path()))
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(password) = &self.config.password {
            command.env(LFTP_PASSWORD_ENV, password);
        }

        let output = command
            .output()
            .await
            .map_err(|e| Error::io("Failed to run lftp", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::retrieval(
                station,
                format!("lftp exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let downloaded = scratch.path().join(file_name);
        if !downloaded.exists() {
            return Err(Error::retrieval(
                station,
                format!("{} was not downloaded", file_name),
            ));
        }

        tokio::fs::create_dir_all(&self.config.directory)
            .await
            .map_err(|e| Error::io("Failed to create observations directory", e))?;
        let destination = self.config.directory.join(file_name);
        let bytes = tokio::fs::read(&downloaded)
            .await
            .map_err(|e| Error::io("Failed to read downloaded report", e))?;
        tokio::fs::write(&destination, &bytes)
            .await
            .map_err(|e| Error::io("Failed to store downloaded report", e))?;

        debug!("Stored {} at {}", file_name, destination.display());
        Ok(decode_text(&bytes))
    }
}

#[async_trait]
impl ReportSource for LftpSource {
    async fn fetch(&self, hour: SynopHour, station: u32) -> Result<String> {
        let file_name = hour.report_file_name(station);
        let attempts = self.config.max_retries.max(1);
        let mut last_error = None;
        let mut made = 0;

        for attempt in 1..=attempts {
            made = attempt;
            info!("Downloading {} (attempt {}/{})", file_name, attempt, attempts);

            let outcome = {
                let _guard = self.lock.lock().await;
                tokio::time::timeout(self.config.timeout(), self.download(&file_name, station))
                    .await
                    .unwrap_or_else(|_| Err(Error::timeout(self.config.timeout_secs)))
            };

            match outcome {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!("Download of {} failed: {}", file_name, e);
                    let transient = e.is_transient();
                    last_error = Some(e);
                    if !transient {
                        break;
                    }
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.config.retry_delay()).await;
            }
        }

        let cause = last_error.map(|e| e.to_string()).unwrap_or_default();
        Err(Error::retrieval(
            station,
            format!("{} failed after {} attempt(s): {}", file_name, made, cause),
        ))
    }

    fn name(&self) -> &'static str {
        "lftp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> RetrievalConfig {
        RetrievalConfig {
            host: Some("ftp.example.org".to_string()),
            user: Some("synop".to_string()),
            password: Some("secret".to_string()),
            ..RetrievalConfig::default()
        }
    }

    #[test]
    fn test_requires_host_and_user() {
        assert!(LftpSource::new(RetrievalConfig::default()).is_err());

        let mut missing_user = config();
        missing_user.user = None;
        assert!(LftpSource::new(missing_user).is_err());

        assert!(LftpSource::new(config()).is_ok());
    }

    #[test]
    fn test_script_targets_scratch_directory() {
        let source = LftpSource::new(config()).unwrap();
        let script = source.script("SM355.00", &PathBuf::from("/tmp/scratch"));

        assert!(script.contains("set ftp:ssl-force yes"));
        assert!(script.contains("cd \"/Reportes Procesados\""));
        assert!(script.contains("get \"SM355.00\" -o \"/tmp/scratch/SM355.00\""));
        assert!(script.ends_with("bye"));
        assert!(!script.contains("secret"));
    }

    #[tokio::test]
    async fn test_each_attempt_gets_a_fresh_scratch_directory() {
        let temp_root = tempfile::TempDir::new().unwrap();
        let temp_dir = temp_root.path().join("temp");
        let source = LftpSource::new(RetrievalConfig {
            temp_dir: temp_dir.clone(),
            ..config()
        })
        .unwrap();

        let first = source.scratch_dir(78355).await.unwrap();
        let second = source.scratch_dir(78355).await.unwrap();
        assert!(first.path().starts_with(&temp_dir));
        assert_ne!(first.path(), second.path());

        let first_path = first.path().to_path_buf();
        drop(first);
        assert!(!first_path.exists());
        assert!(second.path().is_dir());
    }
}
