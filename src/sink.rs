//! Result sinks: what happens when a domain verifies positive
//!
//! Exactly one sink policy is active per run. `FileSink` appends the domain
//! to a shared text artifact; `ScreenshotSink` captures visual evidence.
//! Both keep their mutual exclusion confined to the local write step, never
//! across a network call.

use crate::{sanitize_domain, CaptureService, Config, ScanError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

/// Action taken on a positive verification outcome
///
/// Implementations must be safe to share across workers; concurrent
/// `record` calls may never interleave or corrupt a single record.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn record(&self, domain: &str) -> Result<(), ScanError>;
}

/// Appends each verified domain as one line to a shared result file
pub struct FileSink {
    writer: Mutex<File>,
}

impl FileSink {
    /// Create the result file, truncating any previous run's artifact
    ///
    /// Failure here is fatal to the run; there is no point scanning with
    /// nowhere to put findings.
    pub async fn create(path: &Path) -> Result<Self, ScanError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await?;

        Ok(Self {
            writer: Mutex::new(file),
        })
    }
}

#[async_trait]
impl ResultSink for FileSink {
    async fn record(&self, domain: &str) -> Result<(), ScanError> {
        let line = format!("{domain}\n");
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}

/// One verified domain paired with its captured artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    pub domain: String,
    pub image_path: PathBuf,
}

/// Captures a screenshot of each verified domain's root page
///
/// Capture, render and write failures are local to the domain: they are
/// reported and the scan moves on with no artifact recorded.
pub struct ScreenshotSink {
    capture: CaptureService,
    output_dir: PathBuf,
    records: Mutex<Vec<ScanRecord>>,
}

impl ScreenshotSink {
    pub async fn new(config: &Config, output_dir: PathBuf) -> Result<Self, ScanError> {
        let capture = CaptureService::new(config).await?;

        Ok(Self {
            capture,
            output_dir,
            records: Mutex::new(Vec::new()),
        })
    }

    /// Records collected so far, in completion order
    pub async fn records(&self) -> Vec<ScanRecord> {
        self.records.lock().await.clone()
    }

    pub async fn shutdown(&self) {
        self.capture.shutdown().await;
    }

    /// Filename for a domain's artifact, e.g. `https_example.com.png`
    pub fn artifact_path(&self, domain: &str) -> PathBuf {
        self.output_dir.join(format!("{}.png", sanitize_domain(domain)))
    }
}

#[async_trait]
impl ResultSink for ScreenshotSink {
    async fn record(&self, domain: &str) -> Result<(), ScanError> {
        let image = match self.capture.capture(domain).await {
            Ok(image) => image,
            Err(e) => {
                println!("[ERROR] could not capture screenshot of {domain}: {e}");
                return Ok(());
            }
        };

        let path = self.artifact_path(domain);
        if let Err(e) = tokio::fs::write(&path, &image).await {
            println!(
                "[ERROR] could not save screenshot of {domain} to {}: {e}",
                path.display()
            );
            warn!("artifact write failed for {domain}");
            return Ok(());
        }

        println!("[SCREENSHOT] capture saved: {}", path.display());

        self.records.lock().await.push(ScanRecord {
            domain: domain.to_string(),
            image_path: path,
        });

        Ok(())
    }
}
