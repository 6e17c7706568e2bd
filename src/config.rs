//! Configuration management with serde serialization/deserialization
//!
//! This module provides the configuration structures for the scanner,
//! including worker pool sizing, rate limiting cadence, probe timeouts and
//! the capture viewport.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the scanner
///
/// Controls the worker pool, the batched admission cadence, probe and
/// capture deadlines, and the output artifacts. Defaults are deliberately
/// polite: two workers with a three second gap between requests.
///
/// # Examples
///
/// ```rust
/// use gitdir_scanner::Config;
///
/// // Use default configuration
/// let config = Config::default();
///
/// // Create custom configuration
/// let config = Config {
///     worker_count: 3,
///     batch_size: 20,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Number of concurrent scan workers (default: 2)
    ///
    /// Global concurrency equals this value. Keep it small to stay polite
    /// to target servers; the scanner is precision-oriented, not fast.
    pub worker_count: usize,

    /// Pause each worker observes after finishing one domain (default: 3 s)
    pub request_delay: Duration,

    /// Hard deadline for each HTTP probe (default: 15 s)
    ///
    /// Bounds the total request duration; expiry counts as a transport
    /// failure and ends that domain's verification at NEGATIVE.
    pub request_timeout: Duration,

    /// Hard deadline for a screenshot capture (default: 20 s)
    ///
    /// Only relevant in screenshot mode. Typically longer than the probe
    /// timeout since a full page render is involved.
    pub screenshot_timeout: Duration,

    /// Domains admitted to the worker queue per dispatch group (default: 10)
    pub batch_size: usize,

    /// Pause between dispatch groups (default: 1 s)
    pub network_pause: Duration,

    /// Browser viewport used for captures
    pub viewport: Viewport,

    /// Result file for append mode (default: `findings.txt`)
    ///
    /// Truncated at startup; one verified domain per line.
    pub output_file: PathBuf,

    /// Screenshot directory for screenshot mode (default: `screens`)
    pub output_dir: PathBuf,

    /// Path to Chrome/Chromium executable (default: auto-detect)
    pub chrome_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_count: 2,
            request_delay: Duration::from_secs(3),
            request_timeout: Duration::from_secs(15),
            screenshot_timeout: Duration::from_secs(20),
            batch_size: 10,
            network_pause: Duration::from_secs(1),
            viewport: Viewport::default(),
            output_file: PathBuf::from("findings.txt"),
            output_dir: PathBuf::from("screens"),
            chrome_path: None,
        }
    }
}

/// Browser viewport used when rendering pages for capture
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Viewport {
    /// Viewport width in pixels (default: 800)
    pub width: u32,

    /// Viewport height in pixels (default: 600)
    pub height: u32,

    /// Device pixel ratio (default: 1.0)
    pub device_scale_factor: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            device_scale_factor: 1.0,
        }
    }
}

/// Generate Chrome command-line arguments for headless capture
///
/// Certificate errors are ignored for the same reason the probe trusts all
/// certificates: a self-signed host is still a finding.
pub fn get_chrome_args(config: &Config) -> Vec<String> {
    let unique_id = format!("{}-{}", std::process::id(), uuid::Uuid::new_v4());

    vec![
        "--headless".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--disable-extensions".to_string(),
        "--disable-default-apps".to_string(),
        "--disable-sync".to_string(),
        "--no-first-run".to_string(),
        "--allow-running-insecure-content".to_string(),
        "--ignore-certificate-errors".to_string(),
        "--ignore-ssl-errors".to_string(),
        format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        ),
        // Unique user data directory so repeated runs never trip over a
        // stale Chrome singleton lock
        format!("--user-data-dir=/tmp/gitdir-scanner-{}", unique_id),
    ]
}

pub fn create_browser_config(config: &Config) -> chromiumoxide::browser::BrowserConfig {
    use chromiumoxide::browser::BrowserConfig;

    let mut builder = BrowserConfig::builder()
        .window_size(config.viewport.width, config.viewport.height)
        .args(get_chrome_args(config));

    if let Some(chrome_path) = &config.chrome_path {
        builder = builder.chrome_executable(chrome_path);
    }

    builder
        .build()
        .unwrap_or_else(|_| BrowserConfig::with_executable("/usr/sbin/chromium"))
}
