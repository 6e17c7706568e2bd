use crate::{validate_url, Config, FileSink, ResultSink, ScanError, Scanner, ScreenshotSink};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "gitdir-scanner")]
#[command(about = "Concurrent scanner for publicly browsable .git directories")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Newline-delimited list of target hosts, scheme included
    pub input: PathBuf,

    #[arg(
        long,
        help = "Capture a screenshot of each finding instead of appending to the result file"
    )]
    pub screenshots: bool,

    #[arg(
        long,
        help = "Result file (append mode) or screenshot directory (screenshot mode)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Number of concurrent scan workers")]
    pub workers: Option<usize>,

    #[arg(long, help = "Probe timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Enable verbose logging")]
    pub verbose: bool,
}

pub struct ScanRunner {
    pub config: Config,
}

impl ScanRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self, args: &Cli) -> anyhow::Result<()> {
        let domains = read_domains_from_file(&args.input).await?;
        info!(
            "loaded {} domains from {}",
            domains.len(),
            args.input.display()
        );

        let summary = if args.screenshots {
            self.run_with_screenshots(domains, args).await?
        } else {
            self.run_with_result_file(domains, args).await?
        };

        info!(
            "scan finished: {} processed, {} recorded, {} sink errors",
            summary.processed, summary.positives, summary.sink_errors
        );

        Ok(())
    }

    async fn run_with_result_file(
        &self,
        domains: Vec<String>,
        args: &Cli,
    ) -> anyhow::Result<crate::ScanSummary> {
        let output_file = args
            .output
            .clone()
            .unwrap_or_else(|| self.config.output_file.clone());

        // Sink creation failure is fatal; there is nowhere to put findings
        let sink: Arc<dyn ResultSink> = Arc::new(FileSink::create(&output_file).await?);
        let scanner = Scanner::new(self.config.clone(), sink)?;

        info!("appending findings to {}", output_file.display());
        Ok(scanner.run(domains).await)
    }

    async fn run_with_screenshots(
        &self,
        domains: Vec<String>,
        args: &Cli,
    ) -> anyhow::Result<crate::ScanSummary> {
        let output_dir = args
            .output
            .clone()
            .unwrap_or_else(|| self.config.output_dir.clone());
        fs::create_dir_all(&output_dir).await?;

        let sink = Arc::new(ScreenshotSink::new(&self.config, output_dir.clone()).await?);
        let scanner = Scanner::new(self.config.clone(), sink.clone())?;

        info!("saving captures under {}", output_dir.display());
        let summary = scanner.run(domains).await;

        let records = sink.records().await;
        info!("captured {} screenshots", records.len());

        sink.shutdown().await;
        Ok(summary)
    }
}

/// Read the target list: one domain per line, trimmed; blank lines and
/// `#` comments are skipped
///
/// Lines that do not parse as http(s) URLs are still dispatched (every
/// non-empty line gets exactly one verification attempt); the warning just
/// gives the inevitable `[ERROR]` some context.
pub async fn read_domains_from_file(path: &Path) -> Result<Vec<String>, ScanError> {
    let content = fs::read_to_string(path).await?;
    let domains: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    for domain in &domains {
        if validate_url(domain).is_err() {
            warn!("input line does not parse as an http(s) URL: {domain}");
        }
    }

    Ok(domains)
}

pub fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_requires_input() {
        let result = Cli::try_parse_from(["gitdir-scanner"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "gitdir-scanner",
            "domains.txt",
            "--screenshots",
            "--workers",
            "3",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("domains.txt"));
        assert!(cli.screenshots);
        assert_eq!(cli.workers, Some(3));
        assert_eq!(cli.timeout, Some(5));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[tokio::test]
    async fn test_read_domains_skips_blanks_and_comments() {
        let path = std::env::temp_dir().join(format!(
            "gitdir-scanner-input-{}.txt",
            std::process::id()
        ));
        tokio::fs::write(
            &path,
            "https://one.example\n\n  \n# comment\n  https://two.example  \n",
        )
        .await
        .unwrap();

        let domains = read_domains_from_file(&path).await.unwrap();
        assert_eq!(
            domains,
            vec![
                "https://one.example".to_string(),
                "https://two.example".to_string()
            ]
        );

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_read_domains_missing_file_is_error() {
        let missing = Path::new("/nonexistent/gitdir-scanner-input.txt");
        assert!(read_domains_from_file(missing).await.is_err());
    }
}
