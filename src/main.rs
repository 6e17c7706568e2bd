use clap::Parser;
use gitdir_scanner::{setup_logging, Cli, Config, ScanRunner};
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    setup_logging(args.verbose)?;

    info!("Starting gitdir-scanner v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args).await?;

    let runner = ScanRunner::new(config);
    if let Err(e) = runner.run(&args).await {
        error!("scan failed: {}", e);
        std::process::exit(1);
    }

    info!("gitdir-scanner stopped");
    Ok(())
}

async fn load_config(args: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if let Some(config_path) = &args.config {
        let config_content = tokio::fs::read_to_string(config_path).await?;
        serde_json::from_str(&config_content)?
    } else {
        Config::default()
    };

    // Override with CLI arguments
    if let Some(workers) = args.workers {
        config.worker_count = workers;
    }

    if let Some(timeout) = args.timeout {
        config.request_timeout = Duration::from_secs(timeout);
    }

    validate_config(&config)?;

    info!("Configuration loaded successfully");
    info!("Workers: {}", config.worker_count);
    info!("Request delay: {:?}", config.request_delay);
    info!("Request timeout: {:?}", config.request_timeout);
    info!(
        "Batch size: {} (pause {:?} between groups)",
        config.batch_size, config.network_pause
    );

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if config.worker_count == 0 {
        return Err("Worker count must be greater than 0".into());
    }

    if config.batch_size == 0 {
        return Err("Batch size must be greater than 0".into());
    }

    if config.request_timeout.as_secs() == 0 {
        return Err("Request timeout must be greater than 0".into());
    }

    if config.screenshot_timeout.as_secs() == 0 {
        return Err("Screenshot timeout must be greater than 0".into());
    }

    if config.viewport.width == 0 || config.viewport.height == 0 {
        return Err("Viewport dimensions must be greater than 0".into());
    }

    Ok(())
}
