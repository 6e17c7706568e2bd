//! # gitdir-scanner
//!
//! A concurrent scanner that checks candidate hosts for publicly browsable
//! `.git/` directory listings, the classic accidentally-published
//! repository metadata exposure. Built for security audits as a one-shot
//! batch job over an input list, not a long-running service.
//!
//! Each domain goes through a two-stage verification: an existence check
//! (HTTP 200 on `/.git/`) followed by a content check (the response body
//! carries the literal `<title>Index of /.git</title>` of a directory
//! listing). Only a double pass counts as a finding. Findings are either
//! appended to a flat result file or captured as a headless-Chrome
//! screenshot, depending on the selected sink.
//!
//! A small fixed worker pool pulls domains from a shared queue; the
//! dispatcher admits the input in fixed-size groups with a pause between
//! groups, and each worker sleeps between its own requests. The scanner is
//! deliberately slow and polite.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gitdir_scanner::{Config, FileSink, Scanner};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let sink = Arc::new(FileSink::create("findings.txt".as_ref()).await?);
//!     let scanner = Scanner::new(config, sink)?;
//!
//!     let summary = scanner.run(vec!["https://example.com".to_string()]).await;
//!     println!("{} findings", summary.positives);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ### Append findings to a file
//! ```bash
//! gitdir-scanner domains.txt --output findings.txt
//! ```
//!
//! ### Capture screenshots of findings
//! ```bash
//! gitdir-scanner domains.txt --screenshots --output screens/
//! ```

/// Configuration and settings for the scanner
pub mod config;

/// Error types
pub mod error;

/// Single-request HTTP probe with permissive TLS trust
pub mod probe;

/// Two-stage `.git/` exposure verification
pub mod verify;

/// Headless Chrome capture for visual evidence
pub mod capture;

/// Result sinks: file append or screenshot capture
pub mod sink;

/// Worker pool and batched dispatcher
pub mod scanner;

/// Command-line interface implementation
pub mod cli;

/// Utility functions and helpers
pub mod utils;


pub use capture::*;
pub use cli::*;
pub use config::*;
pub use error::*;
pub use probe::*;
pub use scanner::*;
pub use sink::*;
pub use utils::*;
pub use verify::*;
