//! Two-stage verification of an exposed `.git/` directory
//!
//! Stage one checks that `{domain}/.git/` answers 200 at all; stage two
//! re-fetches the page and requires the literal directory-listing title.
//! A generic 200 from a misconfigured server passes stage one, so stage two
//! is what buys precision: the cost of the second request is accepted as
//! the price of not reporting junk.

use crate::{HttpProbe, ScanError};
use reqwest::StatusCode;

/// The structural signature of an index page for `/.git`
pub const GIT_LISTING_TITLE: &str = "<title>Index of /.git</title>";

/// Terminal result of the verification state machine for one domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Positive,
    Negative,
}

impl VerificationOutcome {
    pub fn is_positive(&self) -> bool {
        matches!(self, VerificationOutcome::Positive)
    }
}

/// Runs the existence and content checks for one domain at a time
#[derive(Debug, Clone)]
pub struct Verifier {
    probe: HttpProbe,
}

impl Verifier {
    pub fn new(probe: HttpProbe) -> Self {
        Self { probe }
    }

    /// Verify one domain, short-circuiting on the first failed stage
    ///
    /// The content check never runs unless the existence check saw a 200,
    /// so a dead host costs exactly one request.
    pub async fn verify(&self, domain: &str) -> VerificationOutcome {
        let url = format!("{domain}/.git/");

        if !self.check_git_directory(&url).await {
            return VerificationOutcome::Negative;
        }

        if !self.has_git_index_title(&url).await {
            return VerificationOutcome::Negative;
        }

        VerificationOutcome::Positive
    }

    /// Existence check: does `{domain}/.git/` answer 200 at all?
    async fn check_git_directory(&self, url: &str) -> bool {
        match self.probe.fetch(url).await {
            Ok(response) if response.status() == StatusCode::OK => {
                println!("[OK] .git directory found: {url}");
                true
            }
            Ok(response) => {
                println!(
                    "[FAIL] no .git directory at: {url} (status: {})",
                    response.status().as_u16()
                );
                false
            }
            Err(e) => {
                report_probe_error(url, &e);
                false
            }
        }
    }

    /// Content check: does the page carry the directory-listing title?
    async fn has_git_index_title(&self, url: &str) -> bool {
        let response = match self.probe.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                report_probe_error(url, &e);
                return false;
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let err = ScanError::BodyReadFailed(e.to_string());
                println!("[ERROR] {url}: {err}");
                return false;
            }
        };

        if body.contains(GIT_LISTING_TITLE) {
            println!("[MATCH] directory listing title found at {url}");
            true
        } else {
            println!("[NO MATCH] directory listing title not found at {url}");
            false
        }
    }
}

fn report_probe_error(url: &str, err: &ScanError) {
    println!("[ERROR] could not connect to {url}: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_positive() {
        assert!(VerificationOutcome::Positive.is_positive());
        assert!(!VerificationOutcome::Negative.is_positive());
    }

    #[test]
    fn test_listing_title_marker() {
        let listing = "<html><head><title>Index of /.git</title></head></html>";
        let decoy = "<html><head><title>Welcome</title></head></html>";
        assert!(listing.contains(GIT_LISTING_TITLE));
        assert!(!decoy.contains(GIT_LISTING_TITLE));
    }
}
