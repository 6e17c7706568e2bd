use url::Url;

/// Derive a filesystem-safe artifact name from a domain
///
/// The scheme separator collapses to a single underscore first, so
/// `https://example.com` becomes `https_example.com`; any remaining
/// filesystem-unsafe characters are replaced afterwards. Two domains can
/// still sanitize to the same name, in which case the last writer wins.
pub fn sanitize_domain(domain: &str) -> String {
    domain
        .replacen("://", "_", 1)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn validate_url(url: &str) -> Result<Url, url::ParseError> {
    let parsed = Url::parse(url)?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(url::ParseError::InvalidPort),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_domain() {
        assert_eq!(sanitize_domain("https://example.com"), "https_example.com");
        assert_eq!(sanitize_domain("http://example.com"), "http_example.com");
        assert_eq!(
            sanitize_domain("https://example.com/path"),
            "https_example.com_path"
        );
        assert_eq!(
            sanitize_domain("https://example.com:8443"),
            "https_example.com_8443"
        );
    }

    #[test]
    fn test_sanitize_domain_trims() {
        assert_eq!(sanitize_domain(" https://example.com "), "https_example.com");
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("not-a-url").is_err());
    }
}
