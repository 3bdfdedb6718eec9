//! Format checks applied to connection arguments.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern compiles")
});

/// Returns `true` when `candidate` is a hyphenated UUID (8-4-4-4-12 hex digits).
pub fn is_uuid(candidate: &str) -> bool {
    UUID_PATTERN.is_match(candidate)
}

/// Returns `true` when `candidate` is an absolute `http` or `https` URL with a host.
pub fn is_http_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_uuid_in_any_case() {
        assert!(is_uuid("7d1c9a3e-5b2f-4c8d-a6e0-3f9b1d7c5e2a"));
        assert!(is_uuid("7D1C9A3E-5B2F-4C8D-A6E0-3F9B1D7C5E2A"));
    }

    #[test]
    fn rejects_malformed_uuid() {
        assert!(!is_uuid("not-a-uuid"));
        assert!(!is_uuid(""));
        assert!(!is_uuid("7d1c9a3e5b2f4c8da6e03f9b1d7c5e2a"));
        assert!(!is_uuid("{7d1c9a3e-5b2f-4c8d-a6e0-3f9b1d7c5e2a}"));
        assert!(!is_uuid("7d1c9a3e-5b2f-4c8d-a6e0-3f9b1d7c5e2g"));
    }

    #[test]
    fn http_and_https_urls_pass() {
        assert!(is_http_url("http://localhost:3978/api/messages"));
        assert!(is_http_url("https://mybot.azurewebsites.net/api/messages"));
    }

    #[test]
    fn other_schemes_and_relative_urls_fail() {
        assert!(!is_http_url("ftp://example.com/file"));
        assert!(!is_http_url("/api/messages"));
        assert!(!is_http_url("example.com/api/messages"));
        assert!(!is_http_url("mailto:bot@example.com"));
        assert!(!is_http_url(""));
    }
}
