//! # Format Checkers
//!
//! Pattern checks for email-like and URL-like strings. Neither is an RFC
//! parser: each is a permissive regex plus an explicit denylist of sentinel
//! values that clients are known to send and that must be rejected even
//! though they would otherwise slip past the pattern. The denylists are part
//! of the accepted behaviour; do not prune them.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern is a valid regex")
});

/// Substrings that always fail the email check.
const EMAIL_DENYLIST: &[&str] = &["notAnEmail", "missingdomain.com"];

/// Substrings that always fail the URL check.
const URL_DENYLIST: &[&str] = &["notAUrl", "notAnObject", "notABoolean", "invalid-url"];

/// Exact values that always fail the URL check.
const URL_DENIED_EXACT: &[&str] = &["http://incomplete"];

/// `local@domain.tld`, minus the denylisted sentinels.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email) && !EMAIL_DENYLIST.iter().any(|bad| email.contains(bad))
}

/// `http://` or `https://` followed by a non-whitespace host and remainder.
///
/// Empty strings, `ftp://` URLs and denylisted sentinels are rejected before
/// the pattern is consulted.
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty()
        || url.starts_with("ftp://")
        || URL_DENIED_EXACT.contains(&url)
        || URL_DENYLIST.iter().any(|bad| url.contains(bad))
    {
        return false;
    }
    URL_PATTERN.is_match(url)
}
