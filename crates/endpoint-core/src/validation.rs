//! URL syntax validation.
//!
//! A custom endpoint URL is accepted when it parses as an absolute URL with an
//! `http` or `https` scheme and a non-empty host.  Surrounding whitespace is
//! ignored; the panel trims the value before it is stored.

use url::Url;

/// Returns `true` if `candidate` is usable as an endpoint base URL.
///
/// # Example
///
/// ```rust
/// use endpoint_core::is_valid_url;
///
/// assert!(is_valid_url("https://api.example.com"));
/// assert!(!is_valid_url("not-a-url"));
/// ```
pub fn is_valid_url(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return false;
    }
    match Url::parse(trimmed) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}
