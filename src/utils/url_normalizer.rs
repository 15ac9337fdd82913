//! Scheme normalization for submitted URLs.
//!
//! Stored URLs always carry an explicit `http://` or `https://` scheme so
//! that the same target submitted with and without a scheme deduplicates to
//! a single record.

/// Prefix prepended to URLs submitted without a scheme.
pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Ensures `input` starts with `http://` or `https://`.
///
/// The scheme check is case-insensitive; anything else gets `http://`
/// prepended. Leading and trailing whitespace is removed.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(ensure_scheme("example.com"), "http://example.com");
/// assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
/// ```
pub fn ensure_scheme(input: &str) -> String {
    let trimmed = input.trim();

    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
    }
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
