//! URL record entity: the mapping between a short code and an original URL.

use regex::Regex;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// Short codes are exactly this many characters long.
pub const CODE_LENGTH: usize = 8;

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("static regex is valid"));

/// A persisted shortening.
///
/// Only ever constructed from a store row, so `id` is always a real
/// identifier. Absence is expressed with `Option<UrlRecord>` at every
/// store and repository boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub domain: String,
    pub counter: i64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        short_url: String,
        domain: String,
        counter: i64,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            short_url,
            domain,
            counter,
        }
    }
}

/// Caller input for the create operation.
///
/// `code` is optional; when absent the service generates one.
#[derive(Debug, Clone, Default)]
pub struct NewUrl {
    pub url: String,
    pub code: Option<String>,
}

impl NewUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// A fully assembled record that has not been written yet.
#[derive(Debug, Clone, Validate)]
pub struct NewUrlRecord {
    #[validate(
        length(equal = 8, message = "code must be exactly 8 characters"),
        regex(path = *CODE_REGEX, message = "code must be alphanumeric")
    )]
    pub code: String,

    #[validate(
        length(min = 8, message = "url must be at least 8 characters"),
        custom(function = "validate_http_url")
    )]
    pub original_url: String,

    #[validate(url(message = "short url is not a valid URL"))]
    pub short_url: String,

    #[validate(length(min = 8, message = "domain must be at least 8 characters"))]
    pub domain: String,

    #[validate(range(min = 0))]
    pub counter: i64,
}

impl NewUrlRecord {
    /// Builds a record for `domain`, deriving `short_url` as `<domain>/<code>`.
    pub fn new(code: String, original_url: String, domain: &str) -> Self {
        Self {
            short_url: format!("{}/{}", domain, code),
            domain: domain.to_string(),
            code,
            original_url,
            counter: 0,
        }
    }

    /// Attaches the identifier assigned by the store.
    pub fn into_record(self, id: i64) -> UrlRecord {
        UrlRecord::new(
            id,
            self.code,
            self.original_url,
            self.short_url,
            self.domain,
            self.counter,
        )
    }
}

/// Returns true if `code` has the shape of a short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && CODE_REGEX.is_match(code)
}

fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(value).map_err(|_| {
        ValidationError::new("url").with_message("url is not a valid absolute URL".into())
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ValidationError::new("scheme")
            .with_message("only http and https URLs can be shortened".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, url: &str) -> NewUrlRecord {
        NewUrlRecord::new(code.to_string(), url.to_string(), "http://localhost")
    }

    #[test]
    fn test_new_record_derives_short_url() {
        let rec = record("abcd1234", "http://www.google.com");

        assert_eq!(rec.short_url, "http://localhost/abcd1234");
        assert_eq!(rec.domain, "http://localhost");
        assert_eq!(rec.counter, 0);
        assert!(rec.validate().is_ok());
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let rec = record("abcd1234", "http://www.google.com").into_record(7);

        assert_eq!(rec.id, 7);
        assert_eq!(rec.code, "abcd1234");
        assert_eq!(rec.original_url, "http://www.google.com");
        assert_eq!(rec.short_url, "http://localhost/abcd1234");
    }

    #[test]
    fn test_code_wrong_length_is_invalid() {
        assert!(record("abc", "http://www.google.com").validate().is_err());
        assert!(record("abcd12345", "http://www.google.com").validate().is_err());
    }

    #[test]
    fn test_code_non_alphanumeric_is_invalid() {
        let errors = record("abcd-123", "http://www.google.com")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
    }

    #[test]
    fn test_too_short_url_is_invalid() {
        let errors = record("abcd1234", "http://").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("original_url"));
    }

    #[test]
    fn test_non_http_scheme_is_invalid() {
        assert!(record("abcd1234", "ftp://example.com").validate().is_err());
    }

    #[test]
    fn test_short_domain_is_invalid() {
        let rec = NewUrlRecord::new(
            "abcd1234".to_string(),
            "http://www.google.com".to_string(),
            "local",
        );
        let errors = rec.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("domain"));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("AbCd1234"));
        assert!(!is_valid_code("abcd_123"));
        assert!(!is_valid_code("short"));
        assert!(!is_valid_code(""));
    }

    #[test]
    fn test_new_url_builder() {
        let new_url = NewUrl::new("example.com").with_code("abcd1234");
        assert_eq!(new_url.url, "example.com");
        assert_eq!(new_url.code.as_deref(), Some("abcd1234"));
    }
}
