//! DTOs for creating and reading short URLs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{NewUrl, UrlRecord};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The URL to shorten. A missing scheme is filled in with `http://`.
    #[validate(length(min = 1, max = 2048, message = "url must be between 1 and 2048 characters"))]
    pub url: String,

    /// Optional caller-chosen short code (8 alphanumerics).
    pub code: Option<String>,
}

impl From<CreateUrlRequest> for NewUrl {
    fn from(request: CreateUrlRequest) -> Self {
        NewUrl {
            url: request.url,
            code: request.code,
        }
    }
}

/// JSON representation of a stored short URL.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub domain: String,
    pub counter: i64,
}

impl From<UrlRecord> for UrlResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            id: record.id,
            code: record.code,
            url: record.original_url,
            short_url: record.short_url,
            domain: record.domain,
            counter: record.counter,
        }
    }
}
