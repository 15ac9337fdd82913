//! Repository trait for the durable URL store.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for URL records.
///
/// Every lookup distinguishes "no matching row" (`Ok(None)`) from an I/O
/// failure (`Err`). Implementations must be safe to share between tasks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlStore`] - SQLite implementation
/// - [`crate::infrastructure::persistence::MemoryUrlStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Inserts a record and returns the identifier assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if the store's uniqueness
    /// constraint on `code` rejects the row.
    /// Returns [`AppError::Store`] on any other failure.
    async fn add(&self, record: &NewUrlRecord) -> Result<i64, AppError>;

    /// Removes the record with the given id. Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Returns the original URL stored for `code`.
    async fn find_url_by_code(&self, code: &str) -> Result<Option<String>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError>;

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically adds one to the counter of the record with `code`.
    async fn increment_counter(&self, code: &str) -> Result<(), AppError>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
