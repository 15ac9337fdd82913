//! Shortening orchestrator: create, resolve, delete and counter submission.

use serde_json::json;
use tracing::{debug, info};
use validator::Validate;

use crate::application::repository::UrlRepository;
use crate::domain::counter_pipeline::CounterHandle;
use crate::domain::entities::{CODE_LENGTH, NewUrl, NewUrlRecord, UrlRecord, is_valid_code};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_normalizer::ensure_scheme;

/// Attempts the generator gets before creation fails.
///
/// With 62^8 (about 2.2e14) possible codes, a table of a billion records
/// collides on a single draw with probability about 4.6e-6, so running out
/// of attempts means something is broken, not unlucky.
pub const MAX_CODE_ATTEMPTS: usize = 200;

/// Service for creating and resolving short URLs.
///
/// Handles scheme normalization, deduplication by URL, code generation or
/// client-code collision checks, and hands resolved codes to the counter
/// pipeline without making the caller wait on the store.
pub struct ShorteningService<S: UrlStore + ?Sized> {
    repository: UrlRepository<S>,
    counter: CounterHandle,
    generator: CodeGenerator,
    domain: String,
    max_attempts: usize,
}

impl<S: UrlStore + ?Sized> ShorteningService<S> {
    /// Creates a new service publishing short URLs under `domain`.
    pub fn new(repository: UrlRepository<S>, counter: CounterHandle, domain: impl Into<String>) -> Self {
        Self {
            repository,
            counter,
            generator: CodeGenerator::new(),
            domain: domain.into().trim_end_matches('/').to_string(),
            max_attempts: MAX_CODE_ATTEMPTS,
        }
    }

    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Creates a short URL, or returns the existing one for the same URL.
    ///
    /// # Deduplication
    ///
    /// The URL is normalized to carry a scheme first. If a record for the
    /// normalized URL exists it is returned as is and nothing is written,
    /// even when the caller asked for a different code.
    ///
    /// # Code Selection
    ///
    /// - A caller-supplied code must be 8 alphanumerics and unused
    /// - Otherwise a random code is generated, retrying on collision up to
    ///   the attempt limit
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a blank URL, malformed code or invalid record
    /// - [`AppError::DuplicateCode`] if the supplied code is taken, including
    ///   when the store's uniqueness constraint catches a race
    /// - [`AppError::CheckFailed`] if a lookup needed for deduplication or
    ///   the collision check fails
    /// - [`AppError::CodeSpaceExhausted`] if no free code was found
    /// - [`AppError::Store`] if the insert fails
    pub async fn create(&self, new_url: NewUrl) -> Result<UrlRecord, AppError> {
        if new_url.url.trim().is_empty() {
            return Err(AppError::bad_request(
                "url is required",
                json!({ "field": "url" }),
            ));
        }

        let url = ensure_scheme(&new_url.url);

        if let Some(existing) = self
            .repository
            .get_by_url(&url)
            .await
            .map_err(|e| AppError::check_failed("url", e))?
        {
            debug!("URL already shortened as {}", existing.code);
            return Ok(existing);
        }

        let code = match new_url.code.filter(|c| !c.is_empty()) {
            Some(code) => {
                if !is_valid_code(&code) {
                    return Err(AppError::bad_request(
                        format!("code must be exactly {} alphanumeric characters", CODE_LENGTH),
                        json!({ "code": code }),
                    ));
                }

                if self.code_exists(&code).await? {
                    return Err(AppError::duplicate_code(&code));
                }

                code
            }
            None => self.generate_unique_code().await?,
        };

        let record = NewUrlRecord::new(code, url, &self.domain);
        record.validate()?;

        let id = self.repository.add(&record).await?;
        info!("Created short url {} -> {}", record.short_url, record.original_url);

        Ok(record.into_record(id))
    }

    /// Removes a record. Any cached mapping for its code is left in place.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    /// Resolves a code to its original URL; `Ok(None)` if the code is unknown.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, AppError> {
        self.repository.get_url_by_code(code).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        self.repository.get_by_id(id).await
    }

    /// Redirect count of a record; `Ok(None)` if the id is unknown.
    pub async fn get_counter(&self, id: i64) -> Result<Option<i64>, AppError> {
        Ok(self.get_by_id(id).await?.map(|record| record.counter))
    }

    /// Queues a counter increment for `code`.
    ///
    /// Returns once the code is queued. Waits only while the queue is full;
    /// increment failures are logged by the pipeline and never surface here.
    pub async fn notify_resolved(&self, code: &str) {
        self.counter.submit(code.to_string()).await;
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        self.repository
            .get_url_by_code(code)
            .await
            .map(|url| url.is_some())
            .map_err(|e| AppError::check_failed("code", e))
    }

    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate(CODE_LENGTH);

            if !self.code_exists(&code).await? {
                return Ok(code);
            }

            debug!("Generated code {} collides (attempt {})", code, attempt);
        }

        Err(AppError::code_space_exhausted(self.max_attempts))
    }
}
