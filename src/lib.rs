//! # Shortening Service
//!
//! A URL shortening service built with Axum, SQLite and an optional Redis cache.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the store trait and the counter pipeline
//! - **Application Layer** ([`application`]) - Cache-aside repository and the shortening service
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite, in-memory and Redis integrations
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random 8 character alphanumeric codes, or caller-chosen ones
//! - Idempotent creation: the same URL always maps to the same record
//! - Redis cache-aside lookups that degrade to the store on any cache failure
//! - Redirect counting through a bounded queue drained by background workers
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://urls.db"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//! export REDIRECT_DOMAIN="http://localhost:3000"
//!
//! cargo run
//! ```
//!
//! Migrations are embedded and applied at startup.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::repository::UrlRepository;
    pub use crate::application::services::ShorteningService;
    pub use crate::domain::counter_pipeline::{CounterHandle, CounterPipeline};
    pub use crate::domain::entities::{NewUrl, UrlRecord};
    pub use crate::domain::repositories::UrlStore;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
