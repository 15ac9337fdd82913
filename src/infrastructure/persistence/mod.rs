//! Durable store implementations.
//!
//! # Stores
//!
//! - [`SqliteUrlStore`] - SQLx/SQLite store with embedded migrations
//! - [`MemoryUrlStore`] - Map-backed store for tests and ephemeral deployments

pub mod memory_url_store;
pub mod sqlite_url_store;

pub use memory_url_store::MemoryUrlStore;
pub use sqlite_url_store::SqliteUrlStore;
