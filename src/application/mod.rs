//! Application layer: orchestration over the domain and infrastructure.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! - [`repository::UrlRepository`] - Cache-aside facade over the store and cache
//! - [`services::ShorteningService`] - Short URL creation, resolution and counting

pub mod repository;
pub mod services;
