//! Domain layer containing business entities and background processing.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`counter_pipeline`] - Asynchronous counter increment workers
//!
//! # Counter Flow
//!
//! 1. HTTP handler resolves a short code and redirects
//! 2. The code is submitted to the bounded counter queue
//! 3. A [`counter_pipeline::CounterPipeline`] worker takes it off the queue
//! 4. The increment is applied via [`repositories::UrlStore::increment_counter`]

pub mod counter_pipeline;
pub mod entities;
pub mod repositories;
