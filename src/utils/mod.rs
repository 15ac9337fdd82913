//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_normalizer`] - Scheme normalization for submitted URLs

pub mod code_generator;
pub mod url_normalizer;
