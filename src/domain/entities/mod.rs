//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A persisted short code to URL mapping
//! - [`NewUrl`] - Caller input for creating a mapping
//! - [`NewUrlRecord`] - An assembled, validated record awaiting insertion
//!
//! Entities follow the "New Type" pattern with separate structs for creation,
//! so a record that has not been persisted never carries a fake identifier.

pub mod url_record;

pub use url_record::{CODE_LENGTH, NewUrl, NewUrlRecord, UrlRecord, is_valid_code};
