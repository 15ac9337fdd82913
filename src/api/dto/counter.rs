//! DTO for the counter endpoint.

use serde::{Deserialize, Serialize};

/// Number of redirects served for a record.
#[derive(Debug, Serialize, Deserialize)]
pub struct CounterResponse {
    pub counter: i64,
}
