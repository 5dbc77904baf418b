//! Request payloads sent to the crypto API.
//!
//! # Design
//! Defined independently from the mock-server's schema; integration tests
//! catch drift between the two.

use serde::{Deserialize, Serialize};

/// Body of `POST /config/<key>`. The value is always sent as a string, even
/// for numeric or boolean settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue {
    pub value: String,
}

impl ConfigValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}
