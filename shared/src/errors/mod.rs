//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFIGURATION_ERROR: &str = "CONFIGURATION_ERROR";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const TOKEN_GENERATION_FAILED: &str = "TOKEN_GENERATION_FAILED";
    pub const UNKNOWN_SUBJECT: &str = "UNKNOWN_SUBJECT";
    pub const BAD_CREDENTIALS: &str = "BAD_CREDENTIALS";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization_skips_empty_details() {
        let response = ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid token");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "TOKEN_INVALID");
        assert_eq!(json["message"], "Invalid token");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request")
            .add_detail("field", "email")
            .add_detail("attempts", 3);

        let details = response.details.unwrap();
        assert_eq!(details["field"], "email");
        assert_eq!(details["attempts"], 3);
    }
}
