//! Request and response bodies of the registration API.

use crate::error::Field;
use crate::record::TaskCompletion;
use serde::{Deserialize, Serialize};

/// Message returned when a submission is accepted.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Body of `POST /submit`.
///
/// Missing strings decode as empty so they fail validation with a
/// field-attributed error instead of a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(rename = "walletAddress", default)]
    pub wallet_address: String,

    #[serde(rename = "twitterUsername", default)]
    pub twitter_username: String,

    /// Checklist state, stored verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<TaskCompletion>,
}

/// Success body carrying a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body. `field` is present only for user-correctable errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_missing_fields_default() {
        let request: SubmitRequest = serde_json::from_str("{}").unwrap();
        assert!(request.wallet_address.is_empty());
        assert!(request.twitter_username.is_empty());
        assert!(request.requirements.is_none());
    }

    #[test]
    fn test_submit_request_null_requirements() {
        let request: SubmitRequest =
            serde_json::from_str(r#"{"walletAddress": "abc", "requirements": null}"#).unwrap();
        assert_eq!(request.wallet_address, "abc");
        assert!(request.requirements.is_none());
    }

    #[test]
    fn test_error_response_omits_missing_field() {
        let body = ErrorResponse {
            error: "Failed to submit form".into(),
            field: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Failed to submit form"}"#);

        let body = ErrorResponse {
            error: "Wallet address is required".into(),
            field: Some(Field::WalletAddress),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["field"], "walletAddress");
    }
}
