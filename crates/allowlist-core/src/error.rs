//! Field identifiers and validation error kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A user-editable field of a submission.
///
/// Serializes to the name the field carries in request bodies, so a
/// rejection can be attributed to the input that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "walletAddress")]
    WalletAddress,
    #[serde(rename = "twitterUsername")]
    SocialHandle,
}

impl Field {
    /// Name of the field in request and response bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::WalletAddress => "walletAddress",
            Field::SocialHandle => "twitterUsername",
        }
    }

    /// Human-readable label, capitalized for the start of a sentence.
    pub fn label(&self) -> &'static str {
        match self {
            Field::WalletAddress => "Wallet address",
            Field::SocialHandle => "Twitter username",
        }
    }

    fn inline_label(&self) -> &'static str {
        match self {
            Field::WalletAddress => "wallet address",
            Field::SocialHandle => "Twitter username",
        }
    }

    /// Message shown when another record already holds this value.
    pub fn duplicate_message(&self) -> String {
        format!("This {} has already been registered", self.inline_label())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("value is required")]
    Required,

    #[error("value has an invalid format")]
    InvalidFormat,

    #[error("value has an invalid length")]
    InvalidLength,
}

impl ErrorKind {
    /// User-facing message for this failure on `field`.
    pub fn message(&self, field: Field) -> String {
        match (self, field) {
            (ErrorKind::Required, _) => format!("{} is required", field.label()),
            (ErrorKind::InvalidFormat, _) => format!("Invalid {} format", field.inline_label()),
            (ErrorKind::InvalidLength, Field::WalletAddress) => {
                "Wallet address should be between 32-44 characters".to_string()
            }
            (ErrorKind::InvalidLength, Field::SocialHandle) => {
                "Twitter username should be between 4-15 characters".to_string()
            }
        }
    }
}

/// A validation failure attributed to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind.message(self.field))
    }
}

impl std::error::Error for FieldError {}

impl FieldError {
    pub fn new(field: Field, kind: ErrorKind) -> Self {
        Self { field, kind }
    }
}
