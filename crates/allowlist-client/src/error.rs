//! Registration client errors.

use allowlist_core::Field;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server refused the submission; `field` names the offending input.
    #[error("{message}")]
    Rejected {
        message: String,
        field: Option<Field>,
    },

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },
}

impl ClientError {
    /// The input a rejection is attributed to.
    pub fn field(&self) -> Option<Field> {
        match self {
            ClientError::Rejected { field, .. } => *field,
            _ => None,
        }
    }
}
