//! Allowlist registration API client.

mod client;
mod config;
mod error;
pub mod form;

pub use client::RegistrationClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use form::{FormError, FormState, Step, SubmissionStatus, TaskState};
