//! Shared types for the allowlist registration service.
//!
//! This crate is used by both sides of the wire:
//! - The registration record as it is stored and listed
//! - The checklist of self-reported social tasks
//! - Field validators for wallet addresses and social handles
//! - Request and response bodies of the HTTP API

mod error;
mod record;
mod task;
pub mod validation;
pub mod wire;

pub use error::{ErrorKind, Field, FieldError};
pub use record::{handle_key, RegistrationRecord, TaskCompletion};
pub use task::Task;
pub use validation::{validate_handle, validate_submission, validate_wallet_address};
pub use wire::{ErrorResponse, MessageResponse, SubmitRequest, SUBMIT_SUCCESS_MESSAGE};
