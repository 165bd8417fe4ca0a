//! API request and response types.

pub use allowlist_core::wire::{ErrorResponse, MessageResponse, SubmitRequest};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub registry_count: usize,
}
