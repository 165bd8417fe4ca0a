//! Allowlist Registration Server - collects one submission per participant.
//!
//! The server:
//! - Validates wallet addresses and social handles
//! - Rejects duplicate wallets (exact) and handles (ignoring case)
//! - Appends accepted submissions to a journal that is replayed on startup
//! - Lists every submission for the admin view, newest first

pub mod api;
pub mod config;
pub mod error;
pub mod registry;
pub mod service;

pub use config::Config;
pub use error::ApiError;
pub use registry::{Registry, Store, StoreError};
pub use service::{RegistrationService, SubmissionError};
