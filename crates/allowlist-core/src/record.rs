//! The stored registration record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported checklist state, stored verbatim.
pub type TaskCompletion = serde_json::Map<String, serde_json::Value>;

/// A single participant's stored submission.
///
/// Records are append-only: once created they are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Unique record identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Wallet address, unique byte-for-byte
    #[serde(rename = "walletAddress")]
    pub wallet_address: String,

    /// Social handle, unique ignoring case
    #[serde(rename = "twitterUsername")]
    pub social_handle: String,

    /// Checklist state as submitted by the client
    #[serde(rename = "requirements", default)]
    pub task_completion: TaskCompletion,

    /// When the record was created
    #[serde(rename = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl RegistrationRecord {
    /// Create a new record stamped with the current time.
    pub fn new(
        wallet_address: impl Into<String>,
        social_handle: impl Into<String>,
        task_completion: TaskCompletion,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            wallet_address: wallet_address.into(),
            social_handle: social_handle.into(),
            task_completion,
            created_at: Utc::now(),
        }
    }

    /// Key under which this record's handle is unique.
    pub fn handle_key(&self) -> String {
        handle_key(&self.social_handle)
    }
}

/// Case-folded form of a handle used for uniqueness checks.
pub fn handle_key(handle: &str) -> String {
    handle.to_lowercase()
}
