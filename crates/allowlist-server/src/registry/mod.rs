//! Registration records with journaled persistence.
//!
//! The [`Registry`] holds every record in memory and owns the two unique
//! indexes. The [`Store`] appends each accepted record to disk and replays
//! the journal into a fresh registry at startup.

mod journal;
mod memory;

pub use journal::{JournalStore, MemoryStore, Store};
pub use memory::Registry;

use allowlist_core::Field;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another record already holds this key.
    #[error("Unique constraint violated on {0}")]
    UniqueViolation(Field),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt journal entry on line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
