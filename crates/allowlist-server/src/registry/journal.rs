//! Append-only journal persistence for the registry.

use super::{Registry, StoreError};
use allowlist_core::RegistrationRecord;
use std::io::SeekFrom;
use std::path::PathBuf;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// Journal file storing one JSON record per line.
///
/// Lines are only ever appended, matching the append-only record lifecycle.
pub struct JournalStore {
    path: PathBuf,
}

impl JournalStore {
    /// Create a journal store at `path`. Nothing is touched until the first
    /// append or load.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append a record and flush it to disk.
    ///
    /// A partial line left at the end by an interrupted append is cut off
    /// first, so every record starts on a line boundary. If this write fails
    /// the file is truncated back to where it started.
    pub async fn append(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await?;
        let start = self.trim_partial_tail(&mut file).await?;

        if let Err(e) = write_line(&mut file, &line).await {
            if let Err(rollback) = file.set_len(start).await {
                error!(error = %rollback, "Failed to roll back partial journal append");
            }
            return Err(e.into());
        }

        debug!(
            "Appended record {} ({} bytes) to {:?}",
            record.id,
            line.len(),
            self.path
        );
        Ok(())
    }

    /// Drop any bytes after the last newline, returning the new length.
    async fn trim_partial_tail(&self, file: &mut File) -> Result<u64, StoreError> {
        let len = file.metadata().await?.len();
        if len == 0 {
            return Ok(0);
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1)).await?;
        file.read_exact(&mut last).await?;
        if last[0] == b'\n' {
            return Ok(len);
        }

        let mut contents = Vec::new();
        file.seek(SeekFrom::Start(0)).await?;
        file.read_to_end(&mut contents).await?;
        let keep = contents
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |pos| pos as u64 + 1);

        warn!(
            dropped_bytes = len - keep,
            "Truncating partial record at end of {:?}",
            self.path
        );
        file.set_len(keep).await?;
        file.sync_data().await?;
        Ok(keep)
    }

    /// Replay the journal into a fresh registry.
    ///
    /// Returns an empty registry if the file doesn't exist. Lines that
    /// collide with an earlier record are skipped, as is an unterminated
    /// final line left by an interrupted append. Any other unparseable line
    /// fails the load.
    pub async fn load(&self) -> Result<Registry, StoreError> {
        if !self.exists() {
            info!(
                "Journal not found at {:?}, starting with empty registry",
                self.path
            );
            return Ok(Registry::new());
        }

        let contents = fs::read_to_string(&self.path).await?;
        let mut registry = Registry::new();
        let mut skipped = 0usize;
        let total = contents.lines().count();
        let terminated = contents.ends_with('\n');

        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: RegistrationRecord = match serde_json::from_str(line) {
                Ok(record) => record,
                Err(e) if idx + 1 == total && !terminated => {
                    warn!(line = idx + 1, error = %e, "Skipping partial record at end of journal");
                    skipped += 1;
                    continue;
                }
                Err(source) => {
                    return Err(StoreError::Corrupt {
                        line: idx + 1,
                        source,
                    })
                }
            };

            if let Err(StoreError::UniqueViolation(field)) = registry.insert(record) {
                warn!(line = idx + 1, %field, "Skipping duplicate journal entry");
                skipped += 1;
            }
        }

        info!(
            "Loaded journal with {} records ({} skipped) from {:?}",
            registry.count(),
            skipped,
            self.path
        );
        Ok(registry)
    }

    /// Check if the journal file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

async fn write_line(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    file.write_all(line).await?;
    file.sync_data().await
}

/// Store that keeps nothing; the registry lives only in memory.
pub struct MemoryStore;

impl MemoryStore {
    pub async fn append(&self, _record: &RegistrationRecord) -> Result<(), StoreError> {
        debug!("Memory store: append is a no-op");
        Ok(())
    }

    pub async fn load(&self) -> Result<Registry, StoreError> {
        debug!("Memory store: returning empty registry");
        Ok(Registry::new())
    }
}

/// Storage backend selected at startup.
pub enum Store {
    /// Journal file on disk
    Journal(JournalStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl Store {
    pub fn journal(path: impl Into<PathBuf>) -> Self {
        Store::Journal(JournalStore::new(path))
    }

    pub fn memory() -> Self {
        Store::Memory(MemoryStore)
    }

    /// Persist a newly accepted record.
    pub async fn append(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        match self {
            Store::Journal(s) => s.append(record).await,
            Store::Memory(s) => s.append(record).await,
        }
    }

    /// Load the registry.
    pub async fn load(&self) -> Result<Registry, StoreError> {
        match self {
            Store::Journal(s) => s.load().await,
            Store::Memory(s) => s.load().await,
        }
    }
}
