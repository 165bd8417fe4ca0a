//! Registration and listing services.

use crate::registry::{Registry, Store, StoreError};
use allowlist_core::{
    validate_submission, ErrorKind, Field, FieldError, RegistrationRecord, TaskCompletion,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

/// Why a submission was not stored.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: Field, reason: ErrorKind },

    #[error("Duplicate {field}")]
    Duplicate { field: Field },

    #[error("Store unavailable: {0}")]
    Store(#[source] StoreError),
}

impl SubmissionError {
    /// The input the error is attributed to, if it is user-correctable.
    pub fn field(&self) -> Option<Field> {
        match self {
            SubmissionError::Validation { field, .. } | SubmissionError::Duplicate { field } => {
                Some(*field)
            }
            SubmissionError::Store(_) => None,
        }
    }

    /// Message suitable for showing next to the offending field.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Validation { field, reason } => reason.message(*field),
            SubmissionError::Duplicate { field } => field.duplicate_message(),
            SubmissionError::Store(_) => "Failed to submit form".to_string(),
        }
    }
}

impl From<FieldError> for SubmissionError {
    fn from(e: FieldError) -> Self {
        SubmissionError::Validation {
            field: e.field,
            reason: e.kind,
        }
    }
}

impl From<StoreError> for SubmissionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation(field) => SubmissionError::Duplicate { field },
            other => SubmissionError::Store(other),
        }
    }
}

/// Validates, de-duplicates and stores submissions.
///
/// Cloning is cheap; clones share the same registry and store.
#[derive(Clone)]
pub struct RegistrationService {
    registry: Arc<RwLock<Registry>>,
    store: Arc<Store>,
}

impl RegistrationService {
    pub fn new(registry: Registry, store: Store) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            store: Arc::new(store),
        }
    }

    /// Register a participant.
    ///
    /// The lookups under the read lock only produce a friendlier early
    /// rejection. The registry re-checks both indexes under the write lock,
    /// which is what keeps concurrent duplicates out. The record is appended
    /// to the store before it becomes visible, so a failed append leaves the
    /// registry untouched.
    #[instrument(skip(self, task_completion))]
    pub async fn register(
        &self,
        wallet_address: &str,
        social_handle: &str,
        task_completion: TaskCompletion,
    ) -> Result<RegistrationRecord, SubmissionError> {
        let wallet_address = wallet_address.trim();
        let social_handle = social_handle.trim();

        validate_submission(wallet_address, social_handle).inspect_err(|e| {
            warn!(field = %e.field, reason = %e.kind, "Submission failed validation");
        })?;

        {
            let registry = self.registry.read().await;
            if registry.find_by_wallet(wallet_address).is_some() {
                warn!(wallet_address, "Wallet address already registered");
                return Err(SubmissionError::Duplicate {
                    field: Field::WalletAddress,
                });
            }
            if registry.find_by_handle(social_handle).is_some() {
                warn!(social_handle, "Handle already registered");
                return Err(SubmissionError::Duplicate {
                    field: Field::SocialHandle,
                });
            }
        }

        let record = RegistrationRecord::new(wallet_address, social_handle, task_completion);

        let mut registry = self.registry.write().await;
        if let Err(e) = registry.check_unique(&record) {
            warn!(error = %e, "Lost race with a concurrent submission");
            return Err(e.into());
        }

        if let Err(e) = self.store.append(&record).await {
            error!(error = %e, "Failed to persist submission");
            return Err(e.into());
        }

        let stored = registry.insert(record)?.clone();

        info!(
            id = %stored.id,
            wallet_address = %stored.wallet_address,
            total = registry.count(),
            "Registration stored"
        );

        Ok(stored)
    }

    /// All registrations, newest first.
    ///
    /// Served from the in-memory registry, so listing cannot fail.
    pub async fn list_registrations(&self) -> Vec<RegistrationRecord> {
        self.registry.read().await.list_newest_first()
    }

    /// Get the number of stored registrations.
    pub async fn count(&self) -> usize {
        self.registry.read().await.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::JournalStore;

    const WALLET_A: &str = "5FHwkrdxnt6YJHBT2NKRRfH8P3uTN8wQwwMV3LXXxpMU";
    const WALLET_B: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

    fn memory_service() -> RegistrationService {
        RegistrationService::new(Registry::new(), Store::memory())
    }

    fn all_tasks() -> TaskCompletion {
        allowlist_core::Task::ALL
            .iter()
            .map(|t| (t.key().to_string(), true.into()))
            .collect()
    }

    #[tokio::test]
    async fn test_register_success() {
        let service = memory_service();

        let record = service
            .register(WALLET_A, "bully_fan1", all_tasks())
            .await
            .unwrap();

        assert_eq!(record.wallet_address, WALLET_A);
        assert_eq!(record.social_handle, "bully_fan1");
        assert_eq!(record.task_completion.len(), 5);
        assert_eq!(service.count().await, 1);
    }

    #[tokio::test]
    async fn test_register_trims_input() {
        let service = memory_service();

        let record = service
            .register(&format!("  {}\n", WALLET_A), " bully_fan1 ", TaskCompletion::new())
            .await
            .unwrap();

        assert_eq!(record.wallet_address, WALLET_A);
        assert_eq!(record.social_handle, "bully_fan1");
    }

    #[tokio::test]
    async fn test_register_empty_wallet() {
        let service = memory_service();

        let err = service
            .register("", "bully_fan1", TaskCompletion::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::Validation {
                field: Field::WalletAddress,
                reason: ErrorKind::Required
            }
        ));
        assert_eq!(err.field(), Some(Field::WalletAddress));
        assert_eq!(err.user_message(), "Wallet address is required");
    }

    #[tokio::test]
    async fn test_register_invalid_handle() {
        let service = memory_service();

        let err = service
            .register(WALLET_A, "bad handle!", TaskCompletion::new())
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some(Field::SocialHandle));
        assert_eq!(err.user_message(), "Invalid Twitter username format");
        assert_eq!(service.count().await, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_wallet() {
        let service = memory_service();

        service
            .register(WALLET_A, "bully_fan1", all_tasks())
            .await
            .unwrap();
        let err = service
            .register(WALLET_A, "bully_fan2", all_tasks())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::Duplicate {
                field: Field::WalletAddress
            }
        ));
        assert_eq!(
            err.user_message(),
            "This wallet address has already been registered"
        );
        assert_eq!(service.count().await, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_handle_case_insensitive() {
        let service = memory_service();

        service.register(WALLET_A, "Foo_", all_tasks()).await.unwrap();
        let err = service
            .register(WALLET_B, "foo_", all_tasks())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::Duplicate {
                field: Field::SocialHandle
            }
        ));
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_store_one() {
        let service = memory_service();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .register(WALLET_A, &format!("racer_{}", i), TaskCompletion::new())
                        .await
                })
            })
            .collect();

        let mut stored = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => stored += 1,
                Err(e) => assert_eq!(e.field(), Some(Field::WalletAddress)),
            }
        }

        assert_eq!(stored, 1);
        assert_eq!(service.count().await, 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let service = memory_service();

        service.register(WALLET_A, "first_fan", all_tasks()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        service.register(WALLET_B, "second_fan", all_tasks()).await.unwrap();

        let listed = service.list_registrations().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].social_handle, "second_fan");
        assert_eq!(listed[1].social_handle, "first_fan");
    }

    #[tokio::test]
    async fn test_register_persists_to_journal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.jsonl");
        let service = RegistrationService::new(Registry::new(), Store::journal(&path));

        service.register(WALLET_A, "bully_fan1", all_tasks()).await.unwrap();

        let registry = JournalStore::new(&path).load().await.unwrap();
        assert_eq!(registry.count(), 1);
        assert!(registry.find_by_handle("bully_fan1").is_some());
    }

    #[tokio::test]
    async fn test_failed_append_leaves_registry_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the journal file should be makes every append fail
        let path = dir.path().join("journal");
        std::fs::create_dir(&path).unwrap();
        let service = RegistrationService::new(Registry::new(), Store::journal(&path));

        let err = service
            .register(WALLET_A, "bully_fan1", all_tasks())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmissionError::Store(_)));
        assert_eq!(err.field(), None);
        assert_eq!(err.user_message(), "Failed to submit form");
        assert_eq!(service.count().await, 0);
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate() {
        let err = SubmissionError::from(StoreError::UniqueViolation(Field::SocialHandle));
        assert!(matches!(
            err,
            SubmissionError::Duplicate {
                field: Field::SocialHandle
            }
        ));
    }
}
