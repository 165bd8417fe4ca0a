//! In-memory registry with unique indexes.

use super::StoreError;
use allowlist_core::{handle_key, Field, RegistrationRecord};
use std::collections::HashMap;

/// Append-only set of registration records.
///
/// Wallet addresses are indexed byte-for-byte, handles by their case-folded
/// key. `insert` is the only write path and rejects a record that collides
/// on either index.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Records in insertion order
    records: Vec<RegistrationRecord>,
    /// Wallet address -> position in `records`
    by_wallet: HashMap<String, usize>,
    /// Case-folded handle -> position in `records`
    by_handle: HashMap<String, usize>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the record holding `wallet_address` (exact match).
    pub fn find_by_wallet(&self, wallet_address: &str) -> Option<&RegistrationRecord> {
        self.by_wallet
            .get(wallet_address)
            .map(|&idx| &self.records[idx])
    }

    /// Find the record holding `handle`, ignoring case.
    pub fn find_by_handle(&self, handle: &str) -> Option<&RegistrationRecord> {
        self.by_handle
            .get(&handle_key(handle))
            .map(|&idx| &self.records[idx])
    }

    /// Check that `record` collides with no stored record.
    ///
    /// The wallet address is checked first.
    pub fn check_unique(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        if self.by_wallet.contains_key(&record.wallet_address) {
            return Err(StoreError::UniqueViolation(Field::WalletAddress));
        }
        if self.by_handle.contains_key(&record.handle_key()) {
            return Err(StoreError::UniqueViolation(Field::SocialHandle));
        }
        Ok(())
    }

    /// Insert a record, enforcing both unique indexes.
    pub fn insert(&mut self, record: RegistrationRecord) -> Result<&RegistrationRecord, StoreError> {
        self.check_unique(&record)?;

        let idx = self.records.len();
        self.by_wallet.insert(record.wallet_address.clone(), idx);
        self.by_handle.insert(record.handle_key(), idx);
        self.records.push(record);

        Ok(&self.records[idx])
    }

    /// All records, newest first.
    ///
    /// Records created at the same instant are ordered latest-inserted first.
    pub fn list_newest_first(&self) -> Vec<RegistrationRecord> {
        let mut records: Vec<RegistrationRecord> = self.records.iter().rev().cloned().collect();
        // Stable sort keeps the reversed insertion order for equal timestamps
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Get the number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allowlist_core::TaskCompletion;
    use chrono::{Duration, Utc};

    const WALLET_A: &str = "5FHwkrdxnt6YJHBT2NKRRfH8P3uTN8wQwwMV3LXXxpMU";
    const WALLET_B: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

    fn record(wallet: &str, handle: &str) -> RegistrationRecord {
        RegistrationRecord::new(wallet, handle, TaskCompletion::new())
    }

    #[test]
    fn test_registry_insert_and_find() {
        let mut registry = Registry::new();
        registry.insert(record(WALLET_A, "bully_fan1")).unwrap();

        let found = registry.find_by_wallet(WALLET_A).unwrap();
        assert_eq!(found.social_handle, "bully_fan1");
        assert_eq!(registry.count(), 1);
        assert!(registry.find_by_wallet(WALLET_B).is_none());
    }

    #[test]
    fn test_registry_handle_lookup_ignores_case() {
        let mut registry = Registry::new();
        registry.insert(record(WALLET_A, "Bully_Fan1")).unwrap();

        assert!(registry.find_by_handle("bully_fan1").is_some());
        assert!(registry.find_by_handle("BULLY_FAN1").is_some());
        assert!(registry.find_by_handle("bully_fan2").is_none());
    }

    #[test]
    fn test_registry_wallet_lookup_is_exact() {
        let mut registry = Registry::new();
        registry.insert(record(WALLET_A, "bully_fan1")).unwrap();

        assert!(registry.find_by_wallet(&WALLET_A.to_lowercase()).is_none());
    }

    #[test]
    fn test_registry_rejects_duplicate_wallet() {
        let mut registry = Registry::new();
        registry.insert(record(WALLET_A, "bully_fan1")).unwrap();

        let err = registry.insert(record(WALLET_A, "other_fan")).unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(Field::WalletAddress)));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_registry_rejects_duplicate_handle_case_insensitive() {
        let mut registry = Registry::new();
        registry.insert(record(WALLET_A, "Foo_bar")).unwrap();

        let err = registry.insert(record(WALLET_B, "foo_BAR")).unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(Field::SocialHandle)));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_registry_wallet_violation_reported_first() {
        let mut registry = Registry::new();
        registry.insert(record(WALLET_A, "bully_fan1")).unwrap();

        let err = registry.check_unique(&record(WALLET_A, "bully_fan1")).unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(Field::WalletAddress)));
    }

    #[test]
    fn test_registry_list_newest_first() {
        let mut registry = Registry::new();
        let now = Utc::now();

        let mut old = record(WALLET_A, "first_fan");
        old.created_at = now - Duration::minutes(5);
        let mut new = record(WALLET_B, "second_fan");
        new.created_at = now;

        registry.insert(new).unwrap();
        registry.insert(old).unwrap();

        let listed = registry.list_newest_first();
        assert_eq!(listed[0].social_handle, "second_fan");
        assert_eq!(listed[1].social_handle, "first_fan");
    }

    #[test]
    fn test_registry_equal_timestamps_latest_insert_first() {
        let mut registry = Registry::new();
        let now = Utc::now();

        let mut a = record(WALLET_A, "first_fan");
        a.created_at = now;
        let mut b = record(WALLET_B, "second_fan");
        b.created_at = now;

        registry.insert(a).unwrap();
        registry.insert(b).unwrap();

        let listed = registry.list_newest_first();
        assert_eq!(listed[0].social_handle, "second_fan");
        assert_eq!(listed[1].social_handle, "first_fan");
    }

    #[test]
    fn test_registry_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.list_newest_first().is_empty());
    }
}
