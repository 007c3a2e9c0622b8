//! Repository trait for data access
//!
//! This trait defines the row store boundary: a plain key/value table with no
//! business logic. Implementations are in infra/storage/repositories.rs

use crate::contract::SettingRow;
use anyhow::Result;
use async_trait::async_trait;

/// Repository for setting rows
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Find a row by its key
    async fn find_by_key(&self, key: &str) -> Result<Option<SettingRow>>;

    /// List every stored row
    async fn list_all(&self) -> Result<Vec<SettingRow>>;

    /// Insert a row whose key was not found. If another writer created the
    /// key in the meantime, its value is overwritten.
    async fn insert(&self, row: &SettingRow) -> Result<()>;

    /// Overwrite the value of the row with a matching key
    async fn update(&self, row: &SettingRow) -> Result<()>;

    /// Remove every row, returning how many were removed
    async fn delete_all(&self) -> Result<u64>;

    /// Insert the row if its key is absent, otherwise update it in place.
    ///
    /// Concurrent writers of the same key race; the last write wins, including
    /// when both saw the key as absent.
    async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        let row = SettingRow::new(key, value);
        match self.find_by_key(key).await? {
            Some(_) => self.update(&row).await,
            None => self.insert(&row).await,
        }
    }
}
