//! Common test utilities: in-memory repository and recording publisher

#![allow(dead_code)]

use async_trait::async_trait;
use panel_settings::domain::{
    DefaultCatalog, EventPublisher, Notifier, SettingEvent, SettingsRepository, Service,
};
use panel_settings::SettingRow;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub const TEST_SECRET: &str = "0123456789abcdefghijABCDEFGHIJkl";

/// In-memory settings table with fault injection
#[derive(Default)]
pub struct MockSettingsRepo {
    data: RwLock<BTreeMap<String, String>>,
    failing_keys: RwLock<HashSet<String>>,
    fail_reads: AtomicBool,
    mutations: AtomicUsize,
}

impl MockSettingsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write of `key` fail with a storage error
    pub fn fail_writes_for(&self, key: &str) {
        self.failing_keys.write().insert(key.to_string());
    }

    /// Make every read fail with a storage error
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Write a row directly, bypassing the service and the mutation counter
    pub fn seed(&self, key: &str, value: &str) {
        self.data.write().insert(key.to_string(), value.to_string());
    }

    pub fn value_of(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    /// Number of successful insert/update/delete calls
    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> anyhow::Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("database is unavailable");
        }
        Ok(())
    }

    fn check_write(&self, key: &str) -> anyhow::Result<()> {
        if self.failing_keys.read().contains(key) {
            anyhow::bail!("disk I/O error writing {}", key);
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for MockSettingsRepo {
    async fn find_by_key(&self, key: &str) -> anyhow::Result<Option<SettingRow>> {
        self.check_read()?;
        Ok(self
            .data
            .read()
            .get(key)
            .map(|value| SettingRow::new(key, value.as_str())))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<SettingRow>> {
        self.check_read()?;
        Ok(self
            .data
            .read()
            .iter()
            .map(|(k, v)| SettingRow::new(k.as_str(), v.as_str()))
            .collect())
    }

    async fn insert(&self, row: &SettingRow) -> anyhow::Result<()> {
        self.check_write(&row.key)?;
        self.data.write().insert(row.key.clone(), row.value.clone());
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, row: &SettingRow) -> anyhow::Result<()> {
        self.check_write(&row.key)?;
        let mut data = self.data.write();
        let Some(value) = data.get_mut(&row.key) else {
            anyhow::bail!("no row for key {}", row.key);
        };
        *value = row.value.clone();
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        let mut data = self.data.write();
        let removed = data.len() as u64;
        data.clear();
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(removed)
    }
}

/// Publisher that forwards every event to a channel
pub struct RecordingPublisher {
    tx: mpsc::UnboundedSender<SettingEvent>,
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: SettingEvent) -> anyhow::Result<()> {
        let _ = self.tx.send(event);
        Ok(())
    }
}

/// Publisher that always fails
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: SettingEvent) -> anyhow::Result<()> {
        anyhow::bail!("analytics endpoint returned 503")
    }
}

pub struct Harness {
    pub service: Service,
    pub repo: Arc<MockSettingsRepo>,
    pub events: mpsc::UnboundedReceiver<SettingEvent>,
    pub cancel: CancellationToken,
}

impl Harness {
    /// Wait for the next delivered notification
    pub async fn next_event(&mut self) -> SettingEvent {
        tokio::time::timeout(Duration::from_secs(2), self.events.recv())
            .await
            .expect("timed out waiting for notification")
            .expect("publisher dropped")
    }

    /// Assert nothing is delivered within a short window
    pub async fn assert_no_event(&mut self) {
        let result = tokio::time::timeout(Duration::from_millis(100), self.events.recv()).await;
        assert!(result.is_err(), "unexpected notification: {:?}", result);
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub fn catalog() -> Arc<DefaultCatalog> {
    Arc::new(DefaultCatalog::with_secret(TEST_SECRET))
}

/// Service over an empty mock repository with a recording publisher
pub fn harness() -> Harness {
    let repo = Arc::new(MockSettingsRepo::new());
    let (tx, events) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let (notifier, _task) = Notifier::spawn(
        Arc::new(RecordingPublisher { tx }),
        16,
        Duration::from_secs(1),
        cancel.clone(),
    );
    let service = Service::new(repo.clone(), catalog(), notifier);
    Harness {
        service,
        repo,
        events,
        cancel,
    }
}

/// Service with notifications routed to `publisher`
pub fn service_with_publisher(publisher: Arc<dyn EventPublisher>) -> (Service, Arc<MockSettingsRepo>, CancellationToken) {
    let repo = Arc::new(MockSettingsRepo::new());
    let cancel = CancellationToken::new();
    let (notifier, _task) = Notifier::spawn(publisher, 16, Duration::from_secs(1), cancel.clone());
    (Service::new(repo.clone(), catalog(), notifier), repo, cancel)
}
