//! Change notifications for settings
//!
//! Every successful write is mirrored to an [`EventPublisher`] on a best-effort
//! basis. Events travel through a bounded queue drained by a detached worker:
//! - A full queue drops the event instead of blocking the writer
//! - Each delivery runs in its own task under a timeout
//! - Publisher errors, timeouts and panics are logged and never reach callers

use crate::contract::keys;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const REDACTED: &str = "<redacted>";

/// Domain event types for settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum SettingEvent {
    /// A single key was written
    SettingUpdated(SettingUpdatedEvent),
    /// The whole aggregate was written
    BulkSettingsUpdated(BulkSettingsUpdatedEvent),
    /// Every stored row was removed
    SettingsReset(SettingsResetEvent),
}

/// Event data for a single-key write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingUpdatedEvent {
    pub key: String,
    pub value: Value,
    pub timestamp: DateTime<Utc>,
}

/// Event data for a bulk write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSettingsUpdatedEvent {
    pub settings: Map<String, Value>,
    pub total_settings: usize,
    pub timestamp: DateTime<Utc>,
}

/// Event data for a reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsResetEvent {
    pub timestamp: DateTime<Utc>,
}

impl SettingEvent {
    /// Create a new SettingUpdated event. The secret's value is never
    /// included.
    pub fn updated(key: &str, value: Value) -> Self {
        let value = if key == keys::SECRET {
            Value::from(REDACTED)
        } else {
            value
        };
        SettingEvent::SettingUpdated(SettingUpdatedEvent {
            key: key.to_string(),
            value,
            timestamp: Utc::now(),
        })
    }

    /// Create a new BulkSettingsUpdated event
    pub fn bulk_updated(settings: Map<String, Value>) -> Self {
        SettingEvent::BulkSettingsUpdated(BulkSettingsUpdatedEvent {
            total_settings: settings.len(),
            settings,
            timestamp: Utc::now(),
        })
    }

    /// Create a new SettingsReset event
    pub fn reset() -> Self {
        SettingEvent::SettingsReset(SettingsResetEvent {
            timestamp: Utc::now(),
        })
    }

    pub fn operation(&self) -> &'static str {
        match self {
            SettingEvent::SettingUpdated(_) => "setting_updated",
            SettingEvent::BulkSettingsUpdated(_) => "bulk_settings_updated",
            SettingEvent::SettingsReset(_) => "settings_reset",
        }
    }
}

/// Receiver of setting change notifications
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Deliver one event to the remote side
    async fn publish(&self, event: SettingEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when notifications are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: SettingEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Handle used by the service to queue notifications
#[derive(Clone)]
pub struct Notifier {
    tx: Option<mpsc::Sender<SettingEvent>>,
}

impl Notifier {
    /// Start the delivery worker.
    ///
    /// The worker stops when `cancel` fires or every `Notifier` clone is
    /// dropped. Events still queued at that point are discarded.
    pub fn spawn(
        publisher: Arc<dyn EventPublisher>,
        capacity: usize,
        delivery_timeout: Duration,
        cancel: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_worker(publisher, rx, delivery_timeout, cancel));
        (Self { tx: Some(tx) }, handle)
    }

    /// A notifier that discards every event
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Queue an event without waiting
    pub fn notify(&self, event: SettingEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(operation = event.operation(), "notification queue full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                tracing::debug!(operation = event.operation(), "notifier stopped, dropping event");
            }
        }
    }
}

async fn run_worker(
    publisher: Arc<dyn EventPublisher>,
    mut rx: mpsc::Receiver<SettingEvent>,
    delivery_timeout: Duration,
    cancel: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = rx.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };
        deliver(publisher.clone(), event, delivery_timeout).await;
    }
    tracing::debug!("settings notifier stopped");
}

async fn deliver(publisher: Arc<dyn EventPublisher>, event: SettingEvent, delivery_timeout: Duration) {
    let operation = event.operation();
    let task = tokio::spawn(async move {
        tokio::time::timeout(delivery_timeout, publisher.publish(event)).await
    });

    match task.await {
        Ok(Ok(Ok(()))) => tracing::debug!(operation, "settings notification delivered"),
        Ok(Ok(Err(e))) => tracing::error!(operation, error = %e, "failed to deliver settings notification"),
        Ok(Err(_)) => tracing::error!(operation, timeout = ?delivery_timeout, "settings notification timed out"),
        Err(e) if e.is_panic() => tracing::error!(operation, "settings notification publisher panicked"),
        Err(e) => tracing::error!(operation, error = %e, "settings notification task failed"),
    }
}
