//! Module declaration and lifecycle implementation

use crate::config::Config;
use crate::contract::PanelSettingsApi;
use crate::domain::{DefaultCatalog, EventPublisher, Notifier, Service};
use anyhow::Result;
use parking_lot::Mutex;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Panel settings module
pub struct PanelSettingsModule {
    config: Config,
    service: Arc<Service>,
    client: Arc<dyn PanelSettingsApi>,
    cancel: CancellationToken,
    notifier_task: Mutex<Option<JoinHandle<()>>>,
}

impl PanelSettingsModule {
    /// Run migrations and wire the repository, notifier, service and client.
    ///
    /// Must be called inside a tokio runtime; the notification worker is
    /// spawned here.
    pub async fn init(
        config: Config,
        db: DatabaseConnection,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self> {
        Self::migrate(&db).await?;

        let conn = Arc::new(db);
        let settings_repo = Arc::new(
            crate::infra::storage::repositories::SeaOrmSettingsRepository::new(conn),
        );

        let cancel = CancellationToken::new();
        let (notifier, notifier_task) = Notifier::spawn(
            event_publisher,
            config.notify_queue_capacity,
            config.notify_timeout,
            cancel.child_token(),
        );

        let service = Arc::new(Service::new(
            settings_repo,
            DefaultCatalog::process(),
            notifier,
        ));
        let client: Arc<dyn PanelSettingsApi> =
            Arc::new(crate::api::native::NativeClient::new(service.clone()));

        tracing::info!(
            queue_capacity = config.notify_queue_capacity,
            "Panel settings initialized with native client"
        );
        Ok(Self {
            config,
            service,
            client,
            cancel,
            notifier_task: Mutex::new(Some(notifier_task)),
        })
    }

    /// Apply pending migrations
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Panel settings migrations completed");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn client(&self) -> Arc<dyn PanelSettingsApi> {
        self.client.clone()
    }

    /// Stop the notification worker. Queued notifications are discarded.
    pub async fn stop(&self) -> Result<()> {
        self.cancel.cancel();
        let Some(task) = self.notifier_task.lock().take() else {
            return Ok(());
        };

        match tokio::time::timeout(self.config.stop_timeout, task).await {
            Ok(joined) => joined?,
            Err(_) => tracing::warn!(
                timeout = ?self.config.stop_timeout,
                "Panel settings notifier did not stop in time"
            ),
        }
        tracing::info!("Panel settings stopped");
        Ok(())
    }
}
