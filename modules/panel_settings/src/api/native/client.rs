//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{AllSettings, PanelSettingsApi, SettingsError};
use crate::domain::Service;
use async_trait::async_trait;
use chrono_tz::Tz;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// This client is used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PanelSettingsApi for NativeClient {
    async fn get_all_settings(&self) -> Result<AllSettings, SettingsError> {
        self.service.get_all_settings().await
    }

    async fn update_all_settings(&self, settings: AllSettings) -> Result<(), SettingsError> {
        self.service.update_all_settings(settings).await
    }

    async fn reset_settings(&self) -> Result<(), SettingsError> {
        self.service.reset_settings().await
    }

    async fn get_proxy_template(&self) -> Result<String, SettingsError> {
        self.service.get_proxy_template().await
    }

    async fn get_listen(&self) -> Result<String, SettingsError> {
        self.service.get_listen().await
    }

    async fn get_port(&self) -> Result<i64, SettingsError> {
        self.service.get_port().await
    }

    async fn set_port(&self, port: i64) -> Result<(), SettingsError> {
        self.service.set_port(port).await
    }

    async fn get_cert_file(&self) -> Result<String, SettingsError> {
        self.service.get_cert_file().await
    }

    async fn get_key_file(&self) -> Result<String, SettingsError> {
        self.service.get_key_file().await
    }

    async fn get_secret(&self) -> Result<Vec<u8>, SettingsError> {
        self.service.get_secret().await
    }

    async fn get_base_path(&self) -> Result<String, SettingsError> {
        self.service.get_base_path().await
    }

    async fn get_time_location(&self) -> Result<Tz, SettingsError> {
        self.service.get_time_location().await
    }
}
