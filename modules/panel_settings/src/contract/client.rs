//! Native client trait for in-process communication
//!
//! This trait defines the API the rest of the panel uses to read and change
//! its own settings. NO HTTP - direct function calls.

use super::{error::SettingsError, model::AllSettings};
use async_trait::async_trait;
use chrono_tz::Tz;

/// Panel settings API for in-process callers
#[async_trait]
pub trait PanelSettingsApi: Send + Sync {
    // ===== Aggregate Operations =====

    /// Read every setting, falling back to defaults for missing rows
    async fn get_all_settings(&self) -> Result<AllSettings, SettingsError>;

    /// Validate and persist every setting
    async fn update_all_settings(&self, settings: AllSettings) -> Result<(), SettingsError>;

    /// Delete every stored setting so reads fall back to defaults
    async fn reset_settings(&self) -> Result<(), SettingsError>;

    // ===== Typed Accessors =====

    async fn get_proxy_template(&self) -> Result<String, SettingsError>;

    async fn get_listen(&self) -> Result<String, SettingsError>;

    async fn get_port(&self) -> Result<i64, SettingsError>;

    async fn set_port(&self, port: i64) -> Result<(), SettingsError>;

    async fn get_cert_file(&self) -> Result<String, SettingsError>;

    async fn get_key_file(&self) -> Result<String, SettingsError>;

    /// Session signing secret, pinned to storage on first use
    async fn get_secret(&self) -> Result<Vec<u8>, SettingsError>;

    /// Base path, always with leading and trailing `/`
    async fn get_base_path(&self) -> Result<String, SettingsError>;

    async fn get_time_location(&self) -> Result<Tz, SettingsError>;
}
