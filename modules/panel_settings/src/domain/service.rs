//! Domain service - business logic orchestration

use super::aggregate;
use super::defaults::DefaultCatalog;
use super::events::{Notifier, SettingEvent};
use super::repository::SettingsRepository;
use super::validation::{normalize_base_path, validate_all_settings};
use crate::contract::{keys, AllSettings, SettingsError};
use chrono_tz::Tz;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Domain service for panel settings
pub struct Service {
    settings_repo: Arc<dyn SettingsRepository>,
    defaults: Arc<DefaultCatalog>,
    notifier: Notifier,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        settings_repo: Arc<dyn SettingsRepository>,
        defaults: Arc<DefaultCatalog>,
        notifier: Notifier,
    ) -> Self {
        Self {
            settings_repo,
            defaults,
            notifier,
        }
    }

    pub fn defaults(&self) -> &DefaultCatalog {
        &self.defaults
    }

    // ===== Aggregate Operations =====

    /// Read every setting, using defaults for keys with no stored row
    pub async fn get_all_settings(&self) -> Result<AllSettings, SettingsError> {
        let rows = self.settings_repo.list_all().await?;
        tracing::debug!(rows = rows.len(), "assembling settings");
        aggregate::assemble(&rows, &self.defaults)
    }

    /// Validate and persist every field of `settings`.
    ///
    /// Nothing is written when validation fails. Otherwise each key is saved
    /// on its own; keys that fail are collected into
    /// [`SettingsError::PartialWrite`] while the others stay committed.
    pub async fn update_all_settings(&self, mut settings: AllSettings) -> Result<(), SettingsError> {
        validate_all_settings(&settings)?;
        settings.web_base_path = normalize_base_path(&settings.web_base_path);

        let mut failures = Vec::new();
        for row in aggregate::flatten_to_rows(&settings) {
            if let Err(e) = self.settings_repo.upsert(&row.key, &row.value).await {
                tracing::warn!(key = %row.key, error = %e, "failed to save setting");
                failures.push((row.key, SettingsError::Storage(e)));
            }
        }

        if !failures.is_empty() {
            return Err(SettingsError::PartialWrite { failures });
        }

        self.notifier
            .notify(SettingEvent::bulk_updated(aggregate::snapshot(&settings)));
        Ok(())
    }

    /// Delete every stored setting so that reads fall back to defaults
    pub async fn reset_settings(&self) -> Result<(), SettingsError> {
        let removed = self.settings_repo.delete_all().await?;
        tracing::info!(removed, "settings reset to defaults");
        self.notifier.notify(SettingEvent::reset());
        Ok(())
    }

    // ===== Scalar Accessors =====

    /// Stored value for `key`, or its default when no row exists
    pub async fn get_string(&self, key: &str) -> Result<String, SettingsError> {
        if let Some(row) = self.settings_repo.find_by_key(key).await? {
            return Ok(row.value);
        }
        self.defaults
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| SettingsError::MissingDefault {
                key: key.to_string(),
            })
    }

    pub async fn set_string(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.save_setting(key, value, Value::from(value)).await
    }

    pub async fn get_int(&self, key: &str) -> Result<i64, SettingsError> {
        let value = self.get_string(key).await?;
        aggregate::parse_int(key, &value)
    }

    pub async fn set_int(&self, key: &str, value: i64) -> Result<(), SettingsError> {
        self.save_setting(key, &value.to_string(), Value::from(value))
            .await
    }

    /// Duration setting, stored as e.g. `1h 30m`; bare integers are seconds
    pub async fn get_duration(&self, key: &str) -> Result<Duration, SettingsError> {
        let value = self.get_string(key).await?;
        parse_duration(key, &value)
    }

    pub async fn set_duration(&self, key: &str, value: Duration) -> Result<(), SettingsError> {
        let formatted = humantime::format_duration(value).to_string();
        self.save_setting(key, &formatted, Value::from(formatted.as_str()))
            .await
    }

    // ===== Named Accessors =====

    pub async fn get_proxy_template(&self) -> Result<String, SettingsError> {
        self.get_string(keys::PROXY_TEMPLATE_CONFIG).await
    }

    pub async fn get_listen(&self) -> Result<String, SettingsError> {
        self.get_string(keys::WEB_LISTEN).await
    }

    pub async fn get_port(&self) -> Result<i64, SettingsError> {
        self.get_int(keys::WEB_PORT).await
    }

    pub async fn set_port(&self, port: i64) -> Result<(), SettingsError> {
        self.set_int(keys::WEB_PORT, port).await
    }

    pub async fn get_cert_file(&self) -> Result<String, SettingsError> {
        self.get_string(keys::WEB_CERT_FILE).await
    }

    pub async fn get_key_file(&self) -> Result<String, SettingsError> {
        self.get_string(keys::WEB_KEY_FILE).await
    }

    /// Session signing secret.
    ///
    /// The default secret is random per process, so when no row exists the
    /// default gets written as an explicit row; later processes then read the
    /// same secret. A failed write is logged and the secret is still returned.
    pub async fn get_secret(&self) -> Result<Vec<u8>, SettingsError> {
        if let Some(row) = self.settings_repo.find_by_key(keys::SECRET).await? {
            return Ok(row.value.into_bytes());
        }

        let secret = self.defaults.secret();
        match self.settings_repo.upsert(keys::SECRET, secret).await {
            Ok(()) => tracing::info!("pinned generated session secret"),
            Err(e) => tracing::warn!(error = %e, "save secret failed"),
        }
        Ok(secret.as_bytes().to_vec())
    }

    /// Base path with a guaranteed leading and trailing `/`
    pub async fn get_base_path(&self) -> Result<String, SettingsError> {
        let base_path = self.get_string(keys::WEB_BASE_PATH).await?;
        Ok(normalize_base_path(&base_path))
    }

    /// Configured time zone, falling back to the default zone when the stored
    /// name does not resolve
    pub async fn get_time_location(&self) -> Result<Tz, SettingsError> {
        let name = self.get_string(keys::TIME_LOCATION).await?;
        if let Ok(tz) = name.parse::<Tz>() {
            return Ok(tz);
        }

        let default_name = self.defaults.get(keys::TIME_LOCATION).unwrap_or_default();
        tracing::error!(
            location = %name,
            fallback = %default_name,
            "location does not exist, using default location"
        );
        default_name
            .parse::<Tz>()
            .map_err(|_| SettingsError::InvalidTimeZone {
                name: default_name.to_string(),
            })
    }

    // ===== Helper Methods =====

    async fn save_setting(&self, key: &str, value: &str, payload: Value) -> Result<(), SettingsError> {
        self.settings_repo.upsert(key, value).await?;
        tracing::debug!(key, "setting saved");
        self.notifier.notify(SettingEvent::updated(key, payload));
        Ok(())
    }
}

fn parse_duration(key: &str, value: &str) -> Result<Duration, SettingsError> {
    if let Ok(secs) = value.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(value).map_err(|e| SettingsError::InvalidValue {
        key: key.to_string(),
        expected: "duration",
        value: value.to_string(),
        reason: e.to_string(),
    })
}
