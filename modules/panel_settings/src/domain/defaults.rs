//! Compiled-in default values
//!
//! The catalog is built once and never mutated. Every entry is stored as a
//! string, including the proxy template which is a whole JSON document.

use crate::contract::keys;
use once_cell::sync::Lazy;
use rand::{distr::Alphanumeric, Rng};
use std::collections::BTreeMap;
use std::sync::Arc;

const PROXY_TEMPLATE: &str = include_str!("proxy_template.json");

/// Length of the generated session secret
pub const SECRET_LEN: usize = 32;

static PROCESS_CATALOG: Lazy<Arc<DefaultCatalog>> = Lazy::new(|| Arc::new(DefaultCatalog::new()));

/// Immutable `key -> default value` mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultCatalog {
    entries: BTreeMap<&'static str, String>,
}

impl DefaultCatalog {
    /// Build a catalog with a freshly generated secret
    pub fn new() -> Self {
        Self::with_secret(generate_secret())
    }

    /// Build a catalog with a caller-chosen secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        let entries = BTreeMap::from([
            (keys::PROXY_TEMPLATE_CONFIG, PROXY_TEMPLATE.to_string()),
            (keys::WEB_LISTEN, String::new()),
            (keys::WEB_PORT, "54321".to_string()),
            (keys::WEB_CERT_FILE, String::new()),
            (keys::WEB_KEY_FILE, String::new()),
            (keys::SECRET, secret.into()),
            (keys::WEB_BASE_PATH, "/".to_string()),
            (keys::TIME_LOCATION, "Asia/Shanghai".to_string()),
        ]);
        Self { entries }
    }

    /// The catalog shared by the whole process. Its secret is generated on
    /// first access and stays fixed until the process exits.
    pub fn process() -> Arc<Self> {
        PROCESS_CATALOG.clone()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn secret(&self) -> &str {
        self.get(keys::SECRET).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Default for DefaultCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}
