//! Contract models for panel settings
//!
//! These models are transport-agnostic and used for in-process communication.
//! NO serde derives - these are pure domain models.

use std::fmt;

/// Row keys recognised by the settings store.
///
/// These are the names stored in the `settings` table and used by the default
/// catalog. They are persisted, so renaming one orphans existing rows.
pub mod keys {
    /// Address the panel web server listens on (empty = all interfaces)
    pub const WEB_LISTEN: &str = "webListen";
    /// Port the panel web server listens on
    pub const WEB_PORT: &str = "webPort";
    /// TLS certificate file path
    pub const WEB_CERT_FILE: &str = "webCertFile";
    /// TLS private key file path
    pub const WEB_KEY_FILE: &str = "webKeyFile";
    /// URL prefix the panel is served under
    pub const WEB_BASE_PATH: &str = "webBasePath";
    /// IANA time zone name used for display and scheduling
    pub const TIME_LOCATION: &str = "timeLocation";
    /// Proxy engine configuration template (JSON document)
    pub const PROXY_TEMPLATE_CONFIG: &str = "xrayTemplateConfig";
    /// Session signing secret; generated, never part of [`AllSettings`](super::AllSettings)
    pub const SECRET: &str = "secret";
}

/// One persisted key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
}

impl SettingRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Typed view over every user-configurable setting.
///
/// Never persisted as a whole: it is exploded into one [`SettingRow`] per
/// field on write and reassembled from rows plus defaults on read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllSettings {
    pub web_listen: String,
    pub web_port: i64,
    pub web_cert_file: String,
    pub web_key_file: String,
    pub web_base_path: String,
    pub proxy_template_config: String,
    pub time_location: String,
}

/// Scalar type of an aggregate field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int => "integer",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed accessors for a single aggregate field
#[derive(Clone, Copy)]
pub enum FieldAccess {
    Text {
        get: fn(&AllSettings) -> &str,
        set: fn(&mut AllSettings, String),
    },
    Int {
        get: fn(&AllSettings) -> i64,
        set: fn(&mut AllSettings, i64),
    },
}

/// Binds an aggregate field to its external row key
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub access: FieldAccess,
}

impl FieldDescriptor {
    pub fn kind(&self) -> FieldKind {
        match self.access {
            FieldAccess::Text { .. } => FieldKind::Text,
            FieldAccess::Int { .. } => FieldKind::Int,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("kind", &self.kind())
            .finish()
    }
}

macro_rules! text_field {
    ($key:expr, $field:ident) => {
        FieldDescriptor {
            key: $key,
            access: FieldAccess::Text {
                get: |s| s.$field.as_str(),
                set: |s, v| s.$field = v,
            },
        }
    };
}

macro_rules! int_field {
    ($key:expr, $field:ident) => {
        FieldDescriptor {
            key: $key,
            access: FieldAccess::Int {
                get: |s| s.$field,
                set: |s, v| s.$field = v,
            },
        }
    };
}

impl AllSettings {
    /// Field schema. Every entry participates in persistence; order is the
    /// order rows are written in.
    pub const FIELDS: &'static [FieldDescriptor] = &[
        text_field!(keys::WEB_LISTEN, web_listen),
        int_field!(keys::WEB_PORT, web_port),
        text_field!(keys::WEB_CERT_FILE, web_cert_file),
        text_field!(keys::WEB_KEY_FILE, web_key_file),
        text_field!(keys::WEB_BASE_PATH, web_base_path),
        text_field!(keys::PROXY_TEMPLATE_CONFIG, proxy_template_config),
        text_field!(keys::TIME_LOCATION, time_location),
    ];

    /// Look up the descriptor bound to `key`
    pub fn field(key: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|f| f.key == key)
    }
}
