//! Panel Settings Module
//!
//! Runtime configuration store for the administrative panel. Settings live in
//! a row-per-key table and are read back as a typed aggregate, with
//! compiled-in defaults for every key that has no stored row.

// Public exports
pub mod contract;
pub use contract::{
    client::PanelSettingsApi, error::SettingsError, keys, AllSettings, FieldAccess,
    FieldDescriptor, FieldKind, SettingRow,
};

pub mod module;
pub use module::PanelSettingsModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
