//! Contract layer - public API for in-process communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::PanelSettingsApi;
pub use error::SettingsError;
pub use model::{keys, AllSettings, FieldAccess, FieldDescriptor, FieldKind, SettingRow};
