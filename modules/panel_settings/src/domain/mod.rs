//! Domain layer - business logic and services

pub mod aggregate;
pub mod defaults;
pub mod events;
pub mod repository;
pub mod service;
pub mod validation;

pub use defaults::DefaultCatalog;
pub use events::{EventPublisher, NoOpEventPublisher, Notifier, SettingEvent};
pub use repository::SettingsRepository;
pub use service::Service;
