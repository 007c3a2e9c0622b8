//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::SettingRow;

impl From<entity::Model> for SettingRow {
    fn from(entity: entity::Model) -> Self {
        Self {
            key: entity.key,
            value: entity.value,
        }
    }
}

impl From<&SettingRow> for entity::ActiveModel {
    fn from(row: &SettingRow) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            key: Set(row.key.clone()),
            value: Set(row.value.clone()),
        }
    }
}
