//! SeaORM repository implementations

use crate::contract::SettingRow;
use crate::domain::repository::SettingsRepository;
use anyhow::{bail, Result};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{prelude::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use super::entity;

// ===== Settings Repository =====

pub struct SeaOrmSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSettingsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsRepository for SeaOrmSettingsRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<SettingRow>> {
        let result = entity::Entity::find()
            .filter(entity::Column::Key.eq(key))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<SettingRow>> {
        let results = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, row: &SettingRow) -> Result<()> {
        let active: entity::ActiveModel = row.into();
        entity::Entity::insert(active)
            .on_conflict(
                OnConflict::column(entity::Column::Key)
                    .update_column(entity::Column::Value)
                    .to_owned(),
            )
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn update(&self, row: &SettingRow) -> Result<()> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Value, Expr::value(row.value.clone()))
            .filter(entity::Column::Key.eq(row.key.as_str()))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            bail!("setting '{}' disappeared before update", row.key);
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = entity::Entity::delete_many().exec(&*self.db).await?;
        Ok(result.rows_affected)
    }
}
