//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Settings table entity: one row per setting key
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    /// Surrogate primary key
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Setting key (unique)
    #[sea_orm(unique)]
    pub key: String,

    /// Setting value in its canonical string form
    #[sea_orm(column_type = "Text")]
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
