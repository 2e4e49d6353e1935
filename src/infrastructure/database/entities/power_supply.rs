//! Power supply catalog entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Identifiable;
use crate::infrastructure::database::repositories::RepositoryEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "power_supplies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    /// Watts
    pub power: i32,
    pub efficiency: String,
    pub modular: bool,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub stock: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Identifiable for Model {
    fn id(&self) -> i64 {
        self.id
    }
}

impl RepositoryEntity for Entity {
    const RESOURCE: &'static str = "power supply";

    fn id_column() -> Column {
        Column::Id
    }

    fn updated_at_column() -> Option<Column> {
        Some(Column::UpdatedAt)
    }
}
