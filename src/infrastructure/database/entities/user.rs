//! User entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Identifiable;
use crate::infrastructure::database::repositories::RepositoryEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub phone: String,
    pub nickname: String,
    pub avatar: String,
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
    const RESOURCE: &'static str = "user";

    fn id_column() -> Column {
        Column::Id
    }

    fn updated_at_column() -> Option<Column> {
        Some(Column::UpdatedAt)
    }
}
