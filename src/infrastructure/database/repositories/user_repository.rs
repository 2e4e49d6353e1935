//! SeaORM implementation of the user repository traits

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, NotSet, Set};

use super::{BaseRepository, PartialUpdate};
use crate::domain::user::{NewUser, User, UserChanges, UserQuery, UserReader, UserWriter};
use crate::infrastructure::database::entities::user::{self, Column};
use crate::infrastructure::database::query::QueryOption;
use crate::shared::AppResult;

pub struct SeaOrmUserRepository {
    base: BaseRepository<user::Entity>,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub fn with_query_timeout(self, timeout: Option<Duration>) -> Self {
        Self {
            base: self.base.with_query_timeout(timeout),
        }
    }

    pub fn base(&self) -> &BaseRepository<user::Entity> {
        &self.base
    }
}

fn user_model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        password_hash: m.password_hash,
        email: m.email,
        phone: m.phone,
        nickname: m.nickname,
        avatar: m.avatar,
        status: m.status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Predicates shared by `list` and `count`.
fn filters(query: &UserQuery) -> Vec<QueryOption<Column>> {
    vec![
        QueryOption::like(Column::Username, query.username.as_str()),
        QueryOption::like(Column::Email, query.email.as_str()),
        QueryOption::equals_if_present(Column::Status, query.status),
    ]
}

fn changes_to_update(changes: &UserChanges) -> PartialUpdate<Column> {
    PartialUpdate::new()
        .set_if_some(Column::Email, changes.email.clone())
        .set_if_some(Column::Phone, changes.phone.clone())
        .set_if_some(Column::Nickname, changes.nickname.clone())
        .set_if_some(Column::Avatar, changes.avatar.clone())
        .set_if_some(Column::Status, changes.status)
}

#[async_trait]
impl UserReader for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<User> {
        self.base.find_by_id(id).await.map(user_model_to_domain)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<User> {
        self.base
            .find_one(&[QueryOption::equals(Column::Username, username)])
            .await
            .map(user_model_to_domain)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        self.base
            .find_one(&[QueryOption::equals(Column::Email, email)])
            .await
            .map(user_model_to_domain)
    }

    async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        let mut options = filters(query);
        options.push(QueryOption::order_by_desc(Column::Id));
        options.push(QueryOption::paginate(query.page as i64, query.page_size as i64));

        let rows = self.base.list(&options).await?;
        Ok(rows.into_iter().map(user_model_to_domain).collect())
    }

    async fn count(&self, query: &UserQuery) -> AppResult<u64> {
        self.base.count(&filters(query)).await
    }
}

#[async_trait]
impl UserWriter for SeaOrmUserRepository {
    async fn create(&self, new: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: NotSet,
            username: Set(new.username),
            password_hash: Set(new.password_hash),
            email: Set(new.email),
            phone: Set(new.phone),
            nickname: Set(new.nickname),
            avatar: Set(new.avatar),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
        };
        self.base.create(model).await.map(user_model_to_domain)
    }

    async fn update(&self, user: &User, changes: &UserChanges) -> AppResult<()> {
        self.base.update(user, changes_to_update(changes)).await
    }

    async fn update_by_id(&self, id: i64, changes: &UserChanges) -> AppResult<()> {
        self.base.update_by_id(id, changes_to_update(changes)).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.base.delete(id).await
    }
}
