use async_trait::async_trait;

use super::{NewUser, User, UserChanges, UserQuery};
use crate::shared::AppResult;

/// Read side of user persistence.
#[async_trait]
pub trait UserReader: Send + Sync {
    /// `NotFound("user")` when absent.
    async fn find_by_id(&self, id: i64) -> AppResult<User>;

    /// `NotFound("user")` when absent.
    async fn find_by_username(&self, username: &str) -> AppResult<User>;

    async fn find_by_email(&self, email: &str) -> AppResult<User>;

    /// Filtered, ordered (id DESC) and paginated.
    async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>>;

    /// Same predicates as `list`, no window.
    async fn count(&self, query: &UserQuery) -> AppResult<u64>;
}

/// Write side of user persistence.
#[async_trait]
pub trait UserWriter: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Writes only the `Some` fields of `changes` to `user`'s row.
    async fn update(&self, user: &User, changes: &UserChanges) -> AppResult<()>;

    /// As `update`, but `NotFound` if no row has `id`.
    async fn update_by_id(&self, id: i64, changes: &UserChanges) -> AppResult<()>;

    /// Hard delete; `NotFound` if no row has `id`.
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub trait UserRepository: UserReader + UserWriter {}

impl<T: UserReader + UserWriter + ?Sized> UserRepository for T {}
