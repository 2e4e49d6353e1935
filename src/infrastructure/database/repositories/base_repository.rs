//! Generic CRUD engine shared by every resource repository.
//!
//! [`BaseRepository`] is parameterised by the SeaORM entity and by where its
//! statements run: the pooled [`DatabaseConnection`] by default, or a
//! borrowed [`DatabaseTransaction`] inside [`BaseRepository::transaction`].
//! Driver errors become `DatabaseError`, a missing row becomes
//! `NotFound(<resource>)` and every statement runs under the configured
//! query deadline.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::time::Duration;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IdenStatic, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, SqlErr, TransactionError, TransactionTrait, Value,
};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::domain::Identifiable;
use crate::infrastructure::database::query::{self, QueryOption};
use crate::shared::{AppError, AppResult};

/// Entities the generic engine can manage.
pub trait RepositoryEntity: EntityTrait {
    /// Resource name used in `"<resource> not found"` messages.
    const RESOURCE: &'static str;

    fn id_column() -> Self::Column;

    /// Column stamped with the current time on every partial update.
    fn updated_at_column() -> Option<Self::Column> {
        None
    }
}

/// Where statements are executed.
pub trait ConnectionSource: Send + Sync {
    type Conn: ConnectionTrait + Send + Sync;

    fn connection(&self) -> &Self::Conn;
}

impl ConnectionSource for DatabaseConnection {
    type Conn = DatabaseConnection;

    fn connection(&self) -> &DatabaseConnection {
        self
    }
}

impl<'c> ConnectionSource for &'c DatabaseTransaction {
    type Conn = DatabaseTransaction;

    fn connection(&self) -> &DatabaseTransaction {
        self
    }
}

/// Column → value map for sparse updates. Columns not present are left
/// untouched.
#[derive(Debug, Clone)]
pub struct PartialUpdate<C> {
    fields: Vec<(C, Value)>,
}

impl<C: ColumnTrait> PartialUpdate<C> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn set(mut self, column: C, value: impl Into<Value>) -> Self {
        self.fields.push((column, value.into()));
        self
    }

    pub fn set_if_some<V: Into<Value>>(self, column: C, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &C> {
        self.fields.iter().map(|(c, _)| c)
    }
}

impl<C: ColumnTrait> Default for PartialUpdate<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Boxed future handed back by a transaction body.
pub type TxFuture<'c, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'c>>;

pub struct BaseRepository<E, S = DatabaseConnection> {
    source: S,
    query_timeout: Option<Duration>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S: Clone> Clone for BaseRepository<E, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            query_timeout: self.query_timeout,
            _entity: PhantomData,
        }
    }
}

impl<E: RepositoryEntity> BaseRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            source: db,
            query_timeout: None,
            _entity: PhantomData,
        }
    }

    /// Abort statements that run longer than `timeout`.
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.source
    }

    /// Runs `body` in one transaction. Every call made through the scoped
    /// repository it receives shares that transaction; an `Err` from `body`
    /// rolls all of them back.
    ///
    /// Not reentrant: calling `transaction` from inside `body` is unsupported.
    pub async fn transaction<F, T>(&self, body: F) -> AppResult<T>
    where
        F: for<'c> FnOnce(BaseRepository<E, &'c DatabaseTransaction>) -> TxFuture<'c, T> + Send,
        T: Send,
    {
        let query_timeout = self.query_timeout;
        self.source
            .transaction::<_, T, AppError>(move |txn| {
                body(BaseRepository {
                    source: txn,
                    query_timeout,
                    _entity: PhantomData,
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db) => AppError::database(db),
                TransactionError::Transaction(app) => app,
            })
    }
}

impl<E, S> BaseRepository<E, S>
where
    E: RepositoryEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    S: ConnectionSource,
{
    fn conn(&self) -> &S::Conn {
        self.source.connection()
    }

    fn translate(err: DbErr) -> AppError {
        if let DbErr::RecordNotFound(_) = err {
            return AppError::not_found(E::RESOURCE).caused_by(err);
        }
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return AppError::already_exists(E::RESOURCE).caused_by(err);
        }
        AppError::database(err)
    }

    /// Awaits a statement under the query deadline.
    async fn run<T, F>(&self, statement: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        let result = match self.query_timeout {
            Some(limit) => match tokio::time::timeout(limit, statement).await {
                Ok(result) => result,
                Err(elapsed) => {
                    warn!(resource = E::RESOURCE, "Query exceeded {:?}", limit);
                    return Err(AppError::database(elapsed));
                }
            },
            None => statement.await,
        };
        result.map_err(Self::translate)
    }

    fn stamped(&self, fields: PartialUpdate<E::Column>) -> PartialUpdate<E::Column> {
        match E::updated_at_column() {
            Some(column) if !fields.columns().any(|c| c.as_str() == column.as_str()) => {
                fields.set(column, Utc::now())
            }
            _ => fields,
        }
    }

    async fn update_where(
        &self,
        options: &[QueryOption<E::Column>],
        fields: PartialUpdate<E::Column>,
    ) -> AppResult<u64> {
        let fields = self.stamped(fields);
        let statement = fields
            .fields
            .into_iter()
            .fold(E::update_many(), |stmt, (column, value)| {
                stmt.col_expr(column, Expr::value(value))
            })
            .filter(query::condition(options));
        let result = self.run(statement.exec(self.conn())).await?;
        Ok(result.rows_affected)
    }

    fn by_id(id: i64) -> [QueryOption<E::Column>; 1] {
        [QueryOption::equals(E::id_column(), id)]
    }

    // ── Create ─────────────────────────────────────────────────

    /// Inserts one row and returns it with its generated identity.
    pub async fn create(&self, model: E::ActiveModel) -> AppResult<E::Model> {
        self.run(model.insert(self.conn())).await
    }

    /// Inserts all rows in one statement; an empty batch is a no-op.
    pub async fn batch_create(&self, models: Vec<E::ActiveModel>) -> AppResult<()> {
        if models.is_empty() {
            return Ok(());
        }
        self.run(E::insert_many(models).exec(self.conn())).await?;
        Ok(())
    }

    // ── Read ───────────────────────────────────────────────────

    pub async fn find_by_id(&self, id: i64) -> AppResult<E::Model> {
        self.find_one(&Self::by_id(id)).await
    }

    /// First row matching `options`, `NotFound` if none.
    pub async fn find_one(&self, options: &[QueryOption<E::Column>]) -> AppResult<E::Model> {
        let select = query::apply(E::find(), options);
        self.run(select.one(self.conn()))
            .await?
            .ok_or_else(|| AppError::not_found(E::RESOURCE))
    }

    /// Like `find_one`, ordered by primary key ascending.
    pub async fn first(&self, options: &[QueryOption<E::Column>]) -> AppResult<E::Model> {
        let select = query::apply(E::find(), options).order_by_asc(E::id_column());
        self.run(select.one(self.conn()))
            .await?
            .ok_or_else(|| AppError::not_found(E::RESOURCE))
    }

    /// Every matching row; an empty result is not an error.
    pub async fn list(&self, options: &[QueryOption<E::Column>]) -> AppResult<Vec<E::Model>> {
        let select = query::apply(E::find(), options);
        self.run(select.all(self.conn())).await
    }

    /// As `list`, rendered as JSON objects so projection options can drop
    /// columns the model would require.
    pub async fn list_json(&self, options: &[QueryOption<E::Column>]) -> AppResult<Vec<JsonValue>> {
        let select = query::apply(E::find(), options).into_json();
        self.run(select.all(self.conn())).await
    }

    /// Matching rows, ignoring any ordering or pagination in `options`.
    pub async fn count(&self, options: &[QueryOption<E::Column>]) -> AppResult<u64> {
        let select = query::apply_predicates(E::find(), options);
        self.run(select.count(self.conn())).await
    }

    pub async fn exists(&self, options: &[QueryOption<E::Column>]) -> AppResult<bool> {
        Ok(self.count(options).await? > 0)
    }

    // ── Update ─────────────────────────────────────────────────

    /// Writes `fields` to `entity`'s row. Missing rows are not reported.
    pub async fn update<M>(&self, entity: &M, fields: PartialUpdate<E::Column>) -> AppResult<()>
    where
        M: Identifiable + Sync,
    {
        if fields.is_empty() {
            return Ok(());
        }
        self.update_where(&Self::by_id(entity.id()), fields).await?;
        Ok(())
    }

    /// Writes `fields` to row `id`; `NotFound` when no row matched.
    pub async fn update_by_id(&self, id: i64, fields: PartialUpdate<E::Column>) -> AppResult<()> {
        if fields.is_empty() {
            return self.find_by_id(id).await.map(|_| ());
        }
        match self.update_where(&Self::by_id(id), fields).await? {
            0 => Err(AppError::not_found(E::RESOURCE)),
            _ => Ok(()),
        }
    }

    /// Writes `fields` to every row matching `options`; returns rows affected.
    pub async fn batch_update(
        &self,
        options: &[QueryOption<E::Column>],
        fields: PartialUpdate<E::Column>,
    ) -> AppResult<u64> {
        if fields.is_empty() {
            return Ok(0);
        }
        self.update_where(options, fields).await
    }

    // ── Delete ─────────────────────────────────────────────────

    /// Hard delete; `NotFound` when no row had `id`.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        match self.delete_by_condition(&Self::by_id(id)).await? {
            0 => Err(AppError::not_found(E::RESOURCE)),
            _ => Ok(()),
        }
    }

    /// Deletes every row matching `options`; returns rows affected.
    /// Refuses to run without at least one predicate.
    pub async fn delete_by_condition(&self, options: &[QueryOption<E::Column>]) -> AppResult<u64> {
        if !query::has_predicate(options) {
            return Err(AppError::invalid_param(format!(
                "refusing to delete every {} without a condition",
                E::RESOURCE
            )));
        }
        let statement = E::delete_many().filter(query::condition(options));
        let result = self.run(statement.exec(self.conn())).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::entities::power_supply::{self, ActiveModel, Column};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use crate::shared::ErrorKind;
    use rust_decimal::Decimal;
    use sea_orm::Set;
    use sea_orm_migration::MigratorTrait;

    type Repo = BaseRepository<power_supply::Entity>;

    async fn repo() -> Repo {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        BaseRepository::new(db)
    }

    fn psu(name: &str, power: i32) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            name: Set(name.to_string()),
            brand: Set("Seasonic".to_string()),
            model: Set(format!("{name}-M")),
            power: Set(power),
            efficiency: Set("80+ Gold".to_string()),
            modular: Set(true),
            price: Set(Decimal::new(9950, 2)),
            stock: Set(3),
            description: Set(String::new()),
            status: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_identity_and_find_by_id_returns_it() {
        let repo = repo().await;
        let created = repo.create(psu("Focus", 650)).await.unwrap();
        assert!(created.id > 0);

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found_with_resource_name() {
        let repo = repo().await;
        let err = repo.find_by_id(42).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "power supply not found");

        let err = repo
            .find_one(&[QueryOption::equals(Column::Name, "nope")])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn partial_update_leaves_other_columns_alone() {
        let repo = repo().await;
        let created = repo.create(psu("Prime", 1000)).await.unwrap();

        repo.update(&created, PartialUpdate::new().set(Column::Stock, 0))
            .await
            .unwrap();

        let fresh = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(fresh.stock, 0);
        assert_eq!(fresh.name, "Prime");
        assert_eq!(fresh.power, 1000);
        assert!(fresh.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_by_id_and_delete_report_missing_rows() {
        let repo = repo().await;
        let err = repo
            .update_by_id(99, PartialUpdate::new().set(Column::Stock, 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let created = repo.create(psu("Core", 500)).await.unwrap();
        repo.delete(created.id).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap_err().is_not_found());
        assert!(repo.delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn count_ignores_window_and_exists_follows_count() {
        let repo = repo().await;
        repo.batch_create(vec![psu("A", 450), psu("B", 750), psu("C", 850)])
            .await
            .unwrap();
        repo.batch_create(Vec::new()).await.unwrap();

        let options = [
            QueryOption::gte(Column::Power, 700),
            QueryOption::paginate(1, 1),
        ];
        assert_eq!(repo.count(&options).await.unwrap(), 2);
        assert_eq!(repo.list(&options).await.unwrap().len(), 1);
        assert!(repo.exists(&options).await.unwrap());
        assert!(!repo
            .exists(&[QueryOption::gt(Column::Power, 2000)])
            .await
            .unwrap());

        let first = repo.first(&[]).await.unwrap();
        assert_eq!(first.name, "A");
    }

    #[tokio::test]
    async fn batch_update_and_conditional_delete() {
        let repo = repo().await;
        repo.batch_create(vec![psu("A", 450), psu("B", 750), psu("C", 850)])
            .await
            .unwrap();

        let touched = repo
            .batch_update(
                &[QueryOption::lt(Column::Power, 800)],
                PartialUpdate::new().set(Column::Status, 0),
            )
            .await
            .unwrap();
        assert_eq!(touched, 2);

        let removed = repo
            .delete_by_condition(&[QueryOption::equals(Column::Status, 0)])
            .await
            .unwrap();
        assert_eq!(removed, 2);

        let err = repo.delete_by_condition(&[]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam);
        assert_eq!(repo.count(&[]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_json_honours_projection() {
        let repo = repo().await;
        repo.create(psu("Vertex", 1200)).await.unwrap();

        let rows = repo
            .list_json(&[QueryOption::select([Column::Id, Column::Name])])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Vertex");
        assert!(rows[0].get("price").is_none());
    }

    #[tokio::test]
    async fn failed_transaction_rolls_back_every_write() {
        let repo = repo().await;

        let result: AppResult<()> = repo
            .transaction(|tx| {
                Box::pin(async move {
                    tx.create(psu("Ghost", 300)).await?;
                    tx.create(psu("Ghost 2", 400)).await?;
                    Err(AppError::invalid_param("abort"))
                })
            })
            .await;
        assert_eq!(result.unwrap_err().message(), "abort");
        assert_eq!(repo.count(&[]).await.unwrap(), 0);

        let id = repo
            .transaction(|tx| Box::pin(async move { Ok(tx.create(psu("Kept", 300)).await?.id) }))
            .await
            .unwrap();
        assert_eq!(repo.find_by_id(id).await.unwrap().name, "Kept");
    }

    #[tokio::test]
    async fn elapsed_deadline_is_a_database_error() {
        let repo = repo().await.with_query_timeout(Some(Duration::from_nanos(1)));
        let err = repo
            .run(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, DbErr>(())
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DatabaseError);
        assert!(std::error::Error::source(&err).is_some());
    }
}
