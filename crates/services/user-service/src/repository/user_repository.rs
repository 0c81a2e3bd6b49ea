//! User repository backed by the `users` table.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Writes report the number of affected rows so callers can tell a missing
/// row apart from a successful write.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Check whether a row with this ID exists
    async fn exists(&self, id: UserId) -> AppResult<bool>;

    /// Insert a new user; the database assigns the ID
    async fn create(&self, name: String, email: String) -> AppResult<User>;

    /// Overwrite name and email, returning the affected row count
    async fn update(&self, id: UserId, name: String, email: String) -> AppResult<u64>;

    /// Permanently delete a user, returning the affected row count
    async fn delete(&self, id: UserId) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository over a SeaORM connection pool
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::storage("failed to fetch user", e))?;

        Ok(result.map(User::from))
    }

    async fn exists(&self, id: UserId) -> AppResult<bool> {
        let count = UserEntity::find_by_id(id)
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::storage("failed to check user existence", e))?;

        Ok(count > 0)
    }

    async fn create(&self, name: String, email: String) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(name),
            email: Set(email),
        };

        let model = active_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::storage("failed to create user", e))?;
        Ok(User::from(model))
    }

    async fn update(&self, id: UserId, name: String, email: String) -> AppResult<u64> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(name))
            .col_expr(user::Column::Email, Expr::value(email))
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::storage("failed to update user", e))?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: UserId) -> AppResult<u64> {
        let result = UserEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::storage("failed to delete user", e))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::*;

    fn model(id: i32, name: &str, email: &str) -> user::Model {
        user::Model {
            id,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn create_returns_database_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7, "John", "john@example.com")]])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let user = store
            .create("John".to_string(), "john@example.com".to_string())
            .await
            .unwrap();

        assert_eq!(user, User::new(7, "John", "john@example.com"));
    }

    #[tokio::test]
    async fn stores_share_one_pool() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    vec![model(1, "John", "john@example.com")],
                    vec![model(2, "Jane", "jane@x.co")],
                ])
                .into_connection(),
        );
        let first = UserStore::new(Arc::clone(&db));
        let second = UserStore::new(Arc::clone(&db));

        let john = first.find_by_id(1).await.unwrap();
        let jane = second.find_by_id(2).await.unwrap();

        assert_eq!(john, Some(User::new(1, "John", "john@example.com")));
        assert_eq!(jane, Some(User::new(2, "Jane", "jane@x.co")));
        drop((first, second));
        assert_eq!(Arc::strong_count(&db), 1);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        assert_eq!(store.find_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn writes_report_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let updated = store
            .update(1, "Jane".to_string(), "jane@x.co".to_string())
            .await
            .unwrap();
        let deleted = store.delete(2).await.unwrap();

        assert_eq!(updated, 1);
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn storage_failures_carry_operation_context() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let err = store
            .create("John".to_string(), "john@example.com".to_string())
            .await
            .unwrap_err();

        match err {
            AppError::Storage { context, .. } => assert_eq!(context, "failed to create user"),
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
