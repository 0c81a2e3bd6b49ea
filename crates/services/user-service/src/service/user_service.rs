//! User service - validation, existence checks and storage orchestration.
//!
//! Every operation goes back to the repository; nothing is cached between
//! calls. Update and Delete read before they write so that a missing row is
//! reported as not-found rather than as a silent no-op. The read and the
//! write are not one transaction, so a write that affects zero rows is
//! treated as not-found too.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{parse_user_id, validate_user_fields, User, UserId, ENTITY_USER};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// IDs arrive in their protocol-facing string form.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and insert a new user
    async fn create_user(&self, name: String, email: String) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// Overwrite name and email of an existing user
    async fn update_user(&self, id: &str, name: String, email: String) -> AppResult<User>;

    /// Permanently delete a user, returning the removed ID
    async fn delete_user(&self, id: &str) -> AppResult<UserId>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Resolve a raw ID to one that currently has a row.
    async fn existing_id(&self, raw: &str) -> AppResult<UserId> {
        let id = parse_user_id(raw).ok_or_not_found(ENTITY_USER)?;
        if !self.repo.exists(id).await? {
            debug!(user_id = id, "User does not exist");
            return Err(AppError::not_found(ENTITY_USER));
        }
        Ok(id)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, name: String, email: String) -> AppResult<User> {
        validate_user_fields(&name, &email)?;

        let user = self.repo.create(name, email).await?;
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        let id = parse_user_id(id).ok_or_not_found(ENTITY_USER)?;
        self.repo.find_by_id(id).await?.ok_or_not_found(ENTITY_USER)
    }

    async fn update_user(&self, id: &str, name: String, email: String) -> AppResult<User> {
        validate_user_fields(&name, &email)?;
        let id = self.existing_id(id).await?;

        let affected = self.repo.update(id, name.clone(), email.clone()).await?;
        if affected == 0 {
            warn!(user_id = id, "User removed between existence check and update");
            return Err(AppError::not_found(ENTITY_USER));
        }

        info!(user_id = id, "User updated");
        Ok(User::new(id, name, email))
    }

    async fn delete_user(&self, id: &str) -> AppResult<UserId> {
        let id = self.existing_id(id).await?;

        if self.repo.delete(id).await? == 0 {
            warn!(user_id = id, "User removed between existence check and delete");
            return Err(AppError::not_found(ENTITY_USER));
        }

        info!(user_id = id, "User deleted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    use super::*;
    use crate::repository::{InMemoryUserStore, MockUserRepository};

    fn manager_with(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    fn in_memory_manager() -> UserManager {
        UserManager::new(Arc::new(InMemoryUserStore::new()))
    }

    #[tokio::test]
    async fn create_user_returns_generated_id() {
        let service = in_memory_manager();

        let user = service
            .create_user("John".to_string(), "john@example.com".to_string())
            .await
            .unwrap();

        assert!(!user.id_string().is_empty());
        assert_eq!(user.name, "John");
        assert_eq!(user.email, "john@example.com");
    }

    #[tokio::test]
    async fn invalid_fields_are_rejected_before_storage() {
        // No expectations: any repository call would panic.
        let service = manager_with(MockUserRepository::new());

        for (name, email) in [
            ("", "john@example.com"),
            ("John Doe", "john@example.com"),
            ("9lives", "cat@example.com"),
            ("John", ""),
            ("John", "john.example.com"),
            ("John", "john@example"),
        ] {
            let create = service
                .create_user(name.to_string(), email.to_string())
                .await;
            assert!(
                matches!(create, Err(AppError::Validation(_))),
                "create({name:?}, {email:?}) should be invalid"
            );

            let update = service
                .update_user("1", name.to_string(), email.to_string())
                .await;
            assert!(
                matches!(update, Err(AppError::Validation(_))),
                "update({name:?}, {email:?}) should be invalid"
            );
        }
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let service = in_memory_manager();

        assert!(service.get_user("12345").await.unwrap_err().is_not_found());
        assert!(service.get_user("not-a-number").await.unwrap_err().is_not_found());
        assert!(service.get_user("").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = in_memory_manager();
        let created = service
            .create_user("Jane".to_string(), "jane@x.co".to_string())
            .await
            .unwrap();

        let fetched = service.get_user(&created.id_string()).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let service = in_memory_manager();
        let created = service
            .create_user("John".to_string(), "john@example.com".to_string())
            .await
            .unwrap();
        let id = created.id_string();

        let updated = service
            .update_user(&id, "JohnUpdated".to_string(), "john.updated@example.com".to_string())
            .await
            .unwrap();
        let fetched = service.get_user(&id).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(fetched, User::new(created.id, "JohnUpdated", "john.updated@example.com"));
    }

    #[tokio::test]
    async fn delete_removes_user() {
        let service = in_memory_manager();
        let created = service
            .create_user("Alice".to_string(), "alice@example.com".to_string())
            .await
            .unwrap();
        let id = created.id_string();

        let deleted = service.delete_user(&id).await.unwrap();

        assert_eq!(deleted, created.id);
        assert!(service.get_user(&id).await.unwrap_err().is_not_found());
        assert!(service.delete_user(&id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let service = in_memory_manager();
        let first = service
            .create_user("Alice".to_string(), "alice@example.com".to_string())
            .await
            .unwrap();
        service.delete_user(&first.id_string()).await.unwrap();

        let second = service
            .create_user("Bob".to_string(), "bob@example.com".to_string())
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn update_and_delete_missing_user_are_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists().with(eq(42)).times(2).returning(|_| Ok(false));
        repo.expect_update().never();
        repo.expect_delete().never();
        let service = manager_with(repo);

        let update = service
            .update_user("42", "Jane".to_string(), "jane@x.co".to_string())
            .await;
        let delete = service.delete_user("42").await;

        assert!(update.unwrap_err().is_not_found());
        assert!(delete.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn concurrent_removal_after_check_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists().returning(|_| Ok(true));
        repo.expect_update().returning(|_, _, _| Ok(0));
        repo.expect_delete().returning(|_| Ok(0));
        let service = manager_with(repo);

        let update = service
            .update_user("3", "Jane".to_string(), "jane@x.co".to_string())
            .await;
        let delete = service.delete_user("3").await;

        assert!(update.unwrap_err().is_not_found());
        assert!(delete.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn storage_failures_surface_as_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().returning(|_, _| {
            Err(AppError::storage(
                "failed to create user",
                DbErr::Custom("connection refused".to_string()),
            ))
        });
        let service = manager_with(repo);

        let err = service
            .create_user("John".to_string(), "john@example.com".to_string())
            .await
            .unwrap_err();
        let status = tonic::Status::from(err);

        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "failed to create user");
    }
}
