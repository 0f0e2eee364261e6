//! User service - Handles registration and profile use cases.
//!
//! Input records run their own rules; email uniqueness needs the store and
//! is checked here, before the record rules, so the messages keep
//! attribute order.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::validation::is_blank;
use domain::{
    ChangePassword, NewUser, Password, UpdateUser, User, Validatable, ValidationErrors,
    FIELD_EMAIL, MSG_TAKEN,
};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate, hash the password and persist a new user
    async fn register(&self, new_user: NewUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update profile fields, re-checking presence and uniqueness
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Replace a user's password
    async fn change_password(&self, id: Uuid, change: ChangePassword) -> AppResult<()>;

    /// Delete user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
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

    /// Uniqueness rule. Blank emails are left to the presence rule.
    async fn check_email_unique(
        &self,
        email: Option<&str>,
        except: Option<Uuid>,
        errors: &mut ValidationErrors,
    ) -> AppResult<()> {
        let Some(email) = email.filter(|e| !is_blank(e)) else {
            return Ok(());
        };
        if self.repo.email_taken(email, except).await? {
            errors.add(FIELD_EMAIL, MSG_TAKEN);
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, new_user: NewUser) -> AppResult<User> {
        let mut errors = ValidationErrors::new();
        self.check_email_unique(new_user.email.as_deref(), None, &mut errors)
            .await?;

        let attributes = new_user.validated(errors)?;
        let password_hash = Password::hash(&attributes.password)?.into_string();

        let user = self
            .repo
            .create(
                attributes.email,
                password_hash,
                attributes.first_name,
                attributes.last_name,
            )
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let mut errors = ValidationErrors::new();
        self.check_email_unique(changes.email.as_deref(), Some(id), &mut errors)
            .await?;
        changes.validate_into(&mut errors);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        self.repo.update(id, changes).await
    }

    async fn change_password(&self, id: Uuid, change: ChangePassword) -> AppResult<()> {
        let password = change.validated()?;
        let password_hash = Password::hash(&password)?.into_string();
        self.repo.update_password(id, password_hash).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn stored_user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "hashed".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser::new(email, "John", "Doe", "123", "123")
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_taken().returning(|_, _| Ok(false));
        repo.expect_create()
            .withf(|email, hash, first, last| {
                email == "jdoe@test.com"
                    && hash != "123"
                    && Password::from_hash(hash.as_str()).verify("123")
                    && first == "John"
                    && last == "Doe"
            })
            .returning(|email, hash, first, last| {
                Ok(User {
                    password_hash: hash,
                    first_name: first,
                    last_name: last,
                    ..stored_user(&email)
                })
            });

        let service = UserManager::new(Arc::new(repo));
        let user = service.register(new_user("jdoe@test.com")).await.unwrap();

        assert_eq!(user.email, "jdoe@test.com");
        assert!(user.verify_password("123"));
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_taken()
            .with(eq("JDOE@test.com"), eq(None))
            .returning(|_, _| Ok(true));
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service.register(new_user("JDOE@test.com")).await.unwrap_err();

        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.full_messages(), vec!["Email has already been taken"]);
    }

    #[tokio::test]
    async fn test_register_skips_uniqueness_for_blank_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_taken().never();
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service.register(new_user("  ")).await.unwrap_err();

        assert!(err.validation_errors().unwrap().includes("Email can't be blank"));
    }

    #[tokio::test]
    async fn test_register_reports_every_message() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_taken().returning(|_, _| Ok(true));

        let service = UserManager::new(Arc::new(repo));
        let input = NewUser {
            first_name: None,
            ..NewUser::new("jdoe@test.com", "John", "Doe", "123", "12")
        };
        let err = service.register(input).await.unwrap_err();

        assert_eq!(
            err.validation_errors().unwrap().full_messages(),
            vec![
                "Email has already been taken",
                "First name can't be blank",
                "Password confirmation is too short (minimum is 3 characters)",
                "Password confirmation doesn't match Password",
            ]
        );
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(Uuid::new_v4()).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_update_user_excludes_self_from_uniqueness() {
        let id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_email_taken()
            .with(eq("john@test.com"), eq(Some(id)))
            .returning(|_, _| Ok(false));
        repo.expect_update()
            .returning(|_, changes| Ok(stored_user(&changes.email.unwrap_or_default())));

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            email: Some("john@test.com".to_string()),
            ..UpdateUser::default()
        };
        let user = service.update_user(id, changes).await.unwrap();

        assert_eq!(user.email, "john@test.com");
    }

    #[tokio::test]
    async fn test_update_user_rejects_blank_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            last_name: Some(String::new()),
            ..UpdateUser::default()
        };
        let err = service.update_user(Uuid::new_v4(), changes).await.unwrap_err();

        assert!(err.validation_errors().unwrap().includes("Last name can't be blank"));
    }

    #[tokio::test]
    async fn test_change_password_validates_confirmation() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_password().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service
            .change_password(Uuid::new_v4(), ChangePassword::new("abc", "abd"))
            .await
            .unwrap_err();

        assert!(err
            .validation_errors()
            .unwrap()
            .includes("Password confirmation doesn't match Password"));
    }

    #[tokio::test]
    async fn test_change_password_stores_new_digest() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_password()
            .withf(|_, hash| Password::from_hash(hash.as_str()).verify("new-secret"))
            .returning(|_, _| Ok(()));

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .change_password(Uuid::new_v4(), ChangePassword::new("new-secret", "new-secret"))
            .await;

        assert!(result.is_ok());
    }
}
