//! Authentication service - credential lookup.
//!
//! Wrong credentials are never an error: an unknown email and a wrong
//! password both yield `Ok(None)`, so callers cannot tell them apart.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;

use common::AppResult;
use domain::{normalize_email, Password, User};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Digest verified when no user matches, so both outcomes cost one
/// Argon2 verification.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::hash("dummy-password-never-matches").ok());

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Return the user owning `email` if `password` matches its digest.
    ///
    /// The email is trimmed and lowercased, then compared against stored
    /// emails ignoring case. Only storage failures produce an error.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>>;
}

/// Concrete implementation of AuthService using the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                dummy.verify(password);
            }
            tracing::debug!("Authentication rejected");
            return Ok(None);
        };

        if user.verify_password(password) {
            tracing::debug!(user_id = %user.id, "Authentication succeeded");
            Ok(Some(user))
        } else {
            tracing::debug!("Authentication rejected");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use common::AppError;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn stored_user(email: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: Password::hash(password).unwrap().into_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_lookup_uses_normalized_email() {
        let user = stored_user("jdoe@test.COM", "123");
        let expected = user.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("jdoe@test.com"))
            .returning(move |_| Ok(Some(user.clone())));

        let auth = Authenticator::new(Arc::new(repo));
        let result = auth.authenticate("   JDoE@test.com  ", "123").await.unwrap();

        assert_eq!(result, Some(expected));
    }

    #[tokio::test]
    async fn test_wrong_password_returns_none() {
        let user = stored_user("jdoe@test.com", "123");

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = Authenticator::new(Arc::new(repo));
        let result = auth.authenticate("jdoe@test.com", "124").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_unknown_email_returns_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let auth = Authenticator::new(Arc::new(repo));
        let result = auth.authenticate("jdou@test.com", "123").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_is_an_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::internal("connection reset")));

        let auth = Authenticator::new(Arc::new(repo));
        let result = auth.authenticate("jdoe@test.com", "123").await;

        assert!(result.is_err());
    }
}
