//! User registration against a migrated database.

mod support;

use common::AppError;
use domain::{NewUser, UpdateUser};
use store_service_lib::repository::{UserRepository, UserStore};
use store_service_lib::service::ServiceContainer;

use self::support::{register, setup, valid_user};

#[tokio::test]
async fn test_registers_valid_user() {
    let (_db, services) = setup().await;

    let user = register(&services, "jdoe@test.com").await;

    assert_eq!(user.email, "jdoe@test.com");
    assert_eq!(user.full_name(), "John Doe");
    assert_ne!(user.password_hash, "123");
    assert!(user.verify_password("123"));

    let stored = services.users().get_user(user.id).await.unwrap();
    assert_eq!(stored.id, user.id);
    assert_eq!(stored.password_hash, user.password_hash);
}

#[tokio::test]
async fn test_rejects_duplicate_email_ignoring_case() {
    let (_db, services) = setup().await;
    register(&services, "jdoe@test.com").await;

    let err = services
        .users()
        .register(valid_user("JDOE@test.com"))
        .await
        .unwrap_err();

    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.full_messages(), vec!["Email has already been taken"]);
    assert_eq!(services.users().list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejects_missing_fields() {
    let (_db, services) = setup().await;

    let input = NewUser {
        email: None,
        first_name: None,
        last_name: None,
        ..valid_user("unused@test.com")
    };
    let err = services.users().register(input).await.unwrap_err();

    assert_eq!(
        err.validation_errors().unwrap().full_messages(),
        vec![
            "Email can't be blank",
            "First name can't be blank",
            "Last name can't be blank",
        ]
    );
}

#[tokio::test]
async fn test_rejects_mismatched_confirmation() {
    let (_db, services) = setup().await;

    let input = NewUser::new("jdoe@test.com", "John", "Doe", "123", "321");
    let err = services.users().register(input).await.unwrap_err();

    assert_eq!(
        err.validation_errors().unwrap().full_messages(),
        vec!["Password confirmation doesn't match Password"]
    );
}

#[tokio::test]
async fn test_rejects_short_confirmation() {
    let (_db, services) = setup().await;

    let input = NewUser::new("jdoe@test.com", "John", "Doe", "12", "12");
    let err = services.users().register(input).await.unwrap_err();

    assert!(err
        .validation_errors()
        .unwrap()
        .includes("Password confirmation is too short (minimum is 3 characters)"));
}

#[tokio::test]
async fn test_update_to_taken_email_is_rejected() {
    let (_db, services) = setup().await;
    register(&services, "jdoe@test.com").await;
    let other = register(&services, "jane@test.com").await;

    let changes = UpdateUser {
        email: Some("JDoe@Test.com".to_string()),
        ..UpdateUser::default()
    };
    let err = services.users().update_user(other.id, changes).await.unwrap_err();

    assert!(err.validation_errors().unwrap().includes("Email has already been taken"));
}

#[tokio::test]
async fn test_update_keeps_own_email() {
    let (_db, services) = setup().await;
    let user = register(&services, "jdoe@test.com").await;

    let changes = UpdateUser {
        email: Some("JDOE@test.com".to_string()),
        first_name: Some("Johnny".to_string()),
        ..UpdateUser::default()
    };
    let updated = services.users().update_user(user.id, changes).await.unwrap();

    assert_eq!(updated.email, "JDOE@test.com");
    assert_eq!(updated.first_name, "Johnny");
}

#[tokio::test]
async fn test_delete_missing_user() {
    let (_db, services) = setup().await;

    let result = services.users().delete_user(uuid::Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_rejects_duplicate_non_ascii_email_ignoring_case() {
    let (_db, services) = setup().await;
    register(&services, "ÉRIC@test.com").await;

    let err = services
        .users()
        .register(valid_user("éric@test.com"))
        .await
        .unwrap_err();

    assert!(err.validation_errors().unwrap().includes("Email has already been taken"));
}

#[tokio::test]
async fn test_unique_index_violation_reads_as_taken_email() {
    let (db, _services) = setup().await;
    let store = UserStore::new(db.get_connection());

    store
        .create(
            "jdoe@test.com".to_string(),
            "digest".to_string(),
            "John".to_string(),
            "Doe".to_string(),
        )
        .await
        .unwrap();
    let err = store
        .create(
            "JDOE@Test.com".to_string(),
            "digest".to_string(),
            "Jane".to_string(),
            "Doe".to_string(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.validation_errors().unwrap().full_messages(),
        vec!["Email has already been taken"]
    );
}
