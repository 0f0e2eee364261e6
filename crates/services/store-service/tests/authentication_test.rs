//! Credential checks against a stored user.

mod support;

use domain::ChangePassword;
use store_service_lib::service::ServiceContainer;

use self::support::{register, setup};

#[tokio::test]
async fn test_authenticates_exact_credentials() {
    let (_db, services) = setup().await;
    let user = register(&services, "jdoe@test.com").await;

    let found = services
        .auth()
        .authenticate("jdoe@test.com", "123")
        .await
        .unwrap();

    assert_eq!(found.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_rejects_unknown_email() {
    let (_db, services) = setup().await;
    register(&services, "jdoe@test.com").await;

    let found = services
        .auth()
        .authenticate("jdou@test.com", "123")
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_rejects_wrong_password() {
    let (_db, services) = setup().await;
    register(&services, "jdoe@test.com").await;

    let found = services
        .auth()
        .authenticate("jdoe@test.com", "1234")
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_ignores_surrounding_whitespace() {
    let (_db, services) = setup().await;
    let user = register(&services, "jdoe@test.com").await;

    let found = services
        .auth()
        .authenticate("   jdoe@test.com  ", "123")
        .await
        .unwrap();

    assert_eq!(found.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_ignores_email_case() {
    let (_db, services) = setup().await;
    let user = register(&services, "jdoe@test.COM").await;

    let found = services
        .auth()
        .authenticate("JDoE@test.com", "123")
        .await
        .unwrap();

    let found = found.unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.email, "jdoe@test.COM");
}

#[tokio::test]
async fn test_changed_password_replaces_old_one() {
    let (_db, services) = setup().await;
    let user = register(&services, "jdoe@test.com").await;

    services
        .users()
        .change_password(user.id, ChangePassword::new("s3cret", "s3cret"))
        .await
        .unwrap();

    let auth = services.auth();
    assert!(auth.authenticate("jdoe@test.com", "123").await.unwrap().is_none());
    assert!(auth.authenticate("jdoe@test.com", "s3cret").await.unwrap().is_some());
}

#[tokio::test]
async fn test_non_ascii_email_matches_itself() {
    let (_db, services) = setup().await;
    let user = register(&services, "ÉRIC@test.com").await;
    let auth = services.auth();

    let exact = auth.authenticate("ÉRIC@test.com", "123").await.unwrap();
    let lowered = auth.authenticate("éric@test.com", "123").await.unwrap();

    assert_eq!(exact.map(|u| u.id), Some(user.id));
    assert_eq!(lowered.map(|u| u.id), Some(user.id));
}
