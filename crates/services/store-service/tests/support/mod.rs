//! Shared setup for the database-backed tests.

#![allow(dead_code)]

use common::DatabaseConfig;
use domain::{NewUser, User};
use store_service_lib::infra::Database;
use store_service_lib::service::{ServiceContainer, Services};

/// Fresh in-memory database with every migration applied.
pub async fn setup() -> (Database, Services) {
    let db = Database::connect(&DatabaseConfig::single_connection("sqlite::memory:"))
        .await
        .expect("in-memory database should migrate");
    let services = Services::from_connection(db.get_connection());
    (db, services)
}

pub fn valid_user(email: &str) -> NewUser {
    NewUser::new(email, "John", "Doe", "123", "123")
}

pub async fn register(services: &Services, email: &str) -> User {
    services
        .users()
        .register(valid_user(email))
        .await
        .expect("valid user should register")
}
