//! Service layer - business logic over the repositories.

mod auth_service;
mod catalog_service;
mod container;
mod user_service;

pub use auth_service::{AuthService, Authenticator};
pub use catalog_service::{CatalogManager, CatalogService};
pub use container::{ServiceContainer, Services};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
