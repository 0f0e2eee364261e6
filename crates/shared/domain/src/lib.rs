//! Domain layer - Storefront entities, input records and validation rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Rules that need the store (email uniqueness, category existence) are run
//! by the service layer and merged into the same [`ValidationErrors`] list.

pub mod category;
pub mod constants;
pub mod error;
pub mod password;
pub mod product;
pub mod user;
pub mod validation;

pub use category::{Category, NewCategory};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use product::{NewProduct, Product, ProductAttributes, UpdateProduct};
pub use user::{normalize_email, ChangePassword, NewUser, UpdateUser, User, UserAttributes};
pub use validation::{FieldError, Rule, Validatable, ValidationErrors};
