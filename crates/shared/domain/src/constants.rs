//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password confirmation length requirement
pub const MIN_PASSWORD_CONFIRMATION_LENGTH: u64 = 3;

/// Message for a missing or whitespace-only value
pub const MSG_BLANK: &str = "can't be blank";

/// Message for a value already held by another stored record
pub const MSG_TAKEN: &str = "has already been taken";

/// Message for a value under the minimum length; `{count}` is the minimum
pub const MSG_TOO_SHORT: &str = "is too short (minimum is {count} characters)";

/// Message for a confirmation that differs; `{attribute}` is the confirmed label
pub const MSG_CONFIRMATION: &str = "doesn't match {attribute}";

/// Message for deleting a category that still owns products
pub const MSG_DEPENDENT_PRODUCTS: &str = "Cannot delete record because dependent products exist";

// =============================================================================
// Attribute names
// =============================================================================

/// Errors attached to the record as a whole rather than one attribute
pub const FIELD_BASE: &str = "base";

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_FIRST_NAME: &str = "first_name";
pub const FIELD_LAST_NAME: &str = "last_name";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_PASSWORD_CONFIRMATION: &str = "password_confirmation";

pub const FIELD_NAME: &str = "name";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_CATEGORY: &str = "category";
