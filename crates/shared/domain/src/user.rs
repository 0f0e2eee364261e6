//! User domain entity and related input records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_PASSWORD, FIELD_PASSWORD_CONFIRMATION,
    MIN_PASSWORD_CONFIRMATION_LENGTH,
};
use crate::error::DomainResult;
use crate::password::Password;
use crate::validation::{
    validate_confirmation, validate_min_length, validate_presence, Rule, Validatable,
    ValidationErrors,
};

/// Normalize an email for credential lookup: trim, then lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check a plain text password against the stored digest.
    pub fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.as_str()).verify(plain_text)
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Registration input. Every attribute is optional so that missing
/// values surface as validation messages rather than type errors.
#[derive(Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

/// Registration attributes that passed validation.
#[derive(Clone)]
pub struct UserAttributes {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl std::fmt::Debug for UserAttributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAttributes")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            password: Some(password.into()),
            password_confirmation: Some(password_confirmation.into()),
        }
    }

    /// Run the rules after any store-backed failures already collected
    /// and return the attributes if nothing failed.
    pub fn validated(self, mut errors: ValidationErrors) -> DomainResult<UserAttributes> {
        self.validate_into(&mut errors);
        match (self.email, self.first_name, self.last_name, self.password) {
            (Some(email), Some(first_name), Some(last_name), Some(password)) if errors.is_empty() => {
                Ok(UserAttributes {
                    email,
                    first_name,
                    last_name,
                    password,
                })
            }
            _ => Err(errors.into()),
        }
    }
}

fn email_present(user: &NewUser, errors: &mut ValidationErrors) {
    validate_presence(errors, FIELD_EMAIL, user.email.as_deref());
}

fn first_name_present(user: &NewUser, errors: &mut ValidationErrors) {
    validate_presence(errors, FIELD_FIRST_NAME, user.first_name.as_deref());
}

fn last_name_present(user: &NewUser, errors: &mut ValidationErrors) {
    validate_presence(errors, FIELD_LAST_NAME, user.last_name.as_deref());
}

fn new_user_password_rules(user: &NewUser, errors: &mut ValidationErrors) {
    password_rules(
        errors,
        user.password.as_ref(),
        user.password_confirmation.as_ref(),
    );
}

const NEW_USER_RULES: &[Rule<NewUser>] = &[
    email_present,
    first_name_present,
    last_name_present,
    new_user_password_rules,
];

impl Validatable for NewUser {
    fn rules() -> &'static [Rule<Self>] {
        NEW_USER_RULES
    }
}

/// Password presence, then confirmation presence, length and match.
fn password_rules(
    errors: &mut ValidationErrors,
    password: Option<&String>,
    confirmation: Option<&String>,
) {
    validate_presence(errors, FIELD_PASSWORD, password.map(String::as_str));
    validate_presence(
        errors,
        FIELD_PASSWORD_CONFIRMATION,
        confirmation.map(String::as_str),
    );
    validate_min_length(
        errors,
        FIELD_PASSWORD_CONFIRMATION,
        confirmation,
        MIN_PASSWORD_CONFIRMATION_LENGTH,
    );
    validate_confirmation(
        errors,
        FIELD_PASSWORD_CONFIRMATION,
        FIELD_PASSWORD,
        password.map(String::as_str),
        confirmation.map(String::as_str),
    );
}

// =============================================================================
// Profile update
// =============================================================================

/// Profile update. `None` leaves an attribute unchanged; a supplied
/// value must still be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn supplied_email_present(update: &UpdateUser, errors: &mut ValidationErrors) {
    if let Some(email) = update.email.as_deref() {
        validate_presence(errors, FIELD_EMAIL, Some(email));
    }
}

fn supplied_first_name_present(update: &UpdateUser, errors: &mut ValidationErrors) {
    if let Some(first_name) = update.first_name.as_deref() {
        validate_presence(errors, FIELD_FIRST_NAME, Some(first_name));
    }
}

fn supplied_last_name_present(update: &UpdateUser, errors: &mut ValidationErrors) {
    if let Some(last_name) = update.last_name.as_deref() {
        validate_presence(errors, FIELD_LAST_NAME, Some(last_name));
    }
}

const UPDATE_USER_RULES: &[Rule<UpdateUser>] = &[
    supplied_email_present,
    supplied_first_name_present,
    supplied_last_name_present,
];

impl Validatable for UpdateUser {
    fn rules() -> &'static [Rule<Self>] {
        UPDATE_USER_RULES
    }
}

// =============================================================================
// Password change
// =============================================================================

/// New password with its confirmation.
#[derive(Clone, Default, Deserialize)]
pub struct ChangePassword {
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl std::fmt::Debug for ChangePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePassword")
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

impl ChangePassword {
    pub fn new(password: impl Into<String>, password_confirmation: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            password_confirmation: Some(password_confirmation.into()),
        }
    }

    /// Validate and return the new plain text password.
    pub fn validated(self) -> DomainResult<String> {
        let errors = self.validate();
        match self.password {
            Some(password) if errors.is_empty() => Ok(password),
            _ => Err(errors.into()),
        }
    }
}

fn change_password_rules(change: &ChangePassword, errors: &mut ValidationErrors) {
    password_rules(
        errors,
        change.password.as_ref(),
        change.password_confirmation.as_ref(),
    );
}

const CHANGE_PASSWORD_RULES: &[Rule<ChangePassword>] = &[change_password_rules];

impl Validatable for ChangePassword {
    fn rules() -> &'static [Rule<Self>] {
        CHANGE_PASSWORD_RULES
    }
}
