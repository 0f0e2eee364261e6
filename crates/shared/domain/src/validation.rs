//! Record validation.
//!
//! Each input record declares an ordered list of [`Rule`]s. A rule inspects
//! one attribute and appends zero or more [`FieldError`]s; [`Validatable`]
//! runs them in order and aggregates the result. Nothing is persisted while
//! the list is non-empty.

use std::fmt;

use serde::Serialize;
use validator::ValidateLength;

use crate::constants::{FIELD_BASE, MSG_BLANK, MSG_CONFIRMATION, MSG_TOO_SHORT};

/// A single failed rule, keyed by attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Human-readable message prefixed with the attribute label,
    /// e.g. `"First name can't be blank"`.
    pub fn full_message(&self) -> String {
        if self.field == FIELD_BASE {
            return self.message.clone();
        }
        format!("{} {}", humanize(self.field), self.message)
    }
}

/// Ordered collection of validation failures for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors containing exactly one message.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages (without label) recorded against one attribute.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// All messages with their attribute labels, in rule order.
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldError::full_message).collect()
    }

    /// Check whether a full message was produced.
    pub fn includes(&self, full_message: &str) -> bool {
        self.errors.iter().any(|e| e.full_message() == full_message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

/// One validation step over a record.
pub type Rule<T> = fn(&T, &mut ValidationErrors);

/// Records validated by an explicit, ordered rule list.
pub trait Validatable: Sized + 'static {
    /// Rules in the order their messages are reported.
    fn rules() -> &'static [Rule<Self>];

    /// Run every rule, appending failures to an existing list.
    fn validate_into(&self, errors: &mut ValidationErrors) {
        for rule in Self::rules() {
            rule(self, errors);
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        self.validate_into(&mut errors);
        errors
    }

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// =============================================================================
// Reusable checks
// =============================================================================

/// Turn an attribute name into its label: `first_name` -> `First name`.
pub fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Empty and whitespace-only strings are blank.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Presence of a text attribute.
pub fn validate_presence(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    if value.map_or(true, is_blank) {
        errors.add(field, MSG_BLANK);
    }
}

/// Presence of a non-text attribute (numbers, references).
pub fn validate_presence_of<T>(errors: &mut ValidationErrors, field: &'static str, value: Option<&T>) {
    if value.is_none() {
        errors.add(field, MSG_BLANK);
    }
}

/// Minimum character length. An absent value has length zero.
pub fn validate_min_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&String>,
    min: u64,
) {
    let long_enough = value.map_or(false, |v| v.validate_length(Some(min), None, None));
    if !long_enough {
        errors.add(field, MSG_TOO_SHORT.replace("{count}", &min.to_string()));
    }
}

/// A supplied confirmation must equal the attribute it confirms.
/// An absent confirmation is left to the presence rule.
pub fn validate_confirmation(
    errors: &mut ValidationErrors,
    field: &'static str,
    confirmed_field: &str,
    original: Option<&str>,
    confirmation: Option<&str>,
) {
    if let Some(confirmation) = confirmation {
        if original != Some(confirmation) {
            errors.add(field, MSG_CONFIRMATION.replace("{attribute}", &humanize(confirmed_field)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("email"), "Email");
        assert_eq!(humanize("first_name"), "First name");
        assert_eq!(humanize("password_confirmation"), "Password confirmation");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_full_message_on_base_has_no_label() {
        let error = FieldError::new(FIELD_BASE, "Something is wrong");
        assert_eq!(error.full_message(), "Something is wrong");
    }

    #[test]
    fn test_presence_rejects_whitespace() {
        let mut errors = ValidationErrors::new();
        validate_presence(&mut errors, "name", Some("   "));
        validate_presence(&mut errors, "name", None);
        validate_presence(&mut errors, "name", Some("ok"));
        assert_eq!(errors.len(), 2);
        assert!(errors.includes("Name can't be blank"));
    }

    #[test]
    fn test_min_length_counts_characters() {
        let mut errors = ValidationErrors::new();
        validate_min_length(&mut errors, "password_confirmation", Some(&"éé".to_string()), 3);
        assert_eq!(
            errors.full_messages(),
            vec!["Password confirmation is too short (minimum is 3 characters)"]
        );

        let mut errors = ValidationErrors::new();
        validate_min_length(&mut errors, "password_confirmation", Some(&"ééé".to_string()), 3);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_confirmation_skips_absent_value() {
        let mut errors = ValidationErrors::new();
        validate_confirmation(&mut errors, "password_confirmation", "password", Some("123"), None);
        assert!(errors.is_empty());

        validate_confirmation(&mut errors, "password_confirmation", "password", Some("123"), Some("124"));
        assert!(errors.includes("Password confirmation doesn't match Password"));
    }

    #[test]
    fn test_errors_display_joins_full_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("name", MSG_BLANK);
        errors.add("price", MSG_BLANK);
        assert_eq!(errors.to_string(), "Name can't be blank, Price can't be blank");
        assert_eq!(errors.on("price"), vec![MSG_BLANK]);
    }

    #[test]
    fn test_parameterized_messages_render_from_constants() {
        let mut errors = ValidationErrors::new();
        validate_min_length(&mut errors, "password_confirmation", None, 5);
        validate_confirmation(&mut errors, "password_confirmation", "password", Some("abc"), Some("abd"));

        let too_short = MSG_TOO_SHORT.replace("{count}", "5");
        let mismatch = MSG_CONFIRMATION.replace("{attribute}", "Password");
        assert_eq!(
            errors.on("password_confirmation"),
            vec![too_short.as_str(), mismatch.as_str()]
        );
    }

    struct Label {
        text: String,
    }

    fn label_present(label: &Label, errors: &mut ValidationErrors) {
        validate_presence(errors, "text", Some(label.text.as_str()));
    }

    const LABEL_RULES: &[Rule<Label>] = &[label_present];

    impl Validatable for Label {
        fn rules() -> &'static [Rule<Self>] {
            LABEL_RULES
        }
    }

    #[test]
    fn test_validatable_runs_declared_rules() {
        let blank = Label { text: " ".to_string() };
        assert_eq!(blank.validate().full_messages(), vec!["Text can't be blank"]);
        assert!(!blank.is_valid());
        assert!(Label { text: "ok".to_string() }.is_valid());
    }
}
