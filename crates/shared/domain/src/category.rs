//! Category domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::FIELD_NAME;
use crate::error::DomainResult;
use crate::validation::{validate_presence, Rule, Validatable, ValidationErrors};

/// Product grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category creation or rename input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCategory {
    pub name: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Validate and return the category name.
    pub fn validated(self) -> DomainResult<String> {
        let errors = self.validate();
        match self.name {
            Some(name) if errors.is_empty() => Ok(name),
            _ => Err(errors.into()),
        }
    }
}

fn name_present(category: &NewCategory, errors: &mut ValidationErrors) {
    validate_presence(errors, FIELD_NAME, category.name.as_deref());
}

const NEW_CATEGORY_RULES: &[Rule<NewCategory>] = &[name_present];

impl Validatable for NewCategory {
    fn rules() -> &'static [Rule<Self>] {
        NEW_CATEGORY_RULES
    }
}
