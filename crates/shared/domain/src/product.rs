//! Product domain entity and related input records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{FIELD_CATEGORY, FIELD_NAME, FIELD_PRICE, FIELD_QUANTITY};
use crate::error::DomainResult;
use crate::validation::{
    validate_presence, validate_presence_of, Rule, Validatable, ValidationErrors,
};

/// Catalog product. Prices are whole cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_sold_out(&self) -> bool {
        self.quantity <= 0
    }

    /// Price formatted as dollars, e.g. `"64.99"`.
    pub fn price_display(&self) -> String {
        let sign = if self.price_cents < 0 { "-" } else { "" };
        let cents = self.price_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

/// Product creation input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub quantity: Option<i32>,
    pub category_id: Option<Uuid>,
}

/// Product attributes that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAttributes {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub quantity: i32,
    pub category_id: Uuid,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price_cents: i64, quantity: i32, category_id: Uuid) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
            price_cents: Some(price_cents),
            quantity: Some(quantity),
            category_id: Some(category_id),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Run the rules after any store-backed failures already collected
    /// and return the attributes if nothing failed.
    pub fn validated(self, mut errors: ValidationErrors) -> DomainResult<ProductAttributes> {
        self.validate_into(&mut errors);
        match (self.name, self.price_cents, self.quantity, self.category_id) {
            (Some(name), Some(price_cents), Some(quantity), Some(category_id)) if errors.is_empty() => {
                Ok(ProductAttributes {
                    name,
                    description: self.description,
                    price_cents,
                    quantity,
                    category_id,
                })
            }
            _ => Err(errors.into()),
        }
    }
}

fn name_present(product: &NewProduct, errors: &mut ValidationErrors) {
    validate_presence(errors, FIELD_NAME, product.name.as_deref());
}

fn price_present(product: &NewProduct, errors: &mut ValidationErrors) {
    validate_presence_of(errors, FIELD_PRICE, product.price_cents.as_ref());
}

fn quantity_present(product: &NewProduct, errors: &mut ValidationErrors) {
    validate_presence_of(errors, FIELD_QUANTITY, product.quantity.as_ref());
}

fn category_present(product: &NewProduct, errors: &mut ValidationErrors) {
    validate_presence_of(errors, FIELD_CATEGORY, product.category_id.as_ref());
}

const NEW_PRODUCT_RULES: &[Rule<NewProduct>] = &[
    name_present,
    price_present,
    quantity_present,
    category_present,
];

impl Validatable for NewProduct {
    fn rules() -> &'static [Rule<Self>] {
        NEW_PRODUCT_RULES
    }
}

/// Product update. `None` leaves an attribute unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub quantity: Option<i32>,
    pub category_id: Option<Uuid>,
}

fn supplied_name_present(update: &UpdateProduct, errors: &mut ValidationErrors) {
    if let Some(name) = update.name.as_deref() {
        validate_presence(errors, FIELD_NAME, Some(name));
    }
}

const UPDATE_PRODUCT_RULES: &[Rule<UpdateProduct>] = &[supplied_name_present];

impl Validatable for UpdateProduct {
    fn rules() -> &'static [Rule<Self>] {
        UPDATE_PRODUCT_RULES
    }
}
