//! Validating factories for form submissions
//!
//! Raw forms go in, typed inputs come out. Every rule runs in one pass and
//! all violations are reported together as [`FieldErrors`].

pub mod category;
pub mod product;

pub use category::{CategoryForm, CategoryInput};
pub use product::{ProductForm, ProductInput};

use serde::Serialize;
use std::collections::BTreeMap;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category
pub const MAX_NAME_LEN: usize = 200;

/// Product descriptions
pub const MIN_DESCRIPTION_LEN: usize = 5;
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Form fields that can carry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Slug,
    Description,
    PriceInCents,
    CategoryId,
    Image,
}

impl Field {
    /// Wire name, matching the form field names
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Slug => "slug",
            Field::Description => "description",
            Field::PriceInCents => "priceInCents",
            Field::CategoryId => "categoryId",
            Field::Image => "image",
        }
    }
}

/// Field name → ordered list of messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors with a single message on one field
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0
            .entry(field.as_str())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(field.as_str())
    }

    pub fn get(&self, field: Field) -> &[String] {
        self.0
            .get(field.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `Ok(value)` when no error was recorded
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Trim a required text field and check its length (in chars)
fn required_text(
    value: Option<&str>,
    field: Field,
    max_len: usize,
    required_message: &str,
    errors: &mut FieldErrors,
) -> String {
    let value = value.unwrap_or_default().trim();
    if value.is_empty() {
        errors.add(field, required_message);
    } else if value.chars().count() > max_len {
        errors.add(field, format!("Must be at most {max_len} characters"));
    }
    value.to_string()
}
