//! Category form

use super::{Field, FieldErrors, MAX_NAME_LEN, required_text};
use crate::slug;
use serde::Deserialize;

pub const NAME_REQUIRED: &str = "Category name is required";
pub const SLUG_REQUIRED: &str = "Slug is required";
pub const SLUG_INVALID: &str = "Slug format is invalid";

/// Raw category submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl CategoryForm {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            slug: Some(slug.into()),
        }
    }
}

/// A category submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
}

impl CategoryInput {
    /// Validate a submission
    ///
    /// A blank slug is derived from the name. A supplied slug is only
    /// trimmed, never rewritten, so `"Invalid Slug!"` is rejected.
    pub fn parse(form: CategoryForm) -> Result<CategoryInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(
            form.name.as_deref(),
            Field::Name,
            MAX_NAME_LEN,
            NAME_REQUIRED,
            &mut errors,
        );

        let supplied = form.slug.as_deref().unwrap_or_default().trim();
        let slug = if supplied.is_empty() {
            slug::normalize(&name)
        } else {
            supplied.to_string()
        };

        if slug.is_empty() {
            errors.add(Field::Slug, SLUG_REQUIRED);
        } else if !slug::is_valid(&slug) {
            errors.add(Field::Slug, SLUG_INVALID);
        }

        errors.into_result(|| CategoryInput { name, slug })
    }
}
