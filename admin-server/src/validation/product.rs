//! Product form

use super::{Field, FieldErrors, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MIN_DESCRIPTION_LEN, required_text};
use crate::db::repository::product::ProductWrite;
use crate::images::{ImageUpload, UploadedFile};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

pub const NAME_REQUIRED: &str = "Name is required";
pub const DESCRIPTION_TOO_SHORT: &str = "Description must be at least 5 characters";
pub const PRICE_INVALID: &str = "Enter a valid price";
pub const CATEGORY_REQUIRED: &str = "Select a category";
pub const IMAGE_REQUIRED: &str = "Please upload an image";
pub const IMAGE_EMPTY: &str = "File must not be empty";
pub const IMAGE_TYPE: &str = "Please upload a PNG, JPG or JPEG file";

/// Declared content types must end with one of these
const IMAGE_TYPE_SUFFIXES: [&str; 3] = ["jpg", "jpeg", "png"];

/// Raw product submission
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Kept as text: the form posts strings
    pub price_in_cents: Option<String>,
    pub category_id: Option<String>,
    pub image: Option<UploadedFile>,
}

/// A product submission that passed validation
///
/// `I` is [`ImageUpload`] when creating and `Option<ImageUpload>` when
/// editing (`None` keeps the current image).
#[derive(Debug, Clone)]
pub struct ProductInput<I> {
    pub name: String,
    pub description: String,
    pub price_in_cents: i64,
    pub category_id: String,
    pub image: I,
}

impl ProductInput<ImageUpload> {
    /// Validate a create submission: the image is required
    pub fn parse_new(form: ProductForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let fields = Fields::check(&form, &mut errors);

        let image = match form.image {
            None => {
                errors.add(Field::Image, IMAGE_REQUIRED);
                None
            }
            Some(file) => check_image(file, &mut errors),
        };

        match image {
            Some(image) if errors.is_empty() => Ok(fields.with_image(image)),
            _ => Err(errors),
        }
    }
}

impl ProductInput<Option<ImageUpload>> {
    /// Validate an edit submission: an absent or empty file means "no change"
    pub fn parse_edit(form: ProductForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let fields = Fields::check(&form, &mut errors);

        let image = form
            .image
            .filter(|file| !file.is_empty())
            .and_then(|file| check_image(file, &mut errors));

        errors.into_result(|| fields.with_image(image))
    }
}

impl<I> ProductInput<I> {
    /// Split into the row write and the image part
    pub fn into_parts(self) -> (ProductWrite, I) {
        (
            ProductWrite {
                name: self.name,
                description: self.description,
                price_in_cents: self.price_in_cents,
                category_id: self.category_id,
            },
            self.image,
        )
    }
}

/// Text fields shared by create and edit
struct Fields {
    name: String,
    description: String,
    price_in_cents: i64,
    category_id: String,
}

impl Fields {
    fn check(form: &ProductForm, errors: &mut FieldErrors) -> Self {
        let name = required_text(
            form.name.as_deref(),
            Field::Name,
            MAX_NAME_LEN,
            NAME_REQUIRED,
            errors,
        );

        let description = form.description.as_deref().unwrap_or_default().trim();
        let description_len = description.chars().count();
        if description_len < MIN_DESCRIPTION_LEN {
            errors.add(Field::Description, DESCRIPTION_TOO_SHORT);
        } else if description_len > MAX_DESCRIPTION_LEN {
            errors.add(
                Field::Description,
                format!("Must be at most {MAX_DESCRIPTION_LEN} characters"),
            );
        }

        let price_in_cents = parse_price(form.price_in_cents.as_deref()).unwrap_or_else(|| {
            errors.add(Field::PriceInCents, PRICE_INVALID);
            0
        });

        let category_id = form.category_id.as_deref().unwrap_or_default().trim();
        if category_id.is_empty() {
            errors.add(Field::CategoryId, CATEGORY_REQUIRED);
        }

        Self {
            name,
            description: description.to_string(),
            price_in_cents,
            category_id: category_id.to_string(),
        }
    }

    fn with_image<I>(self, image: I) -> ProductInput<I> {
        ProductInput {
            name: self.name,
            description: self.description,
            price_in_cents: self.price_in_cents,
            category_id: self.category_id,
            image,
        }
    }
}

/// A whole number of cents, at least 1
///
/// Integral decimals such as `"150.0"` are accepted; `"1.5"` is not.
fn parse_price(value: Option<&str>) -> Option<i64> {
    let amount = Decimal::from_str(value?.trim()).ok()?;
    if !amount.fract().is_zero() {
        return None;
    }
    amount.to_i64().filter(|cents| *cents >= 1)
}

/// Non-empty and of an accepted type; every failed rule is reported
fn check_image(file: UploadedFile, errors: &mut FieldErrors) -> Option<ImageUpload> {
    let mut ok = true;
    if file.is_empty() {
        errors.add(Field::Image, IMAGE_EMPTY);
        ok = false;
    }
    let content_type = file.content_type.to_ascii_lowercase();
    if !IMAGE_TYPE_SUFFIXES.iter().any(|s| content_type.ends_with(s)) {
        errors.add(Field::Image, IMAGE_TYPE);
        ok = false;
    }
    ok.then(|| ImageUpload::validated(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: Some("Kalem".into()),
            description: Some("Yazi yazar.".into()),
            price_in_cents: Some("150".into()),
            category_id: Some("cat_1".into()),
            image: Some(UploadedFile::new("kalem.jpg", "image/jpeg", &b"\xff\xd8\xff"[..])),
        }
    }

    #[test]
    fn test_accepts_valid_product() {
        let input = ProductInput::parse_new(valid_form()).unwrap();
        assert_eq!(input.name, "Kalem");
        assert_eq!(input.price_in_cents, 150);
        assert_eq!(input.category_id, "cat_1");
        assert_eq!(input.image.file_name(), "kalem.jpg");
    }

    #[test]
    fn test_rejects_bad_prices() {
        for bad in ["0", "-5", "1.5", "0.0", "abc", "", "   ", "99999999999999999999999"] {
            let form = ProductForm {
                price_in_cents: Some(bad.into()),
                ..valid_form()
            };
            let errors = ProductInput::parse_new(form).unwrap_err();
            assert_eq!(errors.get(Field::PriceInCents), [PRICE_INVALID], "price {bad:?}");
        }
        let form = ProductForm {
            price_in_cents: Some(" 42 ".into()),
            ..valid_form()
        };
        assert_eq!(ProductInput::parse_new(form).unwrap().price_in_cents, 42);
    }

    #[test]
    fn test_accepts_integral_decimal_prices() {
        for (raw, cents) in [("150.0", 150), ("150.00", 150), ("7", 7)] {
            let form = ProductForm {
                price_in_cents: Some(raw.into()),
                ..valid_form()
            };
            assert_eq!(ProductInput::parse_new(form).unwrap().price_in_cents, cents, "price {raw:?}");
        }
    }

    #[test]
    fn test_rejects_missing_category() {
        let form = ProductForm {
            category_id: Some("".into()),
            ..valid_form()
        };
        let errors = ProductInput::parse_new(form).unwrap_err();
        assert_eq!(errors.get(Field::CategoryId), [CATEGORY_REQUIRED]);
    }

    #[test]
    fn test_rejects_gif() {
        let form = ProductForm {
            image: Some(UploadedFile::new("anim.gif", "image/gif", &b"GIF89a"[..])),
            ..valid_form()
        };
        let errors = ProductInput::parse_new(form).unwrap_err();
        assert_eq!(errors.get(Field::Image), [IMAGE_TYPE]);
    }

    #[test]
    fn test_image_required_on_create() {
        let form = ProductForm {
            image: None,
            ..valid_form()
        };
        let errors = ProductInput::parse_new(form).unwrap_err();
        assert_eq!(errors.get(Field::Image), [IMAGE_REQUIRED]);

        let form = ProductForm {
            image: Some(UploadedFile::new("empty.png", "image/png", &b""[..])),
            ..valid_form()
        };
        let errors = ProductInput::parse_new(form).unwrap_err();
        assert_eq!(errors.get(Field::Image), [IMAGE_EMPTY]);
    }

    #[test]
    fn test_reports_every_field_at_once() {
        let errors = ProductInput::parse_new(ProductForm::default()).unwrap_err();
        for field in [
            Field::Name,
            Field::Description,
            Field::PriceInCents,
            Field::CategoryId,
            Field::Image,
        ] {
            assert!(errors.contains(field), "{field:?} missing");
        }
    }

    #[test]
    fn test_short_description() {
        let form = ProductForm {
            description: Some(" abcd ".into()),
            ..valid_form()
        };
        let errors = ProductInput::parse_new(form).unwrap_err();
        assert_eq!(errors.get(Field::Description), [DESCRIPTION_TOO_SHORT]);
    }

    #[test]
    fn test_edit_treats_empty_file_as_no_change() {
        let form = ProductForm {
            image: Some(UploadedFile::new("", "application/octet-stream", &b""[..])),
            ..valid_form()
        };
        let input = ProductInput::parse_edit(form).unwrap();
        assert!(input.image.is_none());

        let form = ProductForm {
            image: None,
            ..valid_form()
        };
        assert!(ProductInput::parse_edit(form).unwrap().image.is_none());
    }

    #[test]
    fn test_edit_still_checks_new_image_type() {
        let form = ProductForm {
            image: Some(UploadedFile::new("anim.gif", "image/gif", &b"GIF89a"[..])),
            ..valid_form()
        };
        let errors = ProductInput::parse_edit(form).unwrap_err();
        assert_eq!(errors.get(Field::Image), [IMAGE_TYPE]);

        let input = ProductInput::parse_edit(valid_form()).unwrap();
        assert!(input.image.is_some());
    }
}
