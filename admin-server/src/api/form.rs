//! Multipart form submissions (the browser `FormData` shape)

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;

use crate::images::UploadedFile;
use crate::validation::{CategoryForm, ProductForm};

/// Text fields and file fields of one submission
///
/// Rejects malformed bodies with `InvalidRequest` before the handler runs.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormData::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.files
                    .insert(name, UploadedFile::new(file_name, content_type, bytes));
            } else {
                let text = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub fn category_form(self) -> CategoryForm {
        CategoryForm {
            name: self.text("name"),
            slug: self.text("slug"),
        }
    }

    pub fn product_form(mut self) -> ProductForm {
        ProductForm {
            name: self.text("name"),
            description: self.text("description"),
            price_in_cents: self.text("priceInCents"),
            category_id: self.text("categoryId"),
            image: self.files.remove("image"),
        }
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::FileTooLarge)
    } else {
        AppError::invalid_request(format!("Invalid multipart request: {}", e.body_text()))
    }
}

impl<S: Send + Sync> FromRequest<S> for FormData {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;
        Self::read(multipart).await
    }
}
