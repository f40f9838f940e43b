#![allow(dead_code)]

use admin_server::db::DbService;
use admin_server::{Config, ServerState, api};
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "----admin-test-boundary";

/// In-memory database + temp public dir + router
pub struct TestApp {
    pub state: ServerState,
    pub app: Router,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = Config::with_overrides("sqlite::memory:", dir.path().join("public"), 0);
        config.image_dir = "products".into();
        config.reconcile_on_startup = false;
        config.max_upload_bytes = 1024 * 1024;

        let db = DbService::in_memory().await.unwrap();
        let state = ServerState::new(config, db);
        let app = api::build_app(&state);
        Self {
            state,
            app,
            _dir: dir,
        }
    }

    pub fn image_root(&self) -> PathBuf {
        self.state.config.image_root()
    }

    /// Files currently in the image directory
    pub fn image_files(&self) -> Vec<String> {
        match std::fs::read_dir(self.image_root()) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Disk path behind a stored `img_path`
    pub fn disk_path(&self, img_path: &str) -> PathBuf {
        self.state.images.resolve(img_path).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::put(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, form: Form) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(form.into_body()))
            .unwrap();
        self.send(request).await
    }
}

/// Multipart body builder
#[derive(Default)]
pub struct Form {
    body: Vec<u8>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn into_body(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

pub const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-png";

pub fn category_form(name: &str, slug: &str) -> Form {
    Form::new().text("name", name).text("slug", slug)
}

pub fn product_form(category_id: &str) -> Form {
    Form::new()
        .text("name", "Kalem")
        .text("description", "Yazi yazar.")
        .text("priceInCents", "150")
        .text("categoryId", category_id)
}

/// Create a category through the API and return its id
pub async fn create_category(app: &TestApp, name: &str) -> String {
    let (status, body) = app
        .post_form("/api/admin/categories", category_form(name, ""))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Create a product with a JPEG through the API and return its data
pub async fn create_product(app: &TestApp, category_id: &str) -> Value {
    let (status, body) = app
        .post_form(
            "/api/admin/products",
            product_form(category_id).file("image", "kalem.jpg", "image/jpeg", JPEG),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"].clone()
}
