use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:./dev.db | SQLite database (created if missing) |
/// | HTTP_PORT | 3000 | HTTP port |
/// | PUBLIC_DIR | public | Public root served to browsers |
/// | IMAGE_DIR | products | Image subdirectory below the public root |
/// | MAX_UPLOAD_BYTES | 5242880 | Request body limit for form submissions |
/// | RECONCILE_ON_STARTUP | true | Run the image reconciliation sweep at startup |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | Fallback filter when RUST_LOG is unset |
/// | LOG_DIR | (unset) | Daily rolling log files go here when set |
///
/// # Example
///
/// ```ignore
/// PUBLIC_DIR=/srv/shop/public HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP API port
    pub http_port: u16,
    /// Public root directory
    pub public_dir: PathBuf,
    /// Image directory name below `public_dir`, also the URL prefix
    pub image_dir: String,
    /// Maximum multipart request size in bytes
    pub max_upload_bytes: usize,
    /// Sweep orphaned images and report dangling rows at startup
    pub reconcile_on_startup: bool,
    /// development | staging | production
    pub environment: String,
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Missing or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./dev.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            public_dir: std::env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".into())
                .into(),
            image_dir: std::env::var("IMAGE_DIR")
                .ok()
                .map(|d| d.trim_matches('/').to_string())
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "products".into()),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5 * 1024 * 1024),
            reconcile_on_startup: std::env::var("RECONCILE_ON_STARTUP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Override the storage locations, keeping everything else from the environment
    ///
    /// Mostly used by tests.
    pub fn with_overrides(
        database_url: impl Into<String>,
        public_dir: impl Into<PathBuf>,
        http_port: u16,
    ) -> Self {
        let mut config = Self::from_env();
        config.database_url = database_url.into();
        config.public_dir = public_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory holding product images: `PUBLIC_DIR/IMAGE_DIR`
    pub fn image_root(&self) -> PathBuf {
        self.public_dir.join(&self.image_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
