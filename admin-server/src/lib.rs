//! Shop admin server
//!
//! Back office for a small web shop: category and product management with
//! image uploads, dashboard aggregates and order/customer listings.
//!
//! # Modules
//!
//! ```text
//! admin-server/src/
//! ├── core/          # config, state, server, lifecycle errors
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── slug/          # slug normalizer + uniqueness resolver
//! ├── validation/    # validating factories for form submissions
//! ├── images/        # image store + reconciliation sweep
//! ├── cache.rs       # cached listing views
//! ├── actions/       # mutation handlers (ActionOutcome)
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging
//! ```

pub mod actions;
pub mod api;
pub mod cache;
pub mod core;
pub mod db;
pub mod images;
pub mod slug;
pub mod utils;
pub mod validation;

pub use actions::{ActionOutcome, Actions};
pub use core::{Config, Server, ServerState};
pub use utils::{init_logger, init_logger_with_file};

/// Initialize logging from the loaded configuration
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    );
}
