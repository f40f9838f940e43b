use thiserror::Error;

/// Startup and serve errors
///
/// Request-level failures never reach this type: handlers answer with
/// [`shared::error::AppError`] or an action outcome instead.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("database error: {0}")]
    Database(#[from] crate::db::DbError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
