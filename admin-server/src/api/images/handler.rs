use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use http::header;

use crate::core::ServerState;
use crate::images::local::is_plain_file_name;
use shared::error::{AppError, AppResult};

/// Stream an image with a content type guessed from its extension
pub async fn serve(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !is_plain_file_name(&filename) {
        return Err(AppError::invalid_request("Invalid image path"));
    }
    let public_path = state.images.public_path(&filename);
    let file = state
        .images
        .resolve(&public_path)
        .map_err(|e| AppError::invalid_request(e.to_string()))?;

    let bytes = match tokio::fs::read(&file).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::not_found("Image"));
        }
        Err(e) => {
            tracing::error!(path = %file.display(), error = %e, "Failed to read image");
            return Err(AppError::internal("Failed to read image"));
        }
    };

    let mime = mime_guess::from_path(&file).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], Bytes::from(bytes)))
}
