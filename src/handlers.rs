use axum::{
    extract::{Multipart, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::error::UploadError;
use crate::files::file_status;
use crate::models::{ErrorResponse, FileStatus, UploadQuery, UploadResult};
use crate::state::AppState;

// upload every file field of a multipart body, reporting progress to ?socketId=
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> Result<Json<UploadResult>, UploadError> {
    let session_id = query.socket_id.unwrap_or_default();
    tracing::debug!("Processing upload request for session {:?}", session_id);

    state.orchestrator(&session_id).register_upload(multipart).await?;

    tracing::info!("Request finished with success");
    Ok(Json(UploadResult::success()))
}

// list all files in the downloads directory
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FileStatus>>, (StatusCode, Json<ErrorResponse>)> {
    file_status(&state.downloads_dir, &state.owner)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to read directory {:?}: {}", state.downloads_dir, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to read directory: {}", e),
                }),
            )
        })
}

// plain OPTIONS; real cors preflights are answered by the cors layer
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn default_route() -> &'static str {
    "hello word"
}

// anything no route claimed: OPTIONS gets the preflight answer, the rest the default
pub async fn fallback(method: Method) -> Response {
    match method {
        Method::OPTIONS => preflight().await.into_response(),
        _ => default_route().await.into_response(),
    }
}
