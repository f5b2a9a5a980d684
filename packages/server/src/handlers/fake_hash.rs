use axum::Json;
use axum::extract::State;
use registrar_core::{OperationContext, Registration};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::fake_hash::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/fake-hash",
    tag = "Files",
    operation_id = "registerFakeHash",
    summary = "Register hashes for a file without hashing it",
    description = "Records caller-supplied ED2K/CRC32/MD5/SHA1 hashes for a file, identified by \
        `fileID`, by `importFolderID` + `filePath`, or both. Creates the file and its location \
        when neither exists yet, links an unlinked location, and refreshes the file-name hash cache.",
    request_body = FakeHashRequest,
    responses(
        (status = 200, description = "Hashes registered", body = FakeHashResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "File or import folder not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Cancelled or timed out (UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(file_id = ?payload.file_id, import_folder_id = ?payload.import_folder_id))]
pub async fn register_fake_hash(
    State(state): State<AppState>,
    AppJson(payload): AppJson<FakeHashRequest>,
) -> Result<Json<FakeHashResponse>, AppError> {
    let registration = Registration::from(payload);

    let mut ctx = OperationContext::new(state.shutdown.child_token());
    if let Some(timeout) = state.registrar.config().operation_timeout() {
        ctx = ctx.with_timeout(timeout);
    }

    let result = state.registrar.register(&registration, &ctx).await?;
    Ok(Json(result.into()))
}
