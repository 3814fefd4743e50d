//! Endpoints shared by every ordered content kind.
//!
//! Handlers are generic over [`ContentKind`] and mounted once per collection.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{ContentKind, Entry};
use crate::AppState;

/// GET /api/{kind} - List entries ascending by sort order.
pub async fn list_entries<K: ContentKind>(State(state): State<AppState>) -> ApiResult<Vec<Entry<K>>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list::<K>().await {
        Ok(entries) => success(entries, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/{kind}/{id} - Get a single entry.
pub async fn get_entry<K: ContentKind>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Entry<K>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get::<K>(&id).await {
        Ok(Some(entry)) => success(entry, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("{} {} not found", K::LABEL, id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/admin/{kind} - Create a new entry.
pub async fn create_entry<K: ContentKind>(
    State(state): State<AppState>,
    Json(request): Json<K>,
) -> ApiResult<Entry<K>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // Presence check only
    if let Some(field) = request.missing_field() {
        return error(
            AppError::Validation(format!("{} is required", field)),
            revision_id,
        );
    }

    match state.repo.create(&request).await {
        Ok(entry) => {
            let new_revision = entry.updated_at.sequence;
            success(entry, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/admin/{kind}/{id} - Merge fields into an entry.
pub async fn update_entry<K: ContentKind>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<K::Patch>,
) -> ApiResult<Entry<K>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.update::<K>(&id, &request).await {
        Ok(entry) => {
            let new_revision = entry.updated_at.sequence;
            success(entry, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/admin/{kind}/{id} - Delete an entry.
pub async fn delete_entry<K: ContentKind>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete::<K>(&id).await {
        Ok(stamp) => success((), stamp.sequence),
        Err(e) => error(e, revision_id),
    }
}
