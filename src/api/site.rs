//! Site metadata endpoints.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{SiteMetadata, SiteMetadataPatch};
use crate::AppState;

/// GET /api/site/metadata - Get the metadata singleton.
pub async fn get_site_metadata(State(state): State<AppState>) -> ApiResult<SiteMetadata> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_site_metadata().await {
        Ok(Some(metadata)) => success(metadata, revision_id),
        Ok(None) => error(
            AppError::NotFound("Site metadata has not been created".to_string()),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/site/certifications - Certifications listed on the metadata.
pub async fn list_certifications(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_certifications().await {
        Ok(certifications) => success(certifications, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/admin/site/metadata - Merge fields into the metadata singleton.
pub async fn update_site_metadata(
    State(state): State<AppState>,
    Json(request): Json<SiteMetadataPatch>,
) -> ApiResult<SiteMetadata> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.update_site_metadata(&request).await {
        Ok(metadata) => {
            let new_revision = metadata.updated_at.sequence;
            success(metadata, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
