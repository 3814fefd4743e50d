//! Admin dashboard endpoint.

use axum::extract::State;
use serde::Serialize;

use super::{error, success, ApiResult};
use crate::admin::{SectionContent, ADMIN_SECTIONS};
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{EducationEntry, ExperienceEntry, Service, SkillCategory};
use crate::AppState;

/// Dashboard card for one admin section.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSectionSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub path: String,
    pub api_path: String,
    pub item_count: i64,
}

/// GET /api/admin - List the admin sections with their item counts.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<Vec<AdminSectionSummary>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let mut sections = Vec::with_capacity(ADMIN_SECTIONS.len());
    for section in ADMIN_SECTIONS {
        let item_count = match count_items(&state.repo, section.content).await {
            Ok(count) => count,
            Err(e) => return error(e, revision_id),
        };
        sections.push(AdminSectionSummary {
            id: section.id,
            name: section.name,
            description: section.description,
            path: section.client_path(),
            api_path: format!("/api/admin{}", section.api_route),
            item_count,
        });
    }

    success(sections, revision_id)
}

async fn count_items(repo: &Repository, content: SectionContent) -> Result<i64, AppError> {
    match content {
        SectionContent::Services => repo.count::<Service>().await,
        SectionContent::Experience => repo.count::<ExperienceEntry>().await,
        SectionContent::Education => repo.count::<EducationEntry>().await,
        SectionContent::SkillCategories => repo.count::<SkillCategory>().await,
        SectionContent::SiteMetadata => Ok(i64::from(repo.get_site_metadata().await?.is_some())),
    }
}
