//! Public page endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::views::PortfolioPage;
use crate::AppState;

/// GET /api/portfolio - Every public section with its own load state.
pub async fn get_portfolio(State(state): State<AppState>) -> ApiResult<PortfolioPage> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    let page = PortfolioPage::load(&state.repo).await;
    success(page, revision_id)
}
