//! Portfolio Backend
//!
//! REST backend for a personal portfolio site: public section content plus an admin
//! area for editing it, persisted in an SQLite-backed document store.

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod views;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use db::Repository;
use models::{EducationEntry, ExperienceEntry, Service, SkillCategory};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the key for the auth layer
    let admin_key = state.config.admin_key.clone();

    // Public read routes
    let public_routes = Router::new()
        // Services
        .route("/services", get(api::list_entries::<Service>))
        .route("/services/{id}", get(api::get_entry::<Service>))
        // Experience
        .route("/experience", get(api::list_entries::<ExperienceEntry>))
        .route("/experience/{id}", get(api::get_entry::<ExperienceEntry>))
        // Education
        .route("/education", get(api::list_entries::<EducationEntry>))
        .route("/education/{id}", get(api::get_entry::<EducationEntry>))
        // Skill categories
        .route("/skill-categories", get(api::list_entries::<SkillCategory>))
        .route("/skill-categories/{id}", get(api::get_entry::<SkillCategory>))
        // Site metadata
        .route("/site/metadata", get(api::get_site_metadata))
        .route("/site/certifications", get(api::list_certifications))
        // Whole page
        .route("/portfolio", get(api::get_portfolio));

    // Admin routes
    let admin_routes = Router::new()
        .route("/admin", get(api::get_dashboard))
        .route("/admin/services", post(api::create_entry::<Service>))
        .route(
            "/admin/services/{id}",
            put(api::update_entry::<Service>).delete(api::delete_entry::<Service>),
        )
        .route("/admin/experience", post(api::create_entry::<ExperienceEntry>))
        .route(
            "/admin/experience/{id}",
            put(api::update_entry::<ExperienceEntry>)
                .delete(api::delete_entry::<ExperienceEntry>),
        )
        .route("/admin/education", post(api::create_entry::<EducationEntry>))
        .route(
            "/admin/education/{id}",
            put(api::update_entry::<EducationEntry>).delete(api::delete_entry::<EducationEntry>),
        )
        .route(
            "/admin/skill-categories",
            post(api::create_entry::<SkillCategory>),
        )
        .route(
            "/admin/skill-categories/{id}",
            put(api::update_entry::<SkillCategory>).delete(api::delete_entry::<SkillCategory>),
        )
        .route("/admin/site/metadata", put(api::update_site_metadata))
        // Apply admin key middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_key_layer(admin_key.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
