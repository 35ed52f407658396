use axum::routing::{delete, patch, post, put};
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/jobs", post(handlers::jobs::create))
        .route("/jobs", get(handlers::jobs::list))
        .route("/jobs", delete(handlers::jobs::clear_all))
        .route("/jobs/search", get(handlers::jobs::search))
        .route("/jobs/delete", post(handlers::jobs::delete_selected))
        .route("/jobs/{id}", get(handlers::jobs::details))
        .route("/jobs/{id}/status", patch(handlers::jobs::update_status))
        .route("/jobs/{id}/meta", post(handlers::jobs::add_meta))
        .route("/statuses", get(handlers::statuses::list))
        .route("/fields", get(handlers::fields::list))
        .route("/fields", delete(handlers::fields::clear))
        .route("/fields/{name}", put(handlers::fields::save))
        .route("/transfer/export", get(handlers::transfer::export))
        .route("/transfer/import", post(handlers::transfer::import))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
