use axum::middleware::from_fn_with_state;
use axum::{routing::get, Router};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/jobs",
            get(handlers::jobs::list).post(handlers::jobs::create),
        )
        .route(
            "/jobs/{id}",
            get(handlers::jobs::retrieve)
                .patch(handlers::jobs::update)
                .delete(handlers::jobs::remove),
        )
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}
