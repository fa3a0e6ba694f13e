use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/comisiones", post(handlers::submit_form))
        .route("/api/comisiones", post(handlers::request_report))
        .route("/api/state", get(handlers::get_state))
        .with_state(state)
}
