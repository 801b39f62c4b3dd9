use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::form_add))
        .route("/entries/:id", post(handlers::form_edit))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route("/api/entries/:id", axum::routing::put(handlers::edit_entry))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/trend", get(handlers::get_trend))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}
