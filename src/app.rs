use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/days/:date", get(handlers::get_day))
        .route("/api/days/:date/boxes", post(handlers::add_box))
        .route("/api/days/:date/toggle", post(handlers::toggle_box))
        .route("/api/weekly", get(handlers::get_weekly))
        .with_state(state)
}
