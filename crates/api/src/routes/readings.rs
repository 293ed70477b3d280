use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Mount `/readings` routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/readings", post(handlers::readings::ingest_reading))
}
