use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and a summary of the catalog currently served.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let catalog = state.catalog.snapshot();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-api",
        "catalog_source": state.catalog_source.describe(),
        "careers": catalog.careers().len(),
        "skills": catalog.skills().len(),
        "catalog_loaded_at": catalog.loaded_at(),
    }))
}
