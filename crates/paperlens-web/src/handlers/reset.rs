use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use paperlens_core::StateSnapshot;

use crate::state::AppState;

pub async fn reset(State(state): State<Arc<AppState>>) -> Response {
    if !state.controller.reset() {
        let status = state.controller.status();
        return (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "error": format!("Cannot reset while {}", status),
                "status": status,
            })),
        )
            .into_response();
    }
    Json(StateSnapshot::from(&state.controller.state())).into_response()
}
