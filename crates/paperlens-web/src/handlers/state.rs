use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use paperlens_core::StateSnapshot;

use crate::state::AppState;

pub async fn snapshot(State(state): State<Arc<AppState>>) -> Json<StateSnapshot> {
    Json(StateSnapshot::from(&state.controller.state()))
}
