use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use paperlens_core::{SelectOutcome, StateSnapshot, Status, messages};

use crate::state::AppState;
use crate::upload;

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

fn conflict_message(status: Status) -> String {
    if status.is_busy() {
        format!("An analysis is already {}", status)
    } else {
        format!("Reset before selecting a new file (current state: {})", status)
    }
}

/// Run the pipeline on the uploaded file and answer with the final state.
///
/// The run is spawned so that it reaches a terminal state even if the
/// client disconnects; progress is visible meanwhile through `/api/state`.
pub async fn upload(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let document = match upload::parse_multipart(multipart).await {
        Ok(document) => document,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let controller = Arc::clone(&state.controller);
    let outcome = match tokio::spawn(async move { controller.select_file(document).await }).await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "pipeline task failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, messages::UNEXPECTED_ERROR);
        }
    };

    match outcome {
        SelectOutcome::NotPdf => error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            outcome.notice().unwrap_or(messages::NOT_A_PDF),
        ),
        SelectOutcome::Busy(status) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "error": conflict_message(status),
                "status": status,
            })),
        )
            .into_response(),
        SelectOutcome::Finished(state) => Json(StateSnapshot::from(&state)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_depends_on_state() {
        assert_eq!(
            conflict_message(Status::Analyzing),
            "An analysis is already analyzing"
        );
        assert!(conflict_message(Status::Completed).starts_with("Reset before selecting"));
        assert!(conflict_message(Status::Error).starts_with("Reset before selecting"));
    }
}
