//! End-to-end runs of the [`Controller`] against fake collaborators.
//!
//! No network and no real PDFs: the PDF backend is a [`FakePdf`] and the
//! generative service a [`MockService`].

use std::sync::Arc;

use paperlens_core::messages;
use paperlens_core::mock::{FakePdf, MockService};
use paperlens_core::prompt::NOT_STATED;
use paperlens_core::{
    AnalysisClient, Controller, MAX_INPUT_CHARS, PDF_MIME, PipelineState, ResearchAnalysis,
    SelectOutcome, ServiceError, Status, TextExtractor, UploadedDocument,
};

fn controller(pdf: FakePdf, service: Arc<MockService>) -> Controller {
    Controller::new(
        TextExtractor::new(Arc::new(pdf)),
        AnalysisClient::new(service),
    )
}

fn pdf_upload() -> UploadedDocument {
    UploadedDocument::new("paper.pdf", PDF_MIME, b"%PDF-1.7\n".to_vec())
}

fn two_page_paper() -> FakePdf {
    FakePdf::with_pages(vec![vec!["Objective:", "X."], vec!["Method:", "survey."]])
}

#[tokio::test]
async fn two_page_paper_completes_with_sentinel_sample() {
    let reply = format!(
        r#"{{"objectives":["X"],"methodology":"survey","tools":[],"sample":"{}","results":[],"recommendations":[]}}"#,
        NOT_STATED
    );
    let service = Arc::new(MockService::replying(reply));
    let c = controller(two_page_paper(), service.clone());

    let outcome = c.select_file(pdf_upload()).await;

    let expected = ResearchAnalysis {
        objectives: Some(vec!["X".into()]),
        methodology: Some("survey".into()),
        tools: Some(vec![]),
        sample: Some(NOT_STATED.into()),
        results: Some(vec![]),
        recommendations: Some(vec![]),
    };
    assert_eq!(
        outcome,
        SelectOutcome::Finished(PipelineState::Completed(expected.clone()))
    );
    assert_eq!(c.state().result(), Some(&expected));
    assert_eq!(c.state().error(), None);

    let request = service.last_request().unwrap();
    assert!(request.prompt.contains("Objective: X.\nMethod: survey."));
}

#[tokio::test]
async fn network_error_message_reaches_error_state() {
    let service = Arc::new(MockService::failing(ServiceError::Transport(
        "timeout".into(),
    )));
    let c = controller(two_page_paper(), service);

    c.select_file(pdf_upload()).await;

    assert_eq!(c.status(), Status::Error);
    assert_eq!(c.state().error(), Some("timeout"));
    assert!(c.state().result().is_none());
}

#[tokio::test]
async fn empty_response_body_is_processing_error() {
    let service = Arc::new(MockService::replying(""));
    let c = controller(two_page_paper(), service);

    c.select_file(pdf_upload()).await;

    assert_eq!(c.state().error(), Some(messages::PROCESSING_ERROR));
}

#[tokio::test]
async fn api_rejection_surfaces_service_message() {
    let service = Arc::new(MockService::failing(ServiceError::Api {
        status: 400,
        message: "API key not valid. Please pass a valid API key.".into(),
    }));
    let c = controller(two_page_paper(), service);

    c.select_file(pdf_upload()).await;

    assert_eq!(
        c.state().error(),
        Some("API key not valid. Please pass a valid API key.")
    );
}

#[tokio::test]
async fn corrupt_pdf_is_extraction_failure_without_analysis() {
    let service = Arc::new(MockService::replying("{}"));
    let c = controller(FakePdf::failing_open(), service.clone());

    c.select_file(pdf_upload()).await;

    assert_eq!(c.state().error(), Some(messages::EXTRACTION_FAILED));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn non_pdf_selection_changes_nothing() {
    let pdf = two_page_paper();
    let service = Arc::new(MockService::replying("{}"));
    let c = controller(pdf.clone(), service.clone());

    for mime in ["text/plain", "image/png", "application/octet-stream", ""] {
        let outcome = c
            .select_file(UploadedDocument::new("file", mime, b"%PDF-1.7".to_vec()))
            .await;
        assert_eq!(outcome, SelectOutcome::NotPdf);
        assert_eq!(c.state(), PipelineState::Idle);
    }
    assert_eq!(pdf.open_count(), 0);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn fifty_page_paper_sends_first_thirty_pages_in_order() {
    let pages: Vec<Vec<String>> = (1..=50).map(|i| vec![format!("p{:02}", i)]).collect();
    let service = Arc::new(MockService::replying("{}"));
    let c = controller(FakePdf::new(pages), service.clone());

    c.select_file(pdf_upload()).await;

    let prompt = service.last_request().unwrap().prompt;
    let expected: Vec<String> = (1..=30).map(|i| format!("p{:02}", i)).collect();
    assert!(prompt.contains(&expected.join("\n")));
    assert!(!prompt.contains("p31"));
}

#[tokio::test]
async fn long_text_is_truncated_before_sending() {
    let long_page = format!("{}{}", "ب".repeat(MAX_INPUT_CHARS - 5), "ZZZZZZZZZZ");
    let service = Arc::new(MockService::replying("{}"));
    let c = controller(FakePdf::new(vec![vec![long_page]]), service.clone());

    c.select_file(pdf_upload()).await;

    let prompt = service.last_request().unwrap().prompt;
    assert!(prompt.contains(&format!("{}ZZZZZ", "ب".repeat(MAX_INPUT_CHARS - 5))));
    assert!(!prompt.contains("ZZZZZZ"));
}

#[tokio::test]
async fn reset_is_idempotent_from_terminal_states() {
    let ok = controller(two_page_paper(), Arc::new(MockService::replying("{}")));
    ok.select_file(pdf_upload()).await;
    assert_eq!(ok.status(), Status::Completed);

    let failed = controller(FakePdf::failing_open(), Arc::new(MockService::replying("{}")));
    failed.select_file(pdf_upload()).await;
    assert_eq!(failed.status(), Status::Error);

    for c in [&ok, &failed] {
        assert!(c.reset());
        assert_eq!(c.state(), PipelineState::Idle);
        assert!(c.reset());
        assert_eq!(c.state(), PipelineState::Idle);
    }
}
