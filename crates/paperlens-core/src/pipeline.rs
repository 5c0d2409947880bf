//! The pipeline status state machine.
//!
//! [`PipelineState`] is a plain value. [`PipelineState::reduce`] computes the
//! next value for an event without touching the current one; events that do
//! not apply in the current state yield `None`.

use serde::Serialize;

use crate::{ResearchAnalysis, messages};

/// Status without the attached data, for display and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Extracting,
    Analyzing,
    Completed,
    Error,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Extracting => "extracting",
            Status::Analyzing => "analyzing",
            Status::Completed => "completed",
            Status::Error => "error",
        }
    }

    /// A run is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, Status::Extracting | Status::Analyzing)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of the pipeline. The result exists only in `Completed`,
/// the message only in `Error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PipelineState {
    #[default]
    Idle,
    Extracting,
    Analyzing,
    Completed(ResearchAnalysis),
    Error(String),
}

/// Inputs to the state machine.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A file declared as PDF was selected.
    PdfSelected,
    ExtractionSucceeded,
    ExtractionFailed,
    AnalysisSucceeded(ResearchAnalysis),
    /// `None` or a blank message falls back to the generic message.
    AnalysisFailed(Option<String>),
    /// New analysis / retry requested by the user.
    Reset,
}

impl PipelineState {
    pub fn status(&self) -> Status {
        match self {
            PipelineState::Idle => Status::Idle,
            PipelineState::Extracting => Status::Extracting,
            PipelineState::Analyzing => Status::Analyzing,
            PipelineState::Completed(_) => Status::Completed,
            PipelineState::Error(_) => Status::Error,
        }
    }

    pub fn result(&self) -> Option<&ResearchAnalysis> {
        match self {
            PipelineState::Completed(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PipelineState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn reduce(&self, event: PipelineEvent) -> Option<PipelineState> {
        use PipelineEvent as E;
        use PipelineState as S;

        match (self, event) {
            (S::Idle, E::PdfSelected) => Some(S::Extracting),
            (S::Extracting, E::ExtractionSucceeded) => Some(S::Analyzing),
            (S::Extracting, E::ExtractionFailed) => {
                Some(S::Error(messages::EXTRACTION_FAILED.to_string()))
            }
            (S::Analyzing, E::AnalysisSucceeded(analysis)) => Some(S::Completed(analysis)),
            (S::Analyzing, E::AnalysisFailed(message)) => Some(S::Error(
                message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| messages::UNEXPECTED_ERROR.to_string()),
            )),
            (S::Idle | S::Completed(_) | S::Error(_), E::Reset) => Some(S::Idle),
            _ => None,
        }
    }
}

/// Serializable view of a state, for JSON front-ends.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResearchAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&PipelineState> for StateSnapshot {
    fn from(state: &PipelineState) -> Self {
        Self {
            status: state.status(),
            result: state.result().cloned(),
            error: state.error().map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed() -> PipelineState {
        PipelineState::Completed(ResearchAnalysis {
            sample: Some("s".into()),
            ..Default::default()
        })
    }

    #[test]
    fn happy_path() {
        let s = PipelineState::Idle;
        let s = s.reduce(PipelineEvent::PdfSelected).unwrap();
        assert_eq!(s.status(), Status::Extracting);
        let s = s.reduce(PipelineEvent::ExtractionSucceeded).unwrap();
        assert_eq!(s.status(), Status::Analyzing);
        let analysis = ResearchAnalysis::default();
        let s = s
            .reduce(PipelineEvent::AnalysisSucceeded(analysis.clone()))
            .unwrap();
        assert_eq!(s.result(), Some(&analysis));
        assert_eq!(s.error(), None);
    }

    #[test]
    fn extraction_failure_uses_fixed_message() {
        let s = PipelineState::Extracting
            .reduce(PipelineEvent::ExtractionFailed)
            .unwrap();
        assert_eq!(s.error(), Some(messages::EXTRACTION_FAILED));
        assert!(s.result().is_none());
    }

    #[test]
    fn analysis_failure_keeps_message_or_falls_back() {
        let s = PipelineState::Analyzing
            .reduce(PipelineEvent::AnalysisFailed(Some("timeout".into())))
            .unwrap();
        assert_eq!(s.error(), Some("timeout"));

        let s = PipelineState::Analyzing
            .reduce(PipelineEvent::AnalysisFailed(None))
            .unwrap();
        assert_eq!(s.error(), Some(messages::UNEXPECTED_ERROR));

        let s = PipelineState::Analyzing
            .reduce(PipelineEvent::AnalysisFailed(Some("  ".into())))
            .unwrap();
        assert_eq!(s.error(), Some(messages::UNEXPECTED_ERROR));
    }

    #[test]
    fn reset_from_terminal_states_clears_everything() {
        for state in [completed(), PipelineState::Error("x".into()), PipelineState::Idle] {
            let s = state.reduce(PipelineEvent::Reset).unwrap();
            assert_eq!(s, PipelineState::Idle);
            assert!(s.result().is_none());
            assert!(s.error().is_none());
        }
    }

    #[test]
    fn reset_ignored_while_busy() {
        assert!(PipelineState::Extracting.reduce(PipelineEvent::Reset).is_none());
        assert!(PipelineState::Analyzing.reduce(PipelineEvent::Reset).is_none());
    }

    #[test]
    fn selection_only_accepted_when_idle() {
        for state in [
            PipelineState::Extracting,
            PipelineState::Analyzing,
            completed(),
            PipelineState::Error("x".into()),
        ] {
            assert!(state.reduce(PipelineEvent::PdfSelected).is_none());
        }
    }

    #[test]
    fn out_of_order_results_are_ignored() {
        assert!(PipelineState::Idle
            .reduce(PipelineEvent::AnalysisSucceeded(ResearchAnalysis::default()))
            .is_none());
        assert!(PipelineState::Analyzing
            .reduce(PipelineEvent::ExtractionFailed)
            .is_none());
    }

    #[test]
    fn snapshot_serializes_lowercase_status() {
        let json = serde_json::to_value(StateSnapshot::from(&completed())).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["result"]["sample"], "s");
        assert!(json.get("error").is_none());
    }
}
