#[cfg(test)]
#[path = "analysis_session_test.rs"]
mod tests;

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use super::ResponsePayloadParser;
use crate::domain::models::BackendBox;
use crate::domain::models::ParsedAnalysis;

pub const VALIDATION_MESSAGE: &str = "Enter your symptoms to start the analysis.";
pub const GENERIC_ERROR_MESSAGE: &str = "Server error.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum SessionStatus {
    Idle,
    Loading,
    Done,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Done(ParsedAnalysis),
    Failed(String),
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        return match self {
            SessionState::Idle => SessionStatus::Idle,
            SessionState::Loading => SessionStatus::Loading,
            SessionState::Done(_) => SessionStatus::Done,
            SessionState::Failed(_) => SessionStatus::Failed,
        };
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request ran to completion; the status is `Done` or `Failed`.
    Completed(SessionStatus),
    /// Blank input. The validation message was set, nothing was sent.
    Invalid,
    /// A submission is already loading. Nothing changed.
    Busy,
}

/// One "describe symptoms, get an analysis" cycle at a time.
pub struct AnalysisSession {
    backend: BackendBox,
    state: Mutex<SessionState>,
}

impl AnalysisSession {
    pub fn new(backend: BackendBox) -> AnalysisSession {
        return AnalysisSession {
            backend,
            state: Mutex::new(SessionState::Idle),
        };
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        return self.state.lock().unwrap_or_else(PoisonError::into_inner);
    }

    pub fn state(&self) -> SessionState {
        return self.lock().clone();
    }

    pub fn status(&self) -> SessionStatus {
        return self.lock().status();
    }

    pub fn parsed(&self) -> Option<ParsedAnalysis> {
        if let SessionState::Done(parsed) = &*self.lock() {
            return Some(parsed.clone());
        }

        return None;
    }

    pub fn error_message(&self) -> Option<String> {
        if let SessionState::Failed(message) = &*self.lock() {
            return Some(message.to_string());
        }

        return None;
    }

    pub async fn submit(&self, symptoms: &str) -> SubmitOutcome {
        {
            let mut state = self.lock();
            if matches!(*state, SessionState::Loading) {
                tracing::debug!("Submission dropped, an analysis is already loading");
                return SubmitOutcome::Busy;
            }

            if symptoms.trim().is_empty() {
                *state = SessionState::Failed(VALIDATION_MESSAGE.to_string());
                return SubmitOutcome::Invalid;
            }

            *state = SessionState::Loading;
        }

        tracing::debug!(symptoms_len = symptoms.len(), "Submitting symptoms");
        let next = match self.backend.diagnose(symptoms).await {
            Ok(res) => {
                let parsed = ResponsePayloadParser::parse(&res.result_md.unwrap_or_default());
                tracing::debug!(
                    analysis_id = ?res.id,
                    items = ?parsed.items.as_ref().map(|items| return items.len()),
                    "Analysis received"
                );
                SessionState::Done(parsed)
            }
            Err(err) => {
                tracing::error!(error = ?err, "Analysis request failed");
                let message = err
                    .server_message()
                    .unwrap_or(GENERIC_ERROR_MESSAGE)
                    .to_string();
                SessionState::Failed(message)
            }
        };

        let status = next.status();
        *self.lock() = next;

        return SubmitOutcome::Completed(status);
    }
}
