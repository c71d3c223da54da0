use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::models::AnalysisRecord;
use crate::domain::models::Backend;
use crate::domain::models::BackendError;
use crate::domain::models::DiagnoseResponse;
use crate::domain::models::Message;

pub async fn transport_error() -> BackendError {
    let err = reqwest::get("not a url").await.unwrap_err();
    return BackendError::Transport(err);
}

pub fn status_error(status: u16, message: Option<&str>) -> BackendError {
    return BackendError::Status {
        status,
        message: message.map(|e| return e.to_string()),
    };
}

pub fn diagnose_ok(result_md: &str) -> Result<DiagnoseResponse, BackendError> {
    return Ok(DiagnoseResponse {
        id: Some(1),
        result_md: Some(result_md.to_string()),
        confidence: None,
    });
}

/// Scripted backend. Responses are handed out in order. When gated, every
/// call announces itself on `started` and then waits for `release`.
#[derive(Default)]
pub struct FakeBackend {
    pub diagnose_responses: Mutex<VecDeque<Result<DiagnoseResponse, BackendError>>>,
    pub chat_responses: Mutex<VecDeque<Result<Option<String>, BackendError>>>,
    pub analyses_response: Mutex<Option<Result<Vec<AnalysisRecord>, BackendError>>>,
    pub diagnose_calls: Mutex<Vec<String>>,
    pub chat_calls: Mutex<Vec<(String, Vec<Message>)>>,
    pub list_calls: Mutex<usize>,
    pub gated: bool,
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl FakeBackend {
    pub fn gated() -> FakeBackend {
        return FakeBackend {
            gated: true,
            ..FakeBackend::default()
        };
    }

    pub fn push_diagnose(&self, res: Result<DiagnoseResponse, BackendError>) {
        self.diagnose_responses.lock().unwrap().push_back(res);
    }

    pub fn push_chat(&self, res: Result<Option<String>, BackendError>) {
        self.chat_responses.lock().unwrap().push_back(res);
    }

    pub fn set_analyses(&self, res: Result<Vec<AnalysisRecord>, BackendError>) {
        *self.analyses_response.lock().unwrap() = Some(res);
    }

    async fn wait_for_release(&self) {
        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    #[allow(clippy::implicit_return)]
    async fn diagnose(&self, symptoms: &str) -> Result<DiagnoseResponse, BackendError> {
        self.diagnose_calls.lock().unwrap().push(symptoms.to_string());
        self.wait_for_release().await;

        return self
            .diagnose_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("No diagnose response scripted");
    }

    #[allow(clippy::implicit_return)]
    async fn chat(&self, message: &str, history: &[Message]) -> Result<Option<String>, BackendError> {
        self.chat_calls
            .lock()
            .unwrap()
            .push((message.to_string(), history.to_vec()));
        self.wait_for_release().await;

        return self
            .chat_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("No chat response scripted");
    }

    #[allow(clippy::implicit_return)]
    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>, BackendError> {
        *self.list_calls.lock().unwrap() += 1;

        return self
            .analyses_response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| return Ok(vec![]));
    }
}
