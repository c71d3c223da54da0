use std::sync::Arc;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::AnalysisRecord;
use super::Message;

/// Successful response of the diagnosis endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub result_md: Option<String>,
    /// Server-side parse of the confidence block. Informational only, the
    /// client always parses `result_md` itself.
    #[serde(default)]
    pub confidence: Option<serde_json::Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl BackendError {
    /// Message supplied by the server in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        if let BackendError::Status {
            message: Some(message),
            ..
        } = self
        {
            if !message.trim().is_empty() {
                return Some(message);
            }
        }

        return None;
    }
}

#[async_trait]
pub trait Backend {
    /// Submits free-text symptoms for analysis. Non-2xx responses are mapped
    /// to `BackendError::Status` carrying the body's `error` field.
    async fn diagnose(&self, symptoms: &str) -> Result<DiagnoseResponse, BackendError>;

    /// Sends the next chat message alongside the prior conversation. Resolves
    /// to `None` when a response arrived but carried no usable reply.
    async fn chat(&self, message: &str, history: &[Message]) -> Result<Option<String>, BackendError>;

    /// Lists stored analyses in the order the server returns them.
    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>, BackendError>;
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;
