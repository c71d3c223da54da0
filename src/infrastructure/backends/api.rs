#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnalysisRecord;
use crate::domain::models::Backend;
use crate::domain::models::BackendError;
use crate::domain::models::DiagnoseResponse;
use crate::domain::models::Message;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DiagnoseRequest {
    symptoms: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    message: String,
    history: Vec<Message>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    reply: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Maps a non-2xx response to a status error, keeping the `error` field of
/// the body when there is one.
async fn status_error(res: reqwest::Response) -> BackendError {
    let status = res.status().as_u16();
    let message = match res.text().await {
        Ok(body) => serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| return e.error),
        Err(_) => None,
    };

    return BackendError::Status { status, message };
}

/// HTTP client for the diagnosis service's REST API.
pub struct ApiBackend {
    url: String,
    client: reqwest::Client,
}

impl ApiBackend {
    pub fn new(url: &str) -> ApiBackend {
        return ApiBackend {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }

    pub fn from_config(config: &Config) -> ApiBackend {
        return ApiBackend::new(&config.get(ConfigKey::ApiBase));
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{url}/{path}/", url = self.url);
    }
}

#[async_trait]
impl Backend for ApiBackend {
    #[allow(clippy::implicit_return)]
    async fn diagnose(&self, symptoms: &str) -> Result<DiagnoseResponse, BackendError> {
        let req = DiagnoseRequest {
            symptoms: symptoms.to_string(),
        };

        let res = self
            .client
            .post(self.endpoint("diagnose"))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make diagnose request"
            );
            return Err(status_error(res).await);
        }

        let body = res.json::<DiagnoseResponse>().await?;
        tracing::debug!(body = ?body, "Diagnose response");

        return Ok(body);
    }

    #[allow(clippy::implicit_return)]
    async fn chat(&self, message: &str, history: &[Message]) -> Result<Option<String>, BackendError> {
        let req = ChatRequest {
            message: message.to_string(),
            history: history.to_vec(),
        };

        let res = self
            .client
            .post(self.endpoint("chat"))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Failed to make chat request");
            return Err(status_error(res).await);
        }

        let body = res.json::<ChatResponse>().await?;
        tracing::debug!(body = ?body, "Chat response");

        return Ok(body.reply);
    }

    #[allow(clippy::implicit_return)]
    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>, BackendError> {
        let res = self.client.get(self.endpoint("analyses")).send().await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to list analyses"
            );
            return Err(status_error(res).await);
        }

        let records = res.json::<Vec<AnalysisRecord>>().await?;
        return Ok(records);
    }
}
