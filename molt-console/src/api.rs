use gloo_net::http::{Request, Response};
use molt_types::{
    CreateFetchTaskRequest, FetchAttemptId, FetchRun, FetchRunDetailed, VerifyAttemptId,
    VerifyRun, VerifyRunDetailed, API_BASE_PATH,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::api_base;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP error: {status} ({message})")]
    Status { status: u16, message: String },
    #[error("failed to parse JSON: {0}")]
    Decode(String),
    #[error("failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One operation per MOLT service endpoint.
///
/// Every call is a single request: no retry and no caching. Callers that
/// need repetition (the poll loops) re-invoke.
#[allow(async_fn_in_trait)]
pub trait MoltApi {
    async fn list_fetch_tasks(&self) -> Result<Vec<FetchRun>, ApiError>;
    async fn get_fetch_task(&self, id: FetchAttemptId) -> Result<FetchRunDetailed, ApiError>;
    async fn create_fetch_task(
        &self,
        body: &CreateFetchTaskRequest,
    ) -> Result<FetchAttemptId, ApiError>;
    async fn create_verify_task(&self, fetch_id: FetchAttemptId)
        -> Result<VerifyAttemptId, ApiError>;
    async fn list_verify_tasks(&self) -> Result<Vec<VerifyRun>, ApiError>;
    async fn get_verify_task(&self, id: VerifyAttemptId) -> Result<VerifyRunDetailed, ApiError>;
}

/// Browser `fetch`-backed client.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpMoltApi {
    base: String,
}

impl HttpMoltApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Client for the configured service location
    pub fn from_config() -> Self {
        Self::new(api_base())
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base, path)
    }
}

pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{base}{API_BASE_PATH}{path}")
}

impl MoltApi for HttpMoltApi {
    async fn list_fetch_tasks(&self) -> Result<Vec<FetchRun>, ApiError> {
        let response = Request::get(&self.url("/fetch"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response).await
    }

    async fn get_fetch_task(&self, id: FetchAttemptId) -> Result<FetchRunDetailed, ApiError> {
        let response = Request::get(&self.url(&format!("/fetch/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response).await
    }

    async fn create_fetch_task(
        &self,
        body: &CreateFetchTaskRequest,
    ) -> Result<FetchAttemptId, ApiError> {
        let response = Request::post(&self.url("/fetch"))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response).await
    }

    async fn create_verify_task(
        &self,
        fetch_id: FetchAttemptId,
    ) -> Result<VerifyAttemptId, ApiError> {
        let response = Request::post(&self.url(&format!("/fetch/{fetch_id}/verify")))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response).await
    }

    async fn list_verify_tasks(&self) -> Result<Vec<VerifyRun>, ApiError> {
        let response = Request::get(&self.url("/verify"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response).await
    }

    async fn get_verify_task(&self, id: VerifyAttemptId) -> Result<VerifyRunDetailed, ApiError> {
        let response = Request::get(&self.url(&format!("/verify/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response).await
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status,
            message: describe_error_body(&body),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    decode_body(&body)
}

pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull a readable message out of an error body.
///
/// The service answers failures with `{"message": ...}`; proxies may answer
/// with `{"error": ...}` or plain text.
pub fn describe_error_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "empty response body".to_string();
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
        if let Some(error) = json.get("error").and_then(|v| v.as_str()) {
            return error.to_string();
        }
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_are_versioned() {
        assert_eq!(
            endpoint_url("http://localhost:4500", "/fetch/12/verify"),
            "http://localhost:4500/api/v1/fetch/12/verify"
        );
        assert_eq!(endpoint_url("", "/verify"), "/api/v1/verify");
    }

    #[test]
    fn error_body_prefers_service_message() {
        assert_eq!(
            describe_error_body(r#"{"name":"bad_request","message":"failed to find fetch task with id 4"}"#),
            "failed to find fetch task with id 4"
        );
        assert_eq!(describe_error_body(r#"{"error":"forbidden"}"#), "forbidden");
        assert_eq!(describe_error_body("upstream timeout\n"), "upstream timeout");
        assert_eq!(describe_error_body("  "), "empty response body");
    }

    #[test]
    fn status_error_keeps_code_and_message() {
        let err = ApiError::Status {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP error: 404 (not found)");
        assert_eq!(ApiError::Transport("offline".into()).status(), None);
    }

    #[test]
    fn create_fetch_response_is_a_bare_id() {
        let id: FetchAttemptId = decode_body("1700000123").unwrap();
        assert_eq!(id, 1_700_000_123);
        assert!(matches!(
            decode_body::<FetchAttemptId>("{\"id\":1}"),
            Err(ApiError::Decode(_))
        ));
    }
}
