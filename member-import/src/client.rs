//! Registry REST client
//!
//! Thin reqwest wrapper over the member API. The import pipeline never calls
//! it; callers hand it the records a batch accepted.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Member, MemberRecord};
use thiserror::Error;

use crate::config::ImportConfig;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("API error {code}: {message}")]
    Api {
        code: ErrorCode,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// 2xx response whose body is not what was expected
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Api { code, .. } => *code,
            Self::InvalidResponse(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                code,
                message,
                details,
            } => AppError {
                code,
                message,
                details,
            },
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            ClientError::Http(e) => AppError::network(e.to_string()),
            ClientError::InvalidResponse(msg) => AppError::internal(msg),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Outcome of submitting a batch of accepted records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmitReport {
    pub created: usize,
    /// One message per record the API refused
    pub failures: Vec<String>,
}

/// Member registry API client
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ImportConfig) -> ClientResult<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let fallback = ErrorCode::from_http_status(status);
            // 尝试解析为 API 错误响应
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<()>>(&text) {
                let err = envelope.into_app_error(fallback);
                return Err(ClientError::Api {
                    code: err.code,
                    message: err.message,
                    details: err.details,
                });
            }
            // 降级到 HTTP 状态码
            let message = if text.trim().is_empty() {
                status.to_string()
            } else {
                text
            };
            return Err(ClientError::Api {
                code: fallback,
                message,
                details: None,
            });
        }
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// `GET /members`
    pub async fn list_members(&self) -> ClientResult<Vec<Member>> {
        let response = self.client.get(self.url("members")).send().await?;
        self.handle_response(response).await
    }

    /// `POST /members`
    pub async fn create_member(&self, record: &MemberRecord) -> ClientResult<Member> {
        let response = self
            .client
            .post(self.url("members"))
            .json(record)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// `PUT /members/:id`
    pub async fn update_member(&self, id: &str, record: &MemberRecord) -> ClientResult<Member> {
        let response = self
            .client
            .put(self.url(&format!("members/{id}")))
            .json(record)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create every record in order; API refusals are collected, not fatal
    ///
    /// Transport failures abort the submission.
    pub async fn submit_accepted(&self, records: &[MemberRecord]) -> ClientResult<SubmitReport> {
        let mut report = SubmitReport::default();
        for record in records {
            match self.create_member(record).await {
                Ok(member) => {
                    tracing::debug!(id = %member.id, "Member created");
                    report.created += 1;
                }
                Err(ClientError::Api { code, message, .. }) => {
                    tracing::warn!(national_id = %record.national_id, %code, "Member rejected by API");
                    report
                        .failures
                        .push(format!("{} ({}): {message}", record.name, record.national_id));
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(
            created = report.created,
            failed = report.failures.len(),
            "Submission finished"
        );
        Ok(report)
    }
}
