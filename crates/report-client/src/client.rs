//! HTTP client for the review service

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use report_core::{CourseReport, ReportDraft};

use crate::auth::{AuthResponse, Credentials};
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:1337/api";
pub const DEFAULT_REPORT_PATH: &str = "/course-reports";
pub const DEFAULT_LOGIN_PATH: &str = "/auth/local";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the review service lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub report_path: String,
    pub login_path: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            report_path: DEFAULT_REPORT_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Review service client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    report_url: Url,
    login_url: Url,
}

impl ApiClient {
    /// Build a client, validating both endpoints up front
    pub fn new(config: &ClientConfig) -> report_core::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| report_core::Error::http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            report_url: endpoint(&config.base_url, &config.report_path)?,
            login_url: endpoint(&config.base_url, &config.login_path)?,
        })
    }

    pub fn report_url(&self) -> &Url {
        &self.report_url
    }

    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// POST a report draft, authenticated with the session token when given
    pub async fn report_course(
        &self,
        draft: &ReportDraft,
        token: Option<&str>,
    ) -> Result<CourseReport, ApiError> {
        debug!(
            "POST {} course_id={} reason={:?}",
            self.report_url, draft.course_id, draft.reason
        );

        let mut request = self.http.post(self.report_url.clone()).json(draft);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        read_json(response).await
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        debug!("POST {} identifier={}", self.login_url, credentials.identifier);

        let response = self
            .http
            .post(self.login_url.clone())
            .json(credentials)
            .send()
            .await?;
        read_json(response).await
    }
}

/// Join a base URL and an endpoint path without `Url::join`'s
/// absolute-path replacement (base paths like `/api` must survive).
fn endpoint(base_url: &str, path: &str) -> report_core::Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|_| report_core::Error::invalid_endpoint(joined))
}

/// Decode a success body, or turn a failure into `ApiError::Status`
/// carrying whatever JSON the service sent back.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()));
    }

    let body = response
        .bytes()
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());
    warn!("Review service returned {}: {:?}", status, body);

    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}
