//! Collaborators the dialog talks to over the network
//!
//! `ReportService` and `LoginService` are the seams between the update loop
//! and the review service. The HTTP implementations wrap
//! [`report_client::ApiClient`]; tests substitute in-memory fakes.

use std::sync::Arc;

use report_client::{ApiClient, ApiError, AuthResponse, Credentials};
use report_core::{CourseReport, ReportDraft};

use crate::auth::{AuthAccessor, SessionStore};

/// Report submission
#[trait_variant::make(ReportService: Send)]
pub trait LocalReportService {
    /// Send the draft; the created report comes back untouched
    async fn submit_report(&self, draft: ReportDraft) -> Result<CourseReport, ApiError>;
}

/// Credential exchange for the login prompt
#[trait_variant::make(LoginService: Send)]
pub trait LocalLoginService {
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, ApiError>;
}

/// Posts reports with the current session token
pub struct HttpReportService {
    client: ApiClient,
    auth: Arc<dyn AuthAccessor>,
}

impl HttpReportService {
    pub fn new(client: ApiClient, auth: Arc<dyn AuthAccessor>) -> Self {
        Self { client, auth }
    }
}

impl ReportService for HttpReportService {
    async fn submit_report(&self, draft: ReportDraft) -> Result<CourseReport, ApiError> {
        let token = self.auth.session_token();
        self.client.report_course(&draft, token.as_deref()).await
    }
}

pub struct HttpLoginService {
    client: ApiClient,
}

impl HttpLoginService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl LoginService for HttpLoginService {
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, ApiError> {
        self.client.login(&credentials).await
    }
}

/// Everything background actions need
pub struct Services<R, L> {
    pub reports: Arc<R>,
    pub login: Arc<L>,
    /// Written by the login action
    pub session: SessionStore,
}

impl<R, L> Services<R, L> {
    pub fn new(reports: R, login: L, session: SessionStore) -> Self {
        Self {
            reports: Arc::new(reports),
            login: Arc::new(login),
            session,
        }
    }
}

impl<R, L> Clone for Services<R, L> {
    fn clone(&self) -> Self {
        Self {
            reports: Arc::clone(&self.reports),
            login: Arc::clone(&self.login),
            session: self.session.clone(),
        }
    }
}

/// Build the HTTP-backed services sharing one client and session
pub fn http_services(
    client: ApiClient,
    session: SessionStore,
) -> Services<HttpReportService, HttpLoginService> {
    let auth: Arc<dyn AuthAccessor> = Arc::new(session.clone());
    Services::new(
        HttpReportService::new(client.clone(), auth),
        HttpLoginService::new(client),
        session,
    )
}
