//! In-memory services for driving the engine without a network.
//!
//! Enabled for dependents through the `test-helpers` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use report_client::{ApiError, AuthResponse, AuthUser, Credentials};
use report_core::{CourseReport, ReportDraft};

use crate::auth::SessionStore;
use crate::services::{LoginService, ReportService, Services};

/// Records every draft and answers from a script, defaulting to an empty report
#[derive(Default)]
pub struct FakeReportService {
    calls: Mutex<Vec<ReportDraft>>,
    responses: Mutex<VecDeque<Result<CourseReport, ApiError>>>,
}

impl FakeReportService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, response: Result<CourseReport, ApiError>) -> Self {
        lock(&self.responses).push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<ReportDraft> {
        lock(&self.calls).clone()
    }
}

impl ReportService for FakeReportService {
    async fn submit_report(&self, draft: ReportDraft) -> Result<CourseReport, ApiError> {
        lock(&self.calls).push(draft);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(CourseReport::default()))
    }
}

/// Accepts one identifier/password pair
pub struct FakeLoginService {
    identifier: String,
    password: String,
    attempts: Mutex<usize>,
}

impl FakeLoginService {
    pub fn accepting(identifier: &str, password: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            password: password.to_string(),
            attempts: Mutex::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        *lock(&self.attempts)
    }
}

impl LoginService for FakeLoginService {
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, ApiError> {
        *lock(&self.attempts) += 1;
        if credentials.identifier == self.identifier && credentials.password == self.password {
            Ok(AuthResponse {
                jwt: format!("jwt-for-{}", credentials.identifier),
                user: Some(AuthUser {
                    username: Some(credentials.identifier),
                    ..Default::default()
                }),
            })
        } else {
            Err(ApiError::Status {
                status: 400,
                body: Some(serde_json::json!({"error": "Invalid identifier or password"})),
            })
        }
    }
}

/// Services backed by the fakes, handing back shared handles for assertions
pub fn fake_services(
    reports: FakeReportService,
    login: FakeLoginService,
    session: SessionStore,
) -> Services<FakeReportService, FakeLoginService> {
    Services {
        reports: Arc::new(reports),
        login: Arc::new(login),
        session,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
