//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::auth::SessionStore;
use crate::handler::UpdateAction;
use crate::message::Message;
use crate::services::{LoginService, ReportService, Services};
use report_client::Credentials;
use report_core::ReportDraft;

/// Execute an action by spawning a background task.
///
/// Every task answers with exactly one result message unless shutdown wins
/// the race.
pub fn handle_action<R, L>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    services: &Services<R, L>,
    shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    R: ReportService + Send + Sync + 'static,
    L: LoginService + Send + Sync + 'static,
{
    match action {
        UpdateAction::SubmitReport { draft } => spawn_report_submission(
            draft,
            Arc::clone(&services.reports),
            services.session.clone(),
            msg_tx,
            shutdown_rx,
        ),
        UpdateAction::Login { credentials } => spawn_login(
            credentials,
            Arc::clone(&services.login),
            services.session.clone(),
            msg_tx,
            shutdown_rx,
        ),
    }
}

fn spawn_report_submission<R>(
    draft: ReportDraft,
    reports: Arc<R>,
    session: SessionStore,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    R: ReportService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let course_id = draft.course_id;
        let result = tokio::select! {
            result = reports.submit_report(draft) => result,
            Ok(()) = shutdown_rx.changed() => {
                info!("Shutdown while submitting report for course {}", course_id);
                return;
            }
        };

        let msg = match result {
            Ok(report) => {
                info!("Report for course {} accepted", course_id);
                Message::ReportSubmitted { report }
            }
            Err(e) => {
                warn!("Report for course {} rejected: {}", course_id, e);
                // The next Post asks the user to sign in again
                if e.is_unauthorized() {
                    session.clear();
                }
                Message::ReportSubmissionFailed {
                    message: e.user_message(),
                }
            }
        };
        let _ = msg_tx.send(msg).await;
    })
}

fn spawn_login<L>(
    credentials: Credentials,
    login: Arc<L>,
    session: SessionStore,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    L: LoginService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = tokio::select! {
            result = login.login(credentials) => result,
            Ok(()) = shutdown_rx.changed() => return,
        };

        let msg = match result {
            Ok(response) => {
                let username = response
                    .user
                    .as_ref()
                    .and_then(|user| user.display_name())
                    .map(str::to_string);
                session.set_session(response.jwt, username.clone());
                info!("Signed in as {:?}", username);
                Message::LoginSucceeded { username }
            }
            Err(e) => {
                warn!("Login rejected: {}", e);
                Message::LoginFailed {
                    message: e.user_message(),
                }
            }
        };
        let _ = msg_tx.send(msg).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthAccessor;
    use crate::test_support::{fake_services, FakeLoginService, FakeReportService};
    use report_client::ApiError;
    use report_core::{CourseReport, ReportReason};
    use serde_json::json;

    fn spam_draft() -> ReportDraft {
        let mut draft = ReportDraft::new(11);
        draft.reason = Some(ReportReason::Spam);
        draft
    }

    #[tokio::test]
    async fn test_submit_success_sends_report_submitted() {
        let services = fake_services(
            FakeReportService::new().respond_with(Ok(CourseReport {
                id: Some(1),
                ..Default::default()
            })),
            FakeLoginService::accepting("ada", "pw"),
            SessionStore::new(),
        );
        let (tx, mut rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = handle_action(
            UpdateAction::SubmitReport { draft: spam_draft() },
            tx,
            &services,
            shutdown_rx,
        );
        handle.await.unwrap();

        match rx.recv().await {
            Some(Message::ReportSubmitted { report }) => assert_eq!(report.id, Some(1)),
            other => panic!("unexpected message: {:?}", other),
        }
        assert_eq!(services.reports.calls(), vec![spam_draft()]);
    }

    #[tokio::test]
    async fn test_submit_failure_carries_server_message() {
        let services = fake_services(
            FakeReportService::new().respond_with(Err(ApiError::Status {
                status: 409,
                body: Some(json!({"error": "Already reported"})),
            })),
            FakeLoginService::accepting("ada", "pw"),
            SessionStore::new(),
        );
        let (tx, mut rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        handle_action(
            UpdateAction::SubmitReport { draft: spam_draft() },
            tx,
            &services,
            shutdown_rx,
        )
        .await
        .unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(Message::ReportSubmissionFailed { message }) if message == "Already reported"
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_report_drops_session() {
        let session = SessionStore::with_token(Some("expired".to_string()));
        let services = fake_services(
            FakeReportService::new().respond_with(Err(ApiError::Status {
                status: 401,
                body: Some(json!({"error": "Session expired"})),
            })),
            FakeLoginService::accepting("ada", "pw"),
            session.clone(),
        );
        let (tx, mut rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        handle_action(
            UpdateAction::SubmitReport { draft: spam_draft() },
            tx,
            &services,
            shutdown_rx,
        )
        .await
        .unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(Message::ReportSubmissionFailed { message }) if message == "Session expired"
        ));
        assert!(!session.has_session());
    }

    #[tokio::test]
    async fn test_login_success_writes_session() {
        let session = SessionStore::new();
        let services = fake_services(
            FakeReportService::new(),
            FakeLoginService::accepting("ada", "pw"),
            session.clone(),
        );
        let (tx, mut rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        handle_action(
            UpdateAction::Login {
                credentials: Credentials::new("ada", "pw"),
            },
            tx,
            &services,
            shutdown_rx,
        )
        .await
        .unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(Message::LoginSucceeded { username: Some(name) }) if name == "ada"
        ));
        assert_eq!(session.session_token(), Some("jwt-for-ada".to_string()));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_empty() {
        let session = SessionStore::new();
        let services = fake_services(
            FakeReportService::new(),
            FakeLoginService::accepting("ada", "pw"),
            session.clone(),
        );
        let (tx, mut rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        handle_action(
            UpdateAction::Login {
                credentials: Credentials::new("ada", "nope"),
            },
            tx,
            &services,
            shutdown_rx,
        )
        .await
        .unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(Message::LoginFailed { message }) if message == "Invalid identifier or password"
        ));
        assert!(!session.has_session());
    }
}
