//! Headless mode runner - drives the report dialog without a terminal UI
//!
//! Fills the dialog from `HeadlessOptions`, posts it, and turns engine events
//! into NDJSON. When the login prompt appears and credentials were given, it
//! signs in and posts again, the way a user would.

use std::io::Write;

use tokio::sync::broadcast::error::TryRecvError;

use report_app::message::Message;
use report_app::{Engine, EngineEvent, LoginService, ReportService};
use report_client::Credentials;
use report_core::prelude::*;
use report_core::{CourseId, CourseReport, ReportReason};

use super::HeadlessEvent;

/// What to put in the dialog
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub reason: Option<ReportReason>,
    pub details: String,
    pub accept_terms: bool,
    /// Used only if the login prompt appears
    pub credentials: Option<Credentials>,
}

/// How a headless run ended
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessOutcome {
    Filed(CourseReport),
    Failed(String),
}

impl HeadlessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, HeadlessOutcome::Filed(_))
    }
}

/// Run in headless mode, writing events to stdout
pub async fn run_headless<R, L>(
    engine: Engine<R, L>,
    options: HeadlessOptions,
) -> Result<HeadlessOutcome>
where
    R: ReportService + Send + Sync + 'static,
    L: LoginService + Send + Sync + 'static,
{
    engine.spawn_signal_handler();
    let mut stdout = std::io::stdout();
    run_headless_with_output(engine, options, &mut stdout).await
}

/// Run in headless mode, writing events to `out`
pub async fn run_headless_with_output<R, L, W>(
    mut engine: Engine<R, L>,
    options: HeadlessOptions,
    out: &mut W,
) -> Result<HeadlessOutcome>
where
    R: ReportService + Send + Sync + 'static,
    L: LoginService + Send + Sync + 'static,
    W: Write,
{
    let course_id = engine.state.course.course_id;
    info!("Headless report for course {}", course_id);

    let mut events = engine.subscribe();

    if let Some(problem) = check_options(&options, course_id) {
        HeadlessEvent::error(problem, true).write_to(out);
        engine.shutdown().await;
        return Ok(HeadlessOutcome::Failed(problem.to_string()));
    }

    fill_dialog(&mut engine, &options);
    engine.process_message(Message::ReportSubmit);

    let mut login_attempted = false;
    let outcome = loop {
        let mut outcome = None;
        let mut follow_ups = Vec::new();

        loop {
            let event = match events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Headless output skipped {} engine events", skipped);
                    continue;
                }
                Err(_) => break,
            };

            if let Some(line) = HeadlessEvent::from_engine_event(&event, course_id) {
                line.write_to(out);
            }

            match event {
                EngineEvent::LoginRequired => match (&options.credentials, login_attempted) {
                    (Some(credentials), false) => {
                        login_attempted = true;
                        follow_ups.extend(login_messages(credentials));
                    }
                    _ => {
                        let message = "Sign-in required; pass --identifier and --password";
                        HeadlessEvent::error(message, true).write_to(out);
                        outcome = Some(HeadlessOutcome::Failed(message.to_string()));
                    }
                },
                EngineEvent::LoginSucceeded { .. } => follow_ups.push(Message::ReportSubmit),
                EngineEvent::LoginFailed { message } => {
                    outcome = Some(HeadlessOutcome::Failed(message));
                }
                EngineEvent::ReportFiled { report } => {
                    outcome = Some(HeadlessOutcome::Filed(report));
                }
                EngineEvent::SubmissionFailed { message } => {
                    outcome = Some(HeadlessOutcome::Failed(message));
                }
                _ => {}
            }
        }

        if let Some(outcome) = outcome {
            break outcome;
        }

        if engine.should_quit() {
            let message = "Interrupted";
            HeadlessEvent::error(message, true).write_to(out);
            break HeadlessOutcome::Failed(message.to_string());
        }

        if !follow_ups.is_empty() {
            for msg in follow_ups {
                engine.process_message(msg);
            }
            continue;
        }

        if !engine.state.is_busy() {
            // Nothing in flight and nothing left to do
            let message = "The report was not submitted";
            HeadlessEvent::error(message, true).write_to(out);
            break HeadlessOutcome::Failed(message.to_string());
        }

        match engine.next_message().await {
            Some(msg) => engine.process_message(msg),
            None => {
                info!("Message channel closed");
                break HeadlessOutcome::Failed("Message channel closed".to_string());
            }
        }
    };

    engine.shutdown().await;

    info!("Headless run finished: success={}", outcome.is_success());
    Ok(outcome)
}

/// Problems the dialog would silently refuse
fn check_options(options: &HeadlessOptions, course_id: CourseId) -> Option<&'static str> {
    if course_id == 0 {
        Some("A course id is required")
    } else if options.reason.is_none() {
        Some("A reason is required; pass --reason")
    } else if !options.accept_terms {
        Some("The terms must be accepted; pass --accept-terms")
    } else {
        None
    }
}

fn fill_dialog<R, L>(engine: &mut Engine<R, L>, options: &HeadlessOptions)
where
    R: ReportService + Send + Sync + 'static,
    L: LoginService + Send + Sync + 'static,
{
    if !engine.state.report_dialog.open {
        engine.process_message(Message::OpenReportDialog);
    }
    if let Some(reason) = options.reason {
        engine.process_message(Message::ReportSelectReason { reason });
    }
    if !options.details.is_empty() {
        engine.process_message(Message::ReportSetDetails {
            text: options.details.clone(),
        });
    }
    engine.process_message(Message::ReportToggleTerms {
        accepted: options.accept_terms,
    });
}

fn login_messages(credentials: &Credentials) -> [Message; 3] {
    [
        Message::LoginSetIdentifier {
            text: credentials.identifier.clone(),
        },
        Message::LoginSetPassword {
            text: credentials.password.clone(),
        },
        Message::LoginSubmit,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_app::test_support::{fake_services, FakeLoginService, FakeReportService};
    use report_app::{AppState, Catalog, CourseProps, SessionStore};
    use report_client::ApiError;
    use serde_json::Value;
    use std::sync::Arc;

    fn engine(
        session: SessionStore,
        reports: FakeReportService,
    ) -> Engine<FakeReportService, FakeLoginService> {
        let state = AppState::new(
            CourseProps {
                course_id: 42,
                course_name: "Async Rust in Practice".to_string(),
                open: true,
            },
            Catalog::english(),
            Arc::new(session.clone()),
        );
        let services = fake_services(reports, FakeLoginService::accepting("ada", "pw"), session);
        Engine::new(state, services)
    }

    fn options() -> HeadlessOptions {
        HeadlessOptions {
            reason: Some(ReportReason::Spam),
            details: "Link farm".to_string(),
            accept_terms: true,
            credentials: None,
        }
    }

    fn event_names(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out)
            .lines()
            .map(|line| {
                let json: Value = serde_json::from_str(line).expect("ndjson line");
                json["event"].as_str().unwrap_or_default().to_string()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_signed_in_report_is_filed() {
        let reports = FakeReportService::new().respond_with(Ok(CourseReport {
            id: Some(17),
            reason: Some("spam".to_string()),
            ..Default::default()
        }));
        let engine = engine(SessionStore::with_token(Some("jwt".to_string())), reports);
        let mut out = Vec::new();

        let outcome = run_headless_with_output(engine, options(), &mut out)
            .await
            .expect("run");

        assert!(outcome.is_success());
        assert_eq!(
            event_names(&out),
            ["submission_started", "report_filed", "dialog_closed"]
        );
    }

    #[tokio::test]
    async fn test_login_then_resubmit() {
        let engine = engine(SessionStore::new(), FakeReportService::new());
        let mut opts = options();
        opts.credentials = Some(Credentials::new("ada", "pw"));
        let mut out = Vec::new();

        let outcome = run_headless_with_output(engine, opts, &mut out)
            .await
            .expect("run");

        assert!(outcome.is_success());
        assert_eq!(
            event_names(&out),
            [
                "login_required",
                "login_succeeded",
                "submission_started",
                "report_filed",
                "dialog_closed"
            ]
        );
    }

    #[tokio::test]
    async fn test_login_required_without_credentials() {
        let engine = engine(SessionStore::new(), FakeReportService::new());
        let mut out = Vec::new();

        let outcome = run_headless_with_output(engine, options(), &mut out)
            .await
            .expect("run");

        assert!(!outcome.is_success());
        assert_eq!(event_names(&out), ["login_required", "error"]);
    }

    #[tokio::test]
    async fn test_rejected_login() {
        let engine = engine(SessionStore::new(), FakeReportService::new());
        let mut opts = options();
        opts.credentials = Some(Credentials::new("ada", "wrong"));
        let mut out = Vec::new();

        let outcome = run_headless_with_output(engine, opts, &mut out)
            .await
            .expect("run");

        assert_eq!(
            outcome,
            HeadlessOutcome::Failed("Invalid identifier or password".to_string())
        );
        assert_eq!(event_names(&out), ["login_required", "login_failed"]);
    }

    #[tokio::test]
    async fn test_server_failure_reported() {
        let reports = FakeReportService::new().respond_with(Err(ApiError::Status {
            status: 500,
            body: None,
        }));
        let engine = engine(SessionStore::with_token(Some("jwt".to_string())), reports);
        let mut out = Vec::new();

        let outcome = run_headless_with_output(engine, options(), &mut out)
            .await
            .expect("run");

        assert_eq!(
            outcome,
            HeadlessOutcome::Failed("Something went wrong".to_string())
        );
        assert_eq!(
            event_names(&out),
            ["submission_started", "submission_failed"]
        );
    }

    #[tokio::test]
    async fn test_missing_terms_rejected_up_front() {
        let engine = engine(
            SessionStore::with_token(Some("jwt".to_string())),
            FakeReportService::new(),
        );
        let mut opts = options();
        opts.accept_terms = false;
        let mut out = Vec::new();

        let outcome = run_headless_with_output(engine, opts, &mut out)
            .await
            .expect("run");

        assert!(!outcome.is_success());
        assert_eq!(event_names(&out), ["error"]);
    }
}
