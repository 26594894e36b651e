//! Engine - shared orchestration state for TUI and headless runners
//!
//! Owns the TEA state, the message channel, the services used by background
//! actions and the shutdown signal. After every processed message it diffs a
//! small state snapshot and broadcasts the resulting `EngineEvent`s.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::services::{LoginService, ReportService, Services};
use crate::signals;
use crate::state::{AppState, LoginOutcome};
use report_core::SubmissionStatus;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    dialog_open: bool,
    status: SubmissionStatus,
    login_prompt_visible: bool,
    login_count: usize,
    filed_count: usize,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            dialog_open: state.report_dialog.open,
            status: state.report_dialog.status.clone(),
            login_prompt_visible: state.report_dialog.login_prompt_visible,
            login_count: state.login_outcomes.len(),
            filed_count: state.filed_reports.len(),
        }
    }
}

/// Orchestration engine for Course Report Desk.
pub struct Engine<R, L> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    services: Services<R, L>,

    /// Background action tasks still running
    tasks: Vec<JoinHandle<()>>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl<R, L> Engine<R, L>
where
    R: ReportService + Send + Sync + 'static,
    L: LoginService + Send + Sync + 'static,
{
    pub fn new(state: AppState, services: Services<R, L>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            services,
            tasks: Vec::new(),
            event_tx,
        }
    }

    /// Turn SIGINT/SIGTERM into `Message::Quit`
    pub fn spawn_signal_handler(&self) {
        signals::spawn_signal_handler(self.msg_tx.clone());
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.services,
            &self.shutdown_rx,
            &mut self.tasks,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from background tasks or input sources
    pub async fn next_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn services(&self) -> &Services<R, L> {
        &self.services
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop background work and wait briefly for it to wind down
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);

        for handle in self.tasks.drain(..) {
            match tokio::time::timeout(Duration::from_secs(2), handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Background task panicked: {}", e),
                Err(_) => warn!("Background task cleanup timed out"),
            }
        }
        info!("Engine shut down");
    }

    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        let course_id = self.state.course.course_id;

        if !pre.dialog_open && post.dialog_open {
            self.emit(EngineEvent::DialogOpened { course_id });
        }

        if !pre.login_prompt_visible && post.login_prompt_visible {
            self.emit(EngineEvent::LoginRequired);
        }

        if !pre.status.is_in_flight() && post.status.is_in_flight() {
            self.emit(EngineEvent::SubmissionStarted { course_id });
        }

        if pre.status != post.status {
            if let Some(message) = post.status.error_message() {
                self.emit(EngineEvent::SubmissionFailed {
                    message: message.to_string(),
                });
            }
        }

        for outcome in self.state.login_outcomes.iter().skip(pre.login_count) {
            self.emit(match outcome {
                LoginOutcome::SignedIn { username } => EngineEvent::LoginSucceeded {
                    username: username.clone(),
                },
                LoginOutcome::Rejected { message } => EngineEvent::LoginFailed {
                    message: message.clone(),
                },
            });
        }

        for report in self.state.filed_reports.iter().skip(pre.filed_count) {
            self.emit(EngineEvent::ReportFiled {
                report: report.clone(),
            });
        }

        if pre.dialog_open && !post.dialog_open {
            self.emit(EngineEvent::DialogClosed { course_id });
        }
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
