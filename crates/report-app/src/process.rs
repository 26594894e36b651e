//! Message processing: runs the TEA update loop and dispatches actions

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::services::{LoginService, ReportService, Services};
use crate::state::AppState;

/// Process a message through the TEA update function.
///
/// Follow-up messages are processed in the same call; spawned tasks are
/// appended to `tasks` so the engine can wait for them on shutdown.
pub fn process_message<R, L>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    services: &Services<R, L>,
    shutdown_rx: &watch::Receiver<bool>,
    tasks: &mut Vec<JoinHandle<()>>,
) where
    R: ReportService + Send + Sync + 'static,
    L: LoginService + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            tasks.push(handle_action(
                action,
                msg_tx.clone(),
                services,
                shutdown_rx.clone(),
            ));
        }

        msg = result.message;
    }

    tasks.retain(|task| !task.is_finished());
}
