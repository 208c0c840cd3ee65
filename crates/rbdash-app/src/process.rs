//! Message processing: runs the TEA update loop and dispatches actions

use tokio::sync::mpsc;

use crate::actions::{handle_action, Services};
use crate::handler;
use crate::message::Message;
use crate::scope::ScopeTaskMap;
use crate::state::AppState;
use rbdash_api::{AppsService, AuthService};

/// Process a message through the TEA update function, following up on
/// chained messages until none remain
pub fn process_message<A, P>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    services: &Services<A, P>,
    scope_tasks: &ScopeTaskMap,
) where
    A: AuthService + Sync + 'static,
    P: AppsService + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(
                action,
                msg_tx.clone(),
                services,
                scope_tasks,
                &state.settings.behavior.browser,
            );
        }

        msg = result.message;
    }
}
