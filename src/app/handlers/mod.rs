//! Command handlers.
//!
//! Every handler reports failures to the view itself (notification or chat
//! message) and also returns the error, so one-shot callers can exit with a
//! failure status while the interactive session simply carries on.

mod chat;
mod knowledge_bases;
mod upload;

pub use chat::{clear_chat, submit_question};
pub use knowledge_bases::{
    create_knowledge_base, delete_knowledge_base, load_knowledge_bases, select_knowledge_base,
};
pub use upload::upload_pdf;

use tracing::debug;

use super::command::{Command, HELP};
use super::context::AppContext;
use super::state::AppState;
use crate::domain::DomainError;

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run a single command against the session state
pub async fn dispatch(
    state: &mut AppState,
    ctx: &AppContext,
    command: Command,
) -> Result<Flow, DomainError> {
    debug!(?command, "Dispatching command");

    match command {
        Command::Load => load_knowledge_bases(state, ctx).await?,
        Command::Select(name) => select_knowledge_base(state, ctx, &name).await?,
        Command::Create(name) => create_knowledge_base(state, ctx, &name).await?,
        Command::Delete(name) => delete_knowledge_base(state, ctx, &name).await?,
        Command::Ask(question) => submit_question(state, ctx, &question).await?,
        Command::Upload(path) => upload_pdf(state, ctx, path.as_deref()).await?,
        Command::ShowCurrent => ctx
            .view
            .show_current_knowledge_base(state.selected_display_name().as_deref()),
        Command::Clear => clear_chat(state, ctx),
        Command::Help => ctx.view.show_help(HELP),
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Message to show for a failed backend call: the backend's own message
/// when it sent a non-empty one, otherwise `fallback`
pub(crate) fn failure_message(err: &DomainError, fallback: &str) -> String {
    err.backend_message()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}
