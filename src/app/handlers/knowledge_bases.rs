//! Knowledge base list management: load, select, create, delete

use tracing::{debug, info, warn};

use super::chat::clear_chat;
use super::failure_message;
use crate::app::context::AppContext;
use crate::app::state::AppState;
use crate::app::view::{KnowledgeBaseListing, Notification};
use crate::domain::{reconcile_selection, DomainError, KnowledgeBaseName};

const LOAD_FAILED: &str = "Failed to load knowledge bases";
const CREATE_FAILED: &str = "Failed to create knowledge base";
const DELETE_FAILED: &str = "Failed to delete knowledge base";

/// Fetch the list from the backend and re-render it.
///
/// The selection is re-derived against the new list. If a previous
/// selection had to be replaced, the transcript belonged to it and is
/// cleared.
pub async fn load_knowledge_bases(state: &mut AppState, ctx: &AppContext) -> Result<(), DomainError> {
    debug!("Loading knowledge bases");

    let names = match ctx.backend.list_knowledge_bases().await {
        Ok(names) => names,
        Err(e) => {
            warn!(error = %e, "Failed to load knowledge bases");
            ctx.view
                .notify(&Notification::error(failure_message(&e, LOAD_FAILED)));
            return Err(e);
        }
    };

    let previous = state.selected.take();
    let selected = reconcile_selection(previous.as_ref(), &names, ctx.options.default_kb.as_ref());

    if previous.is_some() && previous != selected {
        info!(
            previous = ?previous.as_ref().map(KnowledgeBaseName::as_str),
            current = ?selected.as_ref().map(KnowledgeBaseName::as_str),
            "Selected knowledge base no longer listed"
        );
        clear_chat(state, ctx);
    }

    debug!(count = names.len(), "Knowledge bases loaded");
    state.knowledge_bases = names;
    state.selected = selected;
    render(state, ctx);

    Ok(())
}

/// Make `name` the active knowledge base and start a fresh transcript
pub async fn select_knowledge_base(
    state: &mut AppState,
    ctx: &AppContext,
    name: &str,
) -> Result<(), DomainError> {
    let name = KnowledgeBaseName::from(name.trim());

    if !state.knowledge_bases.contains(&name) {
        let message = format!("Unknown knowledge base '{}'", name);
        ctx.view.notify(&Notification::error(&message));
        return Err(DomainError::validation(message));
    }

    info!(knowledge_base = %name, "Selecting knowledge base");
    state.selected = Some(name);
    clear_chat(state, ctx);

    load_knowledge_bases(state, ctx).await
}

/// Create a knowledge base from user input, then refresh the list
pub async fn create_knowledge_base(
    state: &mut AppState,
    ctx: &AppContext,
    name: &str,
) -> Result<(), DomainError> {
    let name = match KnowledgeBaseName::parse(name) {
        Ok(name) => name,
        Err(e) => {
            ctx.view.notify(&Notification::error(e.to_string()));
            return Err(e.into());
        }
    };

    info!(knowledge_base = %name, "Creating knowledge base");

    match ctx.backend.create_knowledge_base(&name).await {
        Ok(message) => {
            let message =
                message.unwrap_or_else(|| format!("Knowledge base '{}' created", name));
            ctx.view.notify(&Notification::success(message));
            load_knowledge_bases(state, ctx).await
        }
        Err(e) => {
            warn!(knowledge_base = %name, error = %e, "Failed to create knowledge base");
            ctx.view
                .notify(&Notification::error(failure_message(&e, CREATE_FAILED)));
            Err(e)
        }
    }
}

/// Delete a knowledge base after the user confirms.
///
/// Deleting the selected knowledge base resets the selection and clears the
/// transcript before the list is reloaded.
pub async fn delete_knowledge_base(
    state: &mut AppState,
    ctx: &AppContext,
    name: &str,
) -> Result<(), DomainError> {
    let name = match KnowledgeBaseName::parse(name) {
        Ok(name) => name,
        Err(e) => {
            ctx.view.notify(&Notification::error(e.to_string()));
            return Err(e.into());
        }
    };

    let prompt = format!(
        "Delete knowledge base \"{}\"? This cannot be undone.",
        name
    );
    if !ctx.view.confirm(&prompt).await {
        debug!(knowledge_base = %name, "Deletion cancelled");
        return Ok(());
    }

    info!(knowledge_base = %name, "Deleting knowledge base");

    match ctx.backend.delete_knowledge_base(&name).await {
        Ok(message) => {
            let message =
                message.unwrap_or_else(|| format!("Knowledge base '{}' deleted", name));
            ctx.view.notify(&Notification::success(message));

            state.knowledge_bases.retain(|n| n != &name);
            if state.is_selected(&name) {
                state.selected = None;
                clear_chat(state, ctx);
            }

            load_knowledge_bases(state, ctx).await
        }
        Err(e) => {
            warn!(knowledge_base = %name, error = %e, "Failed to delete knowledge base");
            ctx.view
                .notify(&Notification::error(failure_message(&e, DELETE_FAILED)));
            Err(e)
        }
    }
}

fn render(state: &AppState, ctx: &AppContext) {
    ctx.view.render_knowledge_bases(&KnowledgeBaseListing::build(
        &state.knowledge_bases,
        state.selected.as_ref(),
    ));
    ctx.view
        .show_current_knowledge_base(state.selected_display_name().as_deref());
}
