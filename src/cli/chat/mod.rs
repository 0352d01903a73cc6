//! Chat command - interactive session against the backend

use std::sync::Arc;

use tracing::{debug, info};

use super::GlobalArgs;
use crate::app::{dispatch, handlers, AppState, Command, Flow, Notification, HELP};
use crate::infrastructure::terminal::{Console, TerminalView};

/// Run the interactive chat loop until `/quit` or end of input
pub async fn run(args: &GlobalArgs) -> anyhow::Result<()> {
    let config = super::init(args);

    let console = Arc::new(Console::stdin());
    let view = TerminalView::new()
        .with_console(Arc::clone(&console))
        .with_format(args.output_format());
    let ctx = super::build_context(&config, view)?;

    info!(base_url = %config.backend.base_url, "Starting chat session");

    let mut state = AppState::new();
    ctx.view.show_help(HELP);
    if let Err(e) = handlers::load_knowledge_bases(&mut state, &ctx).await {
        debug!(error = %e, "Initial load failed");
    }

    while let Some(line) = console.prompt(&prompt(&state)).await? {
        let command = match Command::parse(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(e)) => {
                ctx.view.notify(&Notification::error(e.to_string()));
                continue;
            }
        };

        match dispatch(&mut state, &ctx, command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => debug!(error = %e, "Command failed"),
        }
    }

    info!("Chat session ended");
    Ok(())
}

fn prompt(state: &AppState) -> String {
    match state.selected_display_name() {
        Some(name) => format!("{}> ", name),
        None => "> ".to_string(),
    }
}
