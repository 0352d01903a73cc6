//! Kb command - knowledge base management without a chat session

use std::sync::Arc;

use clap::{Args, Subcommand};

use super::GlobalArgs;
use crate::app::{handlers, AppState};
use crate::infrastructure::terminal::{Console, TerminalView};

/// Arguments for the kb command
#[derive(Args, Clone, Debug)]
pub struct KbArgs {
    #[command(subcommand)]
    pub action: KbAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum KbAction {
    /// List knowledge bases
    List,

    /// Create a knowledge base
    Create {
        name: String,
    },

    /// Delete a knowledge base
    Delete {
        name: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Run a knowledge base action
pub async fn run(global: &GlobalArgs, args: KbArgs) -> anyhow::Result<()> {
    let config = super::init(global);

    let assume_yes = matches!(args.action, KbAction::Delete { yes: true, .. });
    let view = TerminalView::new()
        .with_console(Arc::new(Console::stdin()))
        .with_assume_yes(assume_yes);
    let ctx = super::build_context(&config, view)?;
    let mut state = AppState::new();

    match args.action {
        KbAction::List => handlers::load_knowledge_bases(&mut state, &ctx).await?,
        KbAction::Create { name } => handlers::create_knowledge_base(&mut state, &ctx, &name).await?,
        KbAction::Delete { name, .. } => {
            handlers::delete_knowledge_base(&mut state, &ctx, &name).await?
        }
    }

    Ok(())
}
