//! Ask command - one question, one answer

use clap::Args;

use super::GlobalArgs;
use crate::app::{handlers, AppState};
use crate::infrastructure::terminal::TerminalView;

/// Arguments for the ask command
#[derive(Args, Clone, Debug)]
pub struct AskArgs {
    /// Question to ask
    pub question: String,

    /// Knowledge base to search (defaults to chat.default_kb, then all)
    #[arg(long)]
    pub kb: Option<String>,
}

/// Ask a single question and print the answer
pub async fn run(global: &GlobalArgs, args: AskArgs) -> anyhow::Result<()> {
    let config = super::init(global);

    let view = TerminalView::new().with_format(global.output_format());
    let ctx = super::build_context(&config, view)?;

    let mut state = AppState::new();
    state.selected = super::target_knowledge_base(args.kb.as_deref(), &ctx)?;

    handlers::submit_question(&mut state, &ctx, &args.question).await?;
    Ok(())
}
