//! Upload command - add a PDF to a knowledge base

use std::path::PathBuf;

use clap::Args;

use super::GlobalArgs;
use crate::app::{handlers, AppState};
use crate::infrastructure::terminal::TerminalView;

/// Arguments for the upload command
#[derive(Args, Clone, Debug)]
pub struct UploadArgs {
    /// PDF file to upload
    pub path: PathBuf,

    /// Target knowledge base (defaults to chat.default_kb)
    #[arg(long)]
    pub kb: Option<String>,
}

/// Upload one PDF, showing a progress bar while it is sent
pub async fn run(global: &GlobalArgs, args: UploadArgs) -> anyhow::Result<()> {
    let config = super::init(global);

    let ctx = super::build_context(&config, TerminalView::new())?;

    let mut state = AppState::new();
    state.selected = super::target_knowledge_base(args.kb.as_deref(), &ctx)?;

    handlers::upload_pdf(&mut state, &ctx, Some(args.path.as_path())).await?;
    Ok(())
}
