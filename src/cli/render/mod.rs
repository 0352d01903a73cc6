//! Render command - the chat Markdown renderer on its own

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::GlobalArgs;
use crate::domain::markdown_to_html;

/// Arguments for the render command
#[derive(Args, Clone, Debug)]
pub struct RenderArgs {
    /// Markdown file; reads stdin when omitted
    pub path: Option<PathBuf>,
}

/// Print the HTML fragment for a Markdown document
pub async fn run(global: &GlobalArgs, args: RenderArgs) -> anyhow::Result<()> {
    super::init(global);

    let markdown = match &args.path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("Failed to read stdin")?;
            input
        }
    };

    debug!(bytes = markdown.len(), "Rendering Markdown");
    println!("{}", markdown_to_html(&markdown));
    Ok(())
}
