//! Command line front end
//!
//! Subcommands:
//! - `chat`: interactive session (default)
//! - `kb`: list, create or delete knowledge bases
//! - `ask`: ask a single question
//! - `upload`: upload a PDF into a knowledge base
//! - `render`: render Markdown to HTML without a backend

pub mod ask;
pub mod chat;
pub mod kb;
pub mod render;
pub mod upload;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::app::{AppContext, ChatOptions};
use crate::config::AppConfig;
use crate::domain::KnowledgeBaseName;
use crate::infrastructure::http::HttpBackend;
use crate::infrastructure::logging;
use crate::infrastructure::terminal::{OutputFormat, TerminalView};

/// Chat with knowledge bases served by a retrieval backend
#[derive(Parser)]
#[command(name = "kb-chat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every subcommand
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Backend base URL (overrides configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print answers as HTML instead of plain text
    #[arg(long, global = true)]
    pub html: bool,
}

impl GlobalArgs {
    pub fn output_format(&self) -> OutputFormat {
        if self.html {
            OutputFormat::Html
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive chat session (default)
    Chat,

    /// Manage knowledge bases
    Kb(kb::KbArgs),

    /// Ask one question and print the answer
    Ask(ask::AskArgs),

    /// Upload a PDF into a knowledge base
    Upload(upload::UploadArgs),

    /// Render Markdown from a file or stdin as HTML
    Render(render::RenderArgs),
}

/// Load configuration, apply command line overrides and start logging
pub fn init(args: &GlobalArgs) -> AppConfig {
    dotenvy::dotenv().ok();

    let (mut config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(base_url) = &args.base_url {
        config.backend.base_url = base_url.clone();
    }

    logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    config
}

/// Wire the HTTP backend and a terminal view into a handler context
pub fn build_context(config: &AppConfig, view: TerminalView) -> anyhow::Result<AppContext> {
    let backend = HttpBackend::from_config(&config.backend)?;

    Ok(AppContext::new(
        Arc::new(backend),
        Arc::new(view),
        ChatOptions::from(config),
    ))
}

/// Knowledge base a one-shot command targets: `--kb` when given, otherwise
/// the configured default
pub(crate) fn target_knowledge_base(
    kb: Option<&str>,
    ctx: &AppContext,
) -> anyhow::Result<Option<KnowledgeBaseName>> {
    match kb {
        Some(name) => Ok(Some(KnowledgeBaseName::parse(name)?)),
        None => Ok(ctx.options.default_kb.clone()),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::app::view::testing::RecordingView;
    use crate::domain::MockKnowledgeBaseBackend;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_chat() {
        let cli = Cli::try_parse_from(["kb-chat"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.global.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "kb-chat",
            "ask",
            "What is a JVM?",
            "--kb",
            "java",
            "--base-url",
            "http://kb.internal:8000",
            "--html",
        ])
        .unwrap();

        assert_eq!(cli.global.base_url.as_deref(), Some("http://kb.internal:8000"));
        assert_eq!(cli.global.output_format(), OutputFormat::Html);
        match cli.command {
            Some(Command::Ask(args)) => {
                assert_eq!(args.question, "What is a JVM?");
                assert_eq!(args.kb.as_deref(), Some("java"));
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_target_knowledge_base() {
        let options = ChatOptions {
            default_kb: Some("global".into()),
            ..ChatOptions::default()
        };
        let ctx = AppContext::new(
            Arc::new(MockKnowledgeBaseBackend::new()),
            Arc::new(RecordingView::new()),
            options,
        );

        assert_eq!(
            target_knowledge_base(Some(" java "), &ctx).unwrap(),
            Some("java".into())
        );
        assert_eq!(
            target_knowledge_base(None, &ctx).unwrap(),
            Some("global".into())
        );
        assert!(target_knowledge_base(Some("  "), &ctx).is_err());
    }
}
