//! Dependencies handed to every command handler

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::{KnowledgeBaseBackend, KnowledgeBaseName, MAX_UPLOAD_BYTES};

use super::view::ChatView;

/// Behaviour switches for the chat session
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub render_markdown: bool,
    pub show_metadata: bool,
    pub default_kb: Option<KnowledgeBaseName>,
    pub max_upload_bytes: u64,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            render_markdown: true,
            show_metadata: true,
            default_kb: None,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl From<&AppConfig> for ChatOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            render_markdown: config.chat.render_markdown,
            show_metadata: config.chat.show_metadata,
            default_kb: config
                .chat
                .default_kb
                .as_deref()
                .and_then(|name| KnowledgeBaseName::parse(name).ok()),
            max_upload_bytes: config.upload.max_bytes,
        }
    }
}

/// Backend, view and options for the command handlers
#[derive(Clone)]
pub struct AppContext {
    pub backend: Arc<dyn KnowledgeBaseBackend>,
    pub view: Arc<dyn ChatView>,
    pub options: ChatOptions,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("options", &self.options)
            .finish()
    }
}

impl AppContext {
    pub fn new(
        backend: Arc<dyn KnowledgeBaseBackend>,
        view: Arc<dyn ChatView>,
        options: ChatOptions,
    ) -> Self {
        Self {
            backend,
            view,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_config() {
        let mut config = AppConfig::default();
        config.chat.render_markdown = false;
        config.chat.default_kb = Some("  global ".to_string());
        config.upload.max_bytes = 1024;

        let options = ChatOptions::from(&config);
        assert!(!options.render_markdown);
        assert!(options.show_metadata);
        assert_eq!(options.default_kb, Some("global".into()));
        assert_eq!(options.max_upload_bytes, 1024);

        config.chat.default_kb = Some("   ".to_string());
        assert!(ChatOptions::from(&config).default_kb.is_none());
    }
}
