//! Session state shared by every command handler

use crate::domain::{ChatMessage, KnowledgeBaseName, UploadState};

/// Mutable state of one chat session.
///
/// `selected`, when set, names an entry of `knowledge_bases` as of the most
/// recent successful load.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub knowledge_bases: Vec<KnowledgeBaseName>,
    pub selected: Option<KnowledgeBaseName>,
    pub transcript: Vec<ChatMessage>,
    pub upload: UploadState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, name: &KnowledgeBaseName) -> bool {
        self.selected.as_ref() == Some(name)
    }

    /// Knowledge base name sent with questions; empty when none is selected
    pub fn query_scope(&self) -> &str {
        self.selected.as_ref().map(KnowledgeBaseName::as_str).unwrap_or("")
    }

    pub fn selected_display_name(&self) -> Option<String> {
        self.selected.as_ref().map(KnowledgeBaseName::display_name)
    }
}
