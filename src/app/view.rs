//! Rendering surface the command handlers drive

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ChatMessage, KnowledgeBaseName};

/// Shown in place of the list when the backend has no knowledge bases
pub const EMPTY_LIST_PLACEHOLDER: &str = "No knowledge bases yet, create one to get started";

/// Shown in place of the current knowledge base when none is selected
pub const NO_SELECTION_PLACEHOLDER: &str = "Please select a knowledge base";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// How long views that auto-dismiss should keep it visible
    pub fn ttl(&self) -> Duration {
        match self.kind {
            NotificationKind::Success => Duration::from_secs(3),
            NotificationKind::Error => Duration::from_secs(5),
        }
    }
}

/// One row of the knowledge base list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBaseItem {
    pub name: KnowledgeBaseName,
    pub display_name: String,
    pub active: bool,
}

/// What the list area should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeBaseListing {
    Empty { placeholder: &'static str },
    Items(Vec<KnowledgeBaseItem>),
}

impl KnowledgeBaseListing {
    pub fn build(names: &[KnowledgeBaseName], selected: Option<&KnowledgeBaseName>) -> Self {
        if names.is_empty() {
            return Self::Empty {
                placeholder: EMPTY_LIST_PLACEHOLDER,
            };
        }

        Self::Items(
            names
                .iter()
                .map(|name| KnowledgeBaseItem {
                    name: name.clone(),
                    display_name: name.display_name(),
                    active: selected == Some(name),
                })
                .collect(),
        )
    }
}

/// Output surface for the chat controller.
///
/// Methods take `&self` so a view can be shared with the upload progress
/// callback, which runs from the request body stream.
#[async_trait]
pub trait ChatView: Send + Sync {
    fn render_knowledge_bases(&self, listing: &KnowledgeBaseListing);

    /// `None` means nothing is selected
    fn show_current_knowledge_base(&self, display_name: Option<&str>);

    fn append_message(&self, message: &ChatMessage);

    fn clear_messages(&self);

    fn show_loading(&self);

    fn hide_loading(&self);

    fn notify(&self, notification: &Notification);

    fn show_help(&self, lines: &[(&str, &str)]);

    fn upload_started(&self, file_name: &str, knowledge_base: &str);

    fn upload_progress(&self, percent: u8);

    fn upload_finished(&self);

    /// Ask the user to confirm a destructive action
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Hides the loading indicator when dropped, so it disappears on every
/// exit path including a cancelled request.
pub struct LoadingGuard<'a> {
    view: &'a dyn ChatView,
}

impl<'a> LoadingGuard<'a> {
    pub fn show(view: &'a dyn ChatView) -> Self {
        view.show_loading();
        Self { view }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.hide_loading();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingView;
    use super::*;

    #[test]
    fn test_listing_marks_active_item() {
        let names = vec![KnowledgeBaseName::from("java"), "network".into()];
        let selected = KnowledgeBaseName::from("network");

        match KnowledgeBaseListing::build(&names, Some(&selected)) {
            KnowledgeBaseListing::Items(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].display_name, "Java");
                assert!(!items[0].active);
                assert!(items[1].active);
            }
            other => panic!("unexpected listing: {:?}", other),
        }
    }

    #[test]
    fn test_empty_listing_uses_placeholder() {
        assert_eq!(
            KnowledgeBaseListing::build(&[], None),
            KnowledgeBaseListing::Empty {
                placeholder: EMPTY_LIST_PLACEHOLDER
            }
        );
    }

    #[test]
    fn test_notification_ttl() {
        assert_eq!(Notification::success("ok").ttl(), Duration::from_secs(3));
        assert_eq!(Notification::error("bad").ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_loading_guard_hides_on_drop() {
        let view = RecordingView::new();
        {
            let _guard = LoadingGuard::show(&view);
            assert!(view.is_loading());
        }
        assert!(!view.is_loading());
    }
}
