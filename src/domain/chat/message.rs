use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::markdown::{escape_html, markdown_to_html};

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// How the message text should be interpreted when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    Plain,
    Markdown,
}

/// Retrieval details the backend returns alongside an answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerMetadata {
    pub confidence: Option<f64>,
    pub matched_kbs: Option<Vec<String>>,
    pub context_length: Option<u64>,
}

impl AnswerMetadata {
    /// One-line summary shown under an answer.
    ///
    /// Only produced when a positive confidence and the matched knowledge
    /// bases are both present.
    pub fn annotation(&self) -> Option<String> {
        let confidence = self.confidence.filter(|c| *c > 0.0)?;
        let matched = self.matched_kbs.as_ref()?;

        Some(format!(
            "confidence: {:.1}% | knowledge bases: {} | context: {} chars",
            confidence * 100.0,
            matched.join(", "),
            self.context_length.unwrap_or(0)
        ))
    }
}

/// A single transcript entry. Lives only as long as the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
    pub format: MessageFormat,
    pub metadata: Option<AnswerMetadata>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
            format: MessageFormat::Plain,
            metadata: None,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
            format: MessageFormat::Plain,
            metadata: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_format(mut self, format: MessageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_metadata(mut self, metadata: AnswerMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Annotation line for the metadata, if it qualifies for display
    pub fn annotation(&self) -> Option<String> {
        self.metadata.as_ref().and_then(AnswerMetadata::annotation)
    }

    /// Message body as HTML markup. User text is always escaped verbatim.
    pub fn to_html(&self) -> String {
        match (self.role, self.format) {
            (MessageRole::Assistant, MessageFormat::Markdown) => markdown_to_html(&self.text),
            _ => escape_html(&self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = ChatMessage::user("What is the JVM?");
        assert!(msg.is_user());
        assert_eq!(msg.format, MessageFormat::Plain);
        assert!(msg.metadata.is_none());

        let msg = ChatMessage::assistant("A virtual machine").with_format(MessageFormat::Markdown);
        assert!(!msg.is_user());
        assert_eq!(msg.format, MessageFormat::Markdown);
    }

    #[test]
    fn test_annotation_formatting() {
        let metadata = AnswerMetadata {
            confidence: Some(0.875),
            matched_kbs: Some(vec!["java".to_string(), "network".to_string()]),
            context_length: Some(120),
        };
        assert_eq!(
            metadata.annotation().as_deref(),
            Some("confidence: 87.5% | knowledge bases: java, network | context: 120 chars")
        );
    }

    #[test]
    fn test_annotation_requires_confidence_and_matches() {
        let no_confidence = AnswerMetadata {
            confidence: Some(0.0),
            matched_kbs: Some(vec!["java".to_string()]),
            context_length: None,
        };
        assert!(no_confidence.annotation().is_none());

        let no_matches = AnswerMetadata {
            confidence: Some(0.9),
            matched_kbs: None,
            context_length: Some(10),
        };
        assert!(no_matches.annotation().is_none());

        let missing_length = AnswerMetadata {
            confidence: Some(0.5),
            matched_kbs: Some(vec![]),
            context_length: None,
        };
        assert_eq!(
            missing_length.annotation().as_deref(),
            Some("confidence: 50.0% | knowledge bases:  | context: 0 chars")
        );
    }

    #[test]
    fn test_user_text_is_escaped() {
        let msg = ChatMessage::user("**not bold** <b>");
        assert_eq!(msg.to_html(), "**not bold** &lt;b&gt;");

        let msg = ChatMessage::assistant("**bold**").with_format(MessageFormat::Markdown);
        assert_eq!(msg.to_html(), "<strong>bold</strong>");
    }
}
