//! Chat transcript messages and answer formatting

pub mod markdown;
mod message;

pub use markdown::{escape_html, markdown_to_html};
pub use message::{AnswerMetadata, ChatMessage, MessageFormat, MessageRole};
