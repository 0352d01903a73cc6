//! Domain layer - knowledge base names, chat messages, uploads and the
//! backend contract

pub mod backend;
pub mod chat;
pub mod error;
pub mod knowledge_base;
pub mod upload;

pub use backend::{
    AskOutcome, AskResponse, KnowledgeBaseBackend, KnowledgeBaseListResponse, ProgressCallback,
    StatusResponse, UploadRequest,
};
pub use chat::{markdown_to_html, AnswerMetadata, ChatMessage, MessageFormat, MessageRole};
pub use error::DomainError;
pub use knowledge_base::{
    reconcile_selection, validate_knowledge_base_name, KnowledgeBaseName,
    KnowledgeBaseValidationError,
};
pub use upload::{
    validate_upload, UploadCandidate, UploadState, UploadValidationError,
    MAX_UPLOAD_BYTES, PDF_MIME,
};

#[cfg(test)]
pub use backend::MockKnowledgeBaseBackend;
