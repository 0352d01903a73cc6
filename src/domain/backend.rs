//! Contract with the knowledge base backend service

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

#[cfg(test)]
use mockall::automock;

use super::chat::AnswerMetadata;
use super::knowledge_base::KnowledgeBaseName;
use super::DomainError;

/// Receives upload completion percentages (0-100)
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Status value the backend uses for successful operations
pub const STATUS_SUCCESS: &str = "success";

/// Status value the backend uses for failed operations
pub const STATUS_ERROR: &str = "error";

/// Generic `{status, message}` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Message on success, `DomainError::Backend` otherwise
    pub fn into_result(self) -> Result<Option<String>, DomainError> {
        if self.is_success() {
            Ok(self.message)
        } else {
            Err(DomainError::backend(self.message.unwrap_or_default()))
        }
    }
}

/// Body of `GET /knowledge_bases`
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBaseListResponse {
    pub status: String,
    #[serde(default)]
    pub data: Vec<KnowledgeBaseName>,
    #[serde(default)]
    pub message: Option<String>,
}

impl KnowledgeBaseListResponse {
    pub fn into_result(self) -> Result<Vec<KnowledgeBaseName>, DomainError> {
        if self.status == STATUS_SUCCESS {
            Ok(self.data)
        } else {
            Err(DomainError::backend(self.message.unwrap_or_default()))
        }
    }
}

/// Body of `GET /ask/`. Either an answer with optional metadata or an
/// error envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub matched_kbs: Option<Vec<String>>,
    #[serde(default)]
    pub context_length: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What an ask request produced
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    Answer {
        text: String,
        metadata: AnswerMetadata,
    },
    BackendError {
        message: String,
    },
    NoAnswer,
}

impl From<AskResponse> for AskOutcome {
    fn from(response: AskResponse) -> Self {
        match response.answer {
            Some(text) if !text.is_empty() => Self::Answer {
                text,
                metadata: AnswerMetadata {
                    confidence: response.confidence,
                    matched_kbs: response.matched_kbs,
                    context_length: response.context_length,
                },
            },
            _ if response.status.as_deref() == Some(STATUS_ERROR) => Self::BackendError {
                message: response.message.unwrap_or_default(),
            },
            _ => Self::NoAnswer,
        }
    }
}

/// A validated PDF ready to send
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub knowledge_base: KnowledgeBaseName,
    pub file_name: String,
    pub mime: String,
    pub content: Bytes,
}

/// Operations the knowledge base backend exposes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KnowledgeBaseBackend: Send + Sync {
    /// Fetch the names of all knowledge bases
    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBaseName>, DomainError>;

    /// Create a knowledge base, returning the backend's message
    async fn create_knowledge_base(
        &self,
        name: &KnowledgeBaseName,
    ) -> Result<Option<String>, DomainError>;

    /// Delete a knowledge base, returning the backend's message
    async fn delete_knowledge_base(
        &self,
        name: &KnowledgeBaseName,
    ) -> Result<Option<String>, DomainError>;

    /// Ask a question scoped to a knowledge base (empty for none)
    async fn ask(&self, question: &str, knowledge_base: &str) -> Result<AskOutcome, DomainError>;

    /// Upload a PDF, reporting percentage through `on_progress`
    async fn upload_pdf(
        &self,
        request: UploadRequest,
        on_progress: ProgressCallback,
    ) -> Result<Option<String>, DomainError>;
}
