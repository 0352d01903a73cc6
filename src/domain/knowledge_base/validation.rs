//! Knowledge base validation utilities

use std::fmt;

use crate::domain::DomainError;

/// Knowledge base validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeBaseValidationError {
    /// Name is empty or whitespace only
    EmptyName,
}

impl fmt::Display for KnowledgeBaseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Please enter a knowledge base name"),
        }
    }
}

impl std::error::Error for KnowledgeBaseValidationError {}

impl From<KnowledgeBaseValidationError> for DomainError {
    fn from(err: KnowledgeBaseValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// Validate a user-entered knowledge base name, returning it trimmed
pub fn validate_knowledge_base_name(name: &str) -> Result<&str, KnowledgeBaseValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(KnowledgeBaseValidationError::EmptyName);
    }

    Ok(trimmed)
}
