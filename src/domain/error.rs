use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: u16,
        message: Option<String>,
    },

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: Option<String>) -> Self {
        Self::Http { status, message }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Message the backend attached to a failed response, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message } => Some(message),
            Self::Http {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Whether the request never produced a usable HTTP exchange
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Http { .. })
    }
}
