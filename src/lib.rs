//! KB Chat
//!
//! Terminal client for a retrieval backend that serves knowledge bases:
//! - List, select, create and delete knowledge bases
//! - Ask questions scoped to the selected knowledge base
//! - Render Markdown answers as HTML or plain text
//! - Upload PDFs with progress reporting

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
