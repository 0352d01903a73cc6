//! reqwest-backed implementation of the knowledge base backend

mod client;
mod progress;

pub use client::HttpBackend;
pub use progress::progress_stream;
