//! Infrastructure layer - HTTP backend, logging and terminal rendering

pub mod http;
pub mod logging;
pub mod terminal;
