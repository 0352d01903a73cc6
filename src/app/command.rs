//! Typed commands parsed from chat input

use std::fmt;
use std::path::PathBuf;

/// Slash commands and their one-line descriptions, for help output
pub const HELP: &[(&str, &str)] = &[
    ("<question>", "Ask the selected knowledge base"),
    ("/list", "Reload the knowledge base list"),
    ("/use <name>", "Select a knowledge base (clears the chat)"),
    ("/create <name>", "Create a knowledge base"),
    ("/delete <name>", "Delete a knowledge base after confirmation"),
    ("/upload <path>", "Upload a PDF (max 50MB) into the selected knowledge base"),
    ("/current", "Show the selected knowledge base"),
    ("/clear", "Clear the chat transcript"),
    ("/help", "Show this help"),
    ("/quit", "Leave the chat"),
];

/// A user action the controller can execute
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load,
    Select(String),
    Create(String),
    Delete(String),
    Ask(String),
    Upload(Option<PathBuf>),
    ShowCurrent,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandParseError {
    Unknown(String),
    MissingArgument(&'static str),
}

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(cmd) => write!(f, "Unknown command '/{}', type /help", cmd),
            Self::MissingArgument(usage) => write!(f, "Usage: {}", usage),
        }
    }
}

impl std::error::Error for CommandParseError {}

impl Command {
    /// Parse one line of input. Blank lines yield `None`; anything not
    /// starting with `/` is a question.
    pub fn parse(line: &str) -> Option<Result<Self, CommandParseError>> {
        let line = line.trim();

        if line.is_empty() {
            return None;
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Some(Ok(Self::Ask(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let required = |usage: &'static str| {
            if arg.is_empty() {
                Err(CommandParseError::MissingArgument(usage))
            } else {
                Ok(arg.to_string())
            }
        };

        let command = match name.to_lowercase().as_str() {
            "list" | "ls" => Ok(Self::Load),
            "use" | "select" => required("/use <name>").map(Self::Select),
            "create" | "new" => required("/create <name>").map(Self::Create),
            "delete" | "rm" => required("/delete <name>").map(Self::Delete),
            "upload" => Ok(Self::Upload((!arg.is_empty()).then(|| PathBuf::from(arg)))),
            "current" => Ok(Self::ShowCurrent),
            "clear" => Ok(Self::Clear),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandParseError::Unknown(other.to_string())),
        };

        Some(command)
    }
}
