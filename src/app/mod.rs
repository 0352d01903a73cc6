//! Chat controller: session state, typed commands and their handlers

pub mod command;
pub mod context;
pub mod handlers;
pub mod state;
pub mod view;

pub use command::{Command, CommandParseError, HELP};
pub use context::{AppContext, ChatOptions};
pub use handlers::{dispatch, Flow};
pub use state::AppState;
pub use view::{
    ChatView, KnowledgeBaseItem, KnowledgeBaseListing, LoadingGuard, Notification,
    NotificationKind, EMPTY_LIST_PLACEHOLDER, NO_SELECTION_PLACEHOLDER,
};
