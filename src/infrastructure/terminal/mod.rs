//! Interactive terminal front end

mod console;
mod plain_text;
mod view;

pub use console::Console;
pub use plain_text::markdown_to_plain_text;
pub use view::{OutputFormat, TerminalView};
