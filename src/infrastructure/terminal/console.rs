//! Line input shared between the chat loop and confirmation prompts

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

type LineSource = Lines<Box<dyn AsyncBufRead + Send + Unpin>>;

/// Reads input one line at a time.
///
/// The reader sits behind a mutex so the command loop and a view asking for
/// confirmation never consume the same line.
pub struct Console {
    lines: Mutex<LineSource>,
}

impl Console {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        let reader: Box<dyn AsyncBufRead + Send + Unpin> = Box::new(reader);
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }

    /// Next line without its terminator, `None` at end of input
    pub async fn read_line(&self) -> io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }

    /// Print `prompt` to stdout and read the answer
    pub async fn prompt(&self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        self.read_line().await
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_lines_until_eof() {
        let console = Console::from_reader(&b"/list\nWhat is a JVM?\r\n"[..]);

        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("/list"));
        assert_eq!(
            console.read_line().await.unwrap().as_deref(),
            Some("What is a JVM?")
        );
        assert_eq!(console.read_line().await.unwrap(), None);
    }
}
