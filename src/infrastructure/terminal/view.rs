//! Chat view for an interactive terminal

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::warn;

use super::console::Console;
use super::plain_text::markdown_to_plain_text;
use crate::app::{
    ChatView, KnowledgeBaseListing, Notification, NotificationKind, NO_SELECTION_PLACEHOLDER,
};
use crate::domain::{ChatMessage, MessageFormat};

type Sink = Mutex<Box<dyn Write + Send>>;

/// How assistant answers are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Markdown flattened to readable text
    #[default]
    Text,
    /// Markdown rendered to the HTML fragment a browser would show
    Html,
}

/// Renders the chat to stdout, notifications to stderr and progress with
/// indicatif.
pub struct TerminalView {
    out: Sink,
    err: Sink,
    console: Option<Arc<Console>>,
    format: OutputFormat,
    assume_yes: bool,
    show_progress: bool,
    spinner: Mutex<Option<ProgressBar>>,
    upload_bar: Mutex<Option<ProgressBar>>,
    toast: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
            console: None,
            format: OutputFormat::default(),
            assume_yes: false,
            show_progress: true,
            spinner: Mutex::new(None),
            upload_bar: Mutex::new(None),
            toast: Mutex::new(None),
        }
    }

    /// Read confirmations from `console`. Without one every confirmation is
    /// declined unless `assume_yes` is set.
    pub fn with_console(mut self, console: Arc<Console>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Text of a message as this view prints it
    pub fn format_message(&self, message: &ChatMessage) -> String {
        let speaker = if message.is_user() { "You" } else { "Assistant" };
        let body = match (self.format, message.format) {
            (OutputFormat::Html, _) => message.to_html(),
            (OutputFormat::Text, MessageFormat::Markdown) => markdown_to_plain_text(&message.text),
            (OutputFormat::Text, MessageFormat::Plain) => message.text.clone(),
        };

        let mut text = format!(
            "[{}] {}:\n{}",
            message.created_at.format("%H:%M:%S"),
            speaker,
            body
        );

        if let Some(annotation) = message.annotation() {
            text.push_str(&format!("\n({})", annotation));
        }

        text
    }

    fn write_out(&self, text: &str) {
        write_line(&self.out, text);
    }

    fn write_err(&self, text: &str) {
        write_line(&self.err, text);
    }

    fn draw_target(&self) -> ProgressDrawTarget {
        if self.show_progress {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

fn write_line(sink: &Sink, text: &str) {
    if let Ok(mut writer) = sink.lock() {
        if let Err(e) = writeln!(writer, "{}", text).and_then(|_| writer.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

fn take_bar(slot: &Mutex<Option<ProgressBar>>) -> Option<ProgressBar> {
    slot.lock().ok().and_then(|mut bar| bar.take())
}

#[async_trait]
impl ChatView for TerminalView {
    fn render_knowledge_bases(&self, listing: &KnowledgeBaseListing) {
        match listing {
            KnowledgeBaseListing::Empty { placeholder } => self.write_out(placeholder),
            KnowledgeBaseListing::Items(items) => {
                let lines: Vec<String> = items
                    .iter()
                    .map(|item| {
                        let marker = if item.active { "*" } else { " " };
                        format!("{} {} ({})", marker, item.display_name, item.name)
                    })
                    .collect();
                self.write_out(&format!("Knowledge bases:\n{}", lines.join("\n")));
            }
        }
    }

    fn show_current_knowledge_base(&self, display_name: Option<&str>) {
        match display_name {
            Some(name) => self.write_out(&format!("Current knowledge base: {}", name)),
            None => self.write_out(NO_SELECTION_PLACEHOLDER),
        }
    }

    fn append_message(&self, message: &ChatMessage) {
        self.write_out(&format!("{}\n", self.format_message(message)));
    }

    fn clear_messages(&self) {
        self.write_out("-- chat cleared --");
    }

    fn show_loading(&self) {
        let spinner = ProgressBar::with_draw_target(None, self.draw_target());
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Thinking...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn hide_loading(&self) {
        if let Some(spinner) = take_bar(&self.spinner) {
            spinner.finish_and_clear();
        }
    }

    /// On an interactive terminal the notification is a transient line
    /// cleared after its TTL; otherwise it is printed to stderr.
    fn notify(&self, notification: &Notification) {
        let prefix = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✘",
        };
        let line = format!("{} {}", prefix, notification.message);

        let toast = ProgressBar::with_draw_target(None, self.draw_target());
        if toast.is_hidden() {
            self.write_err(&line);
            return;
        }

        toast.set_style(
            ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        toast.set_message(line);
        toast.tick();

        if let Ok(mut slot) = self.toast.lock() {
            if let Some(previous) = slot.replace(toast.clone()) {
                previous.finish_and_clear();
            }
        }

        let ttl = notification.ttl();
        thread::spawn(move || {
            thread::sleep(ttl);
            toast.finish_and_clear();
        });
    }

    fn show_help(&self, lines: &[(&str, &str)]) {
        let width = lines.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
        let text: Vec<String> = lines
            .iter()
            .map(|(usage, description)| format!("  {:<width$}  {}", usage, description))
            .collect();
        self.write_out(&format!("Commands:\n{}", text.join("\n")));
    }

    fn upload_started(&self, file_name: &str, knowledge_base: &str) {
        let bar = ProgressBar::with_draw_target(Some(100), self.draw_target());
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message(format!("Uploading {} to {}", file_name, knowledge_base));

        if let Ok(mut slot) = self.upload_bar.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn upload_progress(&self, percent: u8) {
        if let Ok(slot) = self.upload_bar.lock() {
            if let Some(bar) = slot.as_ref() {
                bar.set_position(u64::from(percent.min(100)));
            }
        }
    }

    fn upload_finished(&self) {
        if let Some(bar) = take_bar(&self.upload_bar) {
            bar.finish_and_clear();
        }
    }

    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let Some(console) = &self.console else {
            self.write_err(&format!("{} Declined: no input available", prompt));
            return false;
        };

        match console.prompt(&format!("{} [y/N] ", prompt)).await {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}
