//! Lightweight Markdown to HTML conversion for answers.
//!
//! This is not a Markdown grammar. It applies a fixed, ordered list of
//! substitutions, so nested or ambiguous constructs (bold inside a list
//! marker written with `*`, code spans containing `**`, ...) may come out
//! wrong.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FENCED_BLOCK_WITH_LANG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```([A-Za-z0-9_]+)?\n([\s\S]*?)```").unwrap());

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"```([\s\S]*?)```").unwrap());

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

static HEADING_3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static HEADING_2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static HEADING_1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[0-9]+\.\s(.*)$").unwrap());
static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[-*+]\s(.*)$").unwrap());

static ITEM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(<li>.*?</li>(<br>)*)+").unwrap());

/// Escape the characters that would otherwise be read as markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Convert answer text to HTML markup
pub fn markdown_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let html = escape_html(&text.replace("\r\n", "\n"));

    let html = FENCED_BLOCK_WITH_LANG.replace_all(&html, |caps: &Captures| match caps.get(1) {
        Some(lang) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            lang.as_str(),
            &caps[2]
        ),
        None => format!("<pre><code>{}</code></pre>", &caps[2]),
    });
    let html = FENCED_BLOCK.replace_all(&html, "<pre><code>${1}</code></pre>");
    let html = INLINE_CODE.replace_all(&html, "<code>${1}</code>");

    let html = HEADING_3.replace_all(&html, "<h3>${1}</h3>");
    let html = HEADING_2.replace_all(&html, "<h2>${1}</h2>");
    let html = HEADING_1.replace_all(&html, "<h1>${1}</h1>");

    let html = BOLD.replace_all(&html, "<strong>${1}</strong>");
    let html = ITALIC.replace_all(&html, "<em>${1}</em>");

    let html = ORDERED_ITEM.replace_all(&html, "<li>${1}</li>");
    let html = UNORDERED_ITEM.replace_all(&html, "<li>${1}</li>");

    let html = html.replace('\n', "<br>");

    ITEM_RUN
        .replace_all(&html, |caps: &Captures| {
            format!("<ul>{}</ul>", caps[0].replace("<br>", ""))
        })
        .into_owned()
}
