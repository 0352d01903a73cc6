//! Markdown flattened for a plain terminal

use pulldown_cmark::{Event, Parser, Tag};

const BULLET: &str = "• ";
const CODE_INDENT: &str = "    ";

/// Strip Markdown syntax, keeping headings on their own line, list items
/// bulleted and code blocks indented.
pub fn markdown_to_plain_text(markdown: &str) -> String {
    let mut text = String::new();
    let mut list_stack: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading(..)) | Event::Start(Tag::Paragraph) => {
                start_line(&mut text);
            }
            Event::End(Tag::Heading(..)) | Event::End(Tag::Paragraph) => {
                text.push('\n');
            }
            Event::Start(Tag::List(first)) => {
                start_line(&mut text);
                list_stack.push(first);
            }
            Event::End(Tag::List(_)) => {
                list_stack.pop();
            }
            Event::Start(Tag::Item) => {
                start_line(&mut text);
                let depth = list_stack.len().saturating_sub(1);
                text.push_str(&"  ".repeat(depth));
                match list_stack.last_mut() {
                    Some(Some(number)) => {
                        text.push_str(&format!("{}. ", number));
                        *number += 1;
                    }
                    _ => text.push_str(BULLET),
                }
            }
            Event::End(Tag::Item) => {
                start_line(&mut text);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                start_line(&mut text);
                in_code_block = true;
            }
            Event::End(Tag::CodeBlock(_)) => {
                in_code_block = false;
            }
            Event::Text(t) if in_code_block => {
                for line in t.lines() {
                    text.push_str(CODE_INDENT);
                    text.push_str(line);
                    text.push('\n');
                }
            }
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak => text.push('\n'),
            Event::Rule => {
                start_line(&mut text);
                text.push_str("---\n");
            }
            _ => {}
        }
    }

    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

fn start_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}
