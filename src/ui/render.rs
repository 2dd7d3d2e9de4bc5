//! Conversation rendering
//!
//! Turns the session history into keyed entries and draws them to a terminal
//! (or any writer). Rendering never touches the session.

use crate::session::{Message, Role};
use std::io::{self, Write};

/// Visual style of a rendered entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    User,
    Assistant,
}

/// One entry ready to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Stable key: `"{i}_user"` for even offsets, `"{i}_ai"` for odd ones
    pub key: String,
    pub style: MessageStyle,
    pub content: String,
}

/// Render the full history, skipping the leading system message
pub fn render_transcript(messages: &[Message]) -> Vec<RenderedMessage> {
    let transcript = match messages.first() {
        Some(first) if first.role == Role::System => &messages[1..],
        _ => messages,
    };

    transcript
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let key = if i % 2 == 0 {
                format!("{}_user", i)
            } else {
                format!("{}_ai", i)
            };
            let style = match message.role {
                Role::User => MessageStyle::User,
                Role::Assistant | Role::System => MessageStyle::Assistant,
            };
            RenderedMessage {
                key,
                style,
                content: message.content.clone(),
            }
        })
        .collect()
}

/// Draw rendered entries, one labelled block each
pub fn draw<W: Write>(out: &mut W, entries: &[RenderedMessage]) -> io::Result<()> {
    for entry in entries {
        let label = match entry.style {
            MessageStyle::User => "You",
            MessageStyle::Assistant => "Assistant",
        };
        writeln!(out, "{}: {}", label, entry.content)?;
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(turns: usize) -> Vec<Message> {
        let mut messages = vec![Message::system("sys")];
        for i in 0..turns {
            messages.push(Message::user(format!("q{}", i)));
            messages.push(Message::assistant(format!("a{}", i)));
        }
        messages
    }

    #[test]
    fn test_parity_styles_and_keys() {
        let rendered = render_transcript(&conversation(3));
        assert_eq!(rendered.len(), 6);

        for (i, entry) in rendered.iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(entry.style, MessageStyle::User);
                assert_eq!(entry.key, format!("{}_user", i));
            } else {
                assert_eq!(entry.style, MessageStyle::Assistant);
                assert_eq!(entry.key, format!("{}_ai", i));
            }
        }
    }

    #[test]
    fn test_preserves_order_and_skips_system() {
        let rendered = render_transcript(&conversation(2));
        let contents: Vec<&str> = rendered.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["q0", "a0", "q1", "a1"]);
        assert!(render_transcript(&conversation(0)).is_empty());
    }

    #[test]
    fn test_style_ignores_content() {
        let messages = vec![
            Message::system("sys"),
            Message::user("Assistant: I am not the assistant"),
            Message::assistant(""),
        ];
        let rendered = render_transcript(&messages);
        assert_eq!(rendered[0].style, MessageStyle::User);
        assert_eq!(rendered[1].style, MessageStyle::Assistant);
    }

    #[test]
    fn test_draw() {
        let mut out = Vec::new();
        draw(&mut out, &render_transcript(&conversation(1))).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "You: q0\n\nAssistant: a0\n\n");
    }
}
