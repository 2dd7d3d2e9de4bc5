//! Chat messages and the per-session message history
//!
//! A [`ChatSession`] is an explicit value owned by whoever drives the UI. It is
//! handed to the chat orchestrator and handed back with the new exchange
//! appended, so no global state is involved.

use crate::error::{ChatdocError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only message history for one UI session
///
/// The first message is always the system prompt. After it, user and
/// assistant messages alternate. Serialized as the plain message list;
/// deserializing checks both rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Message>", try_from = "Vec<Message>")]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    /// Start a session seeded with the given system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Full history, system message included
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Conversation without the leading system message
    pub fn transcript(&self) -> &[Message] {
        &self.messages[1..]
    }

    /// Number of user/assistant messages exchanged so far
    pub fn len(&self) -> usize {
        self.messages.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a message to the history
    pub(crate) fn push(&mut self, message: Message) {
        debug_assert_ne!(message.role, Role::System);
        self.messages.push(message);
    }

    /// Drop everything except the system message
    pub fn clear(&mut self) {
        self.messages.truncate(1);
    }
}

impl From<ChatSession> for Vec<Message> {
    fn from(session: ChatSession) -> Self {
        session.messages
    }
}

impl TryFrom<Vec<Message>> for ChatSession {
    type Error = ChatdocError;

    fn try_from(messages: Vec<Message>) -> Result<Self> {
        match messages.first() {
            Some(first) if first.role == Role::System => {}
            _ => {
                return Err(ChatdocError::Generic(
                    "chat history must start with a system message".to_string(),
                ));
            }
        }

        for (i, message) in messages[1..].iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            if message.role != expected {
                return Err(ChatdocError::Generic(format!(
                    "message {} is from {}, expected {}",
                    i + 1,
                    message.role,
                    expected
                )));
            }
        }

        Ok(Self { messages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_holds_only_system_message() {
        let session = ChatSession::new("You are a helpful assistant.");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::System);
        assert!(session.is_empty());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_push_and_clear() {
        let mut session = ChatSession::new("sys");
        session.push(Message::user("hi"));
        session.push(Message::assistant("hello"));
        assert_eq!(session.len(), 2);
        assert_eq!(session.transcript()[1].content, "hello");

        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.messages()[0].content, "sys");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Message::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn test_session_serializes_as_message_list() {
        let mut session = ChatSession::new("sys");
        session.push(Message::user("hi"));
        session.push(Message::assistant("hello"));

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.starts_with(r#"[{"role":"system""#));
        let restored: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_deserialize_rejects_broken_history() {
        for json in [
            "[]",
            r#"{"messages":[]}"#,
            r#"[{"role":"user","content":"hi"}]"#,
            r#"[{"role":"system","content":"sys"},{"role":"assistant","content":"hi"}]"#,
            r#"[{"role":"system","content":"sys"},{"role":"system","content":"again"}]"#,
        ] {
            assert!(serde_json::from_str::<ChatSession>(json).is_err(), "{}", json);
        }
    }

    #[test]
    fn test_try_from_keeps_valid_history() {
        let session = ChatSession::try_from(vec![Message::system("sys"), Message::user("hi")]).unwrap();
        assert_eq!(session.len(), 1);
        assert_eq!(session.transcript()[0].content, "hi");
    }
}
