//! Chat orchestration
//!
//! One submission appends the user's text, sends the whole history to the
//! model, and appends the reply. The session is passed in by value and handed
//! back, so a caller can never have two submissions in flight on one session.

use crate::error::Result;
use crate::session::{ChatSession, Message};

/// A remote language model that answers a conversation
// Futures are awaited on the caller's task, so no `Send` bound is promised.
#[allow(async_fn_in_trait)]
pub trait ChatModel {
    /// Produce the assistant's reply to `messages`
    async fn complete(&self, messages: &[Message]) -> Result<Message>;
}

/// Handle one line of user input
///
/// Empty input leaves the session untouched and makes no remote call. Client
/// failures propagate and the session is dropped with them.
pub async fn submit<M: ChatModel>(
    mut session: ChatSession,
    input: &str,
    model: &M,
) -> Result<ChatSession> {
    if input.is_empty() {
        return Ok(session);
    }

    session.push(Message::user(input));
    log::debug!("Sending {} messages to the chat model", session.messages().len());

    let reply = model.complete(session.messages()).await?;
    session.push(Message::assistant(reply.content));

    Ok(session)
}
