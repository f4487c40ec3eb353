//! Transport contract: what the router needs from the chat session.

pub mod traits;

pub use traits::{EventSource, Message, MessageEvent, MessageHandler, Session, User};

/// Mention forms a chat client produces for `user_id`.
pub fn mention_forms(user_id: &str) -> [String; 2] {
    [format!("<@{user_id}>"), format!("<@!{user_id}>")]
}

/// Whether `content` is exactly a mention of `user_id`, in either form.
pub fn is_bare_mention(content: &str, user_id: &str) -> bool {
    mention_forms(user_id).iter().any(|form| form == content)
}
