//! Transport-facing types: users, messages, sessions and event sources.

use anyhow::Result;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A chat account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Set for automated (bot) accounts.
    #[serde(default)]
    pub bot: bool,
}

/// An inbound chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub guild_id: Option<String>,
    pub author: User,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// The "message created" event delivered by the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    pub message: Message,
}

/// A live connection to the chat service.
#[async_trait]
pub trait Session: Send + Sync {
    /// The account this session is logged in as.
    fn current_user(&self) -> &User;

    /// Post `content` to the given channel.
    async fn send_message(&self, channel_id: &str, content: &str) -> Result<()>;

    /// The name of this session implementation.
    fn name(&self) -> &str;
}

/// Callback invoked once per inbound message.
pub type MessageHandler =
    Arc<dyn Fn(Arc<dyn Session>, MessageEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// Something that delivers message events to registered handlers.
pub trait EventSource: Send + Sync {
    fn add_message_handler(&self, handler: MessageHandler);
}
