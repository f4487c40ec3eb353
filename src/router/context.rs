use anyhow::{Context as _, Result};
use std::sync::Arc;

use super::Router;
use crate::commands::{Arguments, Command};
use crate::storage::ObjectsMap;
use crate::transport::{MessageEvent, Session, User};

/// Per-invocation context handed to permission checks, middleware and
/// handlers. Every invocation gets its own arguments and object map.
pub struct Ctx {
    pub session: Arc<dyn Session>,
    pub event: Arc<MessageEvent>,
    pub arguments: Arguments,
    /// Scratch space for middleware to pass values on to the handler.
    pub custom_objects: ObjectsMap,
    pub router: Arc<Router>,
    /// `None` for the ping handler.
    pub command: Option<Arc<Command>>,
}

impl Ctx {
    pub fn new(
        session: Arc<dyn Session>,
        event: Arc<MessageEvent>,
        router: Arc<Router>,
        command: Option<Arc<Command>>,
        arguments: Arguments,
    ) -> Self {
        Self {
            session,
            event,
            arguments,
            custom_objects: ObjectsMap::new(),
            router,
            command,
        }
    }

    /// A fresh context for the same message, aimed at another command.
    pub fn derive(&self, command: Arc<Command>, arguments: Arguments) -> Self {
        Self::new(
            Arc::clone(&self.session),
            Arc::clone(&self.event),
            Arc::clone(&self.router),
            Some(command),
            arguments,
        )
    }

    pub fn author(&self) -> &User {
        &self.event.message.author
    }

    pub fn content(&self) -> &str {
        &self.event.message.content
    }

    pub fn channel_id(&self) -> &str {
        &self.event.message.channel_id
    }

    /// Reply in the channel the message came from.
    pub async fn respond_text(&self, text: &str) -> Result<()> {
        self.session
            .send_message(self.channel_id(), text)
            .await
            .with_context(|| format!("Failed to respond in channel {}", self.channel_id()))
    }
}

impl std::fmt::Debug for Ctx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ctx")
            .field("session", &self.session.name())
            .field("message_id", &self.event.message.id)
            .field("arguments", &self.arguments)
            .field("custom_objects", &self.custom_objects)
            .field("command", &self.command.as_ref().map(|c| c.name()))
            .finish_non_exhaustive()
    }
}
