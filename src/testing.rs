//! Mock transport pieces and recording handlers shared by unit tests.

use anyhow::{bail, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::commands::{Arguments, Command, CommandHandler, Middleware, MiddlewareAction};
use crate::router::{Ctx, Router};
use crate::transport::{EventSource, Message, MessageEvent, MessageHandler, Session, User};

pub fn user(id: &str, bot: bool) -> User {
    User {
        id: id.to_string(),
        username: format!("{id}_name"),
        bot,
    }
}

pub fn message(author_id: &str, bot: bool, content: &str) -> MessageEvent {
    MessageEvent {
        message: Message {
            id: "message-1".to_string(),
            channel_id: "channel-1".to_string(),
            guild_id: Some("guild-1".to_string()),
            author: user(author_id, bot),
            content: content.to_string(),
            timestamp: chrono::Utc::now(),
        },
    }
}

/// Session that records outgoing messages.
pub struct MockSession {
    user: User,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockSession {
    pub fn new(bot_id: &str) -> Arc<Self> {
        Arc::new(Self {
            user: user(bot_id, true),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Session for MockSession {
    fn current_user(&self) -> &User {
        &self.user
    }

    async fn send_message(&self, channel_id: &str, content: &str) -> Result<()> {
        self.sent
            .lock()
            .push((channel_id.to_string(), content.to_string()));
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[derive(Default)]
pub struct MockEventSource {
    handlers: Mutex<Vec<MessageHandler>>,
}

impl MockEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }

    pub async fn emit(&self, session: Arc<MockSession>, event: MessageEvent) {
        let session: Arc<dyn Session> = session;
        let handlers: Vec<MessageHandler> = self.handlers.lock().clone();
        for handler in handlers {
            handler(session.clone(), event.clone()).await;
        }
    }
}

impl EventSource for MockEventSource {
    fn add_message_handler(&self, handler: MessageHandler) {
        self.handlers.lock().push(handler);
    }
}

#[derive(Debug, Clone)]
struct Call {
    text: String,
    command: Option<String>,
    count: Option<u32>,
}

/// Handler that logs `name:arguments` for every execution. Recorders made
/// with [`Recorder::sharing`] append to the same log.
#[derive(Clone)]
pub struct Recorder {
    name: String,
    log: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sharing(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            log: Arc::clone(&self.log),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().iter().map(|c| c.text.clone()).collect()
    }

    /// Name of the command each execution's context pointed at.
    pub fn commands(&self) -> Vec<Option<String>> {
        self.log.lock().iter().map(|c| c.command.clone()).collect()
    }

    /// The `count` custom object each execution saw.
    pub fn counts_seen(&self) -> Vec<Option<u32>> {
        self.log.lock().iter().map(|c| c.count).collect()
    }
}

#[async_trait]
impl CommandHandler for Recorder {
    async fn execute(&self, ctx: &Ctx) -> Result<()> {
        self.log.lock().push(Call {
            text: format!("{}:{}", self.name, ctx.arguments.raw()),
            command: ctx.command.as_ref().map(|c| c.name().to_string()),
            count: ctx.custom_objects.get::<u32>("count"),
        });
        Ok(())
    }
}

pub struct Failing;

#[async_trait]
impl CommandHandler for Failing {
    async fn execute(&self, _ctx: &Ctx) -> Result<()> {
        bail!("handler failed on purpose")
    }
}

pub struct PassMiddleware {
    name: String,
}

impl PassMiddleware {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl Middleware for PassMiddleware {
    async fn handle(&self, _ctx: &Ctx) -> Result<MiddlewareAction> {
        Ok(MiddlewareAction::Continue)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn ctx(router: &Arc<Router>, command: &Arc<Command>, arguments: &str) -> Ctx {
    ctx_with_session(router, command, arguments, MockSession::new("bot"))
}

pub fn ctx_with_session(
    router: &Arc<Router>,
    command: &Arc<Command>,
    arguments: &str,
    session: Arc<MockSession>,
) -> Ctx {
    Ctx::new(
        session,
        Arc::new(message("user-1", false, "")),
        Arc::clone(router),
        Some(Arc::clone(command)),
        Arguments::parse(arguments),
    )
}
