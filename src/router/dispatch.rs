//! The per-message pipeline.
//!
//! [`Router::route`] decides what a message means without side effects;
//! [`Router::handle`] carries that decision out.

use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::prefix::match_and_strip;
use super::{Ctx, Router};
use crate::commands::{Arguments, Command};
use crate::transport::{is_bare_mention, Message, MessageEvent, Session, User};

/// Why a message produced no invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BotAuthor,
    SelfAuthor,
    /// A bare mention of the bot with no ping handler configured.
    BareMention,
    NoPrefix,
    EmptyContent,
    EmptyCommand,
    NoMatchingCommand,
}

impl IgnoreReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BotAuthor => "bot_author",
            Self::SelfAuthor => "self_author",
            Self::BareMention => "bare_mention",
            Self::NoPrefix => "no_prefix",
            Self::EmptyContent => "empty_content",
            Self::EmptyCommand => "empty_command",
            Self::NoMatchingCommand => "no_matching_command",
        }
    }
}

/// A matched command with the arguments parsed for it.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: Arc<Command>,
    pub arguments: Arguments,
}

/// What a message resolves to.
#[derive(Debug)]
pub enum Route {
    Ignored(IgnoreReason),
    /// The message is exactly a mention of the bot.
    Ping,
    /// Every command whose identifiers match, in registration order.
    Commands(Vec<Invocation>),
}

/// Split on runs of whitespace.
pub fn tokenize(content: &str) -> Vec<&str> {
    content.split_whitespace().collect()
}

impl Router {
    /// Resolve `message` as seen by `self_user`.
    ///
    /// Leading whitespace before the prefix is skipped. Every command whose
    /// identifiers match the first token is returned, not only the first.
    pub fn route(&self, self_user: &User, message: &Message) -> Route {
        let content = message.content.as_str();

        if message.author.bot && !self.bots_allowed {
            return Route::Ignored(IgnoreReason::BotAuthor);
        }
        if !self.self_bot && message.author.id == self_user.id {
            return Route::Ignored(IgnoreReason::SelfAuthor);
        }

        // A bare mention is never treated as a command.
        if is_bare_mention(content, &self_user.id) {
            return if self.ping_handler.is_some() {
                Route::Ping
            } else {
                Route::Ignored(IgnoreReason::BareMention)
            };
        }

        let prefixes = self.get_prefixes();
        let Some(rest) = match_and_strip(content.trim_start(), &prefixes, self.ignore_prefix_case)
        else {
            return Route::Ignored(IgnoreReason::NoPrefix);
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Route::Ignored(IgnoreReason::EmptyContent);
        }

        let tokens = tokenize(rest);
        let Some((&name, arguments)) = tokens.split_first() else {
            return Route::Ignored(IgnoreReason::EmptyCommand);
        };
        if name.is_empty() {
            return Route::Ignored(IgnoreReason::EmptyCommand);
        }
        let argument_text = arguments.join(" ");
        tracing::trace!(command = name, arguments = %argument_text, "tokenized");

        let invocations: Vec<Invocation> = self
            .commands
            .iter()
            .filter(|command| command.matches(name))
            .map(|command| Invocation {
                command: Arc::clone(command),
                arguments: Arguments::parse(&argument_text),
            })
            .collect();

        if invocations.is_empty() {
            Route::Ignored(IgnoreReason::NoMatchingCommand)
        } else {
            Route::Commands(invocations)
        }
    }

    /// Process one inbound message. Safe to call concurrently.
    pub async fn handle(self: &Arc<Self>, session: Arc<dyn Session>, event: MessageEvent) {
        let span = tracing::debug_span!(
            "dispatch",
            dispatch_id = %Uuid::new_v4(),
            author = %event.message.author.id
        );
        self.dispatch(session, event).instrument(span).await;
    }

    async fn dispatch(self: &Arc<Self>, session: Arc<dyn Session>, event: MessageEvent) {
        let route = self.route(session.current_user(), &event.message);
        let event = Arc::new(event);

        match route {
            Route::Ignored(reason) => {
                tracing::debug!(reason = reason.as_str(), "message ignored");
            }
            Route::Ping => {
                let Some(handler) = &self.ping_handler else {
                    return;
                };
                let ctx = Ctx::new(session, event, Arc::clone(self), None, Arguments::default());
                if let Err(error) = handler.execute(&ctx).await {
                    tracing::warn!("ping handler failed: {error:#}");
                }
            }
            Route::Commands(invocations) => {
                for Invocation { command, arguments } in invocations {
                    let ctx = Ctx::new(
                        Arc::clone(&session),
                        Arc::clone(&event),
                        Arc::clone(self),
                        Some(Arc::clone(&command)),
                        arguments,
                    );

                    if let Some(is_user_allowed) = &self.is_user_allowed {
                        if !is_user_allowed(&ctx) {
                            tracing::debug!(
                                command = command.name(),
                                "user not allowed; dispatch stopped"
                            );
                            return;
                        }
                    }

                    if let Err(error) = command.trigger(ctx).await {
                        tracing::warn!(command = command.name(), "command failed: {error:#}");
                    }
                }
            }
        }
    }
}
