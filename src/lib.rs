#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::needless_pass_by_value,
    clippy::redundant_closure_for_method_calls,
    clippy::return_self_not_must_use,
    clippy::similar_names,
    clippy::struct_field_names,
    clippy::too_many_lines,
    clippy::uninlined_format_args,
    clippy::unused_self
)]

//! Prefix command router for chat bots.
//!
//! Build a [`Router`], declare categories and register [`Command`]s, then
//! bind it to a transport with [`Router::initialize`]. Every inbound message
//! runs through the same pipeline: bot/self filter, ping detection, prefix
//! match, tokenization, command matching, permission check, and finally the
//! command's middleware chain and handler.

pub mod commands;
pub mod config;
pub mod observability;
pub mod router;
pub mod storage;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::{
    Argument, ArgumentError, Arguments, Command, CommandHandler, CooldownRateLimiter,
    HelpCommand, Middleware, MiddlewareAction, RateLimiter,
};
pub use config::RouterConfig;
pub use router::{Category, CategoryMeta, CategoryScope, Ctx, IgnoreReason, Invocation, Route, Router};
pub use storage::{NamespaceStore, ObjectsMap};
pub use transport::{EventSource, Message, MessageEvent, MessageHandler, Session, User};
