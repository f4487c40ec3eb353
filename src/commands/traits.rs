//! Extension points invoked while a command runs.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::router::Ctx;

/// The body of a command, also used for the ping handler.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, ctx: &Ctx) -> Result<()>;
}

/// What a middleware decided about the invocation it saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MiddlewareAction {
    /// Hand the invocation to the next middleware, or the handler.
    Continue,
    /// Drop the invocation; the handler does not run.
    Abort { reason: String },
}

/// Runs ahead of every command handler, in registration order.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, ctx: &Ctx) -> Result<MiddlewareAction>;

    fn name(&self) -> &str {
        "anonymous"
    }
}

/// Decides whether a command may run again for the invoking context.
pub trait RateLimiter: Send + Sync {
    /// Record an execution attempt; `false` means the attempt is rejected.
    fn notify_execution(&self, ctx: &Ctx) -> bool;
}
