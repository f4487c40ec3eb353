use anyhow::Result;
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::Arc;

use super::arguments::{Argument, Arguments};
use super::traits::{CommandHandler, MiddlewareAction, RateLimiter};
use crate::router::{CategoryMeta, Ctx};

/// Compare two identifiers, folding case when `ignore_case` is set.
pub(crate) fn identifier_eq(a: &str, b: &str, ignore_case: bool) -> bool {
    if ignore_case {
        a == b || a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

/// A routable command.
///
/// Built with [`Command::new`] and the `with_*` methods, then handed to the
/// router, which owns it from then on.
pub struct Command {
    name: String,
    aliases: Vec<String>,
    description: String,
    usage: String,
    example: String,
    flags: Vec<String>,
    ignore_case: bool,
    sub_commands: Vec<Arc<Command>>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
    handler: Arc<dyn CommandHandler>,
    pub(crate) category: Option<CategoryMeta>,
}

impl Command {
    pub fn new(name: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        Self::with_shared_handler(name, Arc::new(handler))
    }

    pub fn with_shared_handler(name: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            usage: String::new(),
            example: String::new(),
            flags: Vec::new(),
            ignore_case: false,
            sub_commands: Vec::new(),
            rate_limiter: None,
            handler,
            category: None,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Free-form tags for permission predicates and middleware to inspect.
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_sub_command(mut self, command: Command) -> Self {
        self.sub_commands.push(Arc::new(command));
        self
    }

    pub fn with_rate_limiter(mut self, limiter: impl RateLimiter + 'static) -> Self {
        self.rate_limiter = Some(Arc::new(limiter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    pub fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn sub_commands(&self) -> &[Arc<Command>] {
        &self.sub_commands
    }

    /// The category this command was registered under, if any.
    pub fn category(&self) -> Option<&CategoryMeta> {
        self.category.as_ref()
    }

    /// Name followed by aliases.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether `token` names this command under its own case policy.
    pub fn matches(&self, token: &str) -> bool {
        self.identifiers()
            .any(|id| identifier_eq(id, token, self.ignore_case))
    }

    pub fn get_sub_cmd(&self, name: &str) -> Option<&Arc<Command>> {
        self.sub_commands.iter().find(|sub| sub.matches(name))
    }

    /// Run this command for `ctx`.
    ///
    /// A first argument naming a sub-command hands the invocation to that
    /// sub-command with the remaining arguments. Otherwise the rate limiter
    /// and the router's middleware get a say, in that order, before the
    /// handler runs.
    pub fn trigger(self: &Arc<Self>, ctx: Ctx) -> BoxFuture<'static, Result<()>> {
        let command = Arc::clone(self);
        async move {
            if let Some(sub) = ctx
                .arguments
                .get(0)
                .and_then(|first| command.get_sub_cmd(first.raw()))
            {
                let rest = ctx
                    .arguments
                    .iter()
                    .skip(1)
                    .map(Argument::raw)
                    .collect::<Vec<_>>()
                    .join(" ");
                let sub_ctx = ctx.derive(Arc::clone(sub), Arguments::parse(&rest));
                return sub.trigger(sub_ctx).await;
            }

            if let Some(limiter) = &command.rate_limiter {
                if !limiter.notify_execution(&ctx) {
                    tracing::debug!(command = %command.name, "invocation rate limited");
                    return Ok(());
                }
            }

            for middleware in ctx.router.middlewares() {
                if let MiddlewareAction::Abort { reason } = middleware.handle(&ctx).await? {
                    tracing::debug!(
                        command = %command.name,
                        middleware = middleware.name(),
                        %reason,
                        "invocation aborted by middleware"
                    );
                    return Ok(());
                }
            }

            command.handler.execute(&ctx).await
        }
        .boxed()
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("ignore_case", &self.ignore_case)
            .field("category", &self.category.as_ref().map(|c| c.name.as_str()))
            .field("sub_commands", &self.sub_commands.len())
            .finish_non_exhaustive()
    }
}
