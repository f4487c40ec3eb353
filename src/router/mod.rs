//! Message routing: turns inbound chat messages into command invocations.
//!
//! A [`Router`] is populated during start-up (categories, commands,
//! middleware) and then bound to the transport with
//! [`Router::initialize`], which moves it behind an `Arc`. From then on it
//! is read-only and may be shared by concurrent dispatches.

pub mod category;
pub mod context;
pub mod dispatch;
pub mod prefix;
pub mod registry;

pub use crate::config::RouterConfig;
pub use category::{Category, CategoryMeta, CategoryScope};
pub use context::Ctx;
pub use dispatch::{IgnoreReason, Invocation, Route};
pub use prefix::match_and_strip;

use futures_util::future::{BoxFuture, FutureExt};
use std::sync::Arc;

use crate::commands::{Command, CommandHandler, Middleware};
use crate::storage::{self, NamespaceStore};
use crate::transport::{EventSource, MessageEvent, MessageHandler, Session};

/// Computes the active prefix set on every message.
pub type PrefixFunc = Arc<dyn Fn() -> Vec<String> + Send + Sync>;

/// Decides whether the author of a matched invocation may use the bot.
pub type PermissionFunc = Arc<dyn Fn(&Ctx) -> bool + Send + Sync>;

/// Command registry and dispatcher.
pub struct Router {
    prefixes: Vec<String>,
    prefix_func: Option<PrefixFunc>,
    ignore_prefix_case: bool,
    bots_allowed: bool,
    self_bot: bool,
    is_user_allowed: Option<PermissionFunc>,
    commands: Vec<Arc<Command>>,
    middlewares: Vec<Arc<dyn Middleware>>,
    categories: Vec<CategoryMeta>,
    ping_handler: Option<Arc<dyn CommandHandler>>,
    storage: NamespaceStore,
}

impl Router {
    pub fn create(config: RouterConfig) -> Self {
        Self {
            prefixes: config.prefixes,
            prefix_func: None,
            ignore_prefix_case: config.ignore_prefix_case,
            bots_allowed: config.bots_allowed,
            self_bot: config.self_bot,
            is_user_allowed: None,
            commands: Vec::new(),
            middlewares: Vec::new(),
            categories: Vec::new(),
            ping_handler: None,
            storage: storage::create_namespace_store(),
        }
    }

    /// Compute prefixes per message instead of using the static list.
    pub fn with_prefix_func<F>(mut self, prefix_func: F) -> Self
    where
        F: Fn() -> Vec<String> + Send + Sync + 'static,
    {
        self.prefix_func = Some(Arc::new(prefix_func));
        self
    }

    /// Gate every matched invocation. A rejection ends the whole dispatch
    /// of that message, including commands that have not run yet.
    pub fn with_permission_check<F>(mut self, is_user_allowed: F) -> Self
    where
        F: Fn(&Ctx) -> bool + Send + Sync + 'static,
    {
        self.is_user_allowed = Some(Arc::new(is_user_allowed));
        self
    }

    /// Handler for messages consisting solely of a mention of the bot.
    pub fn with_ping_handler(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.ping_handler = Some(Arc::new(handler));
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn ignore_prefix_case(&self) -> bool {
        self.ignore_prefix_case
    }

    pub fn bots_allowed(&self) -> bool {
        self.bots_allowed
    }

    pub fn self_bot(&self) -> bool {
        self.self_bot
    }

    /// All commands in registration order.
    pub fn commands(&self) -> &[Arc<Command>] {
        &self.commands
    }

    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }

    /// Category metadata in declaration order, duplicates included.
    pub fn categories(&self) -> &[CategoryMeta] {
        &self.categories
    }

    pub fn storage(&self) -> &NamespaceStore {
        &self.storage
    }

    /// Install an empty namespace, discarding an existing one of that name.
    ///
    /// Re-initializing [`storage::CATEGORIES_NAMESPACE`] after categories were
    /// started empties their command lists, and later registrations into
    /// those categories silently attach no category.
    pub fn initialize_storage(&mut self, name: &str) {
        self.storage.initialize(name);
    }

    /// Bind the router to `source`. The router becomes shared and read-only.
    pub fn initialize(self, source: &dyn EventSource) -> Arc<Self> {
        let router = Arc::new(self);
        source.add_message_handler(router.handler());
        tracing::info!(
            commands = router.commands.len(),
            categories = router.categories.len(),
            middlewares = router.middlewares.len(),
            "command router bound to transport"
        );
        router
    }

    /// The message callback the transport should invoke.
    pub fn handler(self: &Arc<Self>) -> MessageHandler {
        let router = Arc::clone(self);
        Arc::new(
            move |session: Arc<dyn Session>, event: MessageEvent| -> BoxFuture<'static, ()> {
                let router = Arc::clone(&router);
                async move { router.handle(session, event).await }.boxed()
            },
        )
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::create(RouterConfig::default())
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("prefixes", &self.prefixes)
            .field("dynamic_prefixes", &self.prefix_func.is_some())
            .field("ignore_prefix_case", &self.ignore_prefix_case)
            .field("bots_allowed", &self.bots_allowed)
            .field("self_bot", &self.self_bot)
            .field("commands", &self.commands.len())
            .field("categories", &self.categories)
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CATEGORIES_NAMESPACE;
    use crate::testing::{self, MockEventSource, MockSession, Recorder};

    #[test]
    fn create_applies_config() {
        let router = Router::create(RouterConfig {
            prefixes: vec!["?".to_string()],
            ignore_prefix_case: true,
            bots_allowed: true,
            self_bot: false,
        });
        assert_eq!(router.prefixes(), ["?".to_string()]);
        assert!(router.ignore_prefix_case());
        assert!(router.bots_allowed());
        assert!(router.storage().namespace(CATEGORIES_NAMESPACE).is_some());
    }

    #[test]
    fn initialize_storage_twice_leaves_empty_namespace() {
        let mut router = Router::default();
        router.initialize_storage(CATEGORIES_NAMESPACE);
        assert!(router.storage().namespace(CATEGORIES_NAMESPACE).unwrap().is_empty());

        let mut fun = router.start_category("Fun", "");
        fun.register_cmd(Command::new("roll", Recorder::new("roll")));
        fun.stop();
        assert_eq!(router.get_category("fun").unwrap().commands.len(), 1);

        router.initialize_storage(CATEGORIES_NAMESPACE);
        assert!(router.storage().namespace(CATEGORIES_NAMESPACE).unwrap().is_empty());
        assert!(router.get_category("fun").is_none());
    }

    #[tokio::test]
    async fn initialize_registers_handler_that_dispatches() {
        let recorder = Recorder::new("ping");
        let mut router = Router::default();
        router.register_cmd(Command::new("ping", recorder.clone()));

        let source = MockEventSource::new();
        let _router = router.initialize(&source);
        assert_eq!(source.handler_count(), 1);

        let session = MockSession::new("bot");
        source
            .emit(session, testing::message("user-1", false, "!ping now"))
            .await;
        assert_eq!(recorder.calls(), vec!["ping:now".to_string()]);
    }
}
