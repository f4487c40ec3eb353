//! Command and middleware registration and lookup.

use std::sync::Arc;

use super::category::category_key;
use super::Router;
use crate::commands::{Command, Middleware};
use crate::storage::CATEGORIES_NAMESPACE;

impl Router {
    /// Register a command outside any category.
    pub fn register_cmd(&mut self, command: Command) {
        self.register_in_category(None, command);
    }

    pub(crate) fn register_in_category(&mut self, category: Option<&str>, mut command: Command) {
        if let Some(name) = category {
            if let Some(mut list) = self.category_commands(name) {
                command.category = self.find_category_meta(name).cloned();
                let command = Arc::new(command);
                list.push(Arc::clone(&command));
                if let Some(namespace) = self.storage.namespace(CATEGORIES_NAMESPACE) {
                    namespace.set(category_key(name), list);
                }
                tracing::trace!(command = command.name(), category = name, "command registered");
                self.commands.push(command);
                return;
            }
            tracing::debug!(
                command = command.name(),
                category = name,
                "category has no command list; registering without category"
            );
        }
        tracing::trace!(command = command.name(), "command registered");
        self.commands.push(Arc::new(command));
    }

    /// First registered command whose name or aliases match `name`, under
    /// that command's own case policy.
    pub fn get_cmd(&self, name: &str) -> Option<&Arc<Command>> {
        self.commands.iter().find(|command| command.matches(name))
    }

    /// Append a middleware. Middleware runs in registration order.
    pub fn register_middleware(&mut self, middleware: impl Middleware + 'static) {
        self.middlewares.push(Arc::new(middleware));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PassMiddleware, Recorder};

    #[test]
    fn get_cmd_finds_by_alias() {
        let mut router = Router::default();
        router.register_cmd(Command::new("ping", Recorder::new("ping")).with_aliases(["p"]));
        assert_eq!(router.get_cmd("p").map(|c| c.name()), Some("ping"));
        assert!(router.get_cmd("P").is_none());
        assert!(router.get_cmd("pong").is_none());
    }

    #[test]
    fn get_cmd_uses_per_command_case_policy() {
        let mut router = Router::default();
        router.register_cmd(Command::new("strict", Recorder::new("strict")));
        router.register_cmd(Command::new("loose", Recorder::new("loose")).ignore_case(true));
        assert!(router.get_cmd("STRICT").is_none());
        assert_eq!(router.get_cmd("LOOSE").map(|c| c.name()), Some("loose"));
    }

    #[test]
    fn get_cmd_returns_first_registered_on_collision() {
        let mut router = Router::default();
        router.register_cmd(Command::new("first", Recorder::new("first")).with_aliases(["x"]));
        router.register_cmd(Command::new("second", Recorder::new("second")).with_aliases(["x"]));
        assert_eq!(router.get_cmd("x").map(|c| c.name()), Some("first"));
        assert_eq!(router.commands().len(), 2);
    }

    #[test]
    fn registration_after_storage_reset_skips_category() {
        let mut router = Router::default();
        router.start_category("Fun", "").stop();
        router.initialize_storage(CATEGORIES_NAMESPACE);

        router.register_in_category(Some("Fun"), Command::new("roll", Recorder::new("roll")));
        assert!(router.get_cmd("roll").unwrap().category().is_none());
        assert!(router.get_category("Fun").is_none());
        assert_eq!(router.commands().len(), 1);
    }

    #[test]
    fn middlewares_keep_registration_order() {
        let mut router = Router::default();
        router.register_middleware(PassMiddleware::named("first"));
        router.register_middleware(PassMiddleware::named("second"));
        let names: Vec<&str> = router.middlewares().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
