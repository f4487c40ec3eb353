//! Categories group commands for discovery and help output.
//!
//! Command lists live in the router's `categories` namespace, keyed by the
//! case-folded category name; [`Category`] values are rebuilt from that
//! namespace on every lookup.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Router;
use crate::commands::command::identifier_eq;
use crate::commands::Command;
use crate::storage::CATEGORIES_NAMESPACE;

/// Name and description of a declared category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    pub name: String,
    pub description: String,
}

/// A category merged with its current command list.
///
/// This is a snapshot: changing it does not affect the router.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub description: String,
    pub commands: Vec<Arc<Command>>,
}

/// An open category. Commands registered through it join the category;
/// [`CategoryScope::stop`] (or dropping the scope) closes it.
#[must_use = "commands join the category only when registered through the scope"]
pub struct CategoryScope<'a> {
    router: &'a mut Router,
    name: String,
}

impl CategoryScope<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn register_cmd(&mut self, command: Command) {
        self.router.register_in_category(Some(&self.name), command);
    }

    /// Close the category. Later registrations attach to no category.
    pub fn stop(self) {}
}

pub(crate) fn category_key(name: &str) -> String {
    name.to_lowercase()
}

impl Router {
    /// Declare a category and open it for registration.
    ///
    /// Names are not checked for uniqueness. Re-declaring a name that folds
    /// to an existing one resets the shared command list and appends a
    /// second metadata entry, which shadows the first on lookup.
    pub fn start_category(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> CategoryScope<'_> {
        let name = name.into();
        self.storage
            .namespace_or_init(CATEGORIES_NAMESPACE)
            .set(category_key(&name), Vec::<Arc<Command>>::new());
        self.categories.push(CategoryMeta {
            name: name.clone(),
            description: description.into(),
        });
        tracing::trace!(category = %name, "category started");
        CategoryScope { router: self, name }
    }

    /// Look a category up by case-insensitive name.
    ///
    /// Returns `None` when no such category was declared, or when its
    /// command list is missing from the namespace.
    pub fn get_category(&self, name: &str) -> Option<Category> {
        let meta = self.find_category_meta(name)?;
        let commands = self.category_commands(name)?;
        Some(Category {
            name: meta.name.clone(),
            description: meta.description.clone(),
            commands,
        })
    }

    pub(crate) fn find_category_meta(&self, name: &str) -> Option<&CategoryMeta> {
        self.categories
            .iter()
            .rev()
            .find(|meta| identifier_eq(&meta.name, name, true))
    }

    pub(crate) fn category_commands(&self, name: &str) -> Option<Vec<Arc<Command>>> {
        self.storage
            .namespace(CATEGORIES_NAMESPACE)?
            .get::<Vec<Arc<Command>>>(&category_key(name))
    }
}
