//! Per-router key/value namespaces and the per-call object map.

pub mod objects;

pub use objects::{NamespaceStore, ObjectsMap};

/// Namespace holding category name → ordered command list.
pub const CATEGORIES_NAMESPACE: &str = "categories";

/// Create a namespace store with the namespaces the router relies on.
pub fn create_namespace_store() -> NamespaceStore {
    let mut store = NamespaceStore::new();
    store.initialize(CATEGORIES_NAMESPACE);
    store
}
