use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

type Object = Arc<dyn Any + Send + Sync>;

/// A string-keyed map of heterogeneous values.
///
/// Values are typed on retrieval: `get::<T>` returns `None` both when the
/// key is absent and when the stored value is of another type.
#[derive(Default)]
pub struct ObjectsMap {
    elements: RwLock<HashMap<String, Object>>,
}

impl ObjectsMap {
    pub fn new() -> Self {
        Self {
            elements: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a clone of the value stored under `key`.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Any + Clone + Send + Sync,
    {
        let elements = self.elements.read();
        elements
            .get(key)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        let mut elements = self.elements.write();
        elements.insert(key.into(), Arc::new(value));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.elements.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.read().is_empty()
    }
}

impl std::fmt::Debug for ObjectsMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements = self.elements.read();
        let mut keys: Vec<&String> = elements.keys().collect();
        keys.sort();
        f.debug_struct("ObjectsMap").field("keys", &keys).finish()
    }
}

/// Named collection of independent [`ObjectsMap`]s.
#[derive(Debug, Default)]
pub struct NamespaceStore {
    namespaces: HashMap<String, ObjectsMap>,
}

impl NamespaceStore {
    pub fn new() -> Self {
        Self {
            namespaces: HashMap::new(),
        }
    }

    /// Install an empty namespace under `name`. An existing namespace of the
    /// same name is discarded along with its contents.
    pub fn initialize(&mut self, name: &str) {
        self.namespaces.insert(name.to_string(), ObjectsMap::new());
    }

    pub fn namespace(&self, name: &str) -> Option<&ObjectsMap> {
        self.namespaces.get(name)
    }

    /// Return the namespace under `name`, creating it on first use.
    pub fn namespace_or_init(&mut self, name: &str) -> &ObjectsMap {
        self.namespaces.entry(name.to_string()).or_default()
    }
}
