//! Name -> handler table.
//!
//! Built-in actions are stored as [`Action`] tags and executed through an
//! exhaustive match in [`crate::handlers`]; embedders can add or override
//! names with closures.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use aegis_common::{Action, BridgeError, Payload};
use serde_json::Value;

/// A synchronous action implementation.
pub trait Handler: Send + Sync {
    fn call(&self, payload: &Payload) -> Result<Value, BridgeError>;
}

impl<F> Handler for F
where
    F: Fn(&Payload) -> Result<Value, BridgeError> + Send + Sync,
{
    fn call(&self, payload: &Payload) -> Result<Value, BridgeError> {
        self(payload)
    }
}

#[derive(Clone)]
pub enum Entry {
    Builtin(Action),
    Custom(Arc<dyn Handler>),
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(a) => f.debug_tuple("Builtin").field(a).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    entries: HashMap<String, Entry>,
}

impl ActionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in action under its wire name.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for action in Action::all() {
            registry.register_builtin(*action);
        }
        registry
    }

    pub fn register_builtin(&mut self, action: Action) {
        self.entries
            .insert(action.name().to_string(), Entry::Builtin(action));
    }

    /// Bind `name` to `handler`. An existing binding, built-in or not, is
    /// replaced.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H)
    where
        H: Handler + 'static,
    {
        let name = name.into();
        if self.entries.contains_key(&name) {
            tracing::debug!(action = %name, "replacing registered handler");
        }
        self.entries.insert(name, Entry::Custom(Arc::new(handler)));
    }

    pub fn lookup(&self, name: &str) -> Result<&Entry, BridgeError> {
        self.entries
            .get(name)
            .ok_or_else(|| BridgeError::UnknownAction(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtins_cover_every_action() {
        let registry = ActionRegistry::with_builtins();
        assert_eq!(registry.len(), Action::all().len());
        for action in Action::all() {
            assert!(matches!(
                registry.lookup(action.name()),
                Ok(Entry::Builtin(a)) if a == action
            ));
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = ActionRegistry::with_builtins();
        assert_eq!(
            registry.lookup("doesNotExist").unwrap_err(),
            BridgeError::UnknownAction("doesNotExist".into())
        );
    }

    #[test]
    fn register_custom_handler() {
        let mut registry = ActionRegistry::new();
        registry.register("greet", |p: &Payload| -> Result<Value, BridgeError> {
            Ok(json!({ "hello": p.str("name").unwrap_or("world") }))
        });
        let Entry::Custom(handler) = registry.lookup("greet").unwrap() else {
            panic!("expected custom entry");
        };
        let out = handler.call(&Payload::new()).unwrap();
        assert_eq!(out, json!({ "hello": "world" }));
    }

    #[test]
    fn reregistering_replaces_builtin() {
        let mut registry = ActionRegistry::with_builtins();
        registry.register("read", |_: &Payload| -> Result<Value, BridgeError> {
            Ok(json!("overridden"))
        });
        assert!(matches!(registry.lookup("read"), Ok(Entry::Custom(_))));
        assert_eq!(registry.len(), Action::all().len());
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = ActionRegistry::new();
        let noop = |_: &Payload| -> Result<Value, BridgeError> { Ok(Value::Null) };
        registry.register("b", noop);
        registry.register("a", noop);
        assert_eq!(registry.names(), vec!["a", "b"]);
    }
}
