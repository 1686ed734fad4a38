//! Callback registry for `exec_on_change` handlers.
//!
//! Settings name their change handlers by identifier; the registry maps
//! those identifiers to actual closures. The overlay resolves every
//! identifier against the registry when it attaches, so a typo surfaces as
//! an attach error instead of a dead control. There is no global namespace
//! involved: the registry is owned by the overlay and nothing outside it
//! can be called.

use std::collections::HashMap;
use std::fmt;

type Callback = Box<dyn FnMut() + Send>;

/// Named change callbacks available to select controls.
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, Callback>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `name`, replacing any previous entry with
    /// the same name.
    pub fn register(mut self, name: impl Into<String>, callback: impl FnMut() + Send + 'static) -> Self {
        self.callbacks.insert(name.into(), Box::new(callback));
        self
    }

    /// True when a callback is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Invokes the callback registered under `name`. Returns whether one ran.
    pub fn invoke(&mut self, name: &str) -> bool {
        match self.callbacks.get_mut(name) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn registered_callbacks_run_on_invoke() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut registry = CallbackRegistry::new().register("refreshUser", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(registry.contains("refreshUser"));
        assert!(registry.invoke("refreshUser"));
        assert!(registry.invoke("refreshUser"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_names_invoke_nothing() {
        let mut registry = CallbackRegistry::new();
        assert!(!registry.contains("ghost"));
        assert!(!registry.invoke("ghost"));
    }

    #[test]
    fn re_registering_replaces_the_callback() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let a = first.clone();
        let b = second.clone();
        let mut registry = CallbackRegistry::new()
            .register("refreshUser", move || {
                a.fetch_add(1, Ordering::SeqCst);
            })
            .register("refreshUser", move || {
                b.fetch_add(1, Ordering::SeqCst);
            });

        assert_eq!(registry.len(), 1);
        registry.invoke("refreshUser");
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_lists_names_only() {
        let registry = CallbackRegistry::new()
            .register("b", || {})
            .register("a", || {});
        assert_eq!(
            format!("{registry:?}"),
            "CallbackRegistry { callbacks: [\"a\", \"b\"] }"
        );
    }
}
