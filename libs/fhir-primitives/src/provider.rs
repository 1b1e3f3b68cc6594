//! Construct-once handle for the storage engine collaborator
//!
//! Hosts that persist converted values build their engine at most once per
//! process. Instead of a hidden global, the host owns an [`EngineProvider`], creates
//! it at startup and passes it (or the `Arc` it hands out) to whoever needs the
//! engine.
//!
//! ```rust
//! use ferrum_primitives::EngineProvider;
//!
//! struct Store {
//!     path: String,
//! }
//!
//! let provider = EngineProvider::new();
//! let first = provider.get_or_init(|| Store { path: "fhir.db".into() });
//! let second = provider.get_or_init(|| unreachable!("already built"));
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! assert_eq!(second.path, "fhir.db");
//! ```

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

pub struct EngineProvider<E> {
    engine: OnceCell<Arc<E>>,
}

impl<E> EngineProvider<E> {
    pub fn new() -> Self {
        Self {
            engine: OnceCell::new(),
        }
    }

    /// Returns the engine, building it with `build` on first use.
    ///
    /// Concurrent first calls block until one builder has finished; every caller
    /// receives the same instance.
    pub fn get_or_init<F>(&self, build: F) -> Arc<E>
    where
        F: FnOnce() -> E,
    {
        self.engine
            .get_or_init(|| {
                tracing::debug!("building storage engine");
                Arc::new(build())
            })
            .clone()
    }

    /// Like [`EngineProvider::get_or_init`], but a failed build leaves the provider
    /// empty so a later call can retry.
    pub fn get_or_try_init<F, Err>(&self, build: F) -> std::result::Result<Arc<E>, Err>
    where
        F: FnOnce() -> std::result::Result<E, Err>,
    {
        self.engine
            .get_or_try_init(|| {
                tracing::debug!("building storage engine");
                build().map(Arc::new)
            })
            .cloned()
    }

    /// Returns the engine if it has been built.
    pub fn get(&self) -> Option<Arc<E>> {
        self.engine.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.get().is_some()
    }
}

impl<E> Default for EngineProvider<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EngineProvider<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineProvider")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
