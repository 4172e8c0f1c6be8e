use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::TabRegistry;

/// Cloneable handle to one registry guarded by a single lock. Every call runs
/// with exclusive access, so concurrent callers are serialized.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<TabRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: TabRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Exclusive access until the guard drops. A panic in another holder does
    /// not poison the registry: each operation completes or leaves it as it was.
    pub fn lock(&self) -> MutexGuard<'_, TabRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut TabRegistry) -> R) -> R {
        f(&mut self.lock())
    }
}
