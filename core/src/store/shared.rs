use super::{ClassificationStore, StoreOptions};
use crate::prelude::RandomSource;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable handle that serializes every caller through one lock.
pub struct SharedStore<R = StdRng> {
    inner: Arc<Mutex<ClassificationStore<R>>>,
}

impl<R> Clone for SharedStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RandomSource> SharedStore<R> {
    pub fn new(store: ClassificationStore<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access; the store is consistent on entry and exit.
    pub fn with<T>(&self, f: impl FnOnce(&mut ClassificationStore<R>) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl SharedStore<StdRng> {
    pub fn seeded(options: StoreOptions, seed: u64) -> Self {
        Self::new(ClassificationStore::with_seed(options, seed))
    }
}
