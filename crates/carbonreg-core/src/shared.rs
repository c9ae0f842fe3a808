use std::sync::{Arc, RwLock};

use crate::call::{Call, Caller, Receipt};
use crate::errors::RegistryError;
use crate::registry::Registry;

/// Thread-safe handle serializing all calls against one registry.
///
/// Mutations hold the write lock for their whole check-then-apply sequence;
/// queries hold the read lock, so they never see a half-applied call.
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    /// Wraps `registry` for shared use.
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Applies `call` under the write lock.
    pub fn apply(&self, caller: &Caller, call: &Call) -> Result<Receipt, RegistryError> {
        let mut registry = self.inner.write().map_err(|_| RegistryError::Poisoned)?;
        registry.apply(caller, call)
    }

    /// Runs a query against a consistent view of the registry.
    pub fn read<T>(&self, query: impl FnOnce(&Registry) -> T) -> Result<T, RegistryError> {
        let registry = self.inner.read().map_err(|_| RegistryError::Poisoned)?;
        Ok(query(&registry))
    }
}
