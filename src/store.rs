//! Shared state container.
//!
//! A type-keyed map of shared values. The application host owns one and
//! hands a clone to the UI tree as a Leptos context; clones share the same
//! slots, so values provided after mount are still visible.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::app::{AppInstance, Plugin};
use crate::error::ShellError;

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

type Slot = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Default)]
pub struct Store {
    slots: Arc<Mutex<HashMap<TypeId, Slot>>>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing any earlier value of the same type.
    pub fn provide<T: Send + Sync + 'static>(&self, value: T) {
        self.provide_arc(Arc::new(value));
    }

    pub fn provide_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        self.lock().insert(TypeId::of::<T>(), value);
    }

    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let slot = self.lock().get(&TypeId::of::<T>()).cloned()?;
        slot.downcast::<T>().ok()
    }

    #[must_use]
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.lock().contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TypeId, Slot>> {
        match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").field("slots", &self.len()).finish()
    }
}

/// Plugin that places a shared value in the application store.
pub struct Provide<T> {
    name: &'static str,
    value: Arc<T>,
}

impl<T: Send + Sync + 'static> Provide<T> {
    pub fn new(name: &'static str, value: Arc<T>) -> Self {
        Self { name, value }
    }
}

impl<T: Send + Sync + 'static> Plugin for Provide<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn install(&self, app: &mut AppInstance) -> Result<(), ShellError> {
        app.store().provide_arc(Arc::clone(&self.value));
        Ok(())
    }
}
