//! In-memory storage area.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{StorageArea, StorageError};

/// In-memory storage area.
///
/// Cloning yields another handle to the same map, so several cart stores
/// built on clones observe each other's writes the way tabs sharing one
/// `localStorage` do. All data is lost when the last handle is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create a new empty storage area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}
