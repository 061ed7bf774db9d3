#[cfg(test)]
use std::{cell::RefCell, collections::HashMap, rc::Rc};

use gloo_storage::{LocalStorage, Storage};

/// Durable string slots the session is persisted into.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`. Values are stored raw, not JSON-encoded, so the
/// token slot stays readable by the marketing site that hands tokens over.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(error) => {
                log::warn!("Fail to read local storage, key={key}, error={error:?}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(error) = LocalStorage::raw().set_item(key, value) {
            log::error!("Fail to write local storage, key={key}, error={error:?}");
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// In-memory storage; clones share the same slots, which lets a test build a
/// second store over the same data to simulate a page reload.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

#[cfg(test)]
impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.slots.borrow_mut().remove(key);
    }
}
