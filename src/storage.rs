use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;

/// String-keyed blob store the login flow is written against, so the merge
/// logic can be exercised without any real browser-style storage behind it.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Purely in-memory store. State lives as long as the value does, which is
/// the same lifetime the widgets get.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items
            .lock()
            .expect("storage mutex poisoned")
            .remove(key);
    }
}

/// Single-file store: one JSON object mapping keys to blobs. A missing or
/// unparseable file reads as empty rather than failing, and write errors are
/// logged and swallowed, matching how the rest of the flow treats storage.
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match read_items(&path) {
            Ok(items) => items,
            Err(e) => {
                tracing::event!(target: "auction", tracing::Level::WARN, "Could not read storage file {:?}, starting empty: {:#?}", path, e);
                HashMap::new()
            }
        };
        Self {
            path,
            items: Mutex::new(items),
        }
    }

    fn persist(&self, items: &HashMap<String, String>) {
        let serialized =
            serde_json::to_string_pretty(items).expect("storage map serializes to JSON");
        if let Err(e) = std::fs::write(&self.path, serialized) {
            tracing::event!(target: "auction", tracing::Level::ERROR, "Could not write storage file {:?}: {:#?}", self.path, e);
        }
    }
}

fn read_items(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut items = self.items.lock().expect("storage mutex poisoned");
        items.insert(key.to_string(), value.to_string());
        self.persist(&items);
    }

    fn remove(&self, key: &str) {
        let mut items = self.items.lock().expect("storage mutex poisoned");
        items.remove(key);
        self.persist(&items);
    }
}
