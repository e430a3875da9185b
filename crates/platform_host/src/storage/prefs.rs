//! Key-value preference storage contracts and adapters.
//!
//! The shape mirrors browser `localStorage`: synchronous, string keys, raw JSON text values.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for lightweight preference values (JSON stored as text per key).
pub trait PrefsStore {
    /// Returns the raw JSON text stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Stores raw JSON text under `key`, replacing any previous value.
    fn set(&self, key: &str, raw_json: &str) -> Result<(), String>;

    /// Removes `key`; removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Preference store that holds nothing and accepts every write.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn get(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn set(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store; clones share the same map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the stored keys in order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store read or JSON deserialization fails.
pub fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| format!("invalid value for `{key}`: {e}"))
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize + ?Sized>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Folder {
        id: String,
        name: String,
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryPrefsStore::default();
        let other = store.clone();

        store.set("desktop_folders", "[]").expect("set");
        assert_eq!(other.get("desktop_folders").expect("get").as_deref(), Some("[]"));
        other.remove("desktop_folders").expect("remove");
        assert_eq!(store.get("desktop_folders").expect("get"), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn typed_helpers_round_trip_through_dyn_store() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;
        let folders = vec![Folder {
            id: "f1".to_string(),
            name: "Stuff".to_string(),
        }];

        save_pref_with(store_obj, "folders", &folders).expect("save");
        let loaded: Option<Vec<Folder>> = load_pref_with(store_obj, "folders").expect("load");
        assert_eq!(loaded, Some(folders));
    }

    #[test]
    fn typed_load_reports_malformed_json_with_key() {
        let store = MemoryPrefsStore::default();
        store.set("folders", "{not json").expect("set");

        let err = load_pref_with::<_, Vec<Folder>>(&store, "folders").expect_err("malformed");
        assert!(err.starts_with("invalid value for `folders`"), "{err}");
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        store.set("k", "{}").expect("set");
        assert_eq!(store.get("k").expect("get"), None);
        store.remove("k").expect("remove");
    }
}
