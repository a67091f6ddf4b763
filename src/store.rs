// src/store.rs
//! # Cache store
//!
//! One JSON file per key under the store directory. The cache is the contract
//! between refreshes: whatever shape is written here is what a later session
//! deserializes, so the field names in `crate::model` never drift casually.
//!
//! Writes are fire-and-forget: a failed write is logged and swallowed, the
//! in-memory data stays authoritative for the rest of the session. Reads of
//! corrupt or missing files come back as `None` and the caller falls through
//! to a fresh scrape.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::consts::{COURSE_NAMESPACE, NAMESPACE, STORE_DIR};

/// Key for a user's cached dashboard bundle.
pub fn bundle_key(user: &str) -> String {
    join!(NAMESPACE, "_", user)
}

/// Key for the sibling course record written by the live timetable path.
pub fn course_key(user: &str) -> String {
    join!(COURSE_NAMESPACE, "_", user)
}

type ChangeListener = Box<dyn Fn(&Store, &str)>;

pub struct Store {
    dir: PathBuf,
    listeners: Vec<ChangeListener>,
}

impl Store {
    /// Open the production store directory, creating it if needed.
    pub fn open_default() -> Self {
        Self::open(STORE_DIR)
    }

    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            loge!("store: cannot create {}: {e}", dir.display());
        }
        Self {
            dir,
            listeners: Vec::new(),
        }
    }

    /// Register a hook fired after every successful write with the store and
    /// the written key, so listeners can read entries back without opening a
    /// second handle. The backend sync subscribes here.
    pub fn on_change(&mut self, f: impl Fn(&Store, &str) + 'static) {
        self.listeners.push(Box::new(f));
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                loge!("store: corrupt entry {key}: {e}");
                None
            }
        }
    }

    /// Persist `value` under `key`. Errors are logged, never surfaced.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let path = self.path_for(key);
        match serde_json::to_string(value) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    loge!("store: write {key} failed: {e}");
                    return;
                }
                logd!("store: wrote {key}");
                for l in &self.listeners {
                    l(self, key);
                }
            }
            Err(e) => loge!("store: serialize {key} failed: {e}"),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(join!(key, ".json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CachedBundle, EditedSlot};
    use std::cell::Cell;
    use std::rc::Rc;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("acad_store_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn round_trips_a_bundle() {
        let store = Store::open(scratch("rt"));
        let mut bundle = CachedBundle::default();
        bundle.last_updated = Some(s!("2026-08-24T10:00:00Z"));
        bundle.edited_slots.insert(
            s!("A1"),
            EditedSlot {
                edited_title: s!("Algorithms"),
                edited_classroom: s!("TP-401"),
            },
        );

        let key = bundle_key("2211003011234");
        store.set(&key, &bundle);
        let back: CachedBundle = store.get(&key).unwrap();
        assert_eq!(back, bundle);
    }

    #[test]
    fn missing_and_corrupt_entries_read_as_none() {
        let store = Store::open(scratch("bad"));
        assert!(store.get::<CachedBundle>("nope").is_none());

        fs::write(store.path_for("mangled"), "{not json").unwrap();
        assert!(store.get::<CachedBundle>("mangled").is_none());
    }

    #[test]
    fn change_listener_fires_on_write() {
        let mut store = Store::open(scratch("hook"));
        let fired = Rc::new(Cell::new(0));
        let seen = fired.clone();
        store.on_change(move |store, key| {
            assert!(key.starts_with(NAMESPACE));
            // the same handle is passed in, usable for read-back
            assert!(store.get::<CachedBundle>(key).is_some());
            seen.set(seen.get() + 1);
        });

        store.set(&bundle_key("x"), &CachedBundle::default());
        assert_eq!(fired.get(), 1);
    }
}
