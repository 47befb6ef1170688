//! High-score persistence shim.
//!
//! A single integer stored as a decimal string under [`HIGH_SCORE_KEY`]. Reads
//! fall back to 0 on anything missing or malformed and write failures are only
//! logged: losing the record must never interrupt a game.

use std::collections::HashMap;

use crate::error::PlatformError;

pub const HIGH_SCORE_KEY: &str = "spellingGameHighScore";

/// Minimal key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError>;
}

/// In-memory store used on the host and when the browser denies `localStorage`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser `window.localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, PlatformError> {
        let win = web_sys::window().ok_or(PlatformError::NoWindow)?;
        // local_storage() throws in some privacy modes and returns None in others
        let storage = win
            .local_storage()
            .map_err(|_| PlatformError::StorageUnavailable)?
            .ok_or(PlatformError::StorageUnavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        Ok(self.storage.get_item(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError> {
        Ok(self.storage.set_item(key, value)?)
    }
}

/// Parse a stored high score; anything that is not a non-negative integer is 0.
pub fn parse_high_score(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

pub fn load_high_score<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(raw) => parse_high_score(raw.as_deref()),
        Err(err) => {
            log::warn!("could not read high score: {}", err);
            0
        }
    }
}

pub fn save_high_score<S: KeyValueStore + ?Sized>(store: &mut S, score: u32) {
    if let Err(err) = store.set(HIGH_SCORE_KEY, &score.to_string()) {
        log::warn!("could not save high score {}: {}", score, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PlatformError> {
            Err(PlatformError::StorageUnavailable)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PlatformError> {
            Err(PlatformError::Js("QuotaExceededError".into()))
        }
    }

    #[test]
    fn test_missing_high_score_is_zero() {
        assert_eq!(load_high_score(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(parse_high_score(Some("120")), 120);
        assert_eq!(parse_high_score(Some(" 40\n")), 40);
        assert_eq!(parse_high_score(Some("abc")), 0);
        assert_eq!(parse_high_score(Some("-5")), 0);
        assert_eq!(parse_high_score(Some("")), 0);
        assert_eq!(parse_high_score(None), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save_high_score(&mut store, 90);
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("90"));
        assert_eq!(load_high_score(&store), 90);
        save_high_score(&mut store, 130);
        assert_eq!(load_high_score(&store), 130);
    }

    #[test]
    fn test_broken_store_degrades_silently() {
        let mut store = BrokenStore;
        save_high_score(&mut store, 10);
        assert_eq!(load_high_score(&store), 0);
    }
}
