//! Local storage repository
//!
//! Keeps the objective list as JSON text under one local storage key.

use compass::objective::Objective;
use compass::persistence::{
    decode, encode, ObjectiveRepository, PersistenceError, PersistenceResult, STORAGE_KEY,
};
use wasm_bindgen::JsValue;

/// Browser local storage under a single key
#[derive(Debug, Clone)]
pub struct LocalStorageRepository {
    key: String,
}

impl Default for LocalStorageRepository {
    fn default() -> Self {
        Self::new(STORAGE_KEY)
    }
}

impl LocalStorageRepository {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> PersistenceResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("no window".to_string()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(PersistenceError::Unavailable(
                "local storage is disabled".to_string(),
            )),
            Err(e) => Err(PersistenceError::Unavailable(describe(&e))),
        }
    }
}

impl ObjectiveRepository for LocalStorageRepository {
    fn load(&self) -> PersistenceResult<Vec<Objective>> {
        let raw = self
            .storage()?
            .get_item(&self.key)
            .map_err(|e| PersistenceError::Unavailable(describe(&e)))?;
        decode(raw.as_deref())
    }

    fn save(&self, objectives: &[Objective]) -> PersistenceResult<()> {
        let text = encode(objectives)?;
        // setItem only throws when the origin's quota is used up
        self.storage()?
            .set_item(&self.key, &text)
            .map_err(|_| PersistenceError::QuotaExceeded)
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
