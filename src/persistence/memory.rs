//! In-memory repository
//!
//! Holds the raw stored text exactly as local storage would, so corrupt data
//! and write failures can be reproduced without a browser.

use std::sync::Mutex;

use super::{decode, encode, ObjectiveRepository, PersistenceError, PersistenceResult};
use crate::objective::Objective;

/// Repository backed by a string slot in memory
#[derive(Debug, Default)]
pub struct MemoryRepository {
    slot: Mutex<Option<String>>,
    reject_writes: bool,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose slot already holds `raw`
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
            reject_writes: false,
        }
    }

    /// Builder method: every save fails with `QuotaExceeded`
    pub fn reject_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    /// Current raw content of the slot
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl ObjectiveRepository for MemoryRepository {
    fn load(&self) -> PersistenceResult<Vec<Objective>> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        decode(slot.as_deref())
    }

    fn save(&self, objectives: &[Objective]) -> PersistenceResult<()> {
        if self.reject_writes {
            return Err(PersistenceError::QuotaExceeded);
        }
        let text = encode(objectives)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        *slot = Some(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_repository_loads_empty() {
        let repo = MemoryRepository::new();
        assert!(repo.load().unwrap().is_empty());
        assert_eq!(repo.raw(), None);
    }

    #[test]
    fn test_save_then_load() {
        let repo = MemoryRepository::new();
        let objectives = vec![Objective::new("A", 0.2, 0.8, 0.5, 0.5)];

        repo.save(&objectives).unwrap();

        assert_eq!(repo.load().unwrap(), objectives);
        assert!(repo.raw().unwrap().starts_with('['));
    }

    #[test]
    fn test_rejected_write_keeps_old_content() {
        let repo = MemoryRepository::with_raw("[]").reject_writes();

        let result = repo.save(&[Objective::new_default(0)]);

        assert!(matches!(result, Err(PersistenceError::QuotaExceeded)));
        assert_eq!(repo.raw().as_deref(), Some("[]"));
    }
}
