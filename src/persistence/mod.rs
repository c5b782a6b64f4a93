//! Persistence
//!
//! The objective list is stored under a single key as a JSON array of
//! objective records. Repositories return explicit results; deciding whether
//! a failure is fatal is left to the caller (the session degrades to an empty
//! list on load and keeps running on save).
//!
//! - [`JsonFileRepository`]: one JSON file on disk (server)
//! - [`MemoryRepository`]: an in-memory slot holding the raw JSON text
//!
//! The WASM front end provides its own local storage repository on top of
//! [`encode`] and [`decode`].

mod error;
mod file;
mod memory;

pub use error::{PersistenceError, PersistenceResult};
pub use file::JsonFileRepository;
pub use memory::MemoryRepository;

use crate::objective::Objective;

/// Storage key used for the objective list
pub const STORAGE_KEY: &str = "compass.objectives";

/// Load and save the whole objective list
pub trait ObjectiveRepository {
    /// Read the stored list. A store that was never written yields an empty list.
    fn load(&self) -> PersistenceResult<Vec<Objective>>;

    /// Replace the stored list
    fn save(&self, objectives: &[Objective]) -> PersistenceResult<()>;
}

impl<R: ObjectiveRepository + ?Sized> ObjectiveRepository for Box<R> {
    fn load(&self) -> PersistenceResult<Vec<Objective>> {
        (**self).load()
    }

    fn save(&self, objectives: &[Objective]) -> PersistenceResult<()> {
        (**self).save(objectives)
    }
}

/// Serialize the list into its stored text form
pub fn encode(objectives: &[Objective]) -> PersistenceResult<String> {
    Ok(serde_json::to_string(objectives)?)
}

/// Parse the stored text form; `None` means the key was never written
pub fn decode(raw: Option<&str>) -> PersistenceResult<Vec<Objective>> {
    match raw {
        None => Ok(Vec::new()),
        Some(text) if text.trim().is_empty() => Ok(Vec::new()),
        Some(text) => Ok(serde_json::from_str(text)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_absent_is_empty() {
        assert!(decode(None).unwrap().is_empty());
        assert!(decode(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn test_decode_corrupt() {
        assert!(matches!(
            decode(Some("not json")),
            Err(PersistenceError::Corrupt(_))
        ));
        assert!(matches!(
            decode(Some(r#"{"name": "A"}"#)),
            Err(PersistenceError::Corrupt(_))
        ));
    }

    #[test]
    fn test_encode_is_plain_array() {
        let text = encode(&[Objective::new_default(0)]).unwrap();
        assert_eq!(
            text,
            r#"[{"name":"Objective 0","fun":0.5,"achievement":0.5,"ease":0.5,"impact":0.5}]"#
        );
        assert_eq!(decode(Some(text.as_str())).unwrap(), vec![Objective::new_default(0)]);
    }
}
