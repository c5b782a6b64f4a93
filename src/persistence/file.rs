//! JSON file repository
//!
//! Stores the objective list as one JSON file. Writes go to a temporary file
//! in the same directory which is then renamed over the target, so a crash
//! mid-write leaves the previous list intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{decode, encode, ObjectiveRepository, PersistenceResult};
use crate::objective::Objective;

/// Repository backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository for `path`; the file need not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a repository for `file_name` inside `data_dir`, creating the
    /// directory if needed
    pub fn open(data_dir: impl AsRef<Path>, file_name: &str) -> PersistenceResult<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        Ok(Self::new(data_dir.join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ObjectiveRepository for JsonFileRepository {
    fn load(&self) -> PersistenceResult<Vec<Objective>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => decode(Some(text.as_str())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, objectives: &[Objective]) -> PersistenceResult<()> {
        let text = encode(objectives)?;
        let temp = self.temp_path();

        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;

        tracing::debug!(path = ?self.path, count = objectives.len(), "Saved objectives");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PersistenceError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path(), "objectives.json").unwrap();

        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("nested"), "objectives.json").unwrap();
        let objectives = vec![
            Objective::new("A", 0.2, 0.8, 0.5, 0.5),
            Objective::new_default(1),
        ];

        repo.save(&objectives).unwrap();

        let reopened = JsonFileRepository::new(repo.path());
        assert_eq!(reopened.load().unwrap(), objectives);
        assert!(!repo.temp_path().exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("objectives.json");
        fs::write(&path, "[{oops").unwrap();

        let repo = JsonFileRepository::new(&path);

        assert!(matches!(repo.load(), Err(PersistenceError::Corrupt(_))));
    }
}
