use std::{fs, io::ErrorKind, path::PathBuf};

use log::debug;

use supaset_domain::{AppState, ReadError, StateRepository, StorageError, WriteError};

use crate::model;

/// Persists the whole application state as a single JSON file.
///
/// A missing file means a fresh installation and loads as the default
/// state. A file that exists but cannot be parsed is treated as corrupt
/// and reported as an error, never overwritten with defaults.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateRepository for FileStore {
    fn load(&self) -> Result<AppState, ReadError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no data file at {}, starting fresh", self.path.display());
                return Ok(AppState::default());
            }
            Err(err) => return Err(StorageError::Other(err.into()).into()),
        };
        let state = serde_json::from_str::<model::State>(&content)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        Ok(AppState::try_from(state).map_err(|err| StorageError::Corrupt(err.to_string()))?)
    }

    fn save(&self, state: &AppState) -> Result<(), WriteError> {
        let content = serde_json::to_string_pretty(&model::State::from(state))
            .map_err(|err| StorageError::Other(err.into()))?;
        fs::write(&self.path, content).map_err(|err| StorageError::Other(err.into()))?;
        Ok(())
    }
}
