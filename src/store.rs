//! Client-side persistence.
//!
//! Two keys, two lifecycles: the hunt session blob lives and dies with a
//! single game (cleared on reset), the best time outlives every game and is
//! only ever replaced by a faster run. [`MemoryStore`] backs tests,
//! [`FileStore`] is the on-disk analog of the browser's storage.

use std::fs;
use std::path::PathBuf;

use crate::hunt::SavedHunt;

/// Errors from the persistence layer. Callers treat every variant as
/// recoverable; a hunt that cannot be loaded becomes a fresh hunt.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("stored best time is not a number: {0}")]
    BadBestTime(#[from] std::num::ParseIntError),
}

/// Session blob plus long-lived best time.
pub trait StateStore {
    fn save_hunt(&mut self, saved: &SavedHunt) -> Result<(), StoreError>;
    /// `Ok(None)` when no hunt has been saved. A present-but-corrupt blob
    /// is an `Err`, which callers map to a reset.
    fn load_hunt(&self) -> Result<Option<SavedHunt>, StoreError>;
    fn clear_hunt(&mut self) -> Result<(), StoreError>;

    fn best_time_ms(&self) -> Result<Option<u64>, StoreError>;
    fn save_best_time_ms(&mut self, ms: u64) -> Result<(), StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for &mut S {
    fn save_hunt(&mut self, saved: &SavedHunt) -> Result<(), StoreError> {
        (**self).save_hunt(saved)
    }

    fn load_hunt(&self) -> Result<Option<SavedHunt>, StoreError> {
        (**self).load_hunt()
    }

    fn clear_hunt(&mut self) -> Result<(), StoreError> {
        (**self).clear_hunt()
    }

    fn best_time_ms(&self) -> Result<Option<u64>, StoreError> {
        (**self).best_time_ms()
    }

    fn save_best_time_ms(&mut self, ms: u64) -> Result<(), StoreError> {
        (**self).save_best_time_ms(ms)
    }
}

/// In-memory store. Keeps the hunt as serialized JSON so tests exercise the
/// same serialization path the file store does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    hunt: Option<String>,
    best_time: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn save_hunt(&mut self, saved: &SavedHunt) -> Result<(), StoreError> {
        self.hunt = Some(serde_json::to_string(saved)?);
        Ok(())
    }

    fn load_hunt(&self) -> Result<Option<SavedHunt>, StoreError> {
        match &self.hunt {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn clear_hunt(&mut self) -> Result<(), StoreError> {
        self.hunt = None;
        Ok(())
    }

    fn best_time_ms(&self) -> Result<Option<u64>, StoreError> {
        Ok(self.best_time)
    }

    fn save_best_time_ms(&mut self, ms: u64) -> Result<(), StoreError> {
        self.best_time = Some(ms);
        Ok(())
    }
}

const HUNT_FILE: &str = "hunt.json";
const BEST_TIME_FILE: &str = "best_time";

/// Directory-backed store: `hunt.json` for the session, `best_time` for the
/// record, matching the two-key split of the original storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_optional(&self, file: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(file)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl StateStore for FileStore {
    fn save_hunt(&mut self, saved: &SavedHunt) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(HUNT_FILE), serde_json::to_string(saved)?)?;
        Ok(())
    }

    fn load_hunt(&self) -> Result<Option<SavedHunt>, StoreError> {
        match self.read_optional(HUNT_FILE)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn clear_hunt(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(self.path(HUNT_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn best_time_ms(&self) -> Result<Option<u64>, StoreError> {
        match self.read_optional(BEST_TIME_FILE)? {
            Some(contents) => Ok(Some(contents.trim().parse::<u64>()?)),
            None => Ok(None),
        }
    }

    fn save_best_time_ms(&mut self, ms: u64) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(BEST_TIME_FILE), ms.to_string())?;
        Ok(())
    }
}
