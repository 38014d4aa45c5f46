//! High score persistence
//!
//! A single best score stored as a plain integer in a text file. Missing or
//! corrupt files read as 0; failed writes are logged and skipped.

use std::path::{Path, PathBuf};

use crate::persistence::{self, PersistenceError};

/// Where the best score lives
pub trait ScorePersistence {
    /// Stored value, 0 when nothing usable is stored
    fn load(&mut self) -> u32;

    /// Last loaded or stored value, without touching storage
    fn high_score(&self) -> u32;

    /// Persist `candidate` only if it beats the stored value
    fn try_set_new_high_score(&mut self, candidate: u32) -> bool;

    /// Back to 0
    fn reset(&mut self);
}

/// File-backed high score
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
    high_score: u32,
}

impl HighScoreFile {
    const DIR_NAME: &'static str = ".kill_the_frog";
    const FILE_NAME: &'static str = "highscore.txt";

    /// Open (and read) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            high_score: 0,
        };
        store.load();
        store
    }

    /// `$HOME/.kill_the_frog/highscore.txt`, or the working directory
    /// when no home is set
    pub fn default_path() -> PathBuf {
        let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
        PathBuf::from(home).join(Self::DIR_NAME).join(Self::FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<u32, PersistenceError> {
        let text = persistence::read_text(path)?;
        text.trim()
            .parse::<u32>()
            .map_err(|e| PersistenceError::parse(path, e.to_string()))
    }

    fn save(&self) {
        if let Err(e) = persistence::write_text(&self.path, &self.high_score.to_string()) {
            log::warn!("Could not save high score: {e}");
        }
    }
}

impl ScorePersistence for HighScoreFile {
    fn load(&mut self) -> u32 {
        self.high_score = match Self::read(&self.path) {
            Ok(score) => {
                log::info!("Loaded high score {score}");
                score
            }
            Err(PersistenceError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {e}");
                0
            }
        };
        self.high_score
    }

    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn try_set_new_high_score(&mut self, candidate: u32) -> bool {
        if candidate <= self.high_score {
            return false;
        }
        self.high_score = candidate;
        self.save();
        log::info!("New high score {candidate}");
        true
    }

    fn reset(&mut self) {
        self.high_score = 0;
        self.save();
    }
}

/// In-memory store for hosts without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    high_score: u32,
}

impl MemoryHighScore {
    pub fn new(initial: u32) -> Self {
        Self {
            high_score: initial,
        }
    }
}

impl ScorePersistence for MemoryHighScore {
    fn load(&mut self) -> u32 {
        self.high_score
    }

    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn try_set_new_high_score(&mut self, candidate: u32) -> bool {
        if candidate > self.high_score {
            self.high_score = candidate;
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        self.high_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_stored_value_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.txt");
        std::fs::write(&path, "40").unwrap();

        let mut store = HighScoreFile::open(&path);
        assert_eq!(store.high_score(), 40);
        assert!(store.try_set_new_high_score(50));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "50");
        assert!(!store.try_set_new_high_score(50));
        assert_eq!(store.load(), 50);
    }

    #[test]
    fn test_missing_and_corrupt_read_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut missing = HighScoreFile::open(dir.path().join("none.txt"));
        assert_eq!(missing.load(), 0);

        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "not a number").unwrap();
        assert_eq!(HighScoreFile::open(&path).high_score(), 0);
    }

    #[test]
    fn test_creates_directory_on_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("highscore.txt");
        let mut store = HighScoreFile::open(&path);
        assert!(store.try_set_new_high_score(7));
        assert_eq!(HighScoreFile::open(&path).high_score(), 7);
    }

    #[test]
    fn test_unwritable_path_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail
        let path = dir.path().join("blocked");
        std::fs::create_dir(&path).unwrap();
        let mut store = HighScoreFile::open(&path);
        assert_eq!(store.high_score(), 0);
        assert!(store.try_set_new_high_score(10));
        assert_eq!(store.high_score(), 10);
    }

    #[test]
    fn test_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.txt");
        let mut store = HighScoreFile::open(&path);
        store.try_set_new_high_score(99);
        store.reset();
        assert_eq!(HighScoreFile::open(&path).high_score(), 0);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScore::new(40);
        assert!(store.try_set_new_high_score(50));
        assert!(!store.try_set_new_high_score(50));
        assert_eq!(store.load(), 50);
    }
}
