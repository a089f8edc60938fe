//! Persistent best score
//!
//! A single integer cell: read once when the game starts, written when a run
//! beats it. Stored as plain decimal text (LocalStorage on the web, a file
//! natively).

/// Errors raised by high-score backends
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing storage could not be reached (private browsing, no window).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value is not a non-negative integer.
    #[error("stored high score is not a number: {0:?}")]
    Corrupt(String),
}

/// External key-value cell holding the best score
pub trait HighScoreStore {
    /// Current best; a missing value reads as 0
    fn read(&self) -> Result<u64, StoreError>;
    fn write(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Parse the stored text form
fn parse_score(raw: &str) -> Result<u64, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| StoreError::Corrupt(raw.to_string()))
}

/// In-memory store (tests, headless demo)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub score: u64,
    /// Number of successful writes
    pub writes: u32,
}

impl MemoryStore {
    pub fn new(score: u64) -> Self {
        Self { score, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> Result<u64, StoreError> {
        Ok(self.score)
    }

    fn write(&mut self, score: u64) -> Result<(), StoreError> {
        self.score = score;
        self.writes += 1;
        Ok(())
    }
}

/// Plain text file holding the best score (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn read(&self) -> Result<u64, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => parse_score(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, score: u64) -> Result<(), StoreError> {
        std::fs::write(&self.path, score.to_string())?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage cell (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappy_etka_high_score";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("LocalStorage disabled".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn read(&self) -> Result<u64, StoreError> {
        let raw = Self::storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        match raw {
            Some(raw) => parse_score(&raw),
            None => Ok(0),
        }
    }

    fn write(&mut self, score: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}
