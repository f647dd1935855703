//! Save stores: where a serialized snapshot lives.
//!
//! Stores move opaque documents. Decoding and validation happen in
//! [`load`](super::load), so every store gets the same corruption handling.

use std::path::{Path, PathBuf};

use super::PersistError;

/// Backing storage for one saved game.
pub trait SaveStore {
    /// Read the saved document, or `None` if nothing was saved.
    fn read(&self) -> Result<Option<String>, PersistError>;

    /// Replace the saved document.
    fn write(&mut self, document: &str) -> Result<(), PersistError>;

    /// Forget the saved document.
    fn clear(&mut self) -> Result<(), PersistError>;
}

/// In-memory store, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    document: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a document.
    #[must_use]
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
        }
    }

    /// The raw stored document.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<(), PersistError> {
        self.document = Some(document.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.document = None;
        Ok(())
    }
}

/// JSON document on disk.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place,
/// so a crash mid-write leaves the previous save intact.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonFileStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, document: &str) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, document)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
