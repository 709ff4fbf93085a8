//! Where the session token lives between runs.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("Failed to read token from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write token to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait TokenStore: Send {
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    fn save(&mut self, token: &str) -> Result<(), TokenStoreError>;

    fn clear(&mut self) -> Result<(), TokenStoreError>;
}

/// Plain-text token file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TokenStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&mut self, token: &str) -> Result<(), TokenStoreError> {
        fs::write(&self.path, token).map_err(|source| TokenStoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenStoreError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.clone())
    }

    fn save(&mut self, token: &str) -> Result<(), TokenStoreError> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TokenStoreError> {
        self.token = None;
        Ok(())
    }
}
