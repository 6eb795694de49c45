//! Where the API key lives between calls.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::core::EvdsError;

/// Environment variable read by [`EnvCredentialStore::default`].
pub const API_KEY_ENV: &str = "EVDS_API_KEY";

/// Loads and persists the API key.
///
/// A key passed explicitly on a request is saved here when the store is empty, so
/// later requests can omit it.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, EvdsError>;
    fn save(&self, key: &str) -> Result<(), EvdsError>;
}

fn non_blank(key: &str) -> Option<String> {
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// Keeps the key for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    key: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: RwLock::new(non_blank(&key.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, EvdsError> {
        Ok(self
            .key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, key: &str) -> Result<(), EvdsError> {
        *self.key.write().unwrap_or_else(PoisonError::into_inner) = non_blank(key);
        Ok(())
    }
}

/// Stores the key as a single line in a file, creating parent directories on save.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, EvdsError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.lines().next().and_then(non_blank)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str) -> Result<(), EvdsError> {
        let key = non_blank(key)
            .ok_or_else(|| EvdsError::Credential("refusing to store a blank API key".into()))?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, format!("{key}\n"))?;
        Ok(())
    }
}

/// Reads the key from an environment variable.
///
/// Saving does not touch the environment; the saved key overrides the variable for
/// the lifetime of this store.
#[derive(Debug)]
pub struct EnvCredentialStore {
    var: String,
    saved: MemoryCredentialStore,
}

impl EnvCredentialStore {
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            saved: MemoryCredentialStore::new(),
        }
    }
}

impl Default for EnvCredentialStore {
    fn default() -> Self {
        Self::new(API_KEY_ENV)
    }
}

impl CredentialStore for EnvCredentialStore {
    fn load(&self) -> Result<Option<String>, EvdsError> {
        if let Some(key) = self.saved.load()? {
            return Ok(Some(key));
        }
        Ok(std::env::var(&self.var).ok().as_deref().and_then(non_blank))
    }

    fn save(&self, key: &str) -> Result<(), EvdsError> {
        self.saved.save(key)
    }
}
