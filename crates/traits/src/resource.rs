//! Loading of binary assets, chiefly the letterhead image, by reference.
//!
//! The composition core never fetches anything itself. A caller resolves the
//! letterhead reference it holds (a file name, a data URL) to bytes through a
//! provider and hands those bytes to the generator.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{reference}': {message}")]
    LoadFailed { reference: String, message: String },

    #[error("Malformed resource reference: {0}")]
    InvalidReference(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Loaded bytes, shared so one letterhead can back many generations.
pub type SharedResourceData = Arc<Vec<u8>>;

/// Resolves a reference to the bytes it names.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, reference: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, reference: &str) -> bool;

    /// Short provider name for log lines.
    fn name(&self) -> &'static str;
}

/// Holds pre-registered assets. Used by tests and by hosts that already
/// keep the letterhead in memory.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    assets: RwLock<HashMap<String, SharedResourceData>>,
}

fn poisoned(reference: &str) -> ResourceError {
    ResourceError::LoadFailed {
        reference: reference.to_string(),
        message: "asset table lock poisoned".to_string(),
    }
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under `reference`, replacing any earlier entry.
    pub fn insert(&self, reference: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let reference = reference.into();
        let mut assets = self.assets.write().map_err(|_| poisoned(&reference))?;
        assets.insert(reference, Arc::new(data));
        Ok(())
    }

    pub fn remove(&self, reference: &str) -> Option<SharedResourceData> {
        self.assets.write().ok()?.remove(reference)
    }

    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, reference: &str) -> Result<SharedResourceData, ResourceError> {
        let assets = self.assets.read().map_err(|_| poisoned(reference))?;
        assets
            .get(reference)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(reference.to_string()))
    }

    fn exists(&self, reference: &str) -> bool {
        self.assets
            .read()
            .map(|a| a.contains_key(reference))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
