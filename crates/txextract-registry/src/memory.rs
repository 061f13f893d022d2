//! In-memory `MethodResolver` implementation.
//!
//! Loaded once from JSON ABI documents, then read concurrently by the
//! extractor. Thread-safe via `Arc<RwLock<Inner>>`.

use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::Selector;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::debug;
use txextract_core::{
    error::RegistryError,
    method::{MethodDescription, MethodResolver},
};

struct Inner {
    by_selector: HashMap<Selector, MethodDescription>,
}

/// Thread-safe in-memory selector registry.
#[derive(Clone)]
pub struct MemoryRegistry {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                by_selector: HashMap::new(),
            })),
        }
    }

    /// Register one function.
    ///
    /// Returns `Ok(false)` when the identical signature is already present
    /// (ERC-20 entries repeat across ABIs). A different signature that
    /// collides on the selector is rejected.
    pub fn add(&self, function: Function) -> Result<bool, RegistryError> {
        let description = MethodDescription::new(function);
        let mut inner = self.write();
        if let Some(existing) = inner.by_selector.get(&description.selector) {
            if existing.function.signature() == description.function.signature() {
                return Ok(false);
            }
            return Err(RegistryError::AlreadyExists {
                selector: description.selector_hex(),
                existing: existing.function.signature(),
            });
        }
        debug!(
            "registry add {} {}",
            description.selector_hex(),
            description.function.signature()
        );
        inner.by_selector.insert(description.selector, description);
        Ok(true)
    }

    /// Load every function of a JSON ABI document.
    ///
    /// Returns the number of newly registered selectors.
    pub fn load_abi_json(&self, json: &str) -> Result<usize, RegistryError> {
        let abi: JsonAbi = serde_json::from_str(json).map_err(|e| RegistryError::InvalidAbi {
            reason: e.to_string(),
        })?;
        let mut count = 0;
        for function in abi.functions() {
            if self.add(function.clone())? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Load a single `.json` ABI file.
    pub fn load_file(&self, path: &Path) -> Result<usize, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(RegistryError::Io)?;
        self.load_abi_json(&content)
            .map_err(|e| match e {
                RegistryError::InvalidAbi { reason } => RegistryError::InvalidAbi {
                    reason: format!("{}: {reason}", path.display()),
                },
                other => other,
            })
    }

    /// Load all `.json` ABI files from a directory recursively.
    ///
    /// Files are visited in path order so selector conflicts are reported
    /// deterministically.
    pub fn load_directory(&self, dir: &Path) -> Result<usize, RegistryError> {
        let mut files = walkdir_json(dir)?;
        files.sort();
        let mut count = 0;
        for path in files {
            count += self.load_file(&path)?;
        }
        Ok(count)
    }

    /// Returns the number of registered selectors.
    pub fn len(&self) -> usize {
        self.read().by_selector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered descriptions, ordered by method name then selector.
    pub fn descriptions(&self) -> Vec<MethodDescription> {
        let mut all: Vec<MethodDescription> = self.read().by_selector.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()).then(a.selector.cmp(&b.selector)));
        all
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodResolver for MemoryRegistry {
    fn resolve(&self, selector: &Selector) -> Option<MethodDescription> {
        self.read().by_selector.get(selector).cloned()
    }
}

/// Collect all `.json` files under `dir` recursively.
fn walkdir_json(dir: &Path) -> Result<Vec<PathBuf>, RegistryError> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Err(RegistryError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", dir.display()),
        )));
    }
    for entry in std::fs::read_dir(dir).map_err(RegistryError::Io)? {
        let entry = entry.map_err(RegistryError::Io)?;
        let path = entry.path();
        if path.is_dir() {
            files.extend(walkdir_json(&path)?);
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(path);
        }
    }
    Ok(files)
}
