//! Lazily loaded, shared key mapping
//!
//! The mapping is needed by every resolved table but only has to be read
//! once. [`KeyMappingCache`] owns that load: the first [`KeyMappingCache::get`]
//! parses the source under a lock, later calls hand out the same
//! `Arc<KeyMapping>`. Caches are ordinary values so tests can build their own
//! around an in-memory mapping. A process-wide instance can be installed once
//! with [`install_global`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::error::Result;
use crate::formats::mapping::{KeyMapping, parse_mapping_bytes, read_mapping};

/// Where a cache gets its mapping from
#[derive(Debug, Clone)]
pub enum MappingSource {
    /// A mapping file on disk
    File(PathBuf),
    /// Raw mapping bytes, e.g. embedded with `include_bytes!`
    Bytes(Arc<[u8]>),
    /// An already-built mapping
    Preloaded(Arc<KeyMapping>),
}

/// At-most-once loader for a [`KeyMapping`]
#[derive(Debug)]
pub struct KeyMappingCache {
    source: MappingSource,
    loaded: Mutex<Option<Arc<KeyMapping>>>,
}

impl KeyMappingCache {
    pub fn new(source: MappingSource) -> Self {
        Self {
            source,
            loaded: Mutex::new(None),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(MappingSource::File(path.into()))
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(MappingSource::Bytes(bytes.into()))
    }

    pub fn preloaded(mapping: KeyMapping) -> Self {
        Self::new(MappingSource::Preloaded(Arc::new(mapping)))
    }

    #[must_use]
    pub fn source(&self) -> &MappingSource {
        &self.source
    }

    /// The mapping, loading it on first use
    ///
    /// Concurrent first callers block on the same lock, so the source is
    /// parsed at most once per successful load.
    ///
    /// # Errors
    /// Returns the load error. Nothing is cached on failure.
    pub fn get(&self) -> Result<Arc<KeyMapping>> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mapping) = loaded.as_ref() {
            return Ok(Arc::clone(mapping));
        }

        let mapping = match &self.source {
            MappingSource::File(path) => {
                tracing::info!("Loading key mapping from {}", path.display());
                Arc::new(read_mapping(path)?)
            }
            MappingSource::Bytes(bytes) => Arc::new(parse_mapping_bytes(bytes)?),
            MappingSource::Preloaded(mapping) => Arc::clone(mapping),
        };
        *loaded = Some(Arc::clone(&mapping));
        Ok(mapping)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drop the cached mapping; the next `get` reloads from the source
    pub fn reset(&self) {
        *self.loaded.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

static GLOBAL_CACHE: OnceLock<KeyMappingCache> = OnceLock::new();

/// Install the process-wide cache
///
/// Returns the cache back if one was already installed.
pub fn install_global(cache: KeyMappingCache) -> std::result::Result<(), KeyMappingCache> {
    GLOBAL_CACHE.set(cache)
}

/// The process-wide cache, if installed
pub fn global() -> Option<&'static KeyMappingCache> {
    GLOBAL_CACHE.get()
}
