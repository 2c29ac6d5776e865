use crate::types::RecipeModule;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const DEFAULT_CAPACITY: usize = 64;

/// Scanned modules keyed by source path, valid while the file's digest holds
#[derive(Debug)]
pub struct ModuleCache {
    entries: LruCache<PathBuf, CacheEntry>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    module: RecipeModule,
    file_hash: String,
}

impl Default for ModuleCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl ModuleCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// The cached module for `path` if `contents` still hashes the same.
    pub fn get(&mut self, path: &Path, contents: &str) -> Option<RecipeModule> {
        let file_hash = compute_hash(contents);
        let entry = self.entries.get(path)?;
        if entry.file_hash != file_hash {
            return None;
        }
        Some(entry.module.clone())
    }

    pub fn insert(&mut self, path: PathBuf, contents: &str, module: RecipeModule) {
        let entry = CacheEntry {
            module,
            file_hash: compute_hash(contents),
        };
        self.entries.put(path, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn compute_hash(contents: &str) -> String {
    format!("{:x}", md5::compute(contents.as_bytes()))
}
