//! Signature source reading recipe files straight from a directory
//!
//! A recipe `Name` lives in `<dir>/Name.rs`. The file is never compiled or
//! loaded as code; its inherent `impl` blocks are scanned with tree-sitter.

use crate::{
    cache::ModuleCache,
    error::{Error, Result},
    interfaces::SignatureSource,
    parser::RustParser,
    types::RecipeModule,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct SourceDirectory {
    root: PathBuf,
    cache: Mutex<ModuleCache>,
}

impl SourceDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(ModuleCache::default()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, recipe: &str) -> PathBuf {
        self.root.join(format!("{recipe}.rs"))
    }

    /// Recipe names found in the directory, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("rs") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn scan(&self, recipe: &str, path: &Path, contents: &str) -> Result<RecipeModule> {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(module) = cache.get(path, contents) {
                debug!(recipe, "using cached signatures for {}", path.display());
                return Ok(module);
            }
        }

        let mut parser = RustParser::new()?;
        let module = parser
            .scan_module(contents, recipe)
            .map_err(|e| Error::load(recipe, e))?;

        match self.cache.lock() {
            Ok(mut cache) => cache.insert(path.to_path_buf(), contents, module.clone()),
            Err(_) => warn!("module cache lock poisoned, not caching {}", path.display()),
        }
        Ok(module)
    }
}

impl SignatureSource for SourceDirectory {
    fn load_module(&self, recipe: &str) -> Result<RecipeModule> {
        let path = self.path_of(recipe);
        if !path.is_file() {
            return Err(Error::NotFound(recipe.to_string()));
        }
        debug!(recipe, "scanning {}", path.display());
        let contents = fs::read_to_string(&path).map_err(|e| Error::load(recipe, e))?;
        self.scan(recipe, &path, &contents)
    }
}
