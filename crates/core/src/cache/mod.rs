//! Caching of scanned recipe sources

pub mod module_cache;

// Re-export the main cache type
pub use module_cache::ModuleCache;
