//! Configuration management for patchbay

mod settings;

// Re-export main types
pub use settings::Config;
