//! Signature sources backed by the filesystem

pub mod source_directory;

pub use source_directory::SourceDirectory;
