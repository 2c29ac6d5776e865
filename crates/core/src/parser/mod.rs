//! Rust source scanning using tree-sitter

pub mod rust_parser;
pub mod signature_scanner;
pub mod utils;

// Re-export commonly used items
pub use rust_parser::RustParser;
pub use signature_scanner::SignatureScanner;
pub use utils::find_doc_comments_before;
