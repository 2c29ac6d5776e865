//! patchbay - run named patch recipes over building models
//!
//! This crate provides functionality to:
//! - Resolve recipes by name and execute them against a model or raw file
//! - Write whatever a recipe produced to a target path
//! - Describe a recipe's parameters for form and CLI generation, from
//!   registered metadata or by scanning recipe source files
pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod docs;
pub mod error;
pub mod interfaces;
pub mod model;
pub mod parser;
pub mod recipes;
pub mod registry;
pub mod runner;
pub mod services;
pub mod types;
pub mod writer;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use diagnostics::Diagnostics;
pub use docs::extract_docs;
pub use interfaces::{Recipe, RecipeArguments, RecipeInit, SignatureSource};
pub use model::{Entity, Model};
pub use registry::{RecipeDescriptor, RecipeRegistry};
pub use runner::RecipeRunner;
pub use services::SourceDirectory;
pub use writer::write;
