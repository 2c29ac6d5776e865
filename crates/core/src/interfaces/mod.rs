//! Core interfaces between the framework and recipes
//!
//! Recipes are trusted collaborators: the framework builds them, runs them
//! and reads their result, nothing more.

pub mod recipe;
pub mod signature_source;

pub use recipe::{BoundArguments, Recipe, RecipeArguments, RecipeFactory, RecipeInit};
pub use signature_source::SignatureSource;
