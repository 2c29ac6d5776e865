//! Built-in recipes

pub mod extract_elements;
pub mod strip_comments;
pub mod summarize_model;

use crate::registry::RecipeRegistry;

/// Register every built-in recipe.
pub fn register_all(registry: &mut RecipeRegistry) {
    registry.register(extract_elements::descriptor());
    registry.register(strip_comments::descriptor());
    registry.register(summarize_model::descriptor());
}
