//! Where schema extraction reads recipe signatures from

use crate::{error::Result, types::RecipeModule};

/// Loads the declared signatures of a recipe unit by name
pub trait SignatureSource {
    /// Load the unit named `recipe`.
    ///
    /// Fails with `NotFound` when no such unit exists and with `Load` when it
    /// exists but cannot be read.
    fn load_module(&self, recipe: &str) -> Result<RecipeModule>;
}
