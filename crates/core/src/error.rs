use std::io;

/// Errors that can occur while resolving, running or describing recipes
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Recipe {recipe} is requiring {message}")]
    Validation { recipe: String, message: String },

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Recipe {recipe} could not load because: {message}")]
    Load { recipe: String, message: String },

    #[error("{class} has no method '{method}'")]
    Documentation { class: String, method: String },

    /// Anything raised by a recipe while it is built or run.
    #[error(transparent)]
    Recipe(#[from] anyhow::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(recipe: &str, message: impl Into<String>) -> Self {
        Error::Validation {
            recipe: recipe.to_string(),
            message: message.into(),
        }
    }

    pub fn load(recipe: &str, message: impl std::fmt::Display) -> Self {
        Error::Load {
            recipe: recipe.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for patchbay operations
pub type Result<T> = std::result::Result<T, Error>;
