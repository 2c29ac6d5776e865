use crate::{error::Result, model::Model};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A request to run one recipe
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub recipe: String,
    /// Raw path of the incoming model file.
    pub input: Option<PathBuf>,
    /// Already parsed model to patch.
    pub document: Option<Model>,
    /// File that receives this call's diagnostics.
    pub log: Option<PathBuf>,
    pub arguments: Vec<Value>,
}

impl ExecutionRequest {
    pub fn new(recipe: &str) -> Self {
        Self {
            recipe: recipe.to_string(),
            input: None,
            document: None,
            log: None,
            arguments: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_document(mut self, document: Model) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_log(mut self, log: impl Into<PathBuf>) -> Self {
        self.log = Some(log.into());
        self
    }

    pub fn with_arguments<I, V>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a non-empty raw input path was supplied.
    pub fn has_input(&self) -> bool {
        self.input
            .as_deref()
            .is_some_and(|p| !p.as_os_str().is_empty())
    }
}

/// On-disk form of a request, with `file` naming a model to open
#[derive(Debug, Clone, Deserialize)]
pub struct RequestFile {
    pub recipe: String,
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub log: Option<PathBuf>,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl RequestFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Open the referenced model and build the request.
    pub fn into_request(self) -> Result<ExecutionRequest> {
        let document = match &self.file {
            Some(path) => Some(Model::open(path)?),
            None => None,
        };
        Ok(ExecutionRequest {
            recipe: self.recipe,
            input: self.input,
            document,
            log: self.log,
            arguments: self.arguments,
        })
    }
}

/// What a recipe hands back
#[derive(Debug, Clone)]
pub enum Output {
    Document(Model),
    /// Literal content, or the path of a file the recipe already wrote.
    Text(String),
}

impl Output {
    pub fn as_document(&self) -> Option<&Model> {
        match self {
            Output::Document(model) => Some(model),
            Output::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Document(_) => None,
        }
    }
}

/// Result of one execution; `None` when the recipe produced nothing.
pub type ExecutionResult = Option<Output>;
