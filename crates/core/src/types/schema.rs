use super::signature::Scalar;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Normalised type of a schema parameter
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    Name(String),
    Union(Vec<String>),
    /// Reported as `"type": "Literal"` together with `enum_items`.
    Literal(Vec<Scalar>),
}

/// Machine-readable description of one recipe parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSchema {
    pub name: String,
    pub default: Option<Scalar>,
    pub type_spec: Option<TypeSpec>,
    /// Container name when the hint was a parameterised container; `type_spec`
    /// then describes the element type.
    pub generic_type: Option<String>,
    pub description: Option<String>,
    pub filter_glob: Option<String>,
}

impl ParameterSchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
            type_spec: None,
            generic_type: None,
            description: None,
            filter_glob: None,
        }
    }

    pub fn enum_items(&self) -> Option<&[Scalar]> {
        match &self.type_spec {
            Some(TypeSpec::Literal(items)) => Some(items),
            _ => None,
        }
    }
}

impl Serialize for ParameterSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        if let Some(generic) = &self.generic_type {
            map.serialize_entry("generic_type", generic)?;
        }
        match &self.type_spec {
            Some(TypeSpec::Name(name)) => map.serialize_entry("type", name)?,
            Some(TypeSpec::Union(members)) => map.serialize_entry("type", members)?,
            Some(TypeSpec::Literal(items)) => {
                map.serialize_entry("type", "Literal")?;
                map.serialize_entry("enum_items", items)?;
            }
            None => {}
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(glob) = &self.filter_glob {
            map.serialize_entry("filter_glob", glob)?;
        }
        map.end()
    }
}

/// What a recipe says it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDescriptor {
    pub name: String,
    pub description: String,
}

/// Everything tooling needs to build an input form for a recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDocumentation {
    pub class: String,
    /// First line of the documentation comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub inputs: IndexMap<String, ParameterSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputDescriptor>,
}
