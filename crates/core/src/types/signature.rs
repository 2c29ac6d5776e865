//! Declared shape of recipe constructors and methods.
//!
//! These types describe what a recipe accepts without running it. Built-in
//! recipes declare them when they are registered; recipes scanned from source
//! files get them from the parser.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Name of the method that builds a recipe instance.
pub const CONSTRUCTOR: &str = "new";

/// Number of leading constructor parameters fixed by the recipe contract:
/// the raw input path, the document and the diagnostic sink.
pub const CONTRACT_ARITY: usize = 3;

/// A primitive value usable as a parameter default or literal choice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<Scalar> for serde_json::Value {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Bool(b) => serde_json::Value::Bool(b),
            Scalar::Int(i) => serde_json::Value::from(i),
            Scalar::Float(f) => serde_json::Value::from(f),
            Scalar::Str(s) => serde_json::Value::String(s),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// Default value of a declared parameter
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Scalar(Scalar),
    /// Any other default, kept as source text. Never reported in schemas and
    /// bound as null.
    Expr(String),
}

impl DefaultValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            DefaultValue::Scalar(s) => Some(s),
            DefaultValue::Expr(_) => None,
        }
    }
}

/// Static type hint attached to a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum TypeHint {
    /// A plain type such as `str`, `int` or `PathBuf`.
    Named(String),
    /// A parameterised container such as `Vec<String>`.
    Generic {
        container: String,
        arguments: Vec<TypeHint>,
    },
    /// Any of the member types, in declaration order.
    Union(Vec<TypeHint>),
    /// One of a fixed set of values.
    Literal(Vec<Scalar>),
}

impl TypeHint {
    pub fn named(name: &str) -> Self {
        TypeHint::Named(name.to_string())
    }

    pub fn generic(container: &str, element: TypeHint) -> Self {
        TypeHint::Generic {
            container: container.to_string(),
            arguments: vec![element],
        }
    }

    pub fn union<I>(members: I) -> Self
    where
        I: IntoIterator<Item = TypeHint>,
    {
        TypeHint::Union(members.into_iter().collect())
    }

    pub fn literal<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        TypeHint::Literal(items.into_iter().map(Into::into).collect())
    }

    /// Short name of the hint, as reported for union members.
    pub fn type_name(&self) -> String {
        match self {
            TypeHint::Named(name) => name.clone(),
            TypeHint::Generic { container, .. } => container.clone(),
            TypeHint::Union(_) => "Union".to_string(),
            TypeHint::Literal(_) => "Literal".to_string(),
        }
    }
}

/// One declared parameter of a method
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub hint: Option<TypeHint>,
    pub default: Option<DefaultValue>,
}

impl ParamDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hint: None,
            default: None,
        }
    }

    pub fn with_hint(mut self, hint: TypeHint) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn with_default(mut self, value: impl Into<Scalar>) -> Self {
        self.default = Some(DefaultValue::Scalar(value.into()));
        self
    }

    pub fn with_default_expr(mut self, expr: &str) -> Self {
        self.default = Some(DefaultValue::Expr(expr.to_string()));
        self
    }
}

/// A method with its parameters and documentation comment
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<ParamDecl>,
}

impl MethodSignature {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: None,
            params: Vec::new(),
        }
    }

    /// The constructor signature with the three contract parameters already declared.
    pub fn constructor() -> Self {
        Self::new(CONSTRUCTOR)
            .param(ParamDecl::new("input").with_hint(TypeHint::union([
                TypeHint::named("PathBuf"),
                TypeHint::named("None"),
            ])))
            .param(ParamDecl::new("file").with_hint(TypeHint::union([
                TypeHint::named("Model"),
                TypeHint::named("None"),
            ])))
            .param(ParamDecl::new("logger").with_hint(TypeHint::named("Diagnostics")))
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Parameters after the fixed contract ones.
    pub fn recipe_params(&self) -> &[ParamDecl] {
        self.params.get(CONTRACT_ARITY..).unwrap_or(&[])
    }
}

/// A type and the methods defined on it
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSignature {
    pub name: String,
    pub methods: IndexMap<String, MethodSignature>,
}

impl ClassSignature {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            methods: IndexMap::new(),
        }
    }

    pub fn method(mut self, method: MethodSignature) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }

    pub fn constructor(&self) -> Option<&MethodSignature> {
        self.methods.get(CONSTRUCTOR)
    }
}

/// Everything one recipe unit defines
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeModule {
    pub name: String,
    pub classes: IndexMap<String, ClassSignature>,
}

impl RecipeModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            classes: IndexMap::new(),
        }
    }

    pub fn class(mut self, class: ClassSignature) -> Self {
        self.classes.insert(class.name.clone(), class);
        self
    }
}
