//! Capability contract every recipe implements

use crate::{
    diagnostics::Diagnostics,
    model::Model,
    types::{CallingConvention, MethodSignature, Output},
};
use anyhow::{anyhow, bail};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;

/// A recipe instance, built from a [`RecipeInit`] by its factory
pub trait Recipe {
    /// Run the transformation, updating the instance's own state.
    fn patch(&mut self) -> anyhow::Result<()>;

    /// The patched result, when the recipe produces one distinct from its
    /// input document.
    fn take_patched(&mut self) -> Option<Output> {
        None
    }

    /// The document the recipe was built with, possibly modified in place.
    fn take_document(&mut self) -> Option<Model>;
}

/// Builds a recipe instance
pub type RecipeFactory = fn(RecipeInit) -> anyhow::Result<Box<dyn Recipe>>;

/// Everything a recipe constructor receives
#[derive(Debug)]
pub struct RecipeInit {
    pub input: Option<PathBuf>,
    pub document: Option<Model>,
    pub logger: Diagnostics,
    pub arguments: RecipeArguments,
}

/// Caller arguments, shaped by the recipe's calling convention
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeArguments {
    /// One value per constructor parameter.
    Spread(Vec<Value>),
    /// A single list-valued parameter.
    List(Vec<Value>),
}

impl RecipeArguments {
    pub fn arrange(convention: CallingConvention, values: Vec<Value>) -> Self {
        match convention {
            CallingConvention::Variadic => RecipeArguments::Spread(values),
            CallingConvention::ListArguments => RecipeArguments::List(values),
        }
    }

    pub fn values(&self) -> &[Value] {
        match self {
            RecipeArguments::Spread(values) | RecipeArguments::List(values) => values,
        }
    }

    /// Bind the arguments to the parameters `constructor` declares after the
    /// contract ones.
    pub fn bind(self, constructor: &MethodSignature) -> anyhow::Result<BoundArguments> {
        let params = constructor.recipe_params();
        let mut bound = IndexMap::new();

        match self {
            RecipeArguments::Spread(values) => {
                if values.len() > params.len() {
                    bail!(
                        "{}() takes {} positional arguments but {} were given",
                        constructor.name,
                        params.len(),
                        values.len()
                    );
                }
                let mut values = values.into_iter();
                for param in params {
                    let value = match values.next() {
                        Some(value) => value,
                        // Defaults that are not primitives bind as null and
                        // are resolved by the recipe
                        None => param
                            .default
                            .as_ref()
                            .map(|d| d.as_scalar().cloned().map_or(Value::Null, Value::from))
                            .ok_or_else(|| {
                                anyhow!(
                                    "{}() missing required argument: '{}'",
                                    constructor.name,
                                    param.name
                                )
                            })?,
                    };
                    bound.insert(param.name.clone(), value);
                }
            }
            RecipeArguments::List(values) => {
                let [param] = params else {
                    bail!(
                        "{}() must declare exactly one list parameter, found {}",
                        constructor.name,
                        params.len()
                    );
                };
                bound.insert(param.name.clone(), Value::Array(values));
            }
        }

        Ok(BoundArguments { values: bound })
    }
}

/// Arguments matched to parameter names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    values: IndexMap<String, Value>,
}

impl BoundArguments {
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> anyhow::Result<T> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| anyhow!("no argument bound to '{name}'"))?;
        serde_json::from_value(value.clone())
            .map_err(|e| anyhow!("argument '{name}' has the wrong type: {e}"))
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParamDecl, TypeHint};
    use serde_json::json;

    fn constructor() -> MethodSignature {
        MethodSignature::constructor()
            .param(ParamDecl::new("a").with_hint(TypeHint::named("str")))
            .param(
                ParamDecl::new("b")
                    .with_hint(TypeHint::named("int"))
                    .with_default(5i64),
            )
    }

    #[test]
    fn test_spread_binds_positionally_with_defaults() {
        let bound = RecipeArguments::Spread(vec![json!("x")])
            .bind(&constructor())
            .unwrap();
        assert_eq!(bound.get::<String>("a").unwrap(), "x");
        assert_eq!(bound.get::<i64>("b").unwrap(), 5);
    }

    #[test]
    fn test_spread_overrides_default() {
        let bound = RecipeArguments::Spread(vec![json!("x"), json!(9)])
            .bind(&constructor())
            .unwrap();
        assert_eq!(bound.get::<i64>("b").unwrap(), 9);
    }

    #[test]
    fn test_spread_rejects_missing_and_extra_arguments() {
        let err = RecipeArguments::Spread(vec![])
            .bind(&constructor())
            .unwrap_err();
        assert!(err.to_string().contains("missing required argument: 'a'"));

        let err = RecipeArguments::Spread(vec![json!(1), json!(2), json!(3)])
            .bind(&constructor())
            .unwrap_err();
        assert!(err.to_string().contains("takes 2 positional arguments but 3 were given"));
    }

    #[test]
    fn test_expression_default_binds_as_null() {
        let ctor = MethodSignature::constructor()
            .param(ParamDecl::new("limit").with_default_expr("None"));
        let bound = RecipeArguments::Spread(vec![]).bind(&ctor).unwrap();
        assert_eq!(bound.get::<Option<i64>>("limit").unwrap(), None);
    }

    #[test]
    fn test_list_binds_to_single_parameter() {
        let ctor = MethodSignature::constructor().param(ParamDecl::new("args"));
        let bound = RecipeArguments::List(vec![json!("a"), json!("b")])
            .bind(&ctor)
            .unwrap();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound.get::<Vec<String>>("args").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_list_requires_exactly_one_parameter() {
        assert!(RecipeArguments::List(vec![]).bind(&constructor()).is_err());
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let bound = RecipeArguments::Spread(vec![json!("x"), json!("many")])
            .bind(&constructor())
            .unwrap();
        let err = bound.get::<i64>("b").unwrap_err();
        assert!(err.to_string().contains("argument 'b' has the wrong type"));
    }

    #[test]
    fn test_arrange_follows_convention() {
        assert_eq!(
            RecipeArguments::arrange(CallingConvention::Variadic, vec![json!(1)]),
            RecipeArguments::Spread(vec![json!(1)])
        );
        assert_eq!(
            RecipeArguments::arrange(CallingConvention::ListArguments, vec![json!(1)]),
            RecipeArguments::List(vec![json!(1)])
        );
    }
}
