//! Schema extraction: turns declared recipe signatures and their
//! documentation comments into a [`RecipeDocumentation`].

pub mod parser;

use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
    interfaces::SignatureSource,
    types::{
        ClassSignature, DefaultValue, MethodSignature, ParameterSchema, RecipeDocumentation,
        TypeHint, TypeSpec, CONSTRUCTOR,
    },
};
use indexmap::IndexMap;

/// Parameter names the framework passes to every constructor.
pub const DEFAULT_EXCLUDED: [&str; 3] = ["input", "file", "logger"];

/// Describe `method` (the constructor when `None`) of `class_name` in `recipe`.
///
/// Never fails: any problem is reported as a warning on `diagnostics` and
/// yields `None`.
pub fn extract_docs<S: AsRef<str>>(
    source: &dyn SignatureSource,
    recipe: &str,
    class_name: &str,
    method_name: Option<&str>,
    excluded: &[S],
    diagnostics: &Diagnostics,
) -> Option<RecipeDocumentation> {
    let method_name = method_name.unwrap_or(CONSTRUCTOR);
    match try_extract(source, recipe, class_name, method_name, excluded) {
        Ok(documentation) => {
            diagnostics.debug(format!(
                "described {class_name}::{method_name} with {} inputs",
                documentation.inputs.len()
            ));
            Some(documentation)
        }
        Err(err) => {
            diagnostics.warning(format!("Failed to extract docs for {recipe}: {err}"));
            None
        }
    }
}

fn try_extract<S: AsRef<str>>(
    source: &dyn SignatureSource,
    recipe: &str,
    class_name: &str,
    method_name: &str,
    excluded: &[S],
) -> Result<RecipeDocumentation> {
    let module = source.load_module(recipe)?;
    let class = module
        .classes
        .get(class_name)
        .ok_or_else(|| Error::NotFound(format!("{recipe}::{class_name}")))?;
    let method = class
        .methods
        .get(method_name)
        .ok_or_else(|| Error::Documentation {
            class: class_name.to_string(),
            method: method_name.to_string(),
        })?;
    Ok(describe(class, method, excluded))
}

/// Build the documentation of one method.
pub fn describe<S: AsRef<str>>(
    class: &ClassSignature,
    method: &MethodSignature,
    excluded: &[S],
) -> RecipeDocumentation {
    let is_excluded = |name: &str| excluded.iter().any(|e| e.as_ref() == name);

    let mut inputs = IndexMap::new();
    for param in &method.params {
        if param.name == "self" || is_excluded(&param.name) {
            continue;
        }
        let mut schema = ParameterSchema::new(&param.name);
        schema.default = param
            .default
            .as_ref()
            .and_then(DefaultValue::as_scalar)
            .cloned();
        if let Some(hint) = &param.hint {
            apply_hint(&mut schema, hint);
        }
        inputs.insert(param.name.clone(), schema);
    }

    let mut documentation = RecipeDocumentation {
        class: class.name.clone(),
        title: None,
        description: None,
        inputs,
        output: None,
    };

    if let Some(doc) = &method.doc {
        let parsed = parser::parse(doc);
        documentation.title = parsed.title;
        documentation.description = Some(parsed.description);
        documentation.output = parsed.output;
        for (name, description) in parsed.params {
            if let Some(schema) = documentation.inputs.get_mut(&name) {
                schema.description = Some(description);
            }
        }
        for (name, glob) in parsed.filter_globs {
            if let Some(schema) = documentation.inputs.get_mut(&name) {
                schema.filter_glob = Some(glob);
            }
        }
    }

    documentation
}

/// Record `hint` on `schema`; a container hint is unwrapped to its element.
fn apply_hint(schema: &mut ParameterSchema, hint: &TypeHint) {
    let hint = match hint {
        TypeHint::Generic {
            container,
            arguments,
        } => {
            schema.generic_type = Some(container.clone());
            match arguments.first() {
                Some(element) => element,
                None => return,
            }
        }
        other => other,
    };

    schema.type_spec = Some(match hint {
        TypeHint::Union(members) => TypeSpec::Union(members.iter().map(TypeHint::type_name).collect()),
        TypeHint::Literal(items) => TypeSpec::Literal(items.clone()),
        other => TypeSpec::Name(other.type_name()),
    });
}
