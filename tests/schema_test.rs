//! Integration tests for schema extraction from registered and scanned recipes

use patchbay::{
    docs::DEFAULT_EXCLUDED, extract_docs, Diagnostics, MethodSignature, ParamDecl, Recipe,
    RecipeDescriptor, RecipeInit, RecipeRegistry, Scalar, SourceDirectory, TypeHint,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

struct Inert;

impl Recipe for Inert {
    fn patch(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn take_document(&mut self) -> Option<patchbay::Model> {
        None
    }
}

fn inert(_: RecipeInit) -> anyhow::Result<Box<dyn Recipe>> {
    Ok(Box::new(Inert))
}

fn registry_with(method: MethodSignature) -> RecipeRegistry {
    let mut registry = RecipeRegistry::new();
    registry.register(RecipeDescriptor::new("Demo", inert).with_method(method));
    registry
}

#[test]
fn test_parameter_order_and_defaults() {
    let registry = registry_with(
        MethodSignature::constructor()
            .param(ParamDecl::new("a").with_hint(TypeHint::named("str")))
            .param(
                ParamDecl::new("b")
                    .with_hint(TypeHint::named("int"))
                    .with_default(5i64),
            ),
    );
    let docs = extract_docs(
        &registry,
        "Demo",
        "Patcher",
        None,
        &DEFAULT_EXCLUDED,
        &Diagnostics::new("schema"),
    )
    .unwrap();

    let names: Vec<_> = docs.inputs.keys().cloned().collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(docs.inputs["a"].default, None);
    assert_eq!(docs.inputs["b"].default, Some(Scalar::Int(5)));
}

#[test]
fn test_literal_and_union_types() {
    let registry = registry_with(
        MethodSignature::constructor()
            .param(ParamDecl::new("mode").with_hint(TypeHint::literal(["x", "y"])))
            .param(ParamDecl::new("value").with_hint(TypeHint::union([
                TypeHint::named("int"),
                TypeHint::named("str"),
            ]))),
    );
    let docs = extract_docs(
        &registry,
        "Demo",
        "Patcher",
        None,
        &DEFAULT_EXCLUDED,
        &Diagnostics::new("schema"),
    )
    .unwrap();

    assert_eq!(
        serde_json::to_value(&docs).unwrap(),
        json!({
            "class": "Patcher",
            "inputs": {
                "mode": { "name": "mode", "type": "Literal", "enum_items": ["x", "y"] },
                "value": { "name": "value", "type": ["int", "str"] }
            }
        })
    );
}

#[test]
fn test_builtin_extract_elements_schema() {
    let registry = RecipeRegistry::with_builtins();
    let docs = extract_docs(
        &registry,
        "ExtractElements",
        "Patcher",
        None,
        &DEFAULT_EXCLUDED,
        &Diagnostics::new("schema"),
    )
    .unwrap();

    assert_eq!(docs.title.as_deref(), Some("Extract certain elements into a new model"));
    let query = serde_json::to_value(&docs.inputs["query"]).unwrap();
    assert_eq!(
        query,
        json!({
            "name": "query",
            "type": "str",
            "description": "A query to select the subset of elements.",
            "filter_glob": "*.ifc"
        })
    );
    assert_eq!(
        serde_json::to_value(&docs.inputs["include_references"]).unwrap()["default"],
        json!(true)
    );
    assert_eq!(docs.output.unwrap().name, "model");
}

#[test]
fn test_scanned_source_matches_declared_shape() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("ExtractPaths.rs"),
        r#"
use std::path::PathBuf;

pub struct Patcher;

impl Patcher {
    /// Collect paths
    ///
    /// Gathers every referenced file.
    ///
    /// :param roots: Where to start
    /// :param depth: How far to follow references
    /// :filter_glob roots: *.ifc;*.ifczip
    /// :return: paths: The collected paths
    pub fn new(
        input: Option<PathBuf>,
        file: Option<Model>,
        logger: Diagnostics,
        roots: Vec<PathBuf>,
        depth: Option<u32>,
    ) -> anyhow::Result<Self> {
        Ok(Self)
    }

    pub fn patch(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
"#,
    )?;
    let source = SourceDirectory::new(dir.path());

    let docs = extract_docs(
        &source,
        "ExtractPaths",
        "Patcher",
        None,
        &DEFAULT_EXCLUDED,
        &Diagnostics::new("schema"),
    )
    .unwrap();

    assert_eq!(
        serde_json::to_value(&docs)?,
        json!({
            "class": "Patcher",
            "title": "Collect paths",
            "description": "Gathers every referenced file.",
            "inputs": {
                "roots": {
                    "name": "roots",
                    "generic_type": "Vec",
                    "type": "PathBuf",
                    "description": "Where to start",
                    "filter_glob": "*.ifc;*.ifczip"
                },
                "depth": {
                    "name": "depth",
                    "type": ["u32", "None"],
                    "description": "How far to follow references"
                }
            },
            "output": { "name": "paths", "description": "The collected paths" }
        })
    );

    let patch = extract_docs(
        &source,
        "ExtractPaths",
        "Patcher",
        Some("patch"),
        &DEFAULT_EXCLUDED,
        &Diagnostics::new("schema"),
    )
    .unwrap();
    assert!(patch.inputs.is_empty());
    Ok(())
}

#[test]
fn test_extraction_failures_are_not_raised() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Broken.rs"), "impl Patcher { pub fn new(").unwrap();
    let source = SourceDirectory::new(dir.path());
    let diagnostics = Diagnostics::new("schema");

    assert!(extract_docs(&source, "Broken", "Patcher", None, &DEFAULT_EXCLUDED, &diagnostics).is_none());
    assert!(extract_docs(&source, "Missing", "Patcher", None, &DEFAULT_EXCLUDED, &diagnostics).is_none());

    let registry = RecipeRegistry::with_builtins();
    assert!(
        extract_docs(&registry, "StripComments", "Patcher", Some("unpatch"), &DEFAULT_EXCLUDED, &diagnostics)
            .is_none()
    );
}
