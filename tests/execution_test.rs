//! Integration tests for recipe execution and output writing

use patchbay::{
    Error, ExecutionRequest, InputPolicy, Model, Output, Recipe, RecipeDescriptor,
    RecipeInit, RecipeRegistry, RecipeRunner,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const MODEL: &str = "ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCCARTESIANPOINT((0.,0.,0.));
#2=IFCAXIS2PLACEMENT3D(#1,$,$);
#10=IFCWALL('2O2Fr$t4X7Zf8NOew3FL9r',$,'Wall A',$,$,#2,$,$,$);
#11=IFCSLAB('1s5utE$rDDfRKgzV6jUJ3d',$,'Slab',$,$,$,$,$,$);
ENDSEC;
END-ISO-10303-21;
";

fn model() -> Model {
    Model::parse(MODEL).unwrap()
}

#[test]
fn test_extract_elements_end_to_end() {
    let runner = RecipeRunner::new();
    assert_eq!(
        runner.registry().input_policy_of("ExtractElements").unwrap(),
        InputPolicy::Ignored
    );

    let request = ExecutionRequest::new("ExtractElements")
        .with_document(model())
        .with_arguments([json!(".IfcWall")]);
    let output = runner.execute(request).unwrap().unwrap();

    let extracted = output.as_document().unwrap();
    let ids: Vec<u64> = extracted.entities().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 10]);
    assert_eq!(extracted.schema().as_deref(), Some("IFC4"));
}

#[test]
fn test_validation_precedes_construction() {
    let runner = RecipeRunner::new();

    let err = runner
        .execute(ExecutionRequest::new("ExtractElements").with_input("model.ifc"))
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    let err = runner
        .execute(ExecutionRequest::new("StripComments").with_document(model()))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Recipe StripComments is requiring 'input' argument to be provided."
    );
}

#[test]
fn test_recipe_errors_surface_unchanged() {
    let runner = RecipeRunner::new();
    let request = ExecutionRequest::new("ExtractElements")
        .with_document(model())
        .with_arguments([json!("walls")]);
    let err = runner.execute(request).unwrap_err();
    assert!(matches!(err, Error::Recipe(_)));
    assert_eq!(err.to_string(), "unsupported selector 'walls' in query 'walls'");
}

#[test]
fn test_strip_comments_result_is_moved_by_writer() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("model.ifc");
    fs::write(&input, MODEL.replace("DATA;", "DATA;\n/* exported */"))?;

    let runner = RecipeRunner::new();
    let result = runner.execute(ExecutionRequest::new("StripComments").with_input(&input))?;
    let Some(Output::Text(temp_path)) = &result else {
        anyhow::bail!("expected a path, got {result:?}");
    };
    let temp_path = std::path::PathBuf::from(temp_path);
    assert!(temp_path.exists());

    let target = dir.path().join("clean.ifc");
    patchbay::write(&result, &target)?;

    assert!(!temp_path.exists());
    let written = fs::read_to_string(&target)?;
    assert!(!written.contains("exported"));
    assert_eq!(Model::parse(&written)?, model());
    Ok(())
}

#[test]
fn test_summary_text_is_written_verbatim() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let runner = RecipeRunner::new();
    let request = ExecutionRequest::new("SummarizeModel")
        .with_document(model())
        .with_arguments([json!("text"), json!(2)]);
    let result = runner.execute(request)?;

    let target = dir.path().join("summary.txt");
    patchbay::write(&result, &target)?;
    assert_eq!(
        fs::read_to_string(&target)?,
        "4 entities (IFC4)\nIFCAXIS2PLACEMENT3D: 1\nIFCCARTESIANPOINT: 1\n"
    );
    Ok(())
}

#[test]
fn test_log_applies_to_one_call_only() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let log = dir.path().join("patchbay.log");
    let runner = RecipeRunner::new();

    runner.execute(
        ExecutionRequest::new("ExtractElements")
            .with_document(model())
            .with_arguments([json!("#11")])
            .with_log(&log),
    )?;
    runner.execute(
        ExecutionRequest::new("ExtractElements")
            .with_document(model())
            .with_arguments([json!("#10")]),
    )?;

    let contents = fs::read_to_string(&log)?;
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.starts_with("INFO:ExtractElements:extracted 1 elements (1 with references) of 4"));
    Ok(())
}

struct Passthrough(Option<Model>);

impl Recipe for Passthrough {
    fn patch(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn take_document(&mut self) -> Option<Model> {
        self.0.take()
    }
}

fn passthrough(init: RecipeInit) -> anyhow::Result<Box<dyn Recipe>> {
    init.logger.debug("passthrough built");
    Ok(Box::new(Passthrough(init.document)))
}

#[test]
fn test_custom_recipe_without_patched_output_returns_document() {
    let mut registry = RecipeRegistry::with_builtins();
    registry.register(
        RecipeDescriptor::new("Passthrough", passthrough).with_input_policy(InputPolicy::Supported),
    );
    let runner = RecipeRunner::with_registry(registry);

    let output = runner
        .execute(
            ExecutionRequest::new("Passthrough")
                .with_input("model.ifc")
                .with_document(model()),
        )
        .unwrap()
        .unwrap();
    assert_eq!(output.as_document(), Some(&model()));
}
