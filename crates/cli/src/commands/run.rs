use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use patchbay_core::{
    Config, ExecutionRequest, ExecutionResult, InputPolicy, Model, Output, RecipeRunner,
    RequestFile,
};

use crate::utils::parse_argument;

/// Options of `patchbay run`
#[derive(Debug, Default)]
pub struct RunOptions {
    pub recipe: Option<String>,
    pub arguments: Vec<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub log: Option<PathBuf>,
    pub request: Option<PathBuf>,
}

pub fn run_command(options: RunOptions) -> Result<()> {
    let config = Config::discover(&std::env::current_dir()?)?;
    let runner = RecipeRunner::new();

    let mut request = build_request(&runner, &options)?;
    if request.log.is_none() {
        request.log = config.log.clone();
    }
    debug!(
        recipe = %request.recipe,
        arguments = request.arguments.len(),
        "running recipe"
    );

    let result = runner.execute(request)?;

    match (&options.output, result) {
        (Some(path), result) => {
            patchbay_core::write(&result, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote result to {}", path.display());
        }
        (None, result) => print_result(result, &mut std::io::stdout().lock())?,
    }
    Ok(())
}

/// Stream a result to `out` the way `write` would store it: text naming an
/// existing file is replaced by that file's contents, and the file is
/// consumed.
fn print_result(result: ExecutionResult, out: &mut impl Write) -> Result<()> {
    match result {
        Some(Output::Text(text)) if Path::new(&text).is_file() => {
            let path = Path::new(&text);
            let contents =
                fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            out.write_all(&contents)?;
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Some(Output::Text(text)) if text.ends_with('\n') => write!(out, "{text}")?,
        Some(Output::Text(text)) => writeln!(out, "{text}")?,
        Some(Output::Document(model)) => out.write_all(model.to_step().as_bytes())?,
        None => info!("recipe produced nothing"),
    }
    out.flush()?;
    Ok(())
}

fn build_request(runner: &RecipeRunner, options: &RunOptions) -> Result<ExecutionRequest> {
    let arguments = options.arguments.iter().map(|a| parse_argument(a));

    let Some(request_path) = &options.request else {
        let Some(recipe) = &options.recipe else {
            bail!("a recipe name or --request is required");
        };
        let mut request = ExecutionRequest::new(recipe).with_arguments(arguments);
        if let Some(input) = &options.input {
            request = attach_input(runner, request, input)?;
        }
        request.log = options.log.clone();
        return Ok(request);
    };

    let mut request = RequestFile::load(request_path)
        .and_then(RequestFile::into_request)
        .with_context(|| format!("Failed to load request {}", request_path.display()))?;
    if let Some(recipe) = &options.recipe {
        if *recipe != request.recipe {
            bail!(
                "recipe '{recipe}' conflicts with '{}' from {}",
                request.recipe,
                request_path.display()
            );
        }
    }
    request.arguments.extend(arguments);
    if let Some(input) = &options.input {
        request = attach_input(runner, request, input)?;
    }
    if options.log.is_some() {
        request.log = options.log.clone();
    }
    Ok(request)
}

/// Pass `input` as the raw path, and as the opened document unless the
/// recipe only wants the path.
fn attach_input(
    runner: &RecipeRunner,
    request: ExecutionRequest,
    input: &Path,
) -> Result<ExecutionRequest> {
    let policy = runner.registry().input_policy_of(&request.recipe)?;
    let request = request.with_input(input);
    if policy == InputPolicy::Required {
        return Ok(request);
    }
    let model = Model::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    Ok(request.with_document(model))
}
