use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use patchbay_core::{
    Config, Diagnostics, RecipeRegistry, SignatureSource, SourceDirectory, extract_docs,
};

pub fn describe_command(
    recipe: &str,
    class: &str,
    method: Option<&str>,
    dir: Option<&Path>,
) -> Result<()> {
    let config = Config::discover(&std::env::current_dir()?)?;
    let registry = RecipeRegistry::with_builtins();
    let source = select_source(recipe, dir, &config, registry);

    let diagnostics = Diagnostics::new("describe");
    let documentation = extract_docs(
        source.as_ref(),
        recipe,
        class,
        method,
        config.excluded_params.as_slice(),
        &diagnostics,
    )
    .with_context(|| format!("Could not describe {recipe}::{class}"))?;

    println!("{}", serde_json::to_string_pretty(&documentation)?);
    Ok(())
}

/// An explicit directory wins, then the built-ins, then the configured
/// recipe directories.
fn select_source(
    recipe: &str,
    dir: Option<&Path>,
    config: &Config,
    registry: RecipeRegistry,
) -> Box<dyn SignatureSource> {
    if let Some(dir) = dir {
        return Box::new(SourceDirectory::new(dir));
    }
    if registry.resolve(recipe).is_ok() {
        return Box::new(registry);
    }
    for dir in &config.recipe_dirs {
        let source = SourceDirectory::new(dir);
        if source.path_of(recipe).is_file() {
            debug!("found {recipe} in {}", dir.display());
            return Box::new(source);
        }
    }
    Box::new(registry)
}
