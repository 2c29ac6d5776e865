//! Remove comments from the raw model file.
//!
//! Works on the file text rather than a parsed model so everything else in
//! the file survives byte for byte. The result is written to a kept
//! temporary file whose path is returned as the recipe's textual output.

use crate::{
    diagnostics::Diagnostics,
    interfaces::{Recipe, RecipeInit},
    model::{step, Model},
    registry::RecipeDescriptor,
    types::{CallingConvention, InputPolicy, MethodSignature, Output, ParamDecl, TypeHint},
};
use anyhow::{bail, Context};
use std::io::Write;
use std::path::PathBuf;

pub const NAME: &str = "StripComments";

/// Option dropping lines that end up blank.
const SQUEEZE: &str = "squeeze";

fn constructor() -> MethodSignature {
    MethodSignature::constructor().param(
        ParamDecl::new("args").with_hint(TypeHint::generic("list", TypeHint::named("str"))),
    )
}

pub fn descriptor() -> RecipeDescriptor {
    RecipeDescriptor::new(NAME, build)
        .with_input_policy(InputPolicy::Required)
        .with_convention(CallingConvention::ListArguments)
        .with_method(constructor())
        .with_method(MethodSignature::new("patch"))
}

fn build(init: RecipeInit) -> anyhow::Result<Box<dyn Recipe>> {
    let arguments = init.arguments.bind(&constructor())?;
    let options: Vec<String> = arguments.get("args")?;
    let mut squeeze = false;
    for option in &options {
        match option.as_str() {
            SQUEEZE => squeeze = true,
            other => bail!("unknown option '{other}', expected '{SQUEEZE}'"),
        }
    }
    let input = init.input.context("StripComments needs an input path")?;

    Ok(Box::new(StripComments {
        input,
        document: init.document,
        logger: init.logger,
        squeeze,
        patched: None,
    }))
}

struct StripComments {
    input: PathBuf,
    document: Option<Model>,
    logger: Diagnostics,
    squeeze: bool,
    patched: Option<PathBuf>,
}

impl Recipe for StripComments {
    fn patch(&mut self) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let mut stripped = step::strip_comments(&text)?;
        if self.squeeze {
            stripped = stripped
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| format!("{line}\n"))
                .collect();
        }

        let mut file = tempfile::Builder::new()
            .prefix("patchbay-")
            .suffix(".ifc")
            .tempfile()?;
        file.write_all(stripped.as_bytes())?;
        let (_, path) = file.keep()?;

        self.logger.info(format!(
            "removed {} bytes of comments, result in {}",
            text.len().saturating_sub(stripped.len()),
            path.display()
        ));
        self.patched = Some(path);
        Ok(())
    }

    fn take_patched(&mut self) -> Option<Output> {
        self.patched
            .take()
            .map(|path| Output::Text(path.display().to_string()))
    }

    fn take_document(&mut self) -> Option<Model> {
        self.document.take()
    }
}
