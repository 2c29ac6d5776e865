//! Count the instances of each class in a model.

use crate::{
    diagnostics::Diagnostics,
    interfaces::{Recipe, RecipeInit},
    model::Model,
    registry::RecipeDescriptor,
    types::{CallingConvention, InputPolicy, MethodSignature, Output, ParamDecl, TypeHint},
};
use anyhow::{bail, Context};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

pub const NAME: &str = "SummarizeModel";

const DOC: &str = "Summarize a model

Count the instances of every class in the model, most frequent first.

:param format: Either plain text or JSON
:param limit: Only report this many classes
:return: summary: The class counts";

fn constructor() -> MethodSignature {
    MethodSignature::constructor()
        .with_doc(DOC)
        .param(
            ParamDecl::new("format")
                .with_hint(TypeHint::literal(["text", "json"]))
                .with_default("text"),
        )
        .param(
            ParamDecl::new("limit")
                .with_hint(TypeHint::union([
                    TypeHint::named("int"),
                    TypeHint::named("None"),
                ]))
                .with_default_expr("None"),
        )
}

pub fn descriptor() -> RecipeDescriptor {
    RecipeDescriptor::new(NAME, build)
        .with_input_policy(InputPolicy::Supported)
        .with_convention(CallingConvention::Variadic)
        .with_method(constructor())
        .with_method(MethodSignature::new("patch"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn build(init: RecipeInit) -> anyhow::Result<Box<dyn Recipe>> {
    let arguments = init.arguments.bind(&constructor())?;
    let format = match arguments.get::<String>("format")?.as_str() {
        "text" => Format::Text,
        "json" => Format::Json,
        other => bail!("format must be 'text' or 'json', got '{other}'"),
    };
    let document = init.document.context("SummarizeModel needs a document")?;

    Ok(Box::new(SummarizeModel {
        source: init.input,
        document: Some(document),
        logger: init.logger,
        format,
        limit: arguments.get("limit")?,
        summary: None,
    }))
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    schema: Option<String>,
    entities: usize,
    classes: IndexMap<&'a str, usize>,
}

struct SummarizeModel {
    source: Option<PathBuf>,
    document: Option<Model>,
    logger: Diagnostics,
    format: Format,
    limit: Option<usize>,
    summary: Option<String>,
}

impl SummarizeModel {
    fn render(&self, model: &Model) -> anyhow::Result<String> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for entity in model.entities() {
            *counts.entry(entity.class.as_str()).or_default() += 1;
        }
        counts.sort_by(|a_class, a_count, b_class, b_count| {
            b_count.cmp(a_count).then_with(|| a_class.cmp(b_class))
        });
        if let Some(limit) = self.limit {
            counts.truncate(limit);
        }

        let summary = Summary {
            source: self.source.as_ref().map(|p| p.display().to_string()),
            schema: model.schema(),
            entities: model.len(),
            classes: counts,
        };

        match self.format {
            Format::Json => Ok(serde_json::to_string_pretty(&summary)?),
            Format::Text => {
                let mut out = String::new();
                if let Some(source) = &summary.source {
                    out.push_str(&format!("source: {source}\n"));
                }
                out.push_str(&format!(
                    "{} entities ({})\n",
                    summary.entities,
                    summary.schema.as_deref().unwrap_or("unknown schema")
                ));
                for (class, count) in &summary.classes {
                    out.push_str(&format!("{class}: {count}\n"));
                }
                Ok(out)
            }
        }
    }
}

impl Recipe for SummarizeModel {
    fn patch(&mut self) -> anyhow::Result<()> {
        let model = self
            .document
            .as_ref()
            .context("document was already taken")?;
        let summary = self.render(model)?;
        self.logger
            .debug(format!("summarized {} entities", model.len()));
        self.summary = Some(summary);
        Ok(())
    }

    fn take_patched(&mut self) -> Option<Output> {
        self.summary.take().map(Output::Text)
    }

    fn take_document(&mut self) -> Option<Model> {
        self.document.take()
    }
}
