//! Extract a subset of elements into a new model.

use crate::{
    diagnostics::Diagnostics,
    interfaces::{Recipe, RecipeInit},
    model::Model,
    registry::RecipeDescriptor,
    types::{CallingConvention, InputPolicy, MethodSignature, Output, ParamDecl, TypeHint},
};
use anyhow::{bail, Context};
use std::collections::HashSet;

pub const NAME: &str = "ExtractElements";

const DOC: &str = "Extract certain elements into a new model

Extract a subset of elements from an existing model and save it to a new
model. Selectors are `.Class` for every instance of a class and `#id` for a
single instance; separate several selectors with commas.

:param query: A query to select the subset of elements.
:param include_references: Also keep every instance the selected elements reference
:filter_glob query: *.ifc
:return: model: The extracted model";

fn constructor() -> MethodSignature {
    MethodSignature::constructor()
        .with_doc(DOC)
        .param(ParamDecl::new("query").with_hint(TypeHint::named("str")))
        .param(
            ParamDecl::new("include_references")
                .with_hint(TypeHint::named("bool"))
                .with_default(true),
        )
}

pub fn descriptor() -> RecipeDescriptor {
    RecipeDescriptor::new(NAME, build)
        .with_input_policy(InputPolicy::Ignored)
        .with_convention(CallingConvention::Variadic)
        .with_method(constructor())
        .with_method(MethodSignature::new("patch"))
}

fn build(init: RecipeInit) -> anyhow::Result<Box<dyn Recipe>> {
    let arguments = init.arguments.bind(&constructor())?;
    let query: String = arguments.get("query")?;
    let selectors = parse_query(&query)?;
    let document = init
        .document
        .context("ExtractElements needs a document to extract from")?;

    Ok(Box::new(ExtractElements {
        document: Some(document),
        logger: init.logger,
        selectors,
        include_references: arguments.get("include_references")?,
        patched: None,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Class(String),
    Id(u64),
}

impl Selector {
    fn matches(&self, entity: &crate::model::Entity) -> bool {
        match self {
            Selector::Class(class) => entity.is_a(class),
            Selector::Id(id) => entity.id == *id,
        }
    }
}

fn parse_query(query: &str) -> anyhow::Result<Vec<Selector>> {
    let mut selectors = Vec::new();
    for part in query.split(',').map(str::trim) {
        if let Some(class) = part.strip_prefix('.') {
            if class.is_empty() {
                bail!("empty class selector in query '{query}'");
            }
            selectors.push(Selector::Class(class.to_string()));
        } else if let Some(id) = part.strip_prefix('#') {
            let id = id
                .parse()
                .with_context(|| format!("invalid instance selector '{part}'"))?;
            selectors.push(Selector::Id(id));
        } else {
            bail!("unsupported selector '{part}' in query '{query}'");
        }
    }
    Ok(selectors)
}

struct ExtractElements {
    document: Option<Model>,
    logger: Diagnostics,
    selectors: Vec<Selector>,
    include_references: bool,
    patched: Option<Model>,
}

impl Recipe for ExtractElements {
    fn patch(&mut self) -> anyhow::Result<()> {
        let model = self
            .document
            .as_ref()
            .context("document was already taken")?;

        let matched: Vec<u64> = model
            .entities()
            .filter(|e| self.selectors.iter().any(|s| s.matches(e)))
            .map(|e| e.id)
            .collect();
        let ids: HashSet<u64> = if self.include_references {
            model.closure(matched.iter().copied())
        } else {
            matched.iter().copied().collect()
        };

        let subset = model.subset(&ids);
        self.logger.info(format!(
            "extracted {} elements ({} with references) of {}",
            matched.len(),
            subset.len(),
            model.len()
        ));
        self.patched = Some(subset);
        Ok(())
    }

    fn take_patched(&mut self) -> Option<Output> {
        self.patched.take().map(Output::Document)
    }

    fn take_document(&mut self) -> Option<Model> {
        self.document.take()
    }
}
