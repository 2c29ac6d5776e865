//! Builds recipe signatures from Rust source.
//!
//! Every inherent `impl` block becomes a class named after its self type.
//! Blocks for the same type are merged; trait impls are ignored since their
//! methods are not part of the recipe's own surface.

use crate::{
    error::Result,
    parser::utils::{find_doc_comments_before, node_text},
    types::{ClassSignature, MethodSignature, ParamDecl, RecipeModule, TypeHint},
};
use tree_sitter::Node;

pub struct SignatureScanner {
    module: RecipeModule,
}

impl SignatureScanner {
    pub fn new(name: &str) -> Self {
        Self {
            module: RecipeModule::new(name),
        }
    }

    pub fn scan(mut self, root: &Node, source: &str) -> Result<RecipeModule> {
        self.visit_node(root, source)?;
        Ok(self.module)
    }

    fn visit_node(&mut self, node: &Node, source: &str) -> Result<()> {
        match node.kind() {
            "impl_item" => return self.handle_impl(node, source),
            // Function bodies cannot declare recipe types
            "function_item" => return Ok(()),
            _ => {}
        }

        for child in node.children(&mut node.walk()) {
            self.visit_node(&child, source)?;
        }
        Ok(())
    }

    fn handle_impl(&mut self, node: &Node, source: &str) -> Result<()> {
        if node.child_by_field_name("trait").is_some() {
            return Ok(());
        }
        let Some(type_node) = node.child_by_field_name("type") else {
            return Ok(());
        };
        let class_name = type_name(&type_node, source)?;

        let mut methods = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            for child in body.named_children(&mut body.walk()) {
                if child.kind() == "function_item" {
                    methods.push(self.handle_function(&child, source)?);
                }
            }
        }

        let class = self
            .module
            .classes
            .entry(class_name.clone())
            .or_insert_with(|| ClassSignature::new(&class_name));
        for method in methods {
            class.methods.insert(method.name.clone(), method);
        }
        Ok(())
    }

    fn handle_function(&self, node: &Node, source: &str) -> Result<MethodSignature> {
        let name = match node.child_by_field_name("name") {
            Some(name_node) => node_text(&name_node, source)?,
            None => "",
        };
        let mut method = MethodSignature::new(name);
        method.doc = find_doc_comments_before(node, source);

        if let Some(parameters) = node.child_by_field_name("parameters") {
            for param in parameters.named_children(&mut parameters.walk()) {
                // `self` receivers are never part of the schema
                if param.kind() != "parameter" {
                    continue;
                }
                method.params.push(parameter(&param, source)?);
            }
        }
        Ok(method)
    }
}

fn parameter(node: &Node, source: &str) -> Result<ParamDecl> {
    let name = match node.child_by_field_name("pattern") {
        Some(pattern) => node_text(&pattern, source)?,
        None => "",
    };
    let mut decl = ParamDecl::new(name);
    if let Some(type_node) = node.child_by_field_name("type") {
        decl.hint = Some(type_hint(&type_node, source)?);
    }
    Ok(decl)
}

/// Map a type node onto a hint.
///
/// `Option<T>` is read as the union of `T` and `None`, references are
/// looked through and paths are reduced to their last segment.
pub fn type_hint(node: &Node, source: &str) -> Result<TypeHint> {
    match node.kind() {
        "reference_type" => match node.child_by_field_name("type") {
            Some(inner) => type_hint(&inner, source),
            None => Ok(TypeHint::named(node_text(node, source)?)),
        },
        "generic_type" => {
            let container = match node.child_by_field_name("type") {
                Some(base) => type_name(&base, source)?,
                None => node_text(node, source)?.to_string(),
            };
            let mut arguments = Vec::new();
            if let Some(args) = node.child_by_field_name("type_arguments") {
                for arg in args.named_children(&mut args.walk()) {
                    if arg.kind() != "lifetime" {
                        arguments.push(type_hint(&arg, source)?);
                    }
                }
            }
            if container == "Option" && arguments.len() == 1 {
                arguments.push(TypeHint::named("None"));
                return Ok(TypeHint::Union(arguments));
            }
            Ok(TypeHint::Generic {
                container,
                arguments,
            })
        }
        _ => Ok(TypeHint::Named(type_name(node, source)?)),
    }
}

fn type_name(node: &Node, source: &str) -> Result<String> {
    match node.kind() {
        "scoped_type_identifier" => match node.child_by_field_name("name") {
            Some(name) => Ok(node_text(&name, source)?.to_string()),
            None => Ok(node_text(node, source)?.to_string()),
        },
        "generic_type" => match node.child_by_field_name("type") {
            Some(base) => type_name(&base, source),
            None => Ok(node_text(node, source)?.to_string()),
        },
        _ => Ok(node_text(node, source)?.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::RustParser;
    use crate::types::{RecipeModule, TypeHint};

    const SOURCE: &str = r#"
use std::path::PathBuf;

pub struct Patcher {
    query: String,
}

impl Patcher {
    /// Extract certain elements into a new model
    ///
    /// Keeps only what the query selects.
    ///
    /// :param query: A query to select the subset of elements.
    /// :return: model: The extracted model
    #[allow(clippy::new_ret_no_self)]
    pub fn new(
        input: Option<PathBuf>,
        file: Option<Model>,
        logger: Diagnostics,
        query: &str,
        depth: Option<u32>,
        tags: Vec<String>,
        mode: std::fmt::Alignment,
    ) -> Self {
        todo!()
    }

    // not documentation
    pub fn patch(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Patcher {
    pub fn reset(&mut self, hard: bool) {}
}

impl Drop for Patcher {
    fn drop(&mut self) {}
}

mod nested {
    impl Helper {
        //// four slashes
        fn help(x: i32) {}
    }
}
"#;

    fn scan() -> RecipeModule {
        RustParser::new()
            .unwrap()
            .scan_module(SOURCE, "ExtractElements")
            .unwrap()
    }

    #[test]
    fn test_inherent_impls_become_classes() {
        let module = scan();
        let classes: Vec<_> = module.classes.keys().map(String::as_str).collect();
        assert_eq!(classes, vec!["Patcher", "Helper"]);

        let patcher = &module.classes["Patcher"];
        let methods: Vec<_> = patcher.methods.keys().map(String::as_str).collect();
        assert_eq!(methods, vec!["new", "patch", "reset"]);
        assert!(!patcher.methods.contains_key("drop"));
    }

    #[test]
    fn test_constructor_params_and_hints() {
        let module = scan();
        let ctor = module.classes["Patcher"].constructor().unwrap();
        let names: Vec<_> = ctor.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["input", "file", "logger", "query", "depth", "tags", "mode"]
        );

        let hints: Vec<_> = ctor.params.iter().map(|p| p.hint.clone().unwrap()).collect();
        assert_eq!(
            hints[0],
            TypeHint::union([TypeHint::named("PathBuf"), TypeHint::named("None")])
        );
        assert_eq!(hints[3], TypeHint::named("str"));
        assert_eq!(
            hints[4],
            TypeHint::union([TypeHint::named("u32"), TypeHint::named("None")])
        );
        assert_eq!(hints[5], TypeHint::generic("Vec", TypeHint::named("String")));
        assert_eq!(hints[6], TypeHint::named("Alignment"));
        assert!(ctor.params.iter().all(|p| p.default.is_none()));
    }

    #[test]
    fn test_doc_comments_are_collected() {
        let module = scan();
        let patcher = &module.classes["Patcher"];
        assert_eq!(
            patcher.constructor().unwrap().doc.as_deref(),
            Some(
                "Extract certain elements into a new model\n\nKeeps only what the query selects.\n\n:param query: A query to select the subset of elements.\n:return: model: The extracted model"
            )
        );
        assert_eq!(patcher.methods["patch"].doc, None);
        assert_eq!(module.classes["Helper"].methods["help"].doc, None);
    }

    #[test]
    fn test_self_receiver_is_dropped() {
        let module = scan();
        let reset = &module.classes["Patcher"].methods["reset"];
        let names: Vec<_> = reset.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["hard"]);
    }
}
