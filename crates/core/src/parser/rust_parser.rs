use crate::{
    error::{Error, Result},
    parser::signature_scanner::SignatureScanner,
    types::RecipeModule,
};
use tree_sitter::Parser;

pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }

    /// Scan the inherent `impl` blocks of `source` into a module named `name`.
    ///
    /// Tree-sitter recovers from syntax errors; a tree containing error nodes
    /// is rejected rather than scanned partially.
    pub fn scan_module(&mut self, source: &str, name: &str) -> Result<RecipeModule> {
        let tree = self.parse(source)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::TreeSitterError(format!(
                "syntax error near line {}",
                first_error_line(&root).unwrap_or(0) + 1
            )));
        }
        SignatureScanner::new(name).scan(&root, source)
    }
}

fn first_error_line(node: &tree_sitter::Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.has_error())
        .find_map(|child| first_error_line(&child))
}
