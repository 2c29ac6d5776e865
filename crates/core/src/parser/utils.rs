use crate::error::{Error, Result};
use tree_sitter::Node;

pub fn node_text<'a>(node: &Node, source: &'a str) -> Result<&'a str> {
    node.utf8_text(source.as_bytes())
        .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in {}: {e}", node.kind())))
}

/// Collect the `///` comment block directly above `node`.
///
/// Attributes and plain comments between the block and the item are
/// skipped. Returns the comment text without markers, one line per comment.
pub fn find_doc_comments_before(node: &Node, source: &str) -> Option<String> {
    let mut lines = Vec::new();
    let mut sibling = node.prev_sibling();

    while let Some(s) = sibling {
        match s.kind() {
            "line_comment" => {
                if let Ok(text) = s.utf8_text(source.as_bytes()) {
                    if let Some(doc) = text.strip_prefix("///") {
                        // `////` is an ordinary comment
                        if !doc.starts_with('/') {
                            let doc = doc.trim_end();
                            lines.push(doc.strip_prefix(' ').unwrap_or(doc).to_string());
                        }
                    }
                }
            }
            "attribute_item" | "block_comment" => {}
            _ => break,
        }
        sibling = s.prev_sibling();
    }

    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(lines.join("\n"))
}
