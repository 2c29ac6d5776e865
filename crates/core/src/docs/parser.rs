//! Parser for the recipe documentation micro-format.
//!
//! ```text
//! Title on the first line
//!
//! Free text description starting on the third line,
//! continued on any untagged line.
//!
//! :param name: Description of `name`
//! :filter_glob name: *.ifc;*.ifczip
//! :return: output_name: Description of the output
//! ```
//!
//! Tags are split on every literal `:`. A value that itself contains `:` is
//! cut at that colon; the format has no escaping.

use crate::types::OutputDescriptor;

/// How a single documentation line is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Title(&'a str),
    Output { name: &'a str, description: &'a str },
    Param { name: String, description: &'a str },
    FilterGlob { name: String, glob: &'a str },
    /// First description line (line index 2).
    DescriptionStart(&'a str),
    /// Any later untagged line, blank lines included.
    DescriptionLine(&'a str),
    /// The conventionally blank second line.
    Ignored,
}

/// Result of parsing one documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    pub title: Option<String>,
    pub description: String,
    /// `(parameter, description)` in order of appearance.
    pub params: Vec<(String, String)>,
    /// `(parameter, glob)` in order of appearance.
    pub filter_globs: Vec<(String, String)>,
    pub output: Option<OutputDescriptor>,
}

/// Classify the already trimmed line at `index`.
pub fn classify(index: usize, line: &str) -> LineKind<'_> {
    if index == 0 {
        return LineKind::Title(line);
    }
    if line.starts_with(":return:") {
        return LineKind::Output {
            name: field(line, 2),
            description: field(line, 3),
        };
    }
    if line.starts_with(":param") {
        return LineKind::Param {
            name: field(line, 1).replace("param ", ""),
            description: field(line, 2),
        };
    }
    if line.starts_with(":filter_glob") {
        return LineKind::FilterGlob {
            name: field(line, 1).replace("filter_glob ", ""),
            glob: field(line, 2),
        };
    }
    match index {
        1 => LineKind::Ignored,
        2 => LineKind::DescriptionStart(line),
        _ => LineKind::DescriptionLine(line),
    }
}

/// Parse a documentation comment.
pub fn parse(doc: &str) -> ParsedDoc {
    let mut parsed = ParsedDoc::default();
    let mut description = String::new();

    for (index, line) in doc.split('\n').enumerate() {
        match classify(index, line.trim()) {
            LineKind::Title(title) => parsed.title = Some(title.to_string()),
            LineKind::Output { name, description } => {
                parsed.output = Some(OutputDescriptor {
                    name: name.to_string(),
                    description: description.to_string(),
                });
            }
            LineKind::Param { name, description } => {
                parsed.params.push((name, description.to_string()));
            }
            LineKind::FilterGlob { name, glob } => {
                parsed.filter_globs.push((name, glob.to_string()));
            }
            LineKind::DescriptionStart(text) => description.push_str(text),
            LineKind::DescriptionLine(text) => {
                description.push('\n');
                description.push_str(text);
            }
            LineKind::Ignored => {}
        }
    }

    parsed.description = description.trim().to_string();
    parsed
}

/// The `index`-th `:`-separated field, trimmed; missing fields read as empty.
fn field(line: &str, index: usize) -> &str {
    line.split(':').nth(index).map(str::trim).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Extract certain elements into a new model

    Extract a subset of elements from an existing model and save it to a new
    model, keeping everything they reference.

    :param query: A query to select the subset of elements.
    :param include_references: Whether to keep referenced instances
    :filter_glob query: *.ifc
    :return: model: The extracted model
    ";

    #[test]
    fn test_parse_full_doc() {
        let parsed = parse(DOC);
        assert_eq!(parsed.title.as_deref(), Some("Extract certain elements into a new model"));
        assert_eq!(
            parsed.description,
            "Extract a subset of elements from an existing model and save it to a new\nmodel, keeping everything they reference."
        );
        assert_eq!(
            parsed.params,
            vec![
                (
                    "query".to_string(),
                    "A query to select the subset of elements.".to_string()
                ),
                (
                    "include_references".to_string(),
                    "Whether to keep referenced instances".to_string()
                ),
            ]
        );
        assert_eq!(parsed.filter_globs, vec![("query".to_string(), "*.ifc".to_string())]);
        assert_eq!(
            parsed.output,
            Some(OutputDescriptor {
                name: "model".to_string(),
                description: "The extracted model".to_string(),
            })
        );
    }

    #[test]
    fn test_title_only() {
        let parsed = parse("Just a title");
        assert_eq!(parsed.title.as_deref(), Some("Just a title"));
        assert_eq!(parsed.description, "");
        assert!(parsed.params.is_empty());
        assert!(parsed.output.is_none());
    }

    #[test]
    fn test_second_line_is_ignored_unless_tagged() {
        let parsed = parse("Title\nnot description\nfirst\nsecond");
        assert_eq!(parsed.description, "first\nsecond");

        let parsed = parse("Title\n:param a: tagged early");
        assert_eq!(parsed.params, vec![("a".to_string(), "tagged early".to_string())]);
    }

    #[test]
    fn test_first_line_is_title_even_when_tagged() {
        let parsed = parse(":param a: x");
        assert_eq!(parsed.title.as_deref(), Some(":param a: x"));
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn test_colons_cut_values() {
        let parsed = parse("T\n\n:param url: see http://example.com");
        assert_eq!(parsed.params, vec![("url".to_string(), "see http".to_string())]);

        let parsed = parse("T\n\n:return: name: a: b");
        let output = parsed.output.unwrap();
        assert_eq!(output.name, "name");
        assert_eq!(output.description, "a");
    }

    #[test]
    fn test_short_return_tag_reads_missing_fields_as_empty() {
        let parsed = parse("T\n\n:return: The patched model");
        let output = parsed.output.unwrap();
        assert_eq!(output.name, "The patched model");
        assert_eq!(output.description, "");
    }

    #[test]
    fn test_untagged_lines_between_tags_join_description() {
        let parsed = parse("T\n\nstart\n:param a: x\n  continued  \n\nend");
        assert_eq!(parsed.description, "start\ncontinued\n\nend");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0, "Title"), LineKind::Title("Title"));
        assert_eq!(classify(1, ""), LineKind::Ignored);
        assert_eq!(classify(2, "text"), LineKind::DescriptionStart("text"));
        assert_eq!(classify(5, "more"), LineKind::DescriptionLine("more"));
        assert_eq!(
            classify(4, ":filter_glob path: *.ifc"),
            LineKind::FilterGlob {
                name: "path".to_string(),
                glob: "*.ifc"
            }
        );
    }
}
