//! Lexical helpers for ISO-10303-21 (STEP physical file) text.

use crate::error::{Error, Result};

/// Split STEP text into `;`-terminated statements.
///
/// Semicolons inside string literals are kept, `/* */` comments are dropped.
/// Trailing text without a terminating `;` is ignored when it is blank.
pub fn split_statements(text: &str) -> Result<Vec<String>> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            current.push(c);
            if c == '\'' {
                in_string = false;
            }
            continue;
        }

        match c {
            '\'' => {
                in_string = true;
                current.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    if inner == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(Error::ParseError("unterminated comment".to_string()));
                }
            }
            ';' => {
                statements.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if in_string {
        return Err(Error::ParseError("unterminated string literal".to_string()));
    }
    if !current.trim().is_empty() {
        return Err(Error::ParseError(format!(
            "statement is missing its ';': {}",
            current.trim()
        )));
    }

    Ok(statements)
}

/// Remove `/* */` comments outside string literals, leaving everything else untouched.
pub fn strip_comments(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\'' {
                in_string = false;
            }
            continue;
        }
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut closed = false;
            while let Some(inner) = chars.next() {
                if inner == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(Error::ParseError("unterminated comment".to_string()));
            }
            continue;
        }
        if c == '\'' {
            in_string = true;
        }
        out.push(c);
    }

    Ok(out)
}

/// Entity ids referenced as `#n` outside string literals, in order of appearance.
pub fn references(arguments: &str) -> Vec<u64> {
    let mut ids = Vec::new();
    let mut chars = arguments.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' => in_string = !in_string,
            '#' if !in_string => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                if let Ok(id) = digits.parse() {
                    ids.push(id);
                }
            }
            _ => {}
        }
    }

    ids
}

/// First quoted string of a statement, with `''` unescaped.
pub fn first_string(statement: &str) -> Option<String> {
    let start = statement.find('\'')?;
    let mut value = String::new();
    let mut chars = statement[start + 1..].chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                value.push('\'');
                chars.next();
            } else {
                return Some(value);
            }
        } else {
            value.push(c);
        }
    }
    None
}
