//! Permission *file* parsing (spec §6.2, §4.7). Line splitting and the `!`
//! prefix are handled here; evaluation against an argv is
//! `recli_core::permission::enforce`.
//!
//! Grounded on `examples/original_source/permission.c::permission_parse_line`/
//! `permission_parse_file` - each line is lexed with the same argv
//! tokenizer used for commands, so quoting rules line up (SPEC_FULL.md §4.7).

use std::fs;
use std::path::Path;

use recli_core::permission::Rule;
use recli_parser::lexer::tokenize;

use crate::error::PermissionError;

/// One non-blank, non-comment line of a permission file.
fn parse_line(line: &str) -> Result<Option<Rule>, PermissionError> {
    let words = tokenize(line).map_err(|e| PermissionError::Io {
        path: String::new(),
        reason: e.to_string(),
    })?;
    if words.is_empty() {
        return Ok(None);
    }

    let mut words = words;
    let allow = if let Some(first) = words[0].strip_prefix('!') {
        let rest = first.to_string();
        words[0] = rest;
        false
    } else {
        true
    };

    Ok(Some(Rule::new(allow, words)))
}

/// Parse a permission file: one rule per line, blank and `;`/`#`-comment
/// lines ignored (the lexer's own line-termination rule handles both).
pub fn parse_file(path: &Path) -> Result<Vec<Rule>, PermissionError> {
    let text = fs::read_to_string(path).map_err(|e| PermissionError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut rules = Vec::new();
    for line in text.lines() {
        if let Some(rule) = parse_line(line)? {
            rules.push(rule);
        }
    }
    Ok(rules)
}
