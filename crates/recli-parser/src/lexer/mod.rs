//! Argv tokenizer (spec §4.1). Hand-written, not `logos`-based: the rules
//! are a handful of single-character special cases over raw bytes, which
//! is exactly what the original's `str2argv` is - a token generator for
//! *this* lexer lives better as a direct port than as a `logos` token
//! enum, which earns its keep in `grammar_text` where the token alphabet
//! is large and the same tokens recur across many grammar constructs.
//!
//! Grounded on `examples/original_source/src/util.c::str2argv`/
//! `strquotelen`.

use thiserror::Error;

/// Internal limit on argv slots (spec §4.1).
pub const MAX_ARGC: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated quote at offset {0}")]
    UnterminatedQuote(usize),
    #[error("unexpected character after quoted string at offset {0}")]
    UnexpectedCharacter(usize),
    #[error("too many words (limit is {MAX_ARGC})")]
    TooManyWords,
}

/// Split `line` into argv, honoring `"`/`'`/`` ` `` quoting with `\`
/// escapes inside. `;` and `#` at a token boundary terminate the line.
/// Quote characters are retained in the returned words (they are stripped
/// by the caller only if it cares to - the original keeps them too, since
/// datatype validators such as `DQSTRING` match on the raw quote marks).
pub fn tokenize(line: &str) -> Result<Vec<String>, LexError> {
    let bytes = line.as_bytes();
    let mut i = 0;
    let mut out = Vec::new();

    while i < bytes.len() && (bytes[i] as char).is_ascii_whitespace() {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] == b';' || bytes[i] == b'#' {
        return Ok(out);
    }

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i] as char).is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        if bytes[i] == b';' || bytes[i] == b'#' {
            break;
        }

        if out.len() >= MAX_ARGC {
            return Err(LexError::TooManyWords);
        }

        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                let quote = bytes[i];
                let start = i;
                let mut j = i + 1;
                let mut closed = false;
                while j < bytes.len() {
                    if bytes[j] == b'\\' {
                        if j + 1 >= bytes.len() {
                            return Err(LexError::UnterminatedQuote(start));
                        }
                        j += 2;
                        continue;
                    }
                    if bytes[j] == quote {
                        closed = true;
                        j += 1;
                        break;
                    }
                    j += 1;
                }
                if !closed {
                    return Err(LexError::UnterminatedQuote(start));
                }
                if j < bytes.len() && !(bytes[j] as char).is_ascii_whitespace() {
                    return Err(LexError::UnexpectedCharacter(j));
                }
                out.push(line[start..j].to_string());
                i = j;
            }
            _ => {
                let start = i;
                while i < bytes.len()
                    && bytes[i] != b'"'
                    && bytes[i] != b'\''
                    && bytes[i] != b'`'
                    && !(bytes[i] as char).is_ascii_whitespace()
                {
                    i += 1;
                }
                out.push(line[start..i].to_string());
                if i < bytes.len() && !(bytes[i] as char).is_ascii_whitespace() {
                    return Err(LexError::UnexpectedCharacter(i));
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokenize("show interface ethernet").unwrap(), vec!["show", "interface", "ethernet"]);
    }

    #[test]
    fn empty_line_yields_no_tokens() {
        assert_eq!(tokenize("   ").unwrap(), Vec::<String>::new());
        assert_eq!(tokenize("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn comment_terminates_line() {
        assert_eq!(tokenize("show ; configure").unwrap(), vec!["show"]);
        assert_eq!(tokenize("show # trailing").unwrap(), vec!["show"]);
        assert_eq!(tokenize("# nothing").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn quoted_string_with_escape() {
        let argv = tokenize(r#"set message "hello \"world\"""#).unwrap();
        assert_eq!(argv, vec!["set", "message", r#""hello \"world\"""#]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(tokenize(r#"set message "oops"#).unwrap_err(), LexError::UnterminatedQuote(12));
    }

    #[test]
    fn quoted_token_glued_to_more_text_is_an_error() {
        assert!(matches!(
            tokenize(r#"set "a"b"#).unwrap_err(),
            LexError::UnexpectedCharacter(_)
        ));
    }
}
