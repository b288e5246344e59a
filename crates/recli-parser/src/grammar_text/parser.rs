//! Recursive-descent parser: textual grammar -> `Node` (spec §4.2).
//!
//! Grounded on `examples/original_source/src/syntax.c::str2syntax`, one
//! parse function per recursion level rather than the original's single
//! loop with `goto next` - a recursive-descent parser reads far more
//! clearly than reproducing the `goto`.

use std::collections::HashMap;

use recli_core::grammar::{
    alternate, concat, datatype_ref, empty, keyword, macro_def, optional, plus, varargs, Node,
    NodeKind,
};

use super::error::GrammarParseError;
use super::lexer::{lex, Token};

/// Parse one line of grammar text (spec §6.3: one alternative per line,
/// shell-style `;`/`#` comments). `is_datatype` reports whether an
/// all-uppercase word names a known datatype (queried against
/// `recli-parser`'s registry, which this module must not statically
/// depend on upward, so it is passed in).
pub fn parse_line(src: &str, is_datatype: &dyn Fn(&str) -> bool) -> Result<Option<Node>, GrammarParseError> {
    let mut parser = Parser::new(src, is_datatype);
    let node = parser.parse_sequence(Context::Top)?;
    Ok(node)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Top,
    Alternate,
    Optional,
    /// Inside a `NAME=BODY` macro definition. A macro's body is substituted
    /// wherever the macro name is referenced, so its own legality can't
    /// depend on where that reference ends up; VARARGS is rejected here the
    /// same as in `Alternate`/`Optional`.
    MacroBody,
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, std::ops::Range<usize>)>,
    pos: usize,
    macros: HashMap<String, Node>,
    is_datatype: &'src dyn Fn(&str) -> bool,
    src_len: usize,
}

impl<'src> Parser<'src> {
    fn new(src: &'src str, is_datatype: &'src dyn Fn(&str) -> bool) -> Self {
        let mut tokens = Vec::new();
        for (tok, span) in lex(src).spanned() {
            match tok {
                Ok(Token::Comment) => break,
                Ok(t) => tokens.push((t, span)),
                Err(()) => tokens.push((Token::Word(&src[span.clone()]), span)),
            }
        }
        Self { tokens, pos: 0, macros: HashMap::new(), is_datatype, src_len: src.len() }
    }

    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn peek_span(&self) -> std::ops::Range<usize> {
        self.tokens.get(self.pos).map(|(_, s)| s.clone()).unwrap_or(self.src_len..self.src_len)
    }

    fn bump(&mut self) -> Option<(Token<'src>, std::ops::Range<usize>)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    /// A sequence of concatenated terms, stopping at a delimiter
    /// appropriate to `ctx` (end of input at `Top`, `|`/`)` at
    /// `Alternate`, `]` at `Optional`).
    fn parse_sequence(&mut self, ctx: Context) -> Result<Option<Node>, GrammarParseError> {
        let mut first: Option<Node> = None;

        loop {
            match self.peek() {
                None => break,
                Some(Token::Pipe) | Some(Token::RParen) if ctx == Context::Alternate => break,
                Some(Token::RBracket) if ctx == Context::Optional => break,
                Some(tok @ (Token::RParen | Token::RBracket | Token::Pipe)) => {
                    let span = self.peek_span();
                    return Err(GrammarParseError::UnexpectedToken {
                        at: span.start,
                        found: self.token_text(tok, &span),
                    });
                }
                _ => {}
            }

            let term = self.parse_term(ctx)?;

            // VARARGS is only legal as the very last term of a top-level
            // concatenation (spec §3.1, §4.2); `parse_term` already rejects
            // it outside `Context::Top`, so at this point a varargs node
            // means more input following it is the violation.
            if matches!(term.kind(), NodeKind::Varargs) && self.peek().is_some() {
                let span = self.peek_span();
                return Err(GrammarParseError::InvalidVarargsContext { at: span.start });
            }

            first = Some(match first {
                None => term,
                Some(acc) => concat(acc, term),
            });
        }

        Ok(first)
    }

    fn token_text(&self, tok: Token<'src>, span: &std::ops::Range<usize>) -> String {
        match tok {
            Token::Word(w) => w.to_string(),
            Token::Pipe => "|".to_string(),
            Token::RParen => ")".to_string(),
            Token::RBracket => "]".to_string(),
            Token::LParen => "(".to_string(),
            Token::LBracket => "[".to_string(),
            Token::Ellipsis => "...".to_string(),
            Token::Plus => "+".to_string(),
            Token::Star => "*".to_string(),
            Token::Equals => "=".to_string(),
            Token::Comment => format!("<{}..{}>", span.start, span.end),
        }
    }

    fn parse_term(&mut self, ctx: Context) -> Result<Node, GrammarParseError> {
        let (tok, span) = self.bump().ok_or(GrammarParseError::UnexpectedEof)?;

        let mut node = match tok {
            Token::LBracket => {
                let inner = self.parse_sequence(Context::Optional)?.unwrap_or_else(empty);
                self.expect(Token::RBracket, ']')?;
                optional(inner)
            }
            Token::LParen => {
                let first = self
                    .parse_sequence(Context::Alternate)?
                    .ok_or(GrammarParseError::EmptyAlternation { at: span.start })?;
                let mut alt = first;
                while matches!(self.peek(), Some(Token::Pipe)) {
                    self.bump();
                    let next = self
                        .parse_sequence(Context::Alternate)?
                        .ok_or(GrammarParseError::EmptyAlternation { at: span.start })?;
                    alt = alternate(alt, next);
                }
                self.expect(Token::RParen, ')')?;
                alt
            }
            Token::Ellipsis => {
                // Disallowed inside alternation and inside optionality
                // (spec §3.1): only a bare top-level concatenation may
                // carry VARARGS, and only as its final term (checked by
                // the caller once the whole term has been parsed).
                if ctx != Context::Top {
                    return Err(GrammarParseError::InvalidVarargsContext { at: span.start });
                }
                varargs()
            }
            Token::Word(word) => self.parse_word(word, span.start, ctx)?,
            tok => {
                return Err(GrammarParseError::UnexpectedToken {
                    at: span.start,
                    found: self.token_text(tok, &span),
                });
            }
        };

        if matches!(self.peek(), Some(Token::Plus) | Some(Token::Star)) {
            if matches!(node.kind(), NodeKind::Varargs) {
                let span = self.peek_span();
                return Err(GrammarParseError::InvalidVarargsContext { at: span.start });
            }
            let (tok, _) = self.bump().unwrap();
            let min = if matches!(tok, Token::Plus) { 1 } else { 0 };
            node = plus(node, min, 0);
        }

        Ok(node)
    }

    fn parse_word(&mut self, word: &str, at: usize, ctx: Context) -> Result<Node, GrammarParseError> {
        if matches!(self.peek(), Some(Token::Equals)) {
            self.bump();
            let body = self.parse_term(Context::MacroBody)?;
            let def = macro_def(word, body);
            self.macros.insert(word.to_string(), def.clone());
            return self.continue_after_macro_def(ctx);
        }

        let (base, suffix) = split_suffix(word);

        if base.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && base.chars().all(|c| !c.is_ascii_lowercase())
        {
            if let Some(body) = self.macros.get(base) {
                return Ok(body.clone());
            }
            if (self.is_datatype)(base) {
                return Ok(datatype_ref(base)?);
            }
            return Err(GrammarParseError::UnknownMacro(base.to_string(), at));
        }

        let case_insensitive = suffix == Some('i');
        let tty_required = suffix == Some('t');
        Ok(keyword(base, case_insensitive, tty_required)?)
    }

    /// A macro definition consumes the rest of the line's worth of
    /// attention for `NAME=BODY` but contributes nothing to the resulting
    /// sequence itself (spec §4.2: "evaluated at parse time").
    fn continue_after_macro_def(&mut self, ctx: Context) -> Result<Node, GrammarParseError> {
        if self.pos >= self.tokens.len() {
            return Ok(empty());
        }
        self.parse_term(ctx)
    }

    fn expect(&mut self, want: Token<'src>, ch: char) -> Result<(), GrammarParseError> {
        match self.peek() {
            Some(t) if std::mem::discriminant(&t) == std::mem::discriminant(&want) => {
                self.bump();
                Ok(())
            }
            _ => Err(GrammarParseError::UnmatchedDelimiter(ch, self.peek_span().start)),
        }
    }
}

/// Split a trailing `/i` or `/t` flag suffix off a bare word (spec §3.1
/// invariant 5).
fn split_suffix(word: &str) -> (&str, Option<char>) {
    if let Some(base) = word.strip_suffix("/i") {
        (base, Some('i'))
    } else if let Some(base) = word.strip_suffix("/t") {
        (base, Some('t'))
    } else {
        (word, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recli_core::grammar::print_grammar;

    fn no_datatypes(_: &str) -> bool {
        false
    }

    fn ip_datatype(name: &str) -> bool {
        name == "IPADDR"
    }

    #[test]
    fn parses_bare_words_as_concat() {
        let g = parse_line("show interface ethernet", &no_datatypes).unwrap().unwrap();
        assert_eq!(print_grammar(&g), "show interface ethernet");
    }

    #[test]
    fn parses_optional_bracket() {
        let g = parse_line("show route [detail]", &no_datatypes).unwrap().unwrap();
        assert_eq!(print_grammar(&g), "show route [detail]");
    }

    #[test]
    fn parses_alternation() {
        let g = parse_line("show (interface | route)", &no_datatypes).unwrap().unwrap();
        assert_eq!(print_grammar(&g), "show (interface | route)");
    }

    #[test]
    fn parses_varargs_at_end() {
        let g = parse_line("show log ...", &no_datatypes).unwrap().unwrap();
        assert_eq!(print_grammar(&g), "show log ...");
    }

    #[test]
    fn parses_case_insensitive_suffix() {
        let g = parse_line("show/i", &no_datatypes).unwrap().unwrap();
        assert_eq!(print_grammar(&g), "show/i");
    }

    #[test]
    fn rejects_mixed_case_keyword() {
        let err = parse_line("Show", &no_datatypes).unwrap_err();
        assert!(matches!(err, GrammarParseError::Naming(_)));
    }

    #[test]
    fn resolves_known_datatype() {
        let g = parse_line("ping IPADDR", &ip_datatype).unwrap().unwrap();
        assert_eq!(print_grammar(&g), "ping IPADDR");
    }

    #[test]
    fn rejects_unknown_uppercase_name() {
        let err = parse_line("ping NOPE", &no_datatypes).unwrap_err();
        assert!(matches!(err, GrammarParseError::UnknownMacro(_, _)));
    }

    #[test]
    fn unmatched_paren_is_an_error() {
        let err = parse_line("show (interface", &no_datatypes).unwrap_err();
        assert!(matches!(err, GrammarParseError::UnmatchedDelimiter(')', _)));
    }

    #[test]
    fn rejects_varargs_inside_optional() {
        let err = parse_line("show [...]", &no_datatypes).unwrap_err();
        assert!(matches!(err, GrammarParseError::InvalidVarargsContext { .. }));
    }

    #[test]
    fn rejects_varargs_inside_alternation() {
        let err = parse_line("show (a | ...)", &no_datatypes).unwrap_err();
        assert!(matches!(err, GrammarParseError::InvalidVarargsContext { .. }));
    }

    #[test]
    fn rejects_varargs_not_at_end_of_concatenation() {
        let err = parse_line("show ... more", &no_datatypes).unwrap_err();
        assert!(matches!(err, GrammarParseError::InvalidVarargsContext { .. }));
    }

    #[test]
    fn rejects_quantified_varargs() {
        let err = parse_line("...+", &no_datatypes).unwrap_err();
        assert!(matches!(err, GrammarParseError::InvalidVarargsContext { .. }));
    }

    #[test]
    fn rejects_varargs_inside_macro_body() {
        let err = parse_line("X=... show X", &no_datatypes).unwrap_err();
        assert!(matches!(err, GrammarParseError::InvalidVarargsContext { .. }));
    }
}
