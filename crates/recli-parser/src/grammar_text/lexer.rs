//! Token stream for the textual grammar syntax (spec §4.2, §6.3). Uses
//! `logos`, unlike the hand-written argv lexer in [`crate::lexer`],
//! because the grammar alphabet has enough distinct punctuation tokens
//! to benefit from a generated DFA.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'src> {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("|")]
    Pipe,
    #[token("=")]
    Equals,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("...", priority = 10)]
    Ellipsis,
    #[regex(r"[;#][^\n]*")]
    Comment,
    #[regex(r"[^\s()\[\]|=+*;#.]+")]
    Word(&'src str),
}

pub fn lex(src: &str) -> logos::Lexer<'_, Token<'_>> {
    Token::lexer(src)
}
