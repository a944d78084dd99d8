//! logos-based tokenizer for track-size expressions.
//!
//! Ordering notes (logos picks the longest match, then the earliest variant):
//! - `200px` matches [`Token::Dimension`], not `Number` + `Ident`
//! - `min-content` matches a single [`Token::Ident`]

use logos::Logos;

/// Token of a track-size expression such as `minmax(120px, 1fr)`.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Number with a unit suffix: `200px`, `1fr`, `25%`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?(px|fr|%)")]
    Dimension,

    /// Bare number, interpreted as terminal cells.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Keyword or function name: `auto`, `min-content`, `minmax`.
    #[regex(r"[a-zA-Z][a-zA-Z-]*")]
    Ident,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,
}

/// A lexed token with its source text and byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<'a> {
    pub token: Token,
    pub text: &'a str,
    pub position: usize,
}

/// Tokenize an expression.
///
/// Returns `Err(position)` at the first byte logos cannot lex.
pub fn tokenize(input: &str) -> Result<Vec<Lexeme<'_>>, usize> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(Lexeme {
                token,
                text: &input[span.clone()],
                position: span.start,
            }),
            Err(()) => Err(span.start),
        })
        .collect()
}

/// Split a dimension like `1.5fr` into `("1.5", "fr")`.
pub fn split_dimension(s: &str) -> Option<(&str, &str)> {
    let unit_start = s
        .char_indices()
        .find(|(i, c)| !c.is_ascii_digit() && *c != '.' && !(*c == '-' && *i == 0))
        .map(|(i, _)| i)?;

    if unit_start == 0 || unit_start >= s.len() {
        return None;
    }

    Some((&s[..unit_start], &s[unit_start..]))
}
