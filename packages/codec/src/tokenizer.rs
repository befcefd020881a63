use crate::error::{ParseError, ParseResult};
use logos::Logos;
use std::fmt;

/// Token types for `POLYGON(...)` text
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token<'src> {
    #[token("POLYGON")]
    Polygon,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    // Plain decimals only: no exponent, no leading '+', no bare '.5'
    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Polygon => write!(f, "keyword 'POLYGON'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Number(n) => write!(f, "number {}", n),
        }
    }
}

/// Tokenize a source string.
///
/// Unlike a lenient lexer this stops at the first unrecognised character, so
/// garbage such as `1.2.3` or `POLYGONZ` never reaches the parser.
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token<'_>, std::ops::Range<usize>)>> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(ParseError::lexer_error(span.start)),
        })
        .collect()
}
