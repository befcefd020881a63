use crate::error::{ParseError, ParseResult};
use crate::geometry::{Coordinate, PolygonSet, Ring};
use crate::tokenizer::{tokenize, Token};
use tracing::warn;

/// Recursive-descent parser for the polygon text grammar:
///
/// ```text
/// polygon   := "POLYGON" "(" ( ring ( "," ring )* )? ")"
/// ring      := "(" ( coordPair ( "," coordPair )* )? ")"
/// coordPair := number WS number
/// number    := "-"? digits ( "." digits )?
/// ```
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, std::ops::Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let tokens = tokenize(source)?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    /// Parse the whole input as one polygon set
    pub fn parse_polygon_set(&mut self) -> ParseResult<PolygonSet> {
        self.expect(Token::Polygon)?;
        self.expect(Token::LParen)?;

        let mut set = PolygonSet::new();
        if self.check(Token::LParen) {
            set.push(self.parse_ring()?);
            while self.match_token(Token::Comma) {
                set.push(self.parse_ring()?);
            }
        }

        self.expect(Token::RParen)?;

        if !self.is_at_end() {
            return Err(ParseError::trailing_input(self.peek_span().start));
        }

        Ok(set)
    }

    fn parse_ring(&mut self) -> ParseResult<Ring> {
        self.expect(Token::LParen)?;

        let mut path = Vec::new();
        if !self.check(Token::RParen) {
            path.push(self.parse_coordinate()?);
            while self.match_token(Token::Comma) {
                path.push(self.parse_coordinate()?);
            }
        }

        self.expect(Token::RParen)?;
        Ok(Ring::from_path(path))
    }

    /// Longitude comes first in text
    fn parse_coordinate(&mut self) -> ParseResult<Coordinate> {
        let (lng, lng_span) = self.expect_number()?;
        let (lat, lat_span) = self.expect_number()?;

        // "1-2" lexes as two numbers; the pair needs a separator
        if lat_span.start == lng_span.end {
            return Err(ParseError::unexpected_token(
                lat_span.start,
                "whitespace between longitude and latitude",
                &self.source[lat_span.clone()],
            ));
        }

        Coordinate::new(lng, lat).map_err(|_| {
            ParseError::invalid_coordinate(lng_span.start, &self.source[lng_span.start..lat_span.end])
        })
    }

    fn expect_number(&mut self) -> ParseResult<(f64, std::ops::Range<usize>)> {
        match self.peek().cloned() {
            Some((Token::Number(text), span)) => {
                let value: f64 = text
                    .parse()
                    .map_err(|_| ParseError::invalid_coordinate(span.start, text))?;
                self.advance();
                Ok((value, span))
            }
            Some((token, span)) => Err(ParseError::unexpected_token(
                span.start,
                "number",
                token.to_string(),
            )),
            None => Err(ParseError::unexpected_eof(self.source.len(), "number")),
        }
    }

    // Helper methods

    fn peek(&self) -> Option<&(Token<'src>, std::ops::Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, token: Token) -> bool {
        if let Some((t, _)) = self.peek() {
            std::mem::discriminant(t) == std::mem::discriminant(&token)
        } else {
            false
        }
    }

    fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.check(token) {
            self.advance();
            return Ok(());
        }

        match self.peek() {
            Some((found, span)) => Err(ParseError::unexpected_token(
                span.start,
                token.to_string(),
                found.to_string(),
            )),
            None => Err(ParseError::unexpected_eof(self.source.len(), token.to_string())),
        }
    }

    fn peek_span(&self) -> std::ops::Range<usize> {
        self.peek()
            .map(|(_, span)| span.clone())
            .unwrap_or(self.source.len()..self.source.len())
    }
}

/// Parse polygon text, reporting the first error
pub fn try_deserialize(source: &str) -> ParseResult<PolygonSet> {
    let mut parser = Parser::new(source)?;
    parser.parse_polygon_set()
}

/// Parse polygon text, failing closed.
///
/// Blank input and malformed input both produce an empty set; this never
/// returns an error and never yields a partial result.
pub fn deserialize(source: &str) -> PolygonSet {
    if source.trim().is_empty() {
        return PolygonSet::new();
    }

    match try_deserialize(source) {
        Ok(set) => set,
        Err(error) => {
            warn!(%error, "Discarding malformed polygon text");
            PolygonSet::new()
        }
    }
}

/// [`deserialize`] for a field that may be absent
pub fn deserialize_opt(source: Option<&str>) -> PolygonSet {
    source.map(deserialize).unwrap_or_default()
}
