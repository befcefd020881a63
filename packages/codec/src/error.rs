use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Reasons a piece of text is not a valid `POLYGON(...)` string.
///
/// Every variant carries the byte offset where the problem was found.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {pos}: expected {expected}, found {found}")]
    UnexpectedToken {
        pos: usize,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Invalid coordinate at {pos}: {token}")]
    InvalidCoordinate { pos: usize, token: String },

    #[error("Lexer error at {pos}")]
    LexerError { pos: usize },

    #[error("Trailing input at {pos}")]
    TrailingInput { pos: usize },
}

impl ParseError {
    pub fn unexpected_token(pos: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            pos,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn invalid_coordinate(pos: usize, token: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            pos,
            token: token.into(),
        }
    }

    pub fn lexer_error(pos: usize) -> Self {
        Self::LexerError { pos }
    }

    pub fn trailing_input(pos: usize) -> Self {
        Self::TrailingInput { pos }
    }

    /// Byte offset of the error in the source text
    pub fn pos(&self) -> usize {
        match self {
            Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEof { pos, .. }
            | Self::InvalidCoordinate { pos, .. }
            | Self::LexerError { pos }
            | Self::TrailingInput { pos } => *pos,
        }
    }
}

/// Errors raised when building or editing in-memory geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Coordinate is not finite: ({lng}, {lat})")]
    NonFinite { lng: f64, lat: f64 },

    #[error("Vertex index {index} out of range for ring of {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },
}
