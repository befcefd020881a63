//! # polyedit codec
//!
//! Conversion between polygon rings and `POLYGON(...)` text.
//!
//! ```text
//! "POLYGON((0 0,1 0,1 1), (2 2,3 2))"
//!          │ tokenizer (logos)
//!          ▼
//!     Vec<(Token, Span)>
//!          │ parser (recursive descent)
//!          ▼
//!     PolygonSet ──── serializer ───▶ canonical text
//! ```
//!
//! [`deserialize`] never fails: malformed text reads as an empty set.
//! Use [`try_deserialize`] to find out why a string was rejected.

pub mod error;
pub mod geometry;
pub mod parser;
pub mod serializer;
pub mod tokenizer;

pub use error::{GeometryError, ParseError, ParseResult};
pub use geometry::{Bounds, Coordinate, PolygonSet, Ring};
pub use parser::{deserialize, deserialize_opt, try_deserialize, Parser};
pub use serializer::{serialize, serialize_rings, Serializer};
pub use tokenizer::{tokenize, Token};
