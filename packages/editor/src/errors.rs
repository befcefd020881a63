//! Error types for the editor

use crate::handlers::EventKind;
use crate::session::RingId;
use polyedit_codec::GeometryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unknown ring: {0}")]
    UnknownRing(RingId),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("No handler registered for {0:?} events")]
    NoHandler(EventKind),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
