//! # Ring Events
//!
//! What the map reports about a ring that is already in the session.
//!
//! ## Semantics
//!
//! ### Vertex events
//! - `VertexSet`, `VertexInsert`, `VertexRemove` mirror the surface's path
//!   callbacks and address a vertex by index
//! - `DragEnd` carries the ring's full path after a whole-ring drag
//! - An out-of-range index fails and leaves the ring untouched
//!
//! ### Delete
//! - Carries only where the gesture happened; the ring itself is untouched
//!   here and the session decides what removal means

use crate::handlers::EventKind;
use polyedit_codec::{Coordinate, GeometryError, Ring};
use serde::{Deserialize, Serialize};

/// Event delivered for one registered ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RingEvent {
    /// Whole ring was dragged; `path` is where it ended up
    DragEnd { path: Ring },

    /// A vertex was moved
    VertexSet { index: usize, coordinate: Coordinate },

    /// A vertex was added before `index`
    VertexInsert { index: usize, coordinate: Coordinate },

    /// A vertex was removed
    VertexRemove { index: usize },

    /// User asked to delete the ring
    DeleteRequested { position: ScreenPosition },
}

/// Outcome of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Session version after the event
    pub version: u64,

    /// Whether the polygon set changed (and the text was rewritten)
    pub changed: bool,
}

/// Pixel position of a gesture on the map
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

impl RingEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RingEvent::DragEnd { .. } => EventKind::DragEnd,
            RingEvent::VertexSet { .. } => EventKind::VertexSet,
            RingEvent::VertexInsert { .. } => EventKind::VertexInsert,
            RingEvent::VertexRemove { .. } => EventKind::VertexRemove,
            RingEvent::DeleteRequested { .. } => EventKind::DeleteRequested,
        }
    }

    /// Apply a vertex event to `ring` in place.
    ///
    /// Returns `Ok(false)` for events that do not edit geometry.
    pub fn apply(&self, ring: &mut Ring) -> Result<bool, GeometryError> {
        match self {
            RingEvent::DragEnd { path } => {
                ring.set_path(path.path().to_vec());
            }

            RingEvent::VertexSet { index, coordinate } => {
                ring.set_at(*index, *coordinate)?;
            }

            RingEvent::VertexInsert { index, coordinate } => {
                ring.insert_at(*index, *coordinate)?;
            }

            RingEvent::VertexRemove { index } => {
                ring.remove_at(*index)?;
            }

            RingEvent::DeleteRequested { .. } => return Ok(false),
        }

        Ok(true)
    }
}
