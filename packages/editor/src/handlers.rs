//! # Event Dispatch
//!
//! Each ring the session registers gets a [`RingRegistration`]: the ring's id
//! plus the surface handle drawing it. Gestures on the map come back as
//! `(RingId, RingEvent)` and are routed through a [`HandlerTable`] keyed by
//! [`EventKind`]. The registration never holds the session itself; the id is
//! the only link back.

use crate::mutations::{MutationResult, RingEvent};
use crate::session::{EditSession, RingId};
use crate::surface::{RenderSurface, SurfaceHandle, TextSink};
use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kinds of per-ring events a surface can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DragEnd,
    VertexSet,
    VertexInsert,
    VertexRemove,
    DeleteRequested,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::DragEnd,
        EventKind::VertexSet,
        EventKind::VertexInsert,
        EventKind::VertexRemove,
        EventKind::DeleteRequested,
    ];

    /// Events that edit a ring's vertices in place
    pub fn is_vertex_mutation(self) -> bool {
        !matches!(self, EventKind::DeleteRequested)
    }
}

/// Links a ring in the session to its drawing on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingRegistration {
    pub ring_id: RingId,
    pub handle: SurfaceHandle,
}

pub type Handler<S, T> = fn(&mut EditSession<S, T>, RingId, RingEvent) -> Result<MutationResult, EditorError>;

/// Routes events to session operations by kind
pub struct HandlerTable<S, T> {
    handlers: HashMap<EventKind, Handler<S, T>>,
}

impl<S: RenderSurface, T: TextSink> HandlerTable<S, T> {
    /// Table with no handlers; every dispatch fails with `NoHandler`
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Vertex events resync text, delete requests follow the delete policy
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for kind in EventKind::ALL {
            if kind.is_vertex_mutation() {
                table.set(kind, EditSession::on_vertex_mutation);
            }
        }
        table.set(EventKind::DeleteRequested, delete_requested);
        table
    }

    /// Install a handler, returning the one it replaced
    pub fn set(&mut self, kind: EventKind, handler: Handler<S, T>) -> Option<Handler<S, T>> {
        self.handlers.insert(kind, handler)
    }

    pub fn remove(&mut self, kind: EventKind) -> Option<Handler<S, T>> {
        self.handlers.remove(&kind)
    }

    pub fn get(&self, kind: EventKind) -> Option<Handler<S, T>> {
        self.handlers.get(&kind).copied()
    }
}

impl<S: RenderSurface, T: TextSink> Default for HandlerTable<S, T> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<S, T> fmt::Debug for HandlerTable<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

fn delete_requested<S: RenderSurface, T: TextSink>(
    session: &mut EditSession<S, T>,
    id: RingId,
    event: RingEvent,
) -> Result<MutationResult, EditorError> {
    let position = match event {
        RingEvent::DeleteRequested { position } => position,
        _ => Default::default(),
    };
    session.on_delete_requested(id, position)
}
