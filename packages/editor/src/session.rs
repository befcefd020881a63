//! # Edit Session Management
//!
//! An EditSession owns the live polygon set for one editing surface and keeps
//! the text field equal to `serialize(rings)` after every completed event.
//!
//! ```text
//!  text field ──read once──▶ deserialize ──▶ rings ──register──▶ surface
//!                                              ▲
//!  surface events ──▶ HandlerTable ──▶ mutate ─┘──▶ serialize ──▶ text field
//! ```
//!
//! Events take `&mut self` and finish before returning, so an observer never
//! sees the text lag behind the rings.

use crate::config::{DeletePolicy, EditorConfig};
use crate::handlers::{HandlerTable, RingRegistration};
use crate::mutations::{MutationResult, RingEvent, ScreenPosition};
use crate::surface::{RenderSurface, TextSink};
use crate::EditorError;
use polyedit_codec::{deserialize_opt, PolygonSet, Ring, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Session-local ring identifier. Ids are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RingId(pub u64);

impl fmt::Display for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ring-{}", self.0)
    }
}

#[derive(Debug)]
struct RingEntry {
    ring: Ring,
    registration: RingRegistration,
}

/// Live polygon set bound to one surface and one text field
pub struct EditSession<S, T> {
    config: EditorConfig,
    surface: S,
    field: T,
    entries: Vec<RingEntry>,
    handlers: HandlerTable<S, T>,
    serializer: Serializer,
    next_id: u64,
    version: u64,
}

impl<S: RenderSurface, T: TextSink> EditSession<S, T> {
    /// Start a session from whatever the field currently holds.
    ///
    /// Malformed stored text opens as an empty session. Nothing is written
    /// back to the field until the first mutation.
    #[instrument(skip_all)]
    pub fn new(surface: S, field: T, config: EditorConfig) -> Self {
        let initial = field.read();
        let set = deserialize_opt(initial.as_deref());

        let mut session = Self {
            config,
            surface,
            field,
            entries: Vec::new(),
            handlers: HandlerTable::standard(),
            serializer: Serializer::new(),
            next_id: 0,
            version: 0,
        };

        for ring in set {
            session.register(ring);
        }

        if session.config.fit_view_on_load {
            if let Some(first) = session.entries.first() {
                session.surface.fit_view_to(&first.ring);
            }
        }

        info!(rings = session.entries.len(), "Edit session initialized");
        session
    }

    /// Replace the handler table (e.g. to ignore some gestures)
    pub fn with_handlers(mut self, handlers: HandlerTable<S, T>) -> Self {
        self.handlers = handlers;
        self
    }

    /// A newly drawn polygon; the only way rings enter the set
    #[instrument(skip(self, ring), fields(vertices = ring.len()))]
    pub fn on_polygon_created(&mut self, ring: Ring) -> RingId {
        let id = self.register(ring);
        self.sync_text();
        info!(%id, "Polygon created");
        id
    }

    /// Route a per-ring event through the handler table
    #[instrument(skip(self, event), fields(kind = ?event.kind()))]
    pub fn dispatch(&mut self, id: RingId, event: RingEvent) -> Result<MutationResult, EditorError> {
        let kind = event.kind();
        let handler = self.handlers.get(kind).ok_or(EditorError::NoHandler(kind))?;
        handler(self, id, event)
    }

    /// Apply a vertex event to an existing ring, then rewrite the text.
    ///
    /// On error neither the ring nor the field is touched.
    pub fn on_vertex_mutation(&mut self, id: RingId, event: RingEvent) -> Result<MutationResult, EditorError> {
        let entry = self.entry_mut(id)?;
        let changed = event.apply(&mut entry.ring)?;

        if changed {
            debug!(%id, kind = ?event.kind(), "Vertex mutation applied");
            self.sync_text();
        }

        Ok(MutationResult {
            version: self.version,
            changed,
        })
    }

    /// Handle a delete gesture according to the configured policy
    pub fn on_delete_requested(&mut self, id: RingId, position: ScreenPosition) -> Result<MutationResult, EditorError> {
        let index = self.index_of(id)?;

        match self.config.delete_policy {
            DeletePolicy::LogOnly => {
                info!(%id, x = position.x, y = position.y, "Delete requested; policy is log-only");
                Ok(MutationResult {
                    version: self.version,
                    changed: false,
                })
            }
            DeletePolicy::Remove => {
                let entry = self.entries.remove(index);
                self.surface.unregister_ring(entry.registration.handle);
                self.sync_text();
                info!(%id, remaining = self.entries.len(), "Polygon deleted");
                Ok(MutationResult {
                    version: self.version,
                    changed: true,
                })
            }
        }
    }

    /// Canonical text for the current rings
    pub fn text(&self) -> String {
        polyedit_codec::serialize_rings(self.entries.iter().map(|e| &e.ring))
    }

    pub fn rings(&self) -> impl Iterator<Item = (RingId, &Ring)> + '_ {
        self.entries.iter().map(|e| (e.registration.ring_id, &e.ring))
    }

    pub fn ring(&self, id: RingId) -> Option<&Ring> {
        self.entries
            .iter()
            .find(|e| e.registration.ring_id == id)
            .map(|e| &e.ring)
    }

    pub fn registration(&self, id: RingId) -> Option<RingRegistration> {
        self.entries
            .iter()
            .find(|e| e.registration.ring_id == id)
            .map(|e| e.registration)
    }

    /// Snapshot of the current rings in order
    pub fn polygon_set(&self) -> PolygonSet {
        self.entries.iter().map(|e| e.ring.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of completed mutations
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn field(&self) -> &T {
        &self.field
    }

    /// End the session, handing the capabilities back
    pub fn into_parts(self) -> (S, T) {
        (self.surface, self.field)
    }

    fn register(&mut self, ring: Ring) -> RingId {
        let ring_id = RingId(self.next_id);
        self.next_id += 1;

        let handle = self.surface.register_ring(ring_id, &ring, &self.config.ring_style);
        self.entries.push(RingEntry {
            ring,
            registration: RingRegistration { ring_id, handle },
        });
        ring_id
    }

    fn sync_text(&mut self) {
        let text = self.serializer.serialize_rings(self.entries.iter().map(|e| &e.ring));
        self.field.write(&text);
        self.version += 1;
        debug!(version = self.version, bytes = text.len(), "Field updated");
    }

    fn index_of(&self, id: RingId) -> Result<usize, EditorError> {
        self.entries
            .iter()
            .position(|e| e.registration.ring_id == id)
            .ok_or_else(|| {
                warn!(%id, "Event for unknown ring");
                EditorError::UnknownRing(id)
            })
    }

    fn entry_mut(&mut self, id: RingId) -> Result<&mut RingEntry, EditorError> {
        let index = self.index_of(id)?;
        Ok(&mut self.entries[index])
    }
}

impl<S, T> fmt::Debug for EditSession<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("rings", &self.entries.len())
            .field("version", &self.version)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}
