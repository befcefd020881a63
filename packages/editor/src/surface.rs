//! # Host Capabilities
//!
//! The session talks to two things it does not own: the map that draws the
//! rings and the text field that stores them. Both are traits so any host
//! (browser binding, CLI replay, tests) can supply its own.
//!
//! [`TextField`] and [`RecordingSurface`] are plain in-memory versions.

use crate::config::RingStyle;
use crate::session::RingId;
use polyedit_codec::{Bounds, Ring};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque handle a surface hands back for a registered ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(pub u64);

/// Map surface that renders rings
pub trait RenderSurface {
    /// Start drawing `ring` and route its gestures back under `id`
    fn register_ring(&mut self, id: RingId, ring: &Ring, style: &RingStyle) -> SurfaceHandle;

    /// Stop drawing a previously registered ring
    fn unregister_ring(&mut self, handle: SurfaceHandle);

    /// Move the viewport so `ring` is fully visible
    fn fit_view_to(&mut self, ring: &Ring);
}

/// A settable string slot
pub trait TextSink {
    fn read(&self) -> Option<String>;

    fn write(&mut self, text: &str);
}

impl<T: RenderSurface + ?Sized> RenderSurface for &mut T {
    fn register_ring(&mut self, id: RingId, ring: &Ring, style: &RingStyle) -> SurfaceHandle {
        (**self).register_ring(id, ring, style)
    }

    fn unregister_ring(&mut self, handle: SurfaceHandle) {
        (**self).unregister_ring(handle)
    }

    fn fit_view_to(&mut self, ring: &Ring) {
        (**self).fit_view_to(ring)
    }
}

impl<T: TextSink + ?Sized> TextSink for &mut T {
    fn read(&self) -> Option<String> {
        (**self).read()
    }

    fn write(&mut self, text: &str) {
        (**self).write(text)
    }
}

/// In-memory text field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    value: Option<String>,
    writes: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Number of times the field has been written
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl TextSink for TextField {
    fn read(&self) -> Option<String> {
        self.value.clone()
    }

    fn write(&mut self, text: &str) {
        self.value = Some(text.to_string());
        self.writes += 1;
    }
}

/// Calls observed by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SurfaceCall {
    Register { id: RingId, handle: SurfaceHandle },
    Unregister { handle: SurfaceHandle },
    FitView { bounds: Option<Bounds> },
}

/// Surface that draws nothing and remembers what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    live: BTreeSet<SurfaceHandle>,
    next_handle: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Handles registered and not yet unregistered
    pub fn live_handles(&self) -> impl Iterator<Item = SurfaceHandle> + '_ {
        self.live.iter().copied()
    }

    pub fn is_live(&self, handle: SurfaceHandle) -> bool {
        self.live.contains(&handle)
    }
}

impl RenderSurface for RecordingSurface {
    fn register_ring(&mut self, id: RingId, _ring: &Ring, _style: &RingStyle) -> SurfaceHandle {
        let handle = SurfaceHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle);
        self.calls.push(SurfaceCall::Register { id, handle });
        handle
    }

    fn unregister_ring(&mut self, handle: SurfaceHandle) {
        self.live.remove(&handle);
        self.calls.push(SurfaceCall::Unregister { handle });
    }

    fn fit_view_to(&mut self, ring: &Ring) {
        self.calls.push(SurfaceCall::FitView {
            bounds: ring.bounds(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_counts_writes() {
        let mut field = TextField::with_value("POLYGON()");
        assert_eq!(field.read().as_deref(), Some("POLYGON()"));
        assert_eq!(field.write_count(), 0);

        field.write("POLYGON((1 2))");
        assert_eq!(field.value(), Some("POLYGON((1 2))"));
        assert_eq!(field.write_count(), 1);
    }

    #[test]
    fn test_recording_surface_tracks_live_handles() {
        let mut surface = RecordingSurface::new();
        let style = RingStyle::default();

        let a = surface.register_ring(RingId(0), &Ring::new(), &style);
        let b = surface.register_ring(RingId(1), &Ring::new(), &style);
        assert_ne!(a, b);

        surface.unregister_ring(a);
        assert!(!surface.is_live(a));
        assert!(surface.is_live(b));
        assert_eq!(surface.calls().len(), 3);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn write_through<T: TextSink>(mut sink: T) {
            sink.write("POLYGON()");
        }

        let mut field = TextField::new();
        write_through(&mut field);
        assert_eq!(field.value(), Some("POLYGON()"));
    }
}
