//! # polyedit editor
//!
//! Keeps a `POLYGON(...)` text field in step with polygons being edited on a
//! map.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ codec: text ↔ PolygonSet                    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Read stored text once on open            │
//! │  - Register rings with the map surface      │
//! │  - Route ring events via HandlerTable       │
//! │  - Rewrite the field after every mutation   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: RenderSurface + TextSink              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use polyedit_editor::{EditSession, EditorConfig, RecordingSurface, Ring, RingEvent, TextField};
//!
//! let field = TextField::with_value("POLYGON((0 0,1 0,1 1))");
//! let mut session = EditSession::new(RecordingSurface::new(), field, EditorConfig::default());
//!
//! let id = session.on_polygon_created(Ring::from_pairs(&[(5.0, 5.0), (6.0, 5.0)]).unwrap());
//! session.dispatch(id, RingEvent::VertexRemove { index: 1 }).unwrap();
//!
//! assert_eq!(session.field().value(), Some("POLYGON((0 0,1 0,1 1), (5 5))"));
//! ```

mod config;
mod errors;
mod handlers;
mod mutations;
mod session;
mod surface;

pub use config::{DeletePolicy, EditorConfig, LatLng, MapDefaults, RingStyle, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use handlers::{EventKind, Handler, HandlerTable, RingRegistration};
pub use mutations::{MutationResult, RingEvent, ScreenPosition};
pub use session::{EditSession, RingId};
pub use surface::{RecordingSurface, RenderSurface, SurfaceCall, SurfaceHandle, TextField, TextSink};

// Re-export codec types for convenience
pub use polyedit_codec::{Coordinate, PolygonSet, Ring};
