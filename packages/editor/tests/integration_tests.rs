//! Integration tests for editor crate

use polyedit_codec::{deserialize, serialize};
use polyedit_editor::{
    Coordinate, DeletePolicy, EditSession, EditorConfig, RecordingSurface, Ring, RingEvent, RingId,
    ScreenPosition, SurfaceCall, TextField,
};

fn c(lng: f64, lat: f64) -> Coordinate {
    Coordinate::new(lng, lat).unwrap()
}

fn open(text: Option<&str>, config: EditorConfig) -> EditSession<RecordingSurface, TextField> {
    let field = text.map(TextField::with_value).unwrap_or_default();
    EditSession::new(RecordingSurface::new(), field, config)
}

#[test]
fn test_create_then_mutate_writes_post_mutation_state() {
    let mut session = open(None, EditorConfig::default());

    let ring = Ring::from_pairs(&[(-67.7, -53.79), (-67.69, -53.79), (-67.69, -53.8)]).unwrap();
    let id = session.on_polygon_created(ring);
    assert_eq!(session.field().write_count(), 1);

    session
        .dispatch(id, RingEvent::VertexInsert { index: 3, coordinate: c(-67.7, -53.79) })
        .unwrap();

    assert_eq!(session.field().write_count(), 2);
    assert_eq!(
        session.field().value(),
        Some("POLYGON((-67.7 -53.79,-67.69 -53.79,-67.69 -53.8,-67.7 -53.79))")
    );
    assert_eq!(
        session.field().value().map(deserialize),
        Some(session.polygon_set())
    );
}

#[test]
fn test_every_vertex_event_rewrites_field() {
    let mut session = open(Some("POLYGON((0 0,1 0,1 1,0 1))"), EditorConfig::default());
    let id = RingId(0);

    let events = vec![
        RingEvent::VertexSet { index: 0, coordinate: c(-1.0, -1.0) },
        RingEvent::VertexInsert { index: 1, coordinate: c(0.5, -1.0) },
        RingEvent::VertexRemove { index: 4 },
        RingEvent::DragEnd {
            path: Ring::from_pairs(&[(10.0, 10.0), (11.0, 10.0), (11.0, 11.0)]).unwrap(),
        },
    ];

    let mut expected_writes = 0;
    for event in events {
        let result = session.dispatch(id, event).unwrap();
        expected_writes += 1;

        assert!(result.changed);
        assert_eq!(result.version, expected_writes as u64);
        assert_eq!(session.field().write_count(), expected_writes);
        assert_eq!(session.field().value(), Some(serialize(&session.polygon_set()).as_str()));
    }

    assert_eq!(session.field().value(), Some("POLYGON((10 10,11 10,11 11))"));
}

#[test]
fn test_delete_removes_ring_and_unregisters() {
    let mut session = open(
        Some("POLYGON((0 0,1 0,1 1), (2 2,3 2,3 3), (4 4,5 4,5 5))"),
        EditorConfig::default(),
    );
    let handle = session.registration(RingId(1)).unwrap().handle;

    let result = session
        .dispatch(RingId(1), RingEvent::DeleteRequested { position: ScreenPosition { x: 120.0, y: 40.0 } })
        .unwrap();

    assert!(result.changed);
    assert_eq!(session.len(), 2);
    assert_eq!(session.field().value(), Some("POLYGON((0 0,1 0,1 1), (4 4,5 4,5 5))"));
    assert!(!session.surface().is_live(handle));
    assert_eq!(session.surface().calls().last(), Some(&SurfaceCall::Unregister { handle }));

    // Remaining rings keep their ids
    assert!(session.ring(RingId(2)).is_some());
    session.dispatch(RingId(2), RingEvent::VertexRemove { index: 2 }).unwrap();
    assert_eq!(session.field().value(), Some("POLYGON((0 0,1 0,1 1), (4 4,5 4))"));
}

#[test]
fn test_delete_last_ring_writes_empty_polygon() {
    let mut session = open(Some("POLYGON((0 0,1 1))"), EditorConfig::default());
    session.on_delete_requested(RingId(0), ScreenPosition::default()).unwrap();

    assert!(session.is_empty());
    assert_eq!(session.field().value(), Some("POLYGON()"));
}

#[test]
fn test_delete_log_only_changes_nothing() {
    let stored = "POLYGON((0 0,1 0,1 1))";
    let config = EditorConfig::default().with_delete_policy(DeletePolicy::LogOnly);
    let mut session = open(Some(stored), config);

    let result = session
        .dispatch(RingId(0), RingEvent::DeleteRequested { position: ScreenPosition::default() })
        .unwrap();

    assert!(!result.changed);
    assert_eq!(result.version, 0);
    assert_eq!(session.len(), 1);
    assert_eq!(session.field().value(), Some(stored));
    assert_eq!(session.field().write_count(), 0);
    assert!(session.surface().live_handles().count() == 1);
}

#[test]
fn test_small_rings_survive() {
    let mut session = open(None, EditorConfig::default());
    session.on_polygon_created(Ring::new());
    session.on_polygon_created(Ring::from_pairs(&[(1.0, 2.0)]).unwrap());

    assert_eq!(session.field().value(), Some("POLYGON((), (1 2))"));
}

#[test]
fn test_session_over_borrowed_capabilities() {
    let mut surface = RecordingSurface::new();
    let mut field = TextField::with_value("POLYGON((0 0,1 1))");

    {
        let mut session = EditSession::new(&mut surface, &mut field, EditorConfig::default());
        session.dispatch(RingId(0), RingEvent::VertexRemove { index: 0 }).unwrap();
    }

    assert_eq!(field.value(), Some("POLYGON((1 1))"));
    assert_eq!(surface.live_handles().count(), 1);
}

#[test]
fn test_into_parts_returns_capabilities() {
    let mut session = open(None, EditorConfig::default());
    session.on_polygon_created(Ring::from_pairs(&[(3.0, 4.0)]).unwrap());

    let (surface, field) = session.into_parts();
    assert_eq!(field.value(), Some("POLYGON((3 4))"));
    assert_eq!(surface.calls().len(), 1);
}
