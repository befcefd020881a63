use polyedit_codec::{deserialize, serialize, Coordinate, PolygonSet, Ring};
use polyedit_editor::{
    EditSession, EditorConfig, RenderSurface, RingEvent, RingId, RingStyle, ScreenPosition, SurfaceHandle,
    TextSink,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
extern "C" {
    /// Map object supplied by the page (e.g. a thin wrapper around the maps API)
    pub type MapSurface;

    #[wasm_bindgen(method, js_name = registerRing)]
    fn register_ring(this: &MapSurface, id: u32, path_json: &str, style_json: &str) -> u32;

    #[wasm_bindgen(method, js_name = unregisterRing)]
    fn unregister_ring(this: &MapSurface, handle: u32);

    #[wasm_bindgen(method, js_name = fitViewTo)]
    fn fit_view_to(this: &MapSurface, path_json: &str);

    /// Anything with a string `value` property, typically an `<input>`
    pub type FieldElement;

    #[wasm_bindgen(method, getter)]
    fn value(this: &FieldElement) -> String;

    #[wasm_bindgen(method, setter)]
    fn set_value(this: &FieldElement, value: &str);
}

struct JsSurface(MapSurface);

impl RenderSurface for JsSurface {
    fn register_ring(&mut self, id: RingId, ring: &Ring, style: &RingStyle) -> SurfaceHandle {
        let path = serde_json::to_string(ring).unwrap_or_default();
        let style = serde_json::to_string(style).unwrap_or_default();
        // Ids past u32::MAX would need a page that has drawn four billion rings
        let handle = self.0.register_ring(id.0 as u32, &path, &style);
        SurfaceHandle(u64::from(handle))
    }

    fn unregister_ring(&mut self, handle: SurfaceHandle) {
        self.0.unregister_ring(handle.0 as u32);
    }

    fn fit_view_to(&mut self, ring: &Ring) {
        self.0.fit_view_to(&serde_json::to_string(ring).unwrap_or_default());
    }
}

struct JsField(FieldElement);

impl TextSink for JsField {
    fn read(&self) -> Option<String> {
        Some(self.0.value())
    }

    fn write(&mut self, text: &str) {
        self.0.set_value(text);
    }
}

/// Serialize a JSON array of rings (`[[{"lng":..,"lat":..}, ..], ..]`) to polygon text
#[wasm_bindgen(js_name = serializePolygons)]
pub fn serialize_polygons_js(rings_json: &str) -> Result<String, JsValue> {
    serialize_json(rings_json).map_err(|e| JsValue::from_str(&e))
}

/// Decode polygon text to a JSON array of rings; malformed text gives `[]`
#[wasm_bindgen(js_name = deserializePolygons)]
pub fn deserialize_polygons_js(text: &str) -> String {
    deserialize_json(text)
}

fn serialize_json(rings_json: &str) -> Result<String, String> {
    let set: PolygonSet =
        serde_json::from_str(rings_json).map_err(|e| format!("Invalid rings JSON: {}", e))?;
    Ok(serialize(&set))
}

fn deserialize_json(text: &str) -> String {
    serde_json::to_string(&deserialize(text)).unwrap_or_else(|_| "[]".to_string())
}

fn parse_path(path_json: &str) -> Result<Ring, String> {
    serde_json::from_str(path_json).map_err(|e| format!("Invalid path JSON: {}", e))
}

/// Edit session bound to a page's map and text field
#[wasm_bindgen]
pub struct PolyEditor {
    session: EditSession<JsSurface, JsField>,
}

#[wasm_bindgen]
impl PolyEditor {
    /// Open a session; `config_json` uses the `polyedit.config.json` format
    #[wasm_bindgen(constructor)]
    pub fn new(surface: MapSurface, field: FieldElement, config_json: Option<String>) -> Result<PolyEditor, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json).map_err(to_js)?,
            None => EditorConfig::default(),
        };

        Ok(Self {
            session: EditSession::new(JsSurface(surface), JsField(field), config),
        })
    }

    /// A polygon finished drawing; returns its ring id
    #[wasm_bindgen(js_name = polygonCreated)]
    pub fn polygon_created(&mut self, path_json: &str) -> Result<u32, JsValue> {
        let ring = parse_path(path_json).map_err(|e| JsValue::from_str(&e))?;
        Ok(self.session.on_polygon_created(ring).0 as u32)
    }

    #[wasm_bindgen(js_name = vertexSet)]
    pub fn vertex_set(&mut self, ring: u32, index: usize, lng: f64, lat: f64) -> Result<(), JsValue> {
        let coordinate = Coordinate::new(lng, lat).map_err(to_js)?;
        self.dispatch(ring, RingEvent::VertexSet { index, coordinate })
    }

    #[wasm_bindgen(js_name = vertexInsert)]
    pub fn vertex_insert(&mut self, ring: u32, index: usize, lng: f64, lat: f64) -> Result<(), JsValue> {
        let coordinate = Coordinate::new(lng, lat).map_err(to_js)?;
        self.dispatch(ring, RingEvent::VertexInsert { index, coordinate })
    }

    #[wasm_bindgen(js_name = vertexRemove)]
    pub fn vertex_remove(&mut self, ring: u32, index: usize) -> Result<(), JsValue> {
        self.dispatch(ring, RingEvent::VertexRemove { index })
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, ring: u32, path_json: &str) -> Result<(), JsValue> {
        let path = parse_path(path_json).map_err(|e| JsValue::from_str(&e))?;
        self.dispatch(ring, RingEvent::DragEnd { path })
    }

    #[wasm_bindgen(js_name = deleteRequested)]
    pub fn delete_requested(&mut self, ring: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.dispatch(ring, RingEvent::DeleteRequested { position: ScreenPosition { x, y } })
    }

    /// Canonical text for the current rings
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.session.text()
    }

    #[wasm_bindgen(getter, js_name = ringCount)]
    pub fn ring_count(&self) -> usize {
        self.session.len()
    }

    /// Initial map center and zoom as JSON
    #[wasm_bindgen(getter, js_name = mapDefaults)]
    pub fn map_defaults(&self) -> String {
        serde_json::to_string(&self.session.config().map_defaults).unwrap_or_default()
    }
}

impl PolyEditor {
    fn dispatch(&mut self, ring: u32, event: RingEvent) -> Result<(), JsValue> {
        self.session
            .dispatch(RingId(u64::from(ring)), event)
            .map(|_| ())
            .map_err(to_js)
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
