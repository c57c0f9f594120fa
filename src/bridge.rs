//! Calls to and from the page: per-frame render state, fact-lookup queries
//! and the results the page hands back.

use globe_core::{FactQuery, FactResult, FactSource, FrameReport, GeoCoordinate, Orientation, PointerState};
use glam::Vec3;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsValue;

/// Snapshot handed to the rendering collaborator once per frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView {
    pub report: FrameReport,
    pub orientation: Orientation,
    pub cloud_yaw: f32,
    pub marker: Option<Vec3>,
    pub pinned: Option<GeoCoordinate>,
    pub manual_controls: bool,
}

pub struct Callbacks {
    pub on_frame: Function,
    pub on_fact_query: Function,
    pub on_fact_result: Function,
}

impl Callbacks {
    pub fn frame(&self, view: &FrameView) {
        if let Err(e) = self.on_frame.call1(&JsValue::NULL, &frame_view_to_js(view)) {
            log::warn!("[loop] render callback threw: {:?}", e);
        }
    }

    pub fn fact_query(&self, query: &FactQuery) {
        log::info!("[facts] query {}", query.label());
        if let Err(e) = self.on_fact_query.call1(&JsValue::NULL, &fact_query_to_js(query)) {
            log::warn!("[facts] fact-lookup callback threw: {:?}", e);
        }
    }

    pub fn fact_result(&self, result: &FactResult) {
        log::info!("[facts] result with {} source(s)", result.sources.len());
        if let Err(e) = self.on_fact_result.call1(&JsValue::NULL, &fact_result_to_js(result)) {
            log::warn!("[facts] fact-result callback threw: {:?}", e);
        }
    }
}

fn set(obj: &Object, key: &str, value: impl Into<JsValue>) {
    _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}

pub fn pointer_to_js(p: &PointerState) -> JsValue {
    let obj = Object::new();
    set(&obj, "x", p.x);
    set(&obj, "y", p.y);
    set(&obj, "active", p.active);
    obj.into()
}

fn geo_to_js(coord: &GeoCoordinate) -> JsValue {
    let obj = Object::new();
    set(&obj, "lat", coord.lat);
    set(&obj, "lon", coord.lon);
    set(&obj, "label", coord.to_string());
    obj.into()
}

fn vec3_to_js(v: Vec3) -> JsValue {
    let arr = Array::new();
    arr.push(&JsValue::from_f64(v.x as f64));
    arr.push(&JsValue::from_f64(v.y as f64));
    arr.push(&JsValue::from_f64(v.z as f64));
    arr.into()
}

fn frame_view_to_js(view: &FrameView) -> JsValue {
    let obj = Object::new();
    set(&obj, "yaw", view.orientation.yaw);
    set(&obj, "pitch", view.orientation.pitch);
    set(&obj, "cloudYaw", view.cloud_yaw);
    set(&obj, "pointer", pointer_to_js(&view.report.pointer));
    set(&obj, "handPresent", view.report.hand_present);
    set(
        &obj,
        "pinchStrength",
        view.report
            .pinch_strength
            .map_or(JsValue::NULL, |s| JsValue::from_f64(s as f64)),
    );
    set(&obj, "manualControls", view.manual_controls);
    set(
        &obj,
        "marker",
        view.marker.map_or(JsValue::NULL, vec3_to_js),
    );
    set(
        &obj,
        "pinned",
        view.pinned.as_ref().map_or(JsValue::NULL, geo_to_js),
    );
    obj.into()
}

fn fact_query_to_js(query: &FactQuery) -> JsValue {
    let obj = Object::new();
    match query {
        FactQuery::Category(name) => {
            set(&obj, "kind", "category");
            set(&obj, "category", name.as_str());
        }
        FactQuery::Location(coord) => {
            set(&obj, "kind", "location");
            set(&obj, "lat", coord.lat);
            set(&obj, "lon", coord.lon);
        }
    }
    set(&obj, "label", query.label());
    obj.into()
}

fn get_string(obj: &JsValue, key: &str) -> Option<String> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
}

/// Read `{text, sources: [{uri, title}]}` as produced by the fact service.
/// `sources` may be missing; entries without a string `uri` are skipped.
pub fn fact_result_from_js(value: &JsValue) -> anyhow::Result<FactResult> {
    let text = get_string(value, "text")
        .ok_or_else(|| anyhow::anyhow!("fact result has no text"))?;
    let sources = Reflect::get(value, &JsValue::from_str("sources"))
        .ok()
        .filter(|v| Array::is_array(v))
        .map(|v| Array::from(&v))
        .unwrap_or_else(Array::new);
    let sources = sources.iter().filter_map(|item| {
        Some(FactSource {
            uri: get_string(&item, "uri")?,
            title: get_string(&item, "title").unwrap_or_default(),
        })
    });
    Ok(FactResult::new(text, sources))
}

fn fact_result_to_js(result: &FactResult) -> JsValue {
    let obj = Object::new();
    set(&obj, "text", result.text.as_str());
    let sources = Array::new();
    for src in &result.sources {
        let entry = Object::new();
        set(&entry, "uri", src.uri.as_str());
        set(&entry, "title", src.title.as_str());
        sources.push(&entry);
    }
    set(&obj, "sources", sources);
    obj.into()
}
