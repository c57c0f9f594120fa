//! Landmark source backed by a JavaScript detector function.
//!
//! The function is called as `detect(timestampMs)` and may return `null` /
//! `undefined` (no hand), a flat numeric array or `Float32Array` of 63 values,
//! or an array of 21 `{x, y, z}` objects. A thrown exception is a failed frame.

use globe_core::{DetectionError, Hand, LandmarkSource};
use js_sys::{Array, Float32Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

pub struct JsLandmarkSource {
    detect: Function,
}

impl JsLandmarkSource {
    pub fn new(detect: Function) -> Self {
        Self { detect }
    }
}

impl LandmarkSource for JsLandmarkSource {
    fn detect(&mut self, timestamp_ms: f64) -> Result<Option<Hand>, DetectionError> {
        let out = self
            .detect
            .call1(&JsValue::NULL, &JsValue::from_f64(timestamp_ms))
            .map_err(|e| DetectionError::Source(format!("{:?}", e)))?;
        if out.is_null() || out.is_undefined() {
            return Ok(None);
        }
        let values = flatten_landmarks(&out)?;
        Hand::from_flat(&values).map(Some)
    }
}

fn flatten_landmarks(value: &JsValue) -> Result<Vec<f32>, DetectionError> {
    if let Some(typed) = value.dyn_ref::<Float32Array>() {
        return Ok(typed.to_vec());
    }
    if !Array::is_array(value) {
        return Err(DetectionError::Malformed(
            "detector returned neither an array nor null".into(),
        ));
    }
    let arr: &Array = value.unchecked_ref();
    let mut out = Vec::with_capacity(63);
    for item in arr.iter() {
        if let Some(n) = item.as_f64() {
            out.push(n as f32);
        } else {
            for key in ["x", "y", "z"] {
                let n = Reflect::get(&item, &JsValue::from_str(key))
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(f64::NAN);
                out.push(n as f32);
            }
        }
    }
    Ok(out)
}
