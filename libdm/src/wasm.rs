//! WebAssembly bindings for the delta modulation core

use wasm_bindgen::prelude::*;

use crate::core::{Bit, DmError};
use crate::{Pipeline, DEFAULT_FILTER_ORDER};

/// turn an error into js
fn to_js_err(e: DmError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// install the panic hook so rust panics show up in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// get lib version
#[wasm_bindgen]
pub fn version() -> String {
    crate::VERSION.to_string()
}

/// delta modulate samples
///
/// # Returns
/// `{ bits: Uint8Array, reference: Float64Array }`
#[wasm_bindgen]
pub fn encode(samples: &[f64], step_size: f64) -> Result<JsValue, JsValue> {
    let modulated = crate::encode(samples, step_size).map_err(to_js_err)?;
    let bits: Vec<u8> = modulated.bits.iter().map(|&b| u8::from(b)).collect();

    let obj = js_sys::Object::new();
    js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("bits"),
        &js_sys::Uint8Array::from(&bits[..]).into(),
    )?;
    js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("reference"),
        &js_sys::Float64Array::from(&modulated.reference[..]).into(),
    )?;
    Ok(obj.into())
}

/// rebuild the staircase from 0/1 bytes
#[wasm_bindgen]
pub fn decode(bits: &[u8], step_size: f64) -> Result<Vec<f64>, JsValue> {
    let bits = bits
        .iter()
        .map(|&b| Bit::try_from(b))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_js_err)?;
    crate::decode(&bits, step_size).map_err(to_js_err)
}

/// zero-phase butterworth low-pass, order defaults to 4
#[wasm_bindgen]
pub fn smooth(
    signal: &[f64],
    cutoff_hz: f64,
    sample_rate_hz: f64,
    order: Option<usize>,
) -> Result<Vec<f64>, JsValue> {
    crate::smooth(
        signal,
        cutoff_hz,
        sample_rate_hz,
        order.unwrap_or(DEFAULT_FILTER_ORDER),
    )
    .map_err(to_js_err)
}

/// run encoder, decoder and filter in one call
///
/// # Returns
/// `{ bits, reference, reconstructed, filtered }` as plain js arrays
#[wasm_bindgen]
pub fn run_pipeline(
    samples: &[f64],
    step_size: f64,
    sample_rate_hz: f64,
    cutoff_hz: f64,
    order: Option<usize>,
) -> Result<JsValue, JsValue> {
    let output = Pipeline::new(step_size, sample_rate_hz)
        .with_cutoff(cutoff_hz)
        .with_order(order.unwrap_or(DEFAULT_FILTER_ORDER))
        .run(samples)
        .map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}
