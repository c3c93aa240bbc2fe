use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_slots_core::{format_number, PassId, SlotId, SlotNumbers, SlotsConfig};

#[wasm_bindgen]
pub struct VizijSlots {
    core: SlotNumbers,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Parse a config given as a JS object or a JSON string; undefined/null means defaults.
fn parse_config(config: &JsValue) -> Result<SlotsConfig, JsError> {
    if jsvalue_is_undefined_or_null(config) {
        return Ok(SlotsConfig::default());
    }
    let text = match config.as_string() {
        Some(s) => s,
        None => JSON::stringify(config)
            .map_err(|e| JsError::new(&format!("config stringify error: {:?}", e)))?
            .as_string()
            .ok_or_else(|| JsError::new("config: stringify produced non-string"))?,
    };
    SlotsConfig::from_json(&text).map_err(|e| JsError::new(&format!("config error: {e}")))
}

fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

#[wasm_bindgen]
impl VizijSlots {
    /// Create a controller. Pass a config object (camelCase or snake_case keys),
    /// a JSON string, or undefined/null for defaults.
    /// Example:
    ///   new VizijSlots({ includeComma: true, precision: 2, spring: true })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijSlots, JsError> {
        console_error_panic_hook::set_once();
        let cfg = parse_config(&config)?;
        let core = SlotNumbers::new(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?;
        Ok(VizijSlots { core })
    }

    /// Render key prefix shared by every slot of this controller.
    #[wasm_bindgen]
    pub fn instance(&self) -> String {
        self.core.instance().to_string()
    }

    /// Render a new value. Returns Outputs `{ frame?, events }`.
    #[wasm_bindgen(js_name = set_value)]
    pub fn set_value(&mut self, value: f64) -> Result<JsValue, JsError> {
        let out = self
            .core
            .set_value(value)
            .map_err(|e| JsError::new(&format!("set_value error: {e}")))?;
        to_js(out, "outputs")
    }

    /// Report one slot's animation as finished.
    #[wasm_bindgen]
    pub fn complete(&mut self, pass: u32, slot: u32) -> Result<JsValue, JsError> {
        let out = self.core.complete(PassId(pass), SlotId(slot));
        to_js(out, "outputs")
    }

    /// Report every animation of `pass` as finished.
    #[wasm_bindgen(js_name = complete_pass)]
    pub fn complete_pass(&mut self, pass: u32) -> Result<JsValue, JsError> {
        let out = self.core.complete_pass(PassId(pass));
        to_js(out, "outputs")
    }

    /// Current descriptor row.
    #[wasm_bindgen]
    pub fn frame(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.frame(), "frame")
    }

    /// Pass awaiting completion reports, if any.
    #[wasm_bindgen(js_name = pass_in_flight)]
    pub fn pass_in_flight(&self) -> Option<u32> {
        self.core.pass_in_flight().map(|p| p.0)
    }

    /// Replace the configuration and repaint the last value.
    #[wasm_bindgen]
    pub fn reconfigure(&mut self, config: JsValue) -> Result<JsValue, JsError> {
        let cfg = parse_config(&config)?;
        let out = self
            .core
            .reconfigure(cfg)
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;
        to_js(out, "outputs")
    }
}

/// Format a value the way a controller would, without creating one.
#[wasm_bindgen(js_name = format_value)]
pub fn format_value(
    value: f64,
    precision: Option<i32>,
    include_comma: bool,
) -> Result<JsValue, JsError> {
    let formatted = format_number(value, precision, include_comma)
        .map_err(|e| JsError::new(&format!("format error: {e}")))?;
    to_js(&formatted, "format")
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
