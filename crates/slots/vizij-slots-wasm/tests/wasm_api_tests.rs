#![cfg(target_arch = "wasm32")]
use serde_json::Value;
use serde_wasm_bindgen as swb;
use vizij_slots_wasm::{abi_version, format_value, VizijSlots};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn json_of(v: JsValue) -> Value {
    swb::from_value(v).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    assert!(VizijSlots::new(JsValue::UNDEFINED).is_ok());
    assert!(VizijSlots::new(JsValue::NULL).is_ok());
}

/// it should accept a JSON string config with camelCase keys
#[wasm_bindgen_test]
fn construct_from_json_string() {
    let cfg = JsValue::from_str(r#"{ "includeComma": true, "precision": 1 }"#);
    let mut slots = VizijSlots::new(cfg).unwrap();
    let out = json_of(slots.set_value(1234.5).unwrap());
    assert_eq!(out["frame"]["text"], "1,234.5");
}

/// it should error cleanly on conflicting timing
#[wasm_bindgen_test]
fn conflicting_config_errors() {
    let cfg = JsValue::from_str(r#"{ "spring": true, "animationDuration": 300 }"#);
    assert!(VizijSlots::new(cfg).is_err());
}

/// it should error cleanly on invalid values
#[wasm_bindgen_test]
fn invalid_value_errors() {
    let mut slots = VizijSlots::new(JsValue::UNDEFINED).unwrap();
    assert!(slots.set_value(f64::NAN).is_err());
    assert!(slots.set_value(-5.0).is_err());
}

/// it should run a full pass through set_value and complete
#[wasm_bindgen_test]
fn pass_round_trip() {
    let mut slots = VizijSlots::new(JsValue::UNDEFINED).unwrap();
    let out = json_of(slots.set_value(42.0).unwrap());
    let pass = out["frame"]["pass"].as_u64().unwrap() as u32;
    assert_eq!(out["events"][0]["kind"], "pass_started");
    assert_eq!(slots.pass_in_flight(), Some(pass));

    let ids: Vec<u32> = out["frame"]["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap() as u32)
        .collect();
    assert_eq!(ids.len(), 2);
    slots.complete(pass, ids[0]).unwrap();
    let out = json_of(slots.complete(pass, ids[1]).unwrap());
    assert_eq!(out["events"][0]["kind"], "pass_settled");
    assert_eq!(slots.pass_in_flight(), None);

    let stale = json_of(slots.complete_pass(pass).unwrap());
    assert_eq!(stale["events"][0]["kind"], "stale_completion");

    let frame = json_of(slots.frame().unwrap());
    let key = frame["slots"][0]["key"].as_str().unwrap();
    assert!(key.starts_with(&slots.instance()));
}

/// it should format without a controller
#[wasm_bindgen_test]
fn format_helper() {
    let f = json_of(format_value(1005.0, None, true).unwrap());
    assert_eq!(f["text"], "1,005");
    assert_eq!(f["digits"], serde_json::json!([1, 0, 0, 5]));
    assert!(format_value(1.0, Some(-1), false).is_err());
}
