mod generator;
pub mod types;

use arith_codegen::GenerateOptions;
use wasm_bindgen::prelude::*;

pub use generator::{generate_snapshot_internal, options_or_default};
pub use types::*;

#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Generate a script from a serialized document.
///
/// ```ts
/// import init, { generate } from 'arith-wasm';
/// await init();
/// const snap = generate('inmemory://model/1', documentJson, { sourceMap: true });
/// if (snap.success) eval(snap.code);
/// ```
#[wasm_bindgen]
pub fn generate(uri: &str, document_json: &str, options: JsValue) -> JsValue {
    let opts = if options.is_undefined() || options.is_null() {
        GenerateOptions::default()
    } else {
        options_or_default(serde_wasm_bindgen::from_value(options))
    };
    let snapshot = generate_snapshot_internal(uri, document_json, &opts);
    serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
}

/// Generate with default options.
#[wasm_bindgen]
pub fn generate_default(uri: &str, document_json: &str) -> JsValue {
    let snapshot = generate_snapshot_internal(uri, document_json, &GenerateOptions::default());
    serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
