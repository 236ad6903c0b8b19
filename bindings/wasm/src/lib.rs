use wasm_bindgen::prelude::*;

mod common;
mod logging;
mod view;

pub use view::WasmMapView;

/// Called automatically when the WASM module is instantiated.
/// Sets up panic hook so Rust panics appear as console.error in the browser,
/// and sends engine logs (info and above) to the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init_logging();
}
