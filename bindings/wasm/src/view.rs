use std::{cell::RefCell, rc::Rc};

use ahash::AHashMap;
use js_sys::Function;
use quotemap_core::{
    ActionKind, AttributeFilter, Dispatcher, EngineConfig, MapEvent, MapView, MarkerSnapshot, QuotationSite,
};
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};
use web_sys::console;

use crate::common::*;

type Callbacks = Rc<RefCell<AHashMap<ActionKind, Vec<Function>>>>;

/// Browser-side handle on one map view.
///
/// The host map library forwards pointer events in (lat, lng) and subscribes
/// to actions with `on(name, fn)`; every callback receives the event payload
/// as a plain JS value.
#[wasm_bindgen]
pub struct WasmMapView {
    inner: MapView<QuotationSite>,
    callbacks: Callbacks,
}

#[wasm_bindgen]
impl WasmMapView {
    /// records: array of `{ id, status, location: { lat, lng }, ... }`
    /// config: optional `{ precision, show_all_markers, use_spatial_index }`
    #[wasm_bindgen(constructor)]
    pub fn new(records: JsValue, config: JsValue) -> Result<WasmMapView, JsValue> {
        let records: Vec<QuotationSite> = serde_wasm_bindgen::from_value(records)?;
        let config: EngineConfig = from_js_or_default(config)?;
        config.validate().map_err(js_err)?;

        let callbacks: Callbacks = Rc::default();
        let mut dispatcher = Dispatcher::new();
        {
            let callbacks = callbacks.clone();
            dispatcher.on_any(move |event| forward(&callbacks, event));
        }

        Ok(WasmMapView { inner: MapView::new(records, config, dispatcher), callbacks })
    }

    /// Subscribe `callback` to an action, e.g. `view.on("region_completed", fn)`.
    ///
    /// Callbacks run synchronously inside the call that emitted the event,
    /// while this view is still borrowed. Calling back into the same view from
    /// a callback (say `confirm_region` from a `confirmation_requested`
    /// handler) throws a wasm-bindgen "recursive use" error; defer such calls
    /// with `queueMicrotask` or `setTimeout`.
    pub fn on(&mut self, action: &str, callback: Function) -> Result<(), JsValue> {
        let kind = parse_action(action).map_err(js_err)?;
        self.callbacks.borrow_mut().entry(kind).or_default().push(callback);
        Ok(())
    }

    /// Remove every callback for an action.
    pub fn off(&mut self, action: &str) -> Result<(), JsValue> {
        let kind = parse_action(action).map_err(js_err)?;
        self.callbacks.borrow_mut().remove(&kind);
        Ok(())
    }

    /// Names accepted by `on`.
    pub fn actions() -> Vec<String> {
        ActionKind::ALL.iter().map(|kind| kind.as_str().to_string()).collect()
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    #[wasm_bindgen(js_name = "enter_drawing_mode")]
    pub fn enter_drawing_mode(&mut self) { self.inner.enter_drawing_mode() }

    #[wasm_bindgen(js_name = "cancel_drawing")]
    pub fn cancel_drawing(&mut self) { self.inner.cancel_drawing() }

    #[wasm_bindgen(js_name = "toggle_drawing_mode")]
    pub fn toggle_drawing_mode(&mut self) { self.inner.toggle_drawing_mode() }

    #[wasm_bindgen(js_name = "pointer_down")]
    pub fn pointer_down(&mut self, lat: f64, lng: f64) { self.inner.pointer_down(lat, lng) }

    #[wasm_bindgen(js_name = "pointer_move")]
    pub fn pointer_move(&mut self, lat: f64, lng: f64) { self.inner.pointer_move(lat, lng) }

    #[wasm_bindgen(js_name = "pointer_up")]
    pub fn pointer_up(&mut self) { self.inner.pointer_up() }

    /// Current phase: "idle", "armed" or "dragging".
    pub fn phase(&self) -> String { self.inner.session().phase().as_str().to_string() }

    // -----------------------------------------------------------------------
    // Regions and locations
    // -----------------------------------------------------------------------

    #[wasm_bindgen(js_name = "confirm_region")]
    pub fn confirm_region(&mut self, duplicate_template: Option<String>) {
        self.inner.confirm_region(duplicate_template)
    }

    #[wasm_bindgen(js_name = "decline_region")]
    pub fn decline_region(&mut self) { self.inner.decline_region() }

    #[wasm_bindgen(js_name = "clear_all")]
    pub fn clear_all(&mut self) { self.inner.clear_all() }

    #[wasm_bindgen(js_name = "map_click")]
    pub fn map_click(&mut self, lat: f64, lng: f64) { self.inner.map_click(lat, lng) }

    #[wasm_bindgen(js_name = "confirm_location")]
    pub fn confirm_location(&mut self, duplicate_template: Option<String>) {
        self.inner.confirm_location(duplicate_template)
    }

    #[wasm_bindgen(js_name = "cancel_location")]
    pub fn cancel_location(&mut self) { self.inner.cancel_location() }

    #[wasm_bindgen(js_name = "select_quotation")]
    pub fn select_quotation(&mut self, id: &str) { self.inner.select_quotation(id) }

    // -----------------------------------------------------------------------
    // Records and visibility
    // -----------------------------------------------------------------------

    #[wasm_bindgen(js_name = "set_records")]
    pub fn set_records(&mut self, records: JsValue) -> Result<(), JsValue> {
        let records: Vec<QuotationSite> = serde_wasm_bindgen::from_value(records)?;
        self.inner.set_records(records);
        Ok(())
    }

    /// filter: `{ status, templateType, createdBy }`, any field optional; `null` clears it.
    #[wasm_bindgen(js_name = "set_filter")]
    pub fn set_filter(&mut self, filter: JsValue) -> Result<(), JsValue> {
        let filter: AttributeFilter = from_js_or_default(filter)?;
        self.inner.set_filter(filter);
        Ok(())
    }

    #[wasm_bindgen(js_name = "set_show_all")]
    pub fn set_show_all(&mut self, enabled: bool) { self.inner.set_show_all(enabled) }

    #[wasm_bindgen(js_name = "toggle_show_all")]
    pub fn toggle_show_all(&mut self) { self.inner.toggle_show_all() }

    /// Ids of the currently visible records.
    #[wasm_bindgen(js_name = "visible_ids")]
    pub fn visible_ids(&self) -> Vec<String> {
        self.inner.visible().into_iter().map(|site| site.id.clone()).collect()
    }

    /// Marker clusters for the visible records.
    pub fn clusters(&self) -> Result<JsValue, JsValue> {
        let markers: Vec<MarkerSnapshot> = self.inner.clusters().iter().map(MarkerSnapshot::from).collect();
        to_js(&markers)
    }

    /// Full view state for rendering.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.snapshot())
    }

    /// Re-announce the current visibility.
    pub fn refresh(&mut self) { self.inner.refresh() }
}

/// Hand an event's payload to every JS callback registered for its action.
fn forward(callbacks: &Callbacks, event: &MapEvent) {
    // Clone out first so a callback may register further callbacks.
    let targets: Vec<Function> = match callbacks.borrow().get(&event.kind()) {
        Some(fns) => fns.clone(),
        None => return,
    };

    let payload = match to_js(event) {
        Ok(value) => js_sys::Reflect::get(&value, &JsValue::from_str("payload")).unwrap_or(JsValue::UNDEFINED),
        Err(_) => JsValue::UNDEFINED,
    };
    for callback in targets {
        if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
            console::error_2(&JsValue::from_str(event.kind().as_str()), &err);
        }
    }
}
