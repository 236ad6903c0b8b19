use anyhow::{anyhow, Result};
use quotemap_core::ActionKind;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse an action name such as `"region_completed"`.
pub(crate) fn parse_action(name: &str) -> Result<ActionKind> {
    ActionKind::from_str(name).ok_or_else(|| {
        let known: Vec<&str> = ActionKind::ALL.iter().map(ActionKind::as_str).collect();
        anyhow!("Unknown action {name:?}. Expected one of: {}", known.join(", "))
    })
}

/// Deserialize an optional JS value, falling back to `T::default()` for `undefined`/`null`.
pub(crate) fn from_js_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

/// Serialize to a plain JS object (maps become objects, not `Map`s).
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsValue::from)
}
