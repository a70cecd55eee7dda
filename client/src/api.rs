use std::rc::Weak;

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::map_state::MapShell;

const GLOBAL_NAME: &str = "taiwanMap";

fn define(target: &Object, name: &str, value: JsValue) -> Result<(), String> {
    Reflect::set(target, &JsValue::from_str(name), &value)
        .map(|_| ())
        .map_err(|e| format!("define {name}: {e:?}"))
}

/// Expose `window.taiwanMap` so the host page can drive the map.
///
/// `zoomMap(delta)` zooms by `1 + delta`. `getCountyFromLatLng(lat, lng)`
/// returns a region key or `null`. `viewState()` returns
/// `{ scale, translateX, translateY, active }`.
pub fn install(shell: Weak<MapShell>) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let api = Object::new();

    let zoom = {
        let shell = shell.clone();
        Closure::<dyn Fn(f64)>::new(move |delta: f64| {
            if let Some(shell) = shell.upgrade() {
                shell.zoom_by(1.0 + delta);
            }
        })
    };
    define(&api, "zoomMap", zoom.into_js_value())?;

    let reset = {
        let shell = shell.clone();
        Closure::<dyn Fn()>::new(move || {
            if let Some(shell) = shell.upgrade() {
                shell.reset();
            }
        })
    };
    define(&api, "resetMap", reset.into_js_value())?;

    let show = {
        let shell = shell.clone();
        Closure::<dyn Fn(String)>::new(move |key: String| {
            if let Some(shell) = shell.upgrade() {
                shell.select(&key);
            }
        })
    };
    define(&api, "showCountyInfo", show.into_js_value())?;

    let locate = {
        let shell = shell.clone();
        Closure::<dyn Fn(f64, f64) -> JsValue>::new(move |lat: f64, lng: f64| {
            shell
                .upgrade()
                .and_then(|shell| shell.with(|map| map.region_at(lat, lng).map(str::to_string)))
                .flatten()
                .map(|key| JsValue::from_str(&key))
                .unwrap_or(JsValue::NULL)
        })
    };
    define(&api, "getCountyFromLatLng", locate.into_js_value())?;

    let view_state = Closure::<dyn Fn() -> JsValue>::new(move || {
        let Some(state) = shell.upgrade().and_then(|shell| shell.with(|map| map.view_state()))
        else {
            return JsValue::NULL;
        };
        let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
        state.serialize(&serializer).unwrap_or(JsValue::NULL)
    });
    define(&api, "viewState", view_state.into_js_value())?;

    define(window.as_ref(), GLOBAL_NAME, api.into())
}
