use std::cell::Cell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, EventTarget, MouseEvent, PointerEvent, WheelEvent};

use explorer_shared::camera::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR, wheel_factor};

use crate::config::{RESET_ID, ZOOM_IN_ID, ZOOM_OUT_ID};
use crate::map_state::MapShell;

/// Pointer travel, in screen pixels, after which a press counts as a drag.
const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Keeps control listeners alive for the life of the page.
pub struct ControlBindings {
    _buttons: Vec<Closure<dyn Fn(MouseEvent)>>,
    _wheel: Option<Closure<dyn Fn(WheelEvent)>>,
    _drag: Vec<Closure<dyn Fn(PointerEvent)>>,
}

fn listen(target: &EventTarget, name: &str, cb: &JsValue) {
    let _ = target.add_event_listener_with_callback(name, cb.unchecked_ref());
}

/// Wire the zoom in/out and reset buttons. Missing buttons are skipped and
/// reported once.
fn bind_buttons(document: &Document, shell: &Weak<MapShell>) -> Vec<Closure<dyn Fn(MouseEvent)>> {
    let actions: [(&str, fn(&MapShell)); 3] = [
        (ZOOM_IN_ID, |shell| shell.zoom_by(ZOOM_IN_FACTOR)),
        (ZOOM_OUT_ID, |shell| shell.zoom_by(ZOOM_OUT_FACTOR)),
        (RESET_ID, |shell| shell.reset()),
    ];

    let mut missing = Vec::new();
    let mut bound = Vec::new();
    for (id, action) in actions {
        let Some(button) = document.get_element_by_id(id) else {
            missing.push(id);
            continue;
        };
        let shell = shell.clone();
        let cb = Closure::<dyn Fn(MouseEvent)>::new(move |_: MouseEvent| {
            if let Some(shell) = shell.upgrade() {
                action(&shell);
            }
        });
        listen(&button, "click", cb.as_ref());
        bound.push(cb);
    }
    if !missing.is_empty() {
        web_sys::console::info_1(&format!("map controls not found: {}", missing.join(", ")).into());
    }
    bound
}

/// Convert client coordinates into the svg's viewBox space.
fn to_view_box(svg: &Element, view_size: (f64, f64), client_x: f64, client_y: f64) -> (f64, f64) {
    let rect = svg.get_bounding_client_rect();
    let sx = if rect.width() > 0.0 { view_size.0 / rect.width() } else { 1.0 };
    let sy = if rect.height() > 0.0 { view_size.1 / rect.height() } else { 1.0 };
    ((client_x - rect.left()) * sx, (client_y - rect.top()) * sy)
}

/// Buttons only. Used by the fallback scene, which has no wheel or drag.
pub fn bind(document: &Document, shell: &Weak<MapShell>) -> ControlBindings {
    ControlBindings {
        _buttons: bind_buttons(document, shell),
        _wheel: None,
        _drag: Vec::new(),
    }
}

/// Buttons plus cursor-centred wheel zoom and drag pan on `svg`.
pub fn bind_with_gestures(
    document: &Document,
    shell: &Weak<MapShell>,
    svg: &Element,
    view_size: (f64, f64),
) -> ControlBindings {
    let buttons = bind_buttons(document, shell);

    let wheel = {
        let shell = shell.clone();
        let svg_ref = svg.clone();
        Closure::<dyn Fn(WheelEvent)>::new(move |e: WheelEvent| {
            e.prevent_default();
            let Some(shell) = shell.upgrade() else {
                return;
            };
            let (x, y) = to_view_box(&svg_ref, view_size, e.client_x() as f64, e.client_y() as f64);
            shell.zoom_at(wheel_factor(e.delta_y()), x, y);
        })
    };
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = svg.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        wheel.as_ref().unchecked_ref(),
        &options,
    );

    // (last_x, last_y) in client pixels while a button is held.
    let last: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));
    let travelled = Rc::new(Cell::new(0.0_f64));

    let on_down = {
        let shell = shell.clone();
        let last = Rc::clone(&last);
        let travelled = Rc::clone(&travelled);
        Closure::<dyn Fn(PointerEvent)>::new(move |e: PointerEvent| {
            last.set(Some((e.client_x() as f64, e.client_y() as f64)));
            travelled.set(0.0);
            if let Some(shell) = shell.upgrade() {
                shell.set_drag_moved(false);
            }
        })
    };

    let on_move = {
        let shell = shell.clone();
        let last = Rc::clone(&last);
        let travelled = Rc::clone(&travelled);
        let svg_ref = svg.clone();
        Closure::<dyn Fn(PointerEvent)>::new(move |e: PointerEvent| {
            let Some((lx, ly)) = last.get() else {
                return;
            };
            let Some(shell) = shell.upgrade() else {
                return;
            };
            let (cx, cy) = (e.client_x() as f64, e.client_y() as f64);
            last.set(Some((cx, cy)));
            travelled.set(travelled.get() + (cx - lx).hypot(cy - ly));
            if travelled.get() > DRAG_THRESHOLD_PX {
                shell.set_drag_moved(true);
            }
            let (ax, ay) = to_view_box(&svg_ref, view_size, lx, ly);
            let (bx, by) = to_view_box(&svg_ref, view_size, cx, cy);
            shell.pan(bx - ax, by - ay);
        })
    };

    let on_up = {
        let last = Rc::clone(&last);
        Closure::<dyn Fn(PointerEvent)>::new(move |_: PointerEvent| {
            last.set(None);
        })
    };

    listen(svg, "pointerdown", on_down.as_ref());
    listen(svg, "pointermove", on_move.as_ref());
    listen(svg, "pointerup", on_up.as_ref());
    listen(svg, "pointerleave", on_up.as_ref());

    ControlBindings {
        _buttons: buttons,
        _wheel: Some(wheel),
        _drag: vec![on_down, on_move, on_up],
    }
}
