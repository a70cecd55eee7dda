mod api;
mod config;
mod controls;
mod loader;
mod map_state;
mod panel;
mod render_loop;
mod svg_scene;
mod tooltip;

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use explorer_shared::projection::Mercator;
use explorer_shared::{MapController, SceneLayout, Tooltip, fallback};

use crate::config::{
    DEFAULT_MAP_SIZE, LOADER_HIDE_DELAY_MS, LOADER_REMOVE_DELAY_MS, LOADER_SELECTOR,
    MAP_CONTAINER_ID, MAP_WRAPPER_ID,
};
use crate::controls::ControlBindings;
use crate::loader::LoadSource;
use crate::map_state::MapShell;
use crate::panel::DomPanel;
use crate::svg_scene::{FallbackScene, ProjectedScene};
use crate::tooltip::RegionTooltip;

/// Everything that must live as long as the page.
struct MountedMap {
    _shell: Rc<MapShell>,
    _controls: ControlBindings,
}

thread_local! {
    static TOOLTIP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = const { RefCell::new(None) };
    static MOUNTED_MAP: RefCell<Option<MountedMap>> = const { RefCell::new(None) };
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let tooltip: RwSignal<Option<Tooltip>> = RwSignal::new(None);
    if let Some(body) = document.body() {
        TOOLTIP_MOUNT_HANDLE.with(move |slot| {
            let _old = slot.borrow_mut().take();
            let handle = mount_to(body, move || view! { <RegionTooltip tooltip=tooltip /> });
            *slot.borrow_mut() = Some(Box::new(handle));
        });
    }

    spawn_local(async move {
        if let Err(e) = boot(document, tooltip).await {
            web_sys::console::error_1(&format!("map boot failed: {e}").into());
        }
    });
}

fn map_wrapper(document: &Document) -> Option<Element> {
    document
        .get_element_by_id(MAP_WRAPPER_ID)
        .or_else(|| document.get_element_by_id(MAP_CONTAINER_ID))
}

fn wrapper_size(wrapper: &Element) -> (f64, f64) {
    let (w, h) = (wrapper.client_width() as f64, wrapper.client_height() as f64);
    if w > 0.0 && h > 0.0 { (w, h) } else { DEFAULT_MAP_SIZE }
}

async fn boot(document: Document, tooltip: RwSignal<Option<Tooltip>>) -> Result<(), String> {
    let (catalog, source) = loader::load_catalog().await;
    let origin = match source {
        LoadSource::Remote => "remote",
        LoadSource::BuiltIn => "built-in",
    };
    web_sys::console::info_1(&format!("{} region records ({origin})", catalog.len()).into());

    let Some(wrapper) = map_wrapper(&document) else {
        web_sys::console::info_1(&format!("#{MAP_WRAPPER_ID} not found, map not drawn").into());
        return Ok(());
    };
    let shell = MapShell::new(tooltip);
    let weak = Rc::downgrade(&shell);
    let panel = Box::new(DomPanel::new(document.clone()));

    let (controller, controls) = match loader::load_geometry().await {
        Some(features) => {
            let (w, h) = wrapper_size(&wrapper);
            let layout = SceneLayout::projected(&features, &Mercator::taiwan(w, h), w, h);
            let scene = ProjectedScene::build(&document, &wrapper, &layout, &weak)?;
            let controls = controls::bind_with_gestures(&document, &weak, scene.svg(), (w, h));
            let map = MapController::new(Box::new(scene), panel, catalog, Some(features), w, h);
            (map, controls)
        }
        None => {
            let layout = fallback::layout(&catalog);
            let scene = FallbackScene::build(&document, &wrapper, &layout, &weak)?;
            let controls = controls::bind(&document, &weak);
            let map = MapController::new(
                Box::new(scene),
                panel,
                catalog,
                None,
                layout.width,
                layout.height,
            );
            (map, controls)
        }
    };

    shell.install(controller);
    if let Err(e) = api::install(weak) {
        web_sys::console::warn_1(&format!("host API unavailable: {e}").into());
    }
    MOUNTED_MAP.with(|slot| {
        *slot.borrow_mut() = Some(MountedMap {
            _shell: shell,
            _controls: controls,
        });
    });
    dismiss_loader(&document);
    Ok(())
}

/// Fade the loading overlay out, then remove it.
fn dismiss_loader(document: &Document) {
    let Ok(Some(loader)) = document.query_selector(LOADER_SELECTOR) else {
        return;
    };
    Timeout::new(LOADER_HIDE_DELAY_MS, move || {
        let _ = loader.class_list().add_1("hidden");
        Timeout::new(LOADER_REMOVE_DELAY_MS, move || loader.remove()).forget();
    })
    .forget();
}
