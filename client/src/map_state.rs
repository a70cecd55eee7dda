use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use leptos::prelude::*;

use explorer_shared::{
    DispatchOutcome, MapController, RegionEvent, RegionEventKind, SelectOutcome, Tooltip,
};

use crate::render_loop::{FrameScheduler, now_ms};

/// Browser-side owner of the interaction state. Scene listeners, controls
/// and the host API all reach the `MapController` through this.
pub struct MapShell {
    controller: RefCell<Option<MapController>>,
    tooltip: RwSignal<Option<Tooltip>>,
    frames: RefCell<Option<FrameScheduler>>,
    /// Set while a drag has moved far enough that the trailing click is not
    /// a selection.
    drag_moved: Cell<bool>,
}

impl MapShell {
    pub fn new(tooltip: RwSignal<Option<Tooltip>>) -> Rc<Self> {
        Rc::new(Self {
            controller: RefCell::new(None),
            tooltip,
            frames: RefCell::new(None),
            drag_moved: Cell::new(false),
        })
    }

    /// Hand over the controller once the scene is drawn, and start the frame
    /// scheduler that plays its transitions.
    pub fn install(self: &Rc<Self>, controller: MapController) {
        *self.controller.borrow_mut() = Some(controller);
        let weak: Weak<Self> = Rc::downgrade(self);
        let frames = FrameScheduler::new(move |now| {
            weak.upgrade()
                .and_then(|shell| shell.with(|map| map.advance(now)))
                .unwrap_or(false)
        });
        *self.frames.borrow_mut() = Some(frames);
    }

    /// Run `f` against the controller. A call that arrives while another
    /// handler holds the controller is dropped.
    pub fn with<R>(&self, f: impl FnOnce(&mut MapController) -> R) -> Option<R> {
        let Ok(mut slot) = self.controller.try_borrow_mut() else {
            web_sys::console::warn_1(&"map busy, dropped reentrant event".into());
            return None;
        };
        slot.as_mut().map(f)
    }

    pub fn set_drag_moved(&self, moved: bool) {
        self.drag_moved.set(moved);
    }

    pub fn dispatch(&self, kind: RegionEventKind, event: RegionEvent) {
        if kind == RegionEventKind::Click && self.drag_moved.get() {
            return;
        }
        let Some((outcome, tooltip)) = self.with(|map| {
            let outcome = map.dispatch(kind, &event);
            (outcome, map.tooltip().cloned())
        }) else {
            return;
        };
        self.tooltip.set(tooltip);
        match outcome {
            DispatchOutcome::Select(select) => log_select(&select),
            DispatchOutcome::UnknownRegion { key } => {
                web_sys::console::warn_1(&format!("hover on unknown region: {key}").into());
            }
            DispatchOutcome::Hover => {}
        }
    }

    /// Select a region from outside the scene (host API).
    pub fn select(&self, key: &str) {
        if let Some(outcome) = self.with(|map| map.show_detail(key)) {
            self.tooltip.set(None);
            log_select(&outcome);
        }
    }

    pub fn zoom_by(&self, factor: f64) {
        self.animate(|map| {
            map.zoom_by(factor, now_ms());
        });
    }

    pub fn zoom_at(&self, factor: f64, focus_x: f64, focus_y: f64) {
        self.with(|map| map.zoom_at(factor, focus_x, focus_y));
    }

    pub fn pan(&self, dx: f64, dy: f64) {
        self.with(|map| map.pan(dx, dy));
    }

    pub fn reset(&self) {
        self.animate(|map| {
            map.reset(now_ms());
        });
    }

    /// Run a camera command and start frames if it began a transition.
    fn animate(&self, command: impl FnOnce(&mut MapController)) {
        let started = self.with(|map| {
            command(map);
            map.is_animating()
        });
        if started == Some(true)
            && let Some(frames) = self.frames.borrow().as_ref()
        {
            frames.request();
        }
    }
}

fn log_select(outcome: &SelectOutcome) {
    match outcome {
        SelectOutcome::MissingMetadata { key, .. } => {
            web_sys::console::error_1(&format!("no metadata for region: {key}").into());
        }
        SelectOutcome::UnknownRegion { key } => {
            web_sys::console::warn_1(&format!("select on unknown region: {key}").into());
        }
        SelectOutcome::Selected { .. } | SelectOutcome::Unchanged => {}
    }
}
