use serde::Serialize;

use crate::animation::TransformTransition;
use crate::camera::{
    CameraController, CameraProfile, RESET_TRANSITION_MS, ViewportTransform, ZOOM_TRANSITION_MS,
};
use crate::events::{RegionEvent, RegionEventKind};
use crate::geometry::GeoFeature;
use crate::hover::{HoverManager, Tooltip};
use crate::metadata::RegionCatalog;
use crate::panel::DetailSink;
use crate::projection;
use crate::scene::{Scene, SceneKind};
use crate::selection::{SelectOutcome, SelectionController};

/// What a dispatched pointer event did, for the caller to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Select(SelectOutcome),
    /// Hover emphasis or tooltip changed.
    Hover,
    /// Enter on a key the scene does not contain.
    UnknownRegion { key: String },
}

/// Snapshot exposed to the page host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    #[serde(flatten)]
    pub transform: ViewportTransform,
    pub active: Option<String>,
}

/// Owns all interaction state for one drawn map: the scene, the detail
/// panel, selection, hover and camera. Every pointer, button and host call
/// goes through here.
pub struct MapController {
    scene: Box<dyn Scene>,
    panel: Box<dyn DetailSink>,
    catalog: RegionCatalog,
    features: Option<Vec<GeoFeature>>,
    selection: SelectionController,
    hover: HoverManager,
    camera: CameraController,
    transition: Option<TransformTransition>,
    applied: ViewportTransform,
}

impl MapController {
    /// `features` are the geographic shapes behind a projected scene, used
    /// for coordinate lookups. Pass `None` for the fallback scene.
    pub fn new(
        scene: Box<dyn Scene>,
        panel: Box<dyn DetailSink>,
        catalog: RegionCatalog,
        features: Option<Vec<GeoFeature>>,
        width: f64,
        height: f64,
    ) -> Self {
        let camera = CameraController::new(CameraProfile::for_kind(scene.kind()), width, height);
        Self {
            scene,
            panel,
            catalog,
            features,
            selection: SelectionController::default(),
            hover: HoverManager::default(),
            camera,
            transition: None,
            applied: ViewportTransform::IDENTITY,
        }
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    pub fn active(&self) -> Option<&str> {
        self.selection.active()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.hover.tooltip()
    }

    /// Camera target. Equal to [`Self::applied`] once transitions finish.
    pub fn transform(&self) -> ViewportTransform {
        self.camera.transform()
    }

    /// Transform currently drawn on the scene root.
    pub fn applied(&self) -> ViewportTransform {
        self.applied
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            transform: self.camera.transform(),
            active: self.selection.active().map(str::to_string),
        }
    }

    pub fn dispatch(&mut self, kind: RegionEventKind, event: &RegionEvent) -> DispatchOutcome {
        match kind {
            RegionEventKind::Click => DispatchOutcome::Select(self.click(&event.target_key)),
            RegionEventKind::Enter => {
                let active = self.selection.active();
                if self
                    .hover
                    .enter(event, self.scene.as_mut(), active, &self.catalog)
                {
                    DispatchOutcome::Hover
                } else {
                    DispatchOutcome::UnknownRegion {
                        key: event.target_key.clone(),
                    }
                }
            }
            RegionEventKind::Move => {
                self.hover.move_to(event.pointer);
                DispatchOutcome::Hover
            }
            RegionEventKind::Leave => {
                let active = self.selection.active();
                self.hover
                    .leave(&event.target_key, self.scene.as_mut(), active);
                DispatchOutcome::Hover
            }
        }
    }

    /// Select `key` and clear any hover tooltip.
    pub fn click(&mut self, key: &str) -> SelectOutcome {
        let outcome = self.selection.select(
            key,
            self.scene.as_mut(),
            &self.catalog,
            self.panel.as_mut(),
        );
        self.hover.dismiss();
        outcome
    }

    /// Host entry point for showing a region's details. Goes through the
    /// same path as a click so highlight and panel stay in step.
    pub fn show_detail(&mut self, key: &str) -> SelectOutcome {
        self.click(key)
    }

    /// Button zoom. The camera jumps to the target; the drawn transform
    /// eases towards it from `now`.
    pub fn zoom_by(&mut self, factor: f64, now: f64) -> ViewportTransform {
        let target = self.camera.zoom_by(factor);
        self.animate_to(target, now, ZOOM_TRANSITION_MS);
        target
    }

    /// Wheel zoom around a screen point, applied immediately.
    pub fn zoom_at(&mut self, factor: f64, focus_x: f64, focus_y: f64) -> ViewportTransform {
        let target = self.camera.zoom_at(factor, focus_x, focus_y);
        self.apply_now(target);
        target
    }

    /// Drag pan, applied immediately. Returns `false` if the scene cannot pan.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        if !self.camera.pan(dx, dy) {
            return false;
        }
        self.apply_now(self.camera.transform());
        true
    }

    pub fn reset(&mut self, now: f64) -> ViewportTransform {
        let target = self.camera.reset();
        self.animate_to(target, now, RESET_TRANSITION_MS);
        target
    }

    /// Region containing a geographic coordinate. Always `None` on the
    /// fallback scene, which has no geographic shapes.
    pub fn region_at(&self, lat: f64, lng: f64) -> Option<&str> {
        if self.scene.kind() != SceneKind::Projected {
            return None;
        }
        let features = self.features.as_deref()?;
        projection::region_at(features, lng, lat)
    }

    /// Step the running transition. Returns `true` while more frames are
    /// needed.
    pub fn advance(&mut self, now: f64) -> bool {
        let Some(transition) = &self.transition else {
            return false;
        };
        match transition.current(now) {
            Some(frame) => {
                self.applied = frame;
                self.scene.apply_transform(&frame);
                true
            }
            None => {
                self.apply_now(self.camera.transform());
                false
            }
        }
    }

    fn animate_to(&mut self, target: ViewportTransform, now: f64, duration: f64) {
        if target == self.applied {
            self.transition = None;
            return;
        }
        self.transition = Some(TransformTransition::new(self.applied, target, now, duration));
    }

    fn apply_now(&mut self, transform: ViewportTransform) {
        self.transition = None;
        self.applied = transform;
        self.scene.apply_transform(&transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PointerPos;
    use crate::geometry::parse_feature_collection;
    use crate::metadata::fallback_catalog;
    use crate::panel::PanelContent;
    use crate::projection::Mercator;
    use crate::scene::{Highlight, SceneLayout};
    use crate::testing::{RecordingPanel, RecordingScene, SceneLog};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Renders = Rc<RefCell<Vec<PanelContent>>>;

    fn fallback_controller() -> (MapController, Renders, Rc<RefCell<SceneLog>>) {
        let scene = RecordingScene::fallback();
        let log = scene.log();
        let (panel, renders) = RecordingPanel::new();
        let controller = MapController::new(
            Box::new(scene),
            Box::new(panel),
            fallback_catalog(),
            None,
            800.0,
            1000.0,
        );
        (controller, renders, log)
    }

    fn projected_controller() -> (MapController, Rc<RefCell<SceneLog>>) {
        let payload = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "id": "taipei", "name": "台北市", "region": "north" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[121.4, 25.0], [121.6, 25.0], [121.6, 25.2], [121.4, 25.2], [121.4, 25.0]]]
                }
            }]
        });
        let features = parse_feature_collection(&payload.to_string()).unwrap();
        let layout = SceneLayout::projected(&features, &Mercator::taiwan(800.0, 600.0), 800.0, 600.0);
        let scene = RecordingScene::from_layout(layout);
        let log = scene.log();
        let (panel, _renders) = RecordingPanel::new();
        let controller = MapController::new(
            Box::new(scene),
            Box::new(panel),
            fallback_catalog(),
            Some(features),
            800.0,
            600.0,
        );
        (controller, log)
    }

    fn at(key: &str) -> RegionEvent {
        RegionEvent::new(key, PointerPos::new(100.0, 200.0))
    }

    #[test]
    fn click_selects_and_dismisses_tooltip() {
        let (mut map, renders, _log) = fallback_controller();
        map.dispatch(RegionEventKind::Enter, &at("tainan"));
        assert!(map.tooltip().is_some());

        let outcome = map.dispatch(RegionEventKind::Click, &at("tainan"));
        assert!(matches!(
            outcome,
            DispatchOutcome::Select(SelectOutcome::Selected { .. })
        ));
        assert!(map.tooltip().is_none());
        assert_eq!(map.active(), Some("tainan"));
        assert_eq!(map.scene().highlight("tainan"), Some(Highlight::Active));
        assert_eq!(renders.borrow()[0].name, "台南市");
    }

    #[test]
    fn leaving_the_active_region_keeps_it_active() {
        let (mut map, _renders, _log) = fallback_controller();
        map.dispatch(RegionEventKind::Click, &at("taipei"));
        map.dispatch(RegionEventKind::Enter, &at("taipei"));
        map.dispatch(RegionEventKind::Leave, &at("taipei"));
        assert_eq!(map.scene().highlight("taipei"), Some(Highlight::Active));
    }

    #[test]
    fn enter_on_unknown_key_reports_it() {
        let (mut map, _renders, _log) = fallback_controller();
        assert_eq!(
            map.dispatch(RegionEventKind::Enter, &at("atlantis")),
            DispatchOutcome::UnknownRegion {
                key: "atlantis".to_string()
            }
        );
    }

    #[test]
    fn button_zoom_animates_towards_camera_target() {
        let (mut map, _renders, log) = fallback_controller();
        let target = map.zoom_by(1.2, 0.0);
        assert_eq!(map.transform(), target);
        assert_eq!(map.applied(), ViewportTransform::IDENTITY);
        assert!(map.is_animating());

        assert!(map.advance(150.0));
        let mid = map.applied().scale;
        assert!(mid > 1.0 && mid < 1.2, "mid-transition scale {mid}");

        assert!(!map.advance(300.0));
        assert_eq!(map.applied(), target);
        assert!(!map.is_animating());
        assert_eq!(log.borrow().transforms.last(), Some(&target));
    }

    #[test]
    fn reset_returns_to_identity_after_transition() {
        let (mut map, _renders, _log) = fallback_controller();
        map.zoom_by(2.0, 0.0);
        map.advance(1_000.0);
        map.reset(2_000.0);
        assert!(map.transform().is_identity());
        assert!(map.advance(2_100.0));
        assert!(!map.advance(2_500.0));
        assert!(map.applied().is_identity());
    }

    #[test]
    fn advance_without_transition_is_idle() {
        let (mut map, _renders, log) = fallback_controller();
        assert!(!map.advance(10.0));
        assert!(log.borrow().transforms.is_empty());
    }

    #[test]
    fn fallback_scene_cannot_pan_or_locate() {
        let (mut map, _renders, log) = fallback_controller();
        assert!(!map.pan(10.0, 10.0));
        assert!(log.borrow().transforms.is_empty());
        assert_eq!(map.region_at(25.05, 121.5), None);
    }

    #[test]
    fn projected_scene_pans_and_locates() {
        let (mut map, _log) = projected_controller();
        assert!(map.pan(12.0, -4.0));
        assert_eq!(map.applied().translate_x, 12.0);
        assert_eq!(map.region_at(25.1, 121.5), Some("taipei"));
        assert_eq!(map.region_at(22.0, 120.0), None);
    }

    #[test]
    fn wheel_zoom_applies_immediately_and_cancels_animation() {
        let (mut map, _log) = projected_controller();
        map.zoom_by(1.2, 0.0);
        let target = map.zoom_at(1.5, 400.0, 300.0);
        assert!(!map.is_animating());
        assert_eq!(map.applied(), target);
        assert!((target.scale - 1.8).abs() < 1e-9);
    }

    #[test]
    fn view_state_serializes_flat() {
        let (mut map, _renders, _log) = fallback_controller();
        map.click("hualien");
        let json = serde_json::to_value(map.view_state()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "scale": 1.0,
                "translateX": 0.0,
                "translateY": 0.0,
                "active": "hualien"
            })
        );
    }

    #[test]
    fn show_detail_selects_like_a_click() {
        let (mut map, renders, _log) = fallback_controller();
        map.show_detail("kaohsiung");
        assert_eq!(map.active(), Some("kaohsiung"));
        assert_eq!(renders.borrow().len(), 1);
    }

    #[test]
    fn strokes_and_labels_follow_the_applied_zoom() {
        let (mut map, log) = projected_controller();
        map.zoom_by(2.0, 0.0);
        map.advance(300.0);
        assert_eq!(map.applied().scale, 2.0);
        assert_eq!(log.borrow().strokes.get("taipei"), Some(&0.5));
        assert_eq!(log.borrow().label_px.last(), Some(&5.0));

        map.click("taipei");
        assert_eq!(log.borrow().strokes.get("taipei"), Some(&0.75));

        map.reset(1_000.0);
        map.advance(1_500.0);
        assert_eq!(log.borrow().strokes.get("taipei"), Some(&1.5));
        assert_eq!(log.borrow().label_px.last(), Some(&10.0));
    }

    #[test]
    fn lost_leave_after_selection_leaves_one_hovered_shape() {
        let (mut map, _renders, _log) = fallback_controller();
        map.dispatch(RegionEventKind::Enter, &at("taipei"));
        map.show_detail("tainan");
        map.dispatch(RegionEventKind::Enter, &at("hualien"));

        assert_eq!(map.scene().highlight("taipei"), Some(Highlight::Base));
        assert_eq!(map.scene().highlight("hualien"), Some(Highlight::Hover));
        assert_eq!(map.scene().highlight("tainan"), Some(Highlight::Active));
    }
}
