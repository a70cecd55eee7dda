use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::camera::ViewportTransform;
use crate::fallback;
use crate::metadata::RegionCatalog;
use crate::panel::{DetailSink, PanelContent};
use crate::region::Region;
use crate::scene::{Highlight, Scene, SceneKind, SceneLayout, SceneStyler, ShapeRegistry};

#[derive(Debug, Default)]
pub struct SceneLog {
    pub styles: Vec<(String, Highlight)>,
    pub transforms: Vec<ViewportTransform>,
    /// Stroke width each shape is currently drawn with.
    pub strokes: HashMap<String, f64>,
    /// Label font size after each transform.
    pub label_px: Vec<f64>,
}

/// In-memory scene that records every restyle and transform.
pub struct RecordingScene {
    kind: SceneKind,
    shapes: ShapeRegistry<()>,
    styler: SceneStyler,
    log: Rc<RefCell<SceneLog>>,
}

impl RecordingScene {
    pub fn from_layout(layout: SceneLayout) -> Self {
        let styler = SceneStyler::new(layout.kind);
        let mut log = SceneLog::default();
        let mut shapes = ShapeRegistry::new();
        for region in layout.regions {
            let width = styler.stroke_width(Highlight::Base, region.group);
            log.strokes.insert(region.key.clone(), width);
            shapes.insert(region, ());
        }
        Self {
            kind: layout.kind,
            shapes,
            styler,
            log: Rc::new(RefCell::new(log)),
        }
    }

    pub fn fallback() -> Self {
        Self::from_layout(fallback::layout(&RegionCatalog::new()))
    }

    pub fn log(&self) -> Rc<RefCell<SceneLog>> {
        Rc::clone(&self.log)
    }

    pub fn active_keys(&self) -> Vec<&str> {
        self.shapes.keys_with(Highlight::Active)
    }

    pub fn fill(&self, key: &str) -> Option<&'static str> {
        self.shapes
            .get(key)
            .map(|entry| entry.highlight.style(entry.region.group).fill)
    }

    pub fn style_log(&self) -> Vec<(String, Highlight)> {
        self.log.borrow().styles.clone()
    }

    pub fn clear_log(&mut self) {
        let mut log = self.log.borrow_mut();
        log.styles.clear();
        log.transforms.clear();
    }
}

impl Scene for RecordingScene {
    fn kind(&self) -> SceneKind {
        self.kind
    }

    fn region(&self, key: &str) -> Option<&Region> {
        self.shapes.get(key).map(|entry| &entry.region)
    }

    fn highlight(&self, key: &str) -> Option<Highlight> {
        self.shapes.get(key).map(|entry| entry.highlight)
    }

    fn set_highlight(&mut self, key: &str, highlight: Highlight) -> bool {
        let Some(entry) = self.shapes.get_mut(key) else {
            return false;
        };
        entry.highlight = highlight;
        let width = self.styler.stroke_width(highlight, entry.region.group);
        let mut log = self.log.borrow_mut();
        log.styles.push((key.to_string(), highlight));
        log.strokes.insert(key.to_string(), width);
        true
    }

    fn apply_transform(&mut self, transform: &ViewportTransform) {
        self.styler.rescale(transform);
        let mut log = self.log.borrow_mut();
        log.transforms.push(*transform);
        for entry in self.shapes.iter() {
            let width = self.styler.stroke_width(entry.highlight, entry.region.group);
            log.strokes.insert(entry.region.key.clone(), width);
        }
        log.label_px.push(self.styler.label_px());
    }
}

/// Detail sink that keeps every rendered panel.
pub struct RecordingPanel {
    renders: Rc<RefCell<Vec<PanelContent>>>,
}

impl RecordingPanel {
    pub fn new() -> (Self, Rc<RefCell<Vec<PanelContent>>>) {
        let renders = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                renders: Rc::clone(&renders),
            },
            renders,
        )
    }
}

impl DetailSink for RecordingPanel {
    fn render(&mut self, content: &PanelContent) {
        self.renders.borrow_mut().push(content.clone());
    }
}
