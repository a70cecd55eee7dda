use std::collections::HashMap;

use crate::camera::ViewportTransform;
use crate::colors;
use crate::geometry::GeoFeature;
use crate::projection::Mercator;
use crate::region::{Label, Outline, Region, RegionGroup};

/// Region labels are hidden on viewports narrower than this.
pub const LABEL_BREAKPOINT_PX: f64 = 768.0;
/// Stroke weight of the unhighlighted outline at scale 1.
pub const BASE_STROKE: f64 = 1.0;
pub const EMPHASIS_STROKE: f64 = 1.5;
pub const HOVER_TRANSITION_MS: u32 = 200;
pub const SELECT_TRANSITION_MS: u32 = 300;

/// Which rendering path built the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Shapes projected from the geographic feature collection.
    Projected,
    /// Hand-drawn shapes used when the geometry fetch fails.
    Fallback,
}

impl SceneKind {
    pub const fn label_font_px(self) -> f64 {
        match self {
            Self::Projected => 10.0,
            Self::Fallback => 12.0,
        }
    }
}

pub fn labels_visible(viewport_width: f64) -> bool {
    viewport_width >= LABEL_BREAKPOINT_PX
}

/// Highlight state of one shape. At most one shape is `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Base,
    Hover,
    Active,
}

/// Resolved presentation for a highlight on a given group.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: &'static str,
    /// Stroke weight at scale 1; divide by the zoom scale before applying.
    pub stroke_weight: f64,
    pub filter: Option<String>,
}

impl ShapeStyle {
    pub fn stroke_width_at(&self, scale: f64) -> f64 {
        inverse_scaled(self.stroke_weight, scale)
    }
}

impl Highlight {
    pub fn style(self, group: RegionGroup) -> ShapeStyle {
        match self {
            Self::Base => ShapeStyle {
                fill: group.fill(),
                stroke_weight: BASE_STROKE,
                filter: None,
            },
            Self::Hover => ShapeStyle {
                fill: group.fill(),
                stroke_weight: EMPHASIS_STROKE,
                filter: Some(colors::drop_shadow(2.0, 3.0, 0.2)),
            },
            Self::Active => ShapeStyle {
                fill: colors::ACCENT,
                stroke_weight: EMPHASIS_STROKE,
                filter: Some(colors::drop_shadow(4.0, 4.0, 0.25)),
            },
        }
    }

    pub const fn transition_ms(self) -> u32 {
        match self {
            Self::Hover => HOVER_TRANSITION_MS,
            Self::Base | Self::Active => SELECT_TRANSITION_MS,
        }
    }
}

/// Size that keeps its on-screen weight constant under a zoom `scale`.
pub fn inverse_scaled(base: f64, scale: f64) -> f64 {
    if scale > 0.0 { base / scale } else { base }
}

/// Tracks the scale a scene is drawn at and sizes strokes and labels so
/// their on-screen weight does not change with zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyler {
    kind: SceneKind,
    scale: f64,
}

impl SceneStyler {
    pub fn new(kind: SceneKind) -> Self {
        Self { kind, scale: 1.0 }
    }

    /// Adopt the scale of a newly applied camera transform.
    pub fn rescale(&mut self, transform: &ViewportTransform) {
        self.scale = transform.scale;
    }

    pub fn stroke_width(&self, highlight: Highlight, group: RegionGroup) -> f64 {
        highlight.style(group).stroke_width_at(self.scale)
    }

    pub fn label_px(&self) -> f64 {
        inverse_scaled(self.kind.label_font_px(), self.scale)
    }
}

/// The drawn set of selectable shapes, whichever path produced them.
///
/// Selection, hover and camera logic only talk to this trait.
pub trait Scene {
    fn kind(&self) -> SceneKind;

    fn region(&self, key: &str) -> Option<&Region>;

    fn highlight(&self, key: &str) -> Option<Highlight>;

    /// Restyle one shape. Returns `false` if the scene has no such region.
    fn set_highlight(&mut self, key: &str, highlight: Highlight) -> bool;

    /// Apply a camera transform to the scene root and re-apply inverse
    /// scaling to strokes and labels.
    fn apply_transform(&mut self, transform: &ViewportTransform);
}

/// Region shapes in screen space, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub kind: SceneKind,
    pub width: f64,
    pub height: f64,
    pub regions: Vec<Region>,
}

impl SceneLayout {
    /// Project geographic features onto a `width` × `height` viewport.
    pub fn projected(features: &[GeoFeature], projection: &Mercator, width: f64, height: f64) -> Self {
        let regions = features
            .iter()
            .map(|feature| Region {
                key: feature.key.clone(),
                name: feature.name.clone(),
                group: feature.group,
                outline: Outline::Path(projection.path_data(&feature.shape)),
                label: projection.centroid(&feature.shape).map(|(x, y)| Label {
                    x,
                    y,
                    text: feature.name.clone(),
                }),
            })
            .collect();
        Self {
            kind: SceneKind::Projected,
            width,
            height,
            regions,
        }
    }

    pub fn region(&self, key: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.key == key)
    }
}

/// One registered shape: the region it draws, the renderer's handle for it,
/// and its current highlight.
#[derive(Debug, Clone)]
pub struct ShapeEntry<H> {
    pub region: Region,
    pub handle: H,
    pub highlight: Highlight,
}

/// Region key → shape handle registry, built once when the scene is drawn and
/// consulted by every later lookup.
#[derive(Debug, Clone)]
pub struct ShapeRegistry<H> {
    entries: Vec<ShapeEntry<H>>,
    index: HashMap<String, usize>,
}

impl<H> Default for ShapeRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<H> ShapeRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape. A key that is already registered is rejected.
    pub fn insert(&mut self, region: Region, handle: H) -> bool {
        if self.index.contains_key(&region.key) {
            return false;
        }
        self.index.insert(region.key.clone(), self.entries.len());
        self.entries.push(ShapeEntry {
            region,
            handle,
            highlight: Highlight::Base,
        });
        true
    }

    pub fn get(&self, key: &str) -> Option<&ShapeEntry<H>> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ShapeEntry<H>> {
        self.index.get(key).map(|&i| &mut self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeEntry<H>> {
        self.entries.iter()
    }

    /// Keys currently carrying the given highlight, in draw order.
    pub fn keys_with(&self, highlight: Highlight) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.highlight == highlight)
            .map(|e| e.region.key.as_str())
            .collect()
    }
}
