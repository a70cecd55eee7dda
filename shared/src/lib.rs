pub mod animation;
pub mod camera;
pub mod colors;
pub mod controller;
pub mod events;
pub mod fallback;
pub mod geometry;
pub mod hover;
pub mod metadata;
pub mod panel;
pub mod projection;
pub mod region;
pub mod scene;
pub mod selection;

#[cfg(test)]
pub(crate) mod testing;

pub use camera::{CameraController, CameraProfile, ViewportTransform};
pub use controller::{DispatchOutcome, MapController, ViewState};
pub use events::{PointerPos, RegionEvent, RegionEventKind};
pub use geometry::{GeoFeature, GeometryError};
pub use hover::Tooltip;
pub use metadata::{RegionCatalog, RegionMetadata};
pub use panel::{DetailSink, PanelContent};
pub use region::{Outline, Region, RegionGroup};
pub use scene::{Highlight, Scene, SceneKind, SceneLayout, SceneStyler, ShapeRegistry};
pub use selection::SelectOutcome;
