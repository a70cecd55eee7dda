use crate::events::{PointerPos, RegionEvent};
use crate::metadata::RegionCatalog;
use crate::scene::{Highlight, Scene};

/// The single floating label shown while a shape is hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub key: String,
    pub text: String,
    pub pos: PointerPos,
}

/// Transient hover emphasis and tooltip. Reads the active key but never
/// changes selection.
#[derive(Debug, Clone, Default)]
pub struct HoverManager {
    tooltip: Option<Tooltip>,
    /// Shape last given hover emphasis. Outlives the tooltip, which a click
    /// dismisses while the pointer is still over the shape.
    hovered: Option<String>,
}

impl HoverManager {
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Pointer entered a shape. Returns `false` when the scene does not know
    /// the key.
    pub fn enter(
        &mut self,
        event: &RegionEvent,
        scene: &mut dyn Scene,
        active: Option<&str>,
        catalog: &RegionCatalog,
    ) -> bool {
        let key = event.target_key.as_str();
        let Some(region) = scene.region(key) else {
            return false;
        };
        let text = catalog
            .get(key)
            .map(|meta| meta.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(&region.name)
            .to_string();

        // A leave can be lost when the pointer exits the window mid-hover.
        if let Some(stale) = self.hovered.take()
            && stale != key
            && active != Some(stale.as_str())
            && scene.highlight(&stale) == Some(Highlight::Hover)
        {
            scene.set_highlight(&stale, Highlight::Base);
        }
        if active != Some(key) {
            scene.set_highlight(key, Highlight::Hover);
        }
        self.hovered = Some(key.to_string());
        self.tooltip = Some(Tooltip {
            key: key.to_string(),
            text,
            pos: event.pointer,
        });
        true
    }

    pub fn move_to(&mut self, pos: PointerPos) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.pos = pos;
        }
    }

    /// Pointer left a shape: revert its emphasis unless it is active, and
    /// drop the tooltip.
    pub fn leave(&mut self, key: &str, scene: &mut dyn Scene, active: Option<&str>) {
        if active != Some(key) && scene.highlight(key) == Some(Highlight::Hover) {
            scene.set_highlight(key, Highlight::Base);
        }
        if self.hovered.as_deref() == Some(key) {
            self.hovered = None;
        }
        self.tooltip = None;
    }

    /// Remove the tooltip without touching any highlight.
    pub fn dismiss(&mut self) {
        self.tooltip = None;
    }
}
