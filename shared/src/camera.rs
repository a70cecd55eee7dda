use serde::Serialize;

use crate::scene::SceneKind;

pub const ZOOM_IN_FACTOR: f64 = 1.2;
pub const ZOOM_OUT_FACTOR: f64 = 0.8;
pub const ZOOM_TRANSITION_MS: f64 = 300.0;
pub const RESET_TRANSITION_MS: f64 = 500.0;
const WHEEL_SENSITIVITY: f64 = 0.001;

/// Zoom factor for a wheel `delta_y`; scrolling down zooms out.
pub fn wheel_factor(delta_y: f64) -> f64 {
    (-delta_y * WHEEL_SENSITIVITY).exp()
}

/// Scale + translate applied to the whole scene root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// SVG `transform` attribute value for a `<g>` root.
    pub fn svg_transform(&self) -> String {
        format!(
            "translate({},{}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }

    /// CSS `transform` value for an element root.
    pub fn css_matrix(&self) -> String {
        format!(
            "matrix({}, 0, 0, {}, {}, {})",
            self.scale, self.scale, self.translate_x, self.translate_y
        )
    }

    /// Linear interpolation; `t` is clamped to [0, 1].
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            scale: self.scale + (to.scale - self.scale) * t,
            translate_x: self.translate_x + (to.translate_x - self.translate_x) * t,
            translate_y: self.translate_y + (to.translate_y - self.translate_y) * t,
        }
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-path camera limits and capabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProfile {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Drag gestures move the scene.
    pub pan: bool,
    /// Zoom keeps the viewport center fixed; otherwise translate is only
    /// rescaled by the zoom ratio.
    pub centered_zoom: bool,
}

impl CameraProfile {
    pub const PROJECTED: Self = Self {
        min_scale: 0.8,
        max_scale: 5.0,
        pan: true,
        centered_zoom: true,
    };

    pub const FALLBACK: Self = Self {
        min_scale: 0.8,
        max_scale: 2.5,
        pan: false,
        centered_zoom: false,
    };

    pub const fn for_kind(kind: SceneKind) -> Self {
        match kind {
            SceneKind::Projected => Self::PROJECTED,
            SceneKind::Fallback => Self::FALLBACK,
        }
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Owns the pan/zoom state. Scale always stays inside the profile's range.
#[derive(Debug, Clone)]
pub struct CameraController {
    transform: ViewportTransform,
    profile: CameraProfile,
    viewport: (f64, f64),
}

impl CameraController {
    pub fn new(profile: CameraProfile, width: f64, height: f64) -> Self {
        Self {
            transform: ViewportTransform::IDENTITY,
            profile,
            viewport: (width, height),
        }
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    /// Multiply the scale by `factor`, clamped, keeping the viewport center
    /// fixed where the profile supports it. Non-positive or non-finite factors
    /// are ignored.
    pub fn zoom_by(&mut self, factor: f64) -> ViewportTransform {
        let (w, h) = self.viewport;
        self.zoom_at(factor, w / 2.0, h / 2.0)
    }

    /// Zoom around a screen-space focus point (wheel zoom). On profiles
    /// without centered zoom the focus is ignored.
    pub fn zoom_at(&mut self, factor: f64, focus_x: f64, focus_y: f64) -> ViewportTransform {
        if !factor.is_finite() || factor <= 0.0 {
            return self.transform;
        }
        let t = self.transform;
        let new_scale = self.profile.clamp(t.scale * factor);
        let ratio = new_scale / t.scale;

        self.transform = if self.profile.centered_zoom {
            ViewportTransform {
                scale: new_scale,
                translate_x: focus_x - (focus_x - t.translate_x) * ratio,
                translate_y: focus_y - (focus_y - t.translate_y) * ratio,
            }
        } else {
            ViewportTransform {
                scale: new_scale,
                translate_x: t.translate_x * ratio,
                translate_y: t.translate_y * ratio,
            }
        };
        self.transform
    }

    /// Move by a screen-space delta. Returns `false` when the profile has no pan.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        if !self.profile.pan || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
        true
    }

    pub fn reset(&mut self) -> ViewportTransform {
        self.transform = ViewportTransform::IDENTITY;
        self.transform
    }
}
