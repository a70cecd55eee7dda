use crate::camera::ViewportTransform;

/// An eased transition of the applied camera transform (button zoom, reset).
#[derive(Debug, Clone)]
pub struct TransformTransition {
    pub from: ViewportTransform,
    pub to: ViewportTransform,
    pub start_time: f64,
    pub duration: f64, // milliseconds
}

impl TransformTransition {
    pub fn new(from: ViewportTransform, to: ViewportTransform, start_time: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start_time,
            duration,
        }
    }

    /// Returns the interpolated transform, or None once the transition is complete.
    pub fn current(&self, now: f64) -> Option<ViewportTransform> {
        let elapsed = now - self.start_time;
        if elapsed >= self.duration || self.duration <= 0.0 {
            return None;
        }
        let t = cubic_ease_out((elapsed / self.duration).max(0.0));
        Some(self.from.lerp(&self.to, t))
    }
}

/// Cubic ease-out: decelerating to zero velocity.
fn cubic_ease_out(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t + 1.0
}
