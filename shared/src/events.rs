use serde::Serialize;

/// Pointer position in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEventKind {
    Click,
    Enter,
    Move,
    Leave,
}

/// Pointer interaction on a region shape. Both rendering paths normalize
/// their native events to this record before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionEvent {
    pub target_key: String,
    pub pointer: PointerPos,
}

impl RegionEvent {
    pub fn new(target_key: impl Into<String>, pointer: PointerPos) -> Self {
        Self {
            target_key: target_key.into(),
            pointer,
        }
    }
}
