/// Fill for the active region, independent of its group.
pub const ACCENT: &str = "#f97707";
/// Fill for any group classifier the palette does not know.
pub const DEFAULT_FILL: &str = "#6c757d";
pub const OCEAN: &str = "#e0f2fe";
pub const SHAPE_STROKE: &str = "white";
pub const LABEL_FILL: &str = "#333";
pub const COMPASS_NORTH: &str = "#1a82ff";
pub const COMPASS_EAST: &str = "#f97707";

pub const NORTH: &str = "#1a82ff";
pub const CENTRAL: &str = "#f97707";
pub const SOUTH: &str = "#17ad65";
pub const EAST: &str = "#6c757d";
pub const ISLANDS: &str = "#9333ea";

/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r}, {g}, {b}, {a})")
}

/// CSS `drop-shadow()` filter with a black shadow of the given opacity.
pub fn drop_shadow(offset_y: f64, blur: f64, alpha: f64) -> String {
    format!("drop-shadow(0 {offset_y}px {blur}px {})", rgba_css(0, 0, 0, alpha))
}

#[cfg(test)]
mod tests {
    use super::{drop_shadow, rgba_css};

    #[test]
    fn rgba_css_formats_components() {
        assert_eq!(rgba_css(0, 0, 0, 0.25), "rgba(0, 0, 0, 0.25)");
    }

    #[test]
    fn drop_shadow_matches_hover_filter() {
        assert_eq!(
            drop_shadow(2.0, 3.0, 0.2),
            "drop-shadow(0 2px 3px rgba(0, 0, 0, 0.2))"
        );
    }
}
