use std::f64::consts::FRAC_PI_4;
use std::fmt::Write;

use geo::{Centroid, Contains, Coord, MapCoords, MultiPolygon, Point};

use crate::geometry::GeoFeature;

/// Geographic center of the main island, (longitude, latitude).
pub const TAIWAN_CENTER: (f64, f64) = (121.0, 23.5);
pub const TAIWAN_SCALE: f64 = 6000.0;

/// Spherical Mercator with a fixed center, scale and pixel translate.
///
/// Pure function of its parameters: the same inputs always give the same
/// screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    center: (f64, f64),
    scale: f64,
    translate: (f64, f64),
}

impl Mercator {
    /// Center the projection's `center` on the middle of a `width` × `height` viewport.
    pub fn new(center: (f64, f64), scale: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            scale,
            translate: (width / 2.0, height / 2.0),
        }
    }

    pub fn taiwan(width: f64, height: f64) -> Self {
        Self::new(TAIWAN_CENTER, TAIWAN_SCALE, width, height)
    }

    fn raw(lon: f64, lat: f64) -> (f64, f64) {
        let y = (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        (lon.to_radians(), y)
    }

    /// Geographic (lon, lat) degrees to screen pixels. Screen y grows downward.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (x, y) = Self::raw(lon, lat);
        let (cx, cy) = Self::raw(self.center.0, self.center.1);
        (
            self.translate.0 + self.scale * (x - cx),
            self.translate.1 - self.scale * (y - cy),
        )
    }

    pub fn project_shape(&self, shape: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        shape.map_coords(|c| {
            let (x, y) = self.project(c.x, c.y);
            Coord { x, y }
        })
    }

    /// SVG path data for a geographic boundary, one closed subpath per ring.
    pub fn path_data(&self, shape: &MultiPolygon<f64>) -> String {
        let projected = self.project_shape(shape);
        let mut out = String::new();
        for polygon in &projected.0 {
            let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
            for ring in rings {
                let coords = &ring.0;
                // GeoJSON rings repeat the first position at the end; `Z` closes it.
                let open_len = match (coords.first(), coords.last()) {
                    (Some(first), Some(last)) if coords.len() > 1 && first == last => {
                        coords.len() - 1
                    }
                    _ => coords.len(),
                };
                for (i, c) in coords[..open_len].iter().enumerate() {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    let _ = write!(out, "{cmd}{:.2},{:.2}", c.x, c.y);
                }
                if open_len > 0 {
                    out.push('Z');
                }
            }
        }
        out
    }

    /// Planar centroid of the projected boundary, used for label placement.
    pub fn centroid(&self, shape: &MultiPolygon<f64>) -> Option<(f64, f64)> {
        self.project_shape(shape).centroid().map(|p| (p.x(), p.y()))
    }
}

/// Resolve a geographic coordinate to the key of the region containing it.
/// Linear scan; the first containing region wins.
pub fn region_at(features: &[GeoFeature], lon: f64, lat: f64) -> Option<&str> {
    let point = Point::new(lon, lat);
    features
        .iter()
        .find(|f| f.shape.contains(&point))
        .map(|f| f.key.as_str())
}
