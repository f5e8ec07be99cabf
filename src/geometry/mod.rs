//! Mode-specific realistic polylines (C6).

pub mod airplane;
pub mod ferry;
pub mod rail;
pub mod road;
pub mod winter_road;

use crate::geo::Coordinate;
use crate::kinds::PolylineStyle;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathGeometry {
    pub coordinates: Vec<Coordinate>,
    pub style: PolylineStyle,
    pub dash_array: Option<Vec<u32>>,
}

impl PathGeometry {
    pub fn new(coordinates: Vec<Coordinate>, style: PolylineStyle) -> Self {
        Self {
            coordinates,
            style,
            dash_array: None,
        }
    }

    pub fn with_dash_array(mut self, dash_array: Vec<u32>) -> Self {
        self.dash_array = Some(dash_array);
        self
    }

    pub fn straight_line(from: Coordinate, to: Coordinate, style: PolylineStyle) -> Self {
        Self::new(vec![from, to], style)
    }
}

/// All builders validate their output through this gate (spec §4.6): at
/// least 2 points, all finite. On failure the caller substitutes a straight
/// line and records a warning; this function never panics.
pub fn is_valid(geometry: &PathGeometry) -> bool {
    geometry.coordinates.len() >= 2
        && geometry
            .coordinates
            .iter()
            .all(|c| c.lat().is_finite() && c.lon().is_finite())
}

/// Builds `geometry` but substitutes a straight line (and reports `true` for
/// "fell back") if it fails [`is_valid`].
pub fn validate_or_fallback(
    geometry: PathGeometry,
    from: Coordinate,
    to: Coordinate,
    style: PolylineStyle,
) -> (PathGeometry, bool) {
    if is_valid(&geometry) {
        (geometry, false)
    } else {
        (PathGeometry::straight_line(from, to, style), true)
    }
}
