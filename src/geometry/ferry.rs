//! Ferry geometry: follows a river polyline when the connection declares a
//! known river, with river-mouth waypoints at system crossings (spec §4.6).

use crate::geo::{distance_km, Coordinate};
use crate::geometry::PathGeometry;
use crate::kinds::PolylineStyle;

/// Known rivers and their characteristic curvature coefficients (higher =
/// more winding). Unknown rivers fall back to a mild default curve.
fn curvature_coefficient(river: &str) -> f64 {
    match river.to_lowercase().as_str() {
        "lena" => 0.15,
        "aldan" => 0.22,
        "vilyuy" => 0.18,
        _ => 0.10,
    }
}

/// River-mouth waypoint inserted when a ferry segment crosses from one
/// river system into another (spec §4.6).
pub fn river_mouth_waypoint(from_river: &str, to_river: &str) -> Option<Coordinate> {
    match (from_river.to_lowercase().as_str(), to_river.to_lowercase().as_str()) {
        ("aldan", "lena") => Coordinate::new(63.44, 129.15).ok(),
        ("vilyuy", "lena") => Coordinate::new(64.37, 126.40).ok(),
        _ => None,
    }
}

/// Builds a wavy, river-following polyline. `river` selects the curvature;
/// `piers` are intermediate stops inserted in order; `mouth_waypoint` is
/// spliced in near the midpoint when the segment crosses river systems.
pub fn build(
    from: Coordinate,
    to: Coordinate,
    river: Option<&str>,
    piers: &[Coordinate],
    mouth_waypoint: Option<Coordinate>,
) -> PathGeometry {
    let distance = distance_km(from, to);
    let curvature = river.map(curvature_coefficient).unwrap_or(0.10);
    let n = ((distance / 40.0).ceil() as usize).max(4);

    let dlat = to.lat() - from.lat();
    let dlon = to.lon() - from.lon();
    let len = (dlat * dlat + dlon * dlon).sqrt();
    let (perp_lat, perp_lon) = if len > 1e-12 {
        (-dlon / len, dlat / len)
    } else {
        (0.0, 0.0)
    };
    let amplitude_km = curvature * distance;

    let mut coordinates = Vec::with_capacity(n + piers.len() + 3);
    coordinates.push(from);

    let midpoint_index = n / 2;
    for i in 1..=n {
        let t = i as f64 / (n as f64 + 1.0);
        let base_lat = from.lat() + dlat * t;
        let base_lon = from.lon() + dlon * t;
        // two gentle bends rather than one, for a river-like meander
        let offset_km = amplitude_km * (2.0 * std::f64::consts::PI * t).sin();
        let offset_deg_lat = offset_km / 111.0;
        let lat_factor = base_lat.to_radians().cos().max(0.1);
        let offset_deg_lon = offset_km / (111.0 * lat_factor);
        let lat = (base_lat + perp_lat * offset_deg_lat).clamp(-90.0, 90.0);
        let lon = base_lon + perp_lon * offset_deg_lon;
        if let Ok(c) = Coordinate::new(lat, lon) {
            coordinates.push(c);
        }
        if i == midpoint_index {
            if let Some(mouth) = mouth_waypoint {
                coordinates.push(mouth);
            }
        }
    }
    coordinates.extend_from_slice(piers);
    coordinates.push(to);

    PathGeometry::new(coordinates, PolylineStyle::Wavy)
}
