//! Winter-road geometry: dotted, dash 10/5, never a straight two-point line
//! for distances over 1 km (spec §4.6).

use crate::geo::{distance_km, Coordinate};
use crate::geometry::PathGeometry;
use crate::kinds::PolylineStyle;

pub fn build(from: Coordinate, to: Coordinate, waypoints: &[Coordinate]) -> PathGeometry {
    let mut coordinates = Vec::with_capacity(waypoints.len() + 2);
    coordinates.push(from);

    if waypoints.is_empty() && distance_km(from, to) > 1.0 {
        // no declared waypoints but the connection is long enough that a
        // straight line would misrepresent it: interpolate a midpoint.
        let mid_lat = (from.lat() + to.lat()) / 2.0;
        let mid_lon = (from.lon() + to.lon()) / 2.0;
        if let Ok(mid) = Coordinate::new(mid_lat, mid_lon) {
            coordinates.push(mid);
        }
    } else {
        coordinates.extend_from_slice(waypoints);
    }

    coordinates.push(to);
    PathGeometry::new(coordinates, PolylineStyle::Dotted).with_dash_array(vec![10, 5])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_connection_without_waypoints_still_bends() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let to = Coordinate::new(61.0, 131.0).unwrap();
        let g = build(from, to, &[]);
        assert!(g.coordinates.len() >= 3);
    }

    #[test]
    fn dash_array_is_10_5() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let to = Coordinate::new(61.0, 131.0).unwrap();
        let g = build(from, to, &[]);
        assert_eq!(g.dash_array, Some(vec![10, 5]));
        assert_eq!(g.style, PolylineStyle::Dotted);
    }
}
