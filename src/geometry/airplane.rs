//! Flight geometry: great-circle arc with hub waypoints, never smoothed
//! (spec §4.6).

use crate::geo::Coordinate;
use crate::geometry::PathGeometry;
use crate::kinds::PolylineStyle;

/// `[from, hub_1, .., hub_k, to]` when `via_hubs` is non-empty, else `[from, to]`.
pub fn build(from: Coordinate, to: Coordinate, via_hubs: &[Coordinate]) -> PathGeometry {
    let mut coordinates = Vec::with_capacity(via_hubs.len() + 2);
    coordinates.push(from);
    coordinates.extend_from_slice(via_hubs);
    coordinates.push(to);
    PathGeometry::new(coordinates, PolylineStyle::Dashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_flight_is_two_points() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let to = Coordinate::new(61.0, 130.0).unwrap();
        let g = build(from, to, &[]);
        assert_eq!(g.coordinates.len(), 2);
    }

    #[test]
    fn hub_chain_bends_through_each_hub() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let to = Coordinate::new(55.0, 38.0).unwrap();
        let hub = Coordinate::new(58.0, 92.0).unwrap();
        let g = build(from, to, &[hub]);
        assert_eq!(g.coordinates.len(), 3);
        assert_eq!(g.coordinates[1], hub);
    }
}
