//! Rail geometry: follows the corridor, broken at every intermediate
//! station (spec §4.6). Style solid, weight 3 (applied by the assembler).

use crate::geo::Coordinate;
use crate::geometry::PathGeometry;
use crate::kinds::PolylineStyle;

pub fn build(from: Coordinate, stations: &[Coordinate], to: Coordinate) -> PathGeometry {
    let mut coordinates = Vec::with_capacity(stations.len() + 2);
    coordinates.push(from);
    coordinates.extend_from_slice(stations);
    coordinates.push(to);
    PathGeometry::new(coordinates, PolylineStyle::Solid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_at_every_station() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let a = Coordinate::new(61.5, 130.0).unwrap();
        let b = Coordinate::new(61.0, 130.5).unwrap();
        let to = Coordinate::new(60.5, 131.0).unwrap();
        let g = build(from, &[a, b], to);
        assert_eq!(g.coordinates, vec![from, a, b, to]);
    }
}
