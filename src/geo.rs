//! Coordinates, haversine distance, and bounding boxes (C1).

use crate::error::PlannerError;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, PlannerError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(PlannerError::InvalidInput {
                reason: format!("coordinate not finite: ({lat}, {lon})"),
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PlannerError::InvalidInput {
                reason: format!("latitude out of range: {lat}"),
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(PlannerError::InvalidInput {
                reason: format!("longitude out of range: {lon}"),
            });
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// GeoJSON point order is (longitude, latitude).
    pub fn to_geojson(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    pub fn from_geojson(coords: [f64; 2]) -> Result<Self, PlannerError> {
        Self::new(coords[1], coords[0])
    }
}

/// Great-circle distance in kilometers. Symmetric, zero for identical
/// points, correct across the antimeridian via standard Δλ normalization.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let mut dlon = (b.lon - a.lon).to_radians();
    // normalize to (-pi, pi] so antimeridian crossings take the short way
    dlon = dlon.rem_euclid(2.0 * std::f64::consts::PI);
    if dlon > std::f64::consts::PI {
        dlon -= 2.0 * std::f64::consts::PI;
    }

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Axis-aligned bounding box in (lat, lon).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn from_points(points: &[Coordinate]) -> Result<Self, PlannerError> {
        let mut iter = points.iter();
        let first = iter.next().ok_or_else(|| PlannerError::InvalidInput {
            reason: "bounding box requires at least one point".to_string(),
        })?;
        let mut bbox = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };
        for p in iter {
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.max_lat = bbox.max_lat.max(p.lat);
            bbox.min_lon = bbox.min_lon.min(p.lon);
            bbox.max_lon = bbox.max_lon.max(p.lon);
        }
        Ok(bbox)
    }

    pub fn contains(&self, p: Coordinate) -> bool {
        p.lat >= self.min_lat && p.lat <= self.max_lat && p.lon >= self.min_lon && p.lon <= self.max_lon
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 181.0).is_err());
    }

    #[test]
    fn haversine_zero_for_identical_points() {
        let p = Coordinate::new(62.0, 129.7).unwrap();
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn haversine_symmetric() {
        let a = Coordinate::new(62.03, 129.73).unwrap();
        let b = Coordinate::new(64.54, 126.82).unwrap();
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn haversine_antimeridian() {
        let a = Coordinate::new(0.0, 179.5).unwrap();
        let b = Coordinate::new(0.0, -179.5).unwrap();
        // should be close (1 degree apart), not ~359 degrees apart
        assert!(distance_km(a, b) < 200.0);
    }

    #[test]
    fn geojson_round_trip() {
        let p = Coordinate::new(62.03, 129.73).unwrap();
        let round = Coordinate::from_geojson(p.to_geojson()).unwrap();
        assert_eq!(p, round);
    }

    #[test]
    fn bbox_from_single_point() {
        let p = Coordinate::new(10.0, 20.0).unwrap();
        let bbox = BoundingBox::from_points(&[p]).unwrap();
        assert_eq!(bbox.min_lat, 10.0);
        assert_eq!(bbox.max_lon, 20.0);
    }

    #[test]
    fn bbox_rejects_empty() {
        assert!(BoundingBox::from_points(&[]).is_err());
    }
}
