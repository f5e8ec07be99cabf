//! Bus/taxi geometry: delegates to the routing-service client; on failure,
//! synthesizes a non-straight polyline (spec §4.6).

use crate::geo::{distance_km, Coordinate};
use crate::geometry::PathGeometry;
use crate::kinds::PolylineStyle;
use crate::routing_client::{Profile, RoutingClient};

pub struct RoadGeometryResult {
    pub geometry: PathGeometry,
    /// km, from the routing service when available, else the haversine
    /// straight-line distance (the synthesized polyline does not change the
    /// declared distance, only its shape).
    pub distance_km: f64,
    pub duration_s: Option<f64>,
    pub used_fallback: bool,
}

pub fn build(
    from: Coordinate,
    to: Coordinate,
    client: &dyn RoutingClient,
    exclude_ferries: bool,
) -> RoadGeometryResult {
    match client.get_route(from, to, &[], Profile::Driving, exclude_ferries) {
        Ok(route) => RoadGeometryResult {
            geometry: PathGeometry::new(route.polyline, PolylineStyle::Solid),
            distance_km: route.distance_m / 1000.0,
            duration_s: Some(route.duration_s),
            used_fallback: false,
        },
        Err(err) => {
            tracing::warn!(error = %err, "routing service unavailable, synthesizing road geometry");
            let distance = distance_km(from, to);
            RoadGeometryResult {
                geometry: synthesize(from, to, distance),
                distance_km: distance,
                duration_s: None,
                used_fallback: true,
            }
        }
    }
}

/// N = max(3, ceil(d/30km)) interior points, sinusoidal lateral offset
/// proportional to ~3% of path length, always including endpoints.
fn synthesize(from: Coordinate, to: Coordinate, distance_km: f64) -> PathGeometry {
    let n = ((distance_km / 30.0).ceil() as usize).max(3);
    let amplitude_km = 0.03 * distance_km;

    let dlat = to.lat() - from.lat();
    let dlon = to.lon() - from.lon();
    let len = (dlat * dlat + dlon * dlon).sqrt();
    let (perp_lat, perp_lon) = if len > 1e-12 {
        (-dlon / len, dlat / len)
    } else {
        (0.0, 0.0)
    };

    let mut coordinates = Vec::with_capacity(n + 2);
    coordinates.push(from);
    for i in 1..=n {
        let t = i as f64 / (n as f64 + 1.0);
        let base_lat = from.lat() + dlat * t;
        let base_lon = from.lon() + dlon * t;
        let offset_km = amplitude_km * (std::f64::consts::PI * t).sin();
        let offset_deg_lat = offset_km / 111.0;
        let lat_factor = base_lat.to_radians().cos().max(0.1);
        let offset_deg_lon = offset_km / (111.0 * lat_factor);

        let lat = (base_lat + perp_lat * offset_deg_lat).clamp(-90.0, 90.0);
        let lon = base_lon + perp_lon * offset_deg_lon;
        // fall back silently to the unperturbed point if somehow invalid;
        // the caller's validate_or_fallback gate is the final safety net.
        match Coordinate::new(lat, lon) {
            Ok(c) => coordinates.push(c),
            Err(_) => coordinates.push(Coordinate::new(base_lat, base_lon).unwrap_or(from)),
        }
    }
    coordinates.push(to);

    PathGeometry::new(coordinates, PolylineStyle::Solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing_client::RoutingError;

    struct FailingClient;
    impl RoutingClient for FailingClient {
        fn get_route(
            &self,
            _from: Coordinate,
            _to: Coordinate,
            _via: &[Coordinate],
            _profile: Profile,
            _exclude_ferries: bool,
        ) -> Result<crate::routing_client::RouteResult, RoutingError> {
            Err(RoutingError::Timeout)
        }
    }

    #[test]
    fn fallback_synthesizes_non_straight_path() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let to = Coordinate::new(61.0, 133.0).unwrap();
        let result = build(from, to, &FailingClient, false);
        assert!(result.used_fallback);
        assert!(result.geometry.coordinates.len() >= 5);
        assert_eq!(*result.geometry.coordinates.first().unwrap(), from);
        assert_eq!(*result.geometry.coordinates.last().unwrap(), to);
    }

    #[test]
    fn synthesized_path_is_not_collinear() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let to = Coordinate::new(62.0, 133.0).unwrap();
        let geometry = synthesize(from, to, 300.0);
        let mid = &geometry.coordinates[geometry.coordinates.len() / 2];
        // the straight line from->to has constant latitude; a non-straight
        // path must deviate from it somewhere in the middle.
        assert!((mid.lat() - from.lat()).abs() > 1e-6);
    }
}
