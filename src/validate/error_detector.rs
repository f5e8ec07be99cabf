//! Catches empty-space paths, disconnected segments, unrealistic
//! mode/distance/speed combinations, and invalid city identifiers (C13).

use crate::catalog::Catalog;
use crate::geo::distance_km;
use crate::kinds::Mode;
use crate::segment::Segment;
use crate::validate::Finding;

const SURFACE_MODES: [Mode; 5] = [Mode::Bus, Mode::Train, Mode::Ferry, Mode::WinterRoad, Mode::Taxi];

pub fn detect(segments: &[Segment], catalog: &Catalog) -> Vec<Finding> {
    let mut findings = Vec::new();

    for segment in segments {
        empty_space_path(segment, &mut findings);
        unrealistic_route(segment, &mut findings);
        airplane_hub_checks(segment, catalog, &mut findings);
    }

    disconnected_segments(segments, catalog, &mut findings);
    invalid_identifiers(segments, catalog, &mut findings);

    findings
}

fn path_length_km(segment: &Segment) -> f64 {
    segment
        .path_geometry
        .coordinates
        .windows(2)
        .map(|w| distance_km(w[0], w[1]))
        .sum()
}

/// Open Question resolution: a two-point polyline is an error for
/// surface/rail/water modes at distance > 1 km, a warning otherwise. A
/// polyline that deviates by less than 5% from the straight-line distance
/// is effectively straight regardless of point count, and is flagged too.
fn empty_space_path(segment: &Segment, findings: &mut Vec<Finding>) {
    if !SURFACE_MODES.contains(&segment.mode) {
        return;
    }
    let straight = distance_km(
        segment.path_geometry.coordinates[0],
        *segment.path_geometry.coordinates.last().unwrap(),
    );
    let two_point = segment.path_geometry.coordinates.len() == 2;
    if two_point {
        let message = format!("segment {} has a two-point polyline for a surface/water/rail mode", segment.id);
        if segment.distance.value_km > 1.0 {
            findings.push(Finding::error("empty_space_path", Some(segment.id.clone()), message));
        } else {
            findings.push(Finding::warning("empty_space_path", Some(segment.id.clone()), message));
        }
        return;
    }
    if straight > 0.0 {
        let length = path_length_km(segment);
        let deviation = (length - straight).abs() / straight;
        if deviation < 0.05 {
            findings.push(Finding::error(
                "empty_space_path",
                Some(segment.id.clone()),
                format!("segment {} polyline deviates only {:.1}% from a straight line", segment.id, deviation * 100.0),
            ));
        }
    }
}

fn unrealistic_route(segment: &Segment, findings: &mut Vec<Finding>) {
    match segment.mode {
        Mode::Bus => {
            if segment.distance.value_km > 1500.0 {
                findings.push(Finding::error(
                    "unrealistic_route",
                    Some(segment.id.clone()),
                    format!("bus segment {} distance {:.0} km exceeds 1500 km", segment.id, segment.distance.value_km),
                ));
            }
            if segment.duration.value_min > 24 * 60 {
                findings.push(Finding::error(
                    "unrealistic_route",
                    Some(segment.id.clone()),
                    format!("bus segment {} duration exceeds 24 hours", segment.id),
                ));
            }
            let implied_kmh = segment.distance.value_km / (segment.duration.value_min as f64 / 60.0);
            if implied_kmh > 100.0 {
                findings.push(Finding::warning(
                    "unrealistic_route",
                    Some(segment.id.clone()),
                    format!("bus segment {} implied speed {:.0} km/h exceeds 100 km/h", segment.id, implied_kmh),
                ));
            }
        }
        Mode::Ferry if segment.distance.value_km > 1000.0 => {
            findings.push(Finding::warning(
                "unrealistic_route",
                Some(segment.id.clone()),
                format!("ferry segment {} distance {:.0} km exceeds 1000 km", segment.id, segment.distance.value_km),
            ));
        }
        Mode::Taxi if segment.distance.value_km > 200.0 => {
            findings.push(Finding::warning(
                "unrealistic_route",
                Some(segment.id.clone()),
                format!("taxi segment {} distance {:.0} km exceeds 200 km", segment.id, segment.distance.value_km),
            ));
        }
        _ => {}
    }
}

fn airplane_hub_checks(segment: &Segment, catalog: &Catalog, findings: &mut Vec<Finding>) {
    if segment.mode != Mode::Airplane {
        return;
    }
    if !segment.via_hubs.is_empty() && segment.path_geometry.coordinates.len() < 3 {
        findings.push(Finding::error(
            "empty_space_path",
            Some(segment.id.clone()),
            format!("airplane segment {} with viaHubs has fewer than 3 polyline points", segment.id),
        ));
    }
    if segment.via_hubs.is_empty() && segment.is_direct {
        let from_hub = catalog
            .get_stop(&segment.from_stop)
            .and_then(|s| catalog.get_city(&s.city_id))
            .is_some_and(|c| c.is_hub);
        let to_hub = catalog
            .get_stop(&segment.to_stop)
            .and_then(|s| catalog.get_city(&s.city_id))
            .is_some_and(|c| c.is_hub);
        if !from_hub && !to_hub && segment.distance.value_km > 500.0 {
            findings.push(Finding::error(
                "unrealistic_route",
                Some(segment.id.clone()),
                format!("direct flight {} between two non-hub airports exceeds 500 km", segment.id),
            ));
        }
    }
}

fn disconnected_segments(segments: &[Segment], catalog: &Catalog, findings: &mut Vec<Finding>) {
    for window in segments.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        if a.to_stop != b.from_stop {
            findings.push(Finding::error(
                "disconnected_segments",
                Some(a.id.clone()),
                format!("segment {} and {} do not share a boundary stop", a.id, b.id),
            ));
            continue;
        }
        let a_city = catalog.get_stop(&a.to_stop).map(|s| &s.city_id);
        let b_city = catalog.get_stop(&b.from_stop).map(|s| &s.city_id);
        if a_city != b_city {
            findings.push(Finding::error(
                "disconnected_segments",
                Some(a.id.clone()),
                format!("segment {} and {} boundary stop resolves to different cities", a.id, b.id),
            ));
        }
        let a_coord = *a.path_geometry.coordinates.last().unwrap();
        let b_coord = b.path_geometry.coordinates[0];
        if distance_km(a_coord, b_coord) > 10.0 {
            findings.push(Finding::error(
                "disconnected_segments",
                Some(a.id.clone()),
                format!("transfer between {} and {} exceeds a 10 km walk", a.id, b.id),
            ));
        }
    }
}

fn is_valid_city_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= 100
        && name.chars().next().is_some_and(|c| c.is_uppercase())
}

fn invalid_identifiers(segments: &[Segment], catalog: &Catalog, findings: &mut Vec<Finding>) {
    let mut seen = std::collections::HashSet::new();
    for segment in segments {
        for stop_id in [&segment.from_stop, &segment.to_stop] {
            let Some(stop) = catalog.get_stop(stop_id) else { continue };
            if !seen.insert(stop.city_id.clone()) {
                continue;
            }
            let Some(city) = catalog.get_city(&stop.city_id) else { continue };
            if !is_valid_city_name(&city.name) {
                findings.push(Finding::error(
                    "invalid_identifier",
                    Some(segment.id.clone()),
                    format!("city {} has an invalid display name: {:?}", city.id.as_str(), city.name),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::city::{AdminStructure, City, Infrastructure};
    use crate::catalog::stop::{Stop, StopId};
    use crate::distance::DistanceModel;
    use crate::duration::DurationModel;
    use crate::geo::Coordinate;
    use crate::geometry::PathGeometry;
    use crate::kinds::{AirportClass, DistanceCalculationMethod, PolylineStyle, Season, StopType};
    use crate::price::{AdditionalCosts, PriceModel};
    use crate::seasonality::create_seasonality;
    use crate::segment::SegmentMetadata;
    use chrono::NaiveDate;

    fn admin(name: &str) -> AdminStructure {
        AdminStructure {
            subject: name.to_string(),
            rayon: None,
            settlement: name.to_string(),
            full: name.to_string(),
            with_context: name.to_string(),
            medium: name.to_string(),
            short: name.to_string(),
        }
    }

    fn city(id: &str, name: &str) -> City {
        City::new(
            crate::catalog::city::CityId::new(id).unwrap(),
            name.to_string(),
            vec![],
            admin(name),
            Coordinate::new(62.0, 129.7).unwrap(),
            "Asia/Yakutsk".into(),
            1000,
            false,
            false,
            None,
            Infrastructure {
                has_airport: true,
                airport_class: Some(AirportClass::D),
                has_train_station: false,
                has_bus_station: true,
                has_ferry_pier: false,
                has_winter_road: false,
            },
        )
        .unwrap()
    }

    fn stop(id: &str, city_id: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(
            StopId(id.into()),
            format!("{id} stop"),
            StopType::BusStation,
            Coordinate::new(lat, lon).unwrap(),
            crate::catalog::city::CityId::new(city_id).unwrap(),
            None,
            None,
        )
        .unwrap()
    }

    fn bus_segment(id: &str, from: &str, to: &str, distance_km: f64, points: Vec<Coordinate>) -> Segment {
        let seasonality = create_seasonality(Season::All, None, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        Segment {
            id: id.into(),
            mode: Mode::Bus,
            from_stop: StopId(from.into()),
            to_stop: StopId(to.into()),
            intermediate_stops: vec![],
            via_hubs: vec![],
            is_direct: true,
            distance: DistanceModel::single_mode(distance_km, DistanceCalculationMethod::RoutingService, Mode::Bus),
            duration: DurationModel::minutes(((distance_km / 60.0) * 60.0) as u32),
            price: PriceModel::new(distance_km * 4.0, AdditionalCosts::default()),
            seasonality,
            path_geometry: PathGeometry::new(points, PolylineStyle::Solid),
            metadata: SegmentMetadata {
                carrier: None,
                geometry_fallback_used: false,
            },
        }
    }

    #[test]
    fn two_point_long_bus_segment_is_an_error() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let to = Coordinate::new(61.0, 133.0).unwrap();
        let seg = bus_segment("s1", "a_bus", "b_bus", 300.0, vec![from, to]);
        let cities = vec![city("a", "Alpha"), city("b", "Beta")];
        let stops = vec![stop("a_bus", "a", 62.0, 129.7), stop("b_bus", "b", 61.0, 133.0)];
        let catalog = Catalog::from_tables(cities, stops, vec![], vec![]);
        let findings = detect(&[seg], &catalog);
        assert!(findings.iter().any(|f| f.kind == "empty_space_path" && f.severity == crate::validate::Severity::Error));
    }

    #[test]
    fn bus_over_1500km_flagged_unrealistic() {
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let mid = Coordinate::new(60.0, 140.0).unwrap();
        let to = Coordinate::new(58.0, 150.0).unwrap();
        let seg = bus_segment("s1", "a_bus", "b_bus", 1600.0, vec![from, mid, to]);
        let cities = vec![city("a", "Alpha"), city("b", "Beta")];
        let stops = vec![stop("a_bus", "a", 62.0, 129.7), stop("b_bus", "b", 58.0, 150.0)];
        let catalog = Catalog::from_tables(cities, stops, vec![], vec![]);
        let findings = detect(&[seg], &catalog);
        assert!(findings.iter().any(|f| f.kind == "unrealistic_route"));
    }
}
