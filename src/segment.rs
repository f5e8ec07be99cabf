//! Materializes one segment: stops, distance, duration, price, seasonality,
//! geometry, viaHubs (C11).

use chrono::NaiveDate;

use crate::catalog::connection::Connection;
use crate::catalog::hub::HubId;
use crate::catalog::stop::{Stop, StopId};
use crate::catalog::Catalog;
use crate::distance::DistanceModel;
use crate::duration::DurationModel;
use crate::error::{PlannerError, PlannerResult};
use crate::geo::distance_km;
use crate::geometry::{self, ferry, rail, winter_road, PathGeometry};
use crate::kinds::{DistanceCalculationMethod, Mode, PolylineStyle};
use crate::price::{self, AdditionalCosts, PriceModel};
use crate::routing_client::RoutingClient;
use crate::seasonality::Seasonality;

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMetadata {
    pub carrier: Option<String>,
    pub geometry_fallback_used: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: String,
    pub mode: Mode,
    pub from_stop: StopId,
    pub to_stop: StopId,
    pub intermediate_stops: Vec<StopId>,
    pub via_hubs: Vec<HubId>,
    pub is_direct: bool,
    pub distance: DistanceModel,
    pub duration: DurationModel,
    pub price: PriceModel,
    pub seasonality: Seasonality,
    pub path_geometry: PathGeometry,
    pub metadata: SegmentMetadata,
}

#[allow(clippy::too_many_arguments)]
pub fn build_segment(
    catalog: &Catalog,
    routing_client: &dyn RoutingClient,
    id: String,
    mode: Mode,
    from_stop_id: &StopId,
    to_stop_id: &StopId,
    connection: &Connection,
    via_hubs: Vec<HubId>,
    seasonality: Seasonality,
    _date: NaiveDate,
) -> PlannerResult<Segment> {
    let from_stop = catalog.get_stop(from_stop_id).ok_or_else(|| PlannerError::InvalidSegment {
        reason: format!("unknown from stop: {}", from_stop_id.as_str()),
    })?;
    let to_stop = catalog.get_stop(to_stop_id).ok_or_else(|| PlannerError::InvalidSegment {
        reason: format!("unknown to stop: {}", to_stop_id.as_str()),
    })?;

    if from_stop.id == to_stop.id {
        return Err(PlannerError::InvalidSegment {
            reason: "from and to stops must differ".to_string(),
        });
    }

    let (distance, geometry, fallback_used) = compute_distance_and_geometry(catalog, routing_client, mode, from_stop, to_stop, connection, &via_hubs)?;

    let duration = compute_duration(mode, connection, distance.value_km);

    let origin_city = catalog.get_city(&from_stop.city_id);
    let originating_urban = origin_city.is_some_and(|c| c.is_key_city);
    let mut additional = AdditionalCosts::default();
    if !originating_urban {
        if let Some(surcharge) = price::taxi_surcharge(mode) {
            additional.taxi = surcharge;
        }
    }
    let base = price::base_price(mode, distance.value_km);
    let price_model = PriceModel::new(base, additional);

    let is_direct = connection.is_direct && via_hubs.len() <= 2;
    let intermediate_stops = Vec::new(); // populated by callers that resolve intermediate city stops

    if is_direct && !intermediate_stops.is_empty() {
        return Err(PlannerError::InvalidSegment {
            reason: "direct segments carry no intermediates".to_string(),
        });
    }
    if mode == Mode::Airplane && !via_hubs.is_empty() && geometry.coordinates.len() < 3 {
        return Err(PlannerError::InvalidSegment {
            reason: "airplane segment with hubs must have geometry of at least 3 points".to_string(),
        });
    }
    if geometry.coordinates.len() < 2 {
        return Err(PlannerError::InvalidSegment {
            reason: "segment geometry must have at least 2 points".to_string(),
        });
    }

    Ok(Segment {
        id,
        mode,
        from_stop: from_stop.id.clone(),
        to_stop: to_stop.id.clone(),
        intermediate_stops,
        via_hubs,
        is_direct,
        distance,
        duration,
        price: price_model,
        seasonality,
        path_geometry: geometry,
        metadata: SegmentMetadata {
            carrier: connection.carrier.clone(),
            geometry_fallback_used: fallback_used,
        },
    })
}

fn compute_distance_and_geometry(
    catalog: &Catalog,
    routing_client: &dyn RoutingClient,
    mode: Mode,
    from_stop: &Stop,
    to_stop: &Stop,
    connection: &Connection,
    via_hubs: &[HubId],
) -> PlannerResult<(DistanceModel, PathGeometry, bool)> {
    let from = from_stop.coordinates;
    let to = to_stop.coordinates;

    match mode {
        Mode::Airplane => {
            let hub_coords: Vec<_> = via_hubs
                .iter()
                .filter_map(|h| catalog.get_city(&crate::catalog::city::CityId(h.as_str().to_string())))
                .map(|c| c.centroid)
                .collect();
            let raw = crate::geometry::airplane::build(from, to, &hub_coords);
            let (geometry, fell_back) = geometry::validate_or_fallback(raw, from, to, PolylineStyle::Dashed);
            let value_km = distance_km(from, to);
            Ok((
                DistanceModel::single_mode(value_km, DistanceCalculationMethod::Haversine, mode),
                geometry,
                fell_back,
            ))
        }
        Mode::Bus | Mode::Taxi => {
            let result = crate::geometry::road::build(from, to, routing_client, false);
            let (geometry, fell_back_gate) = geometry::validate_or_fallback(result.geometry, from, to, PolylineStyle::Solid);
            let method = if result.used_fallback {
                DistanceCalculationMethod::Manual
            } else {
                DistanceCalculationMethod::RoutingService
            };
            Ok((
                DistanceModel::single_mode(result.distance_km, method, mode),
                geometry,
                result.used_fallback || fell_back_gate,
            ))
        }
        Mode::Ferry => {
            let piers: Vec<_> = connection
                .intermediate
                .iter()
                .filter_map(|w| match w {
                    crate::catalog::connection::Waypoint::Coordinate(c) => Some(*c),
                    crate::catalog::connection::Waypoint::City(id) => catalog.get_city(id).map(|c| c.centroid),
                })
                .collect();
            let mouth = connection
                .river
                .as_deref()
                .and_then(|r| ferry::river_mouth_waypoint(r, "lena"));
            let raw = ferry::build(from, to, connection.river.as_deref(), &piers, mouth);
            let (geometry, fell_back) = geometry::validate_or_fallback(raw, from, to, PolylineStyle::Wavy);
            let value_km = distance_km(from, to).max(connection.distance_km);
            Ok((
                DistanceModel::single_mode(value_km, DistanceCalculationMethod::RiverPath, mode),
                geometry,
                fell_back,
            ))
        }
        Mode::Train => {
            let stations: Vec<_> = connection
                .intermediate
                .iter()
                .filter_map(|w| match w {
                    crate::catalog::connection::Waypoint::Coordinate(c) => Some(*c),
                    crate::catalog::connection::Waypoint::City(id) => catalog.get_city(id).map(|c| c.centroid),
                })
                .collect();
            let raw = rail::build(from, &stations, to);
            let (geometry, fell_back) = geometry::validate_or_fallback(raw, from, to, PolylineStyle::Solid);
            Ok((
                DistanceModel::single_mode(connection.distance_km, DistanceCalculationMethod::RailPath, mode),
                geometry,
                fell_back,
            ))
        }
        Mode::WinterRoad => {
            let waypoints: Vec<_> = connection
                .intermediate
                .iter()
                .filter_map(|w| match w {
                    crate::catalog::connection::Waypoint::Coordinate(c) => Some(*c),
                    crate::catalog::connection::Waypoint::City(id) => catalog.get_city(id).map(|c| c.centroid),
                })
                .collect();
            let raw = winter_road::build(from, to, &waypoints);
            let (geometry, fell_back) = geometry::validate_or_fallback(raw, from, to, PolylineStyle::Dotted);
            Ok((
                DistanceModel::single_mode(connection.distance_km, DistanceCalculationMethod::Manual, mode),
                geometry,
                fell_back,
            ))
        }
    }
}

fn compute_duration(mode: Mode, connection: &Connection, distance_km: f64) -> DurationModel {
    if connection.duration_min > 0 {
        DurationModel::minutes(connection.duration_min)
    } else {
        let hours = distance_km / mode.nominal_speed_kmh();
        DurationModel::minutes((hours * 60.0).round().max(1.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::city::{AdminStructure, City, Infrastructure};
    use crate::catalog::connection::ConnectionId;
    use crate::catalog::stop::Stop;
    use crate::geo::Coordinate;
    use crate::kinds::{Season, StopType};
    use crate::routing_client::{RouteResult, RoutingError};

    struct FailingClient;
    impl RoutingClient for FailingClient {
        fn get_route(
            &self,
            _from: Coordinate,
            _to: Coordinate,
            _via: &[Coordinate],
            _profile: crate::routing_client::Profile,
            _exclude_ferries: bool,
        ) -> Result<RouteResult, RoutingError> {
            Err(RoutingError::Timeout)
        }
    }

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

    fn city(id: &str, lat: f64, lon: f64) -> City {
        City::new(
            crate::catalog::city::CityId::new(id).unwrap(),
            id.to_string(),
            vec![],
            admin(id),
            Coordinate::new(lat, lon).unwrap(),
            "Asia/Yakutsk".into(),
            10_000,
            false,
            false,
            None,
            Infrastructure {
                has_airport: true,
                airport_class: Some(crate::kinds::AirportClass::C),
                has_train_station: false,
                has_bus_station: true,
                has_ferry_pier: false,
                has_winter_road: false,
            },
        )
        .unwrap()
    }

    fn airport_stop(id: &str, city_id: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(
            StopId(id.into()),
            format!("{id} airport"),
            StopType::Airport,
            Coordinate::new(lat, lon).unwrap(),
            crate::catalog::city::CityId::new(city_id).unwrap(),
            None,
            None,
        )
        .unwrap()
    }

    fn connection(mode: Mode, from: &str, to: &str, distance: f64, duration: u32) -> Connection {
        Connection {
            id: ConnectionId("c".into()),
            mode,
            from_city: crate::catalog::city::CityId::new(from).unwrap(),
            to_city: crate::catalog::city::CityId::new(to).unwrap(),
            distance_km: distance,
            duration_min: duration,
            base_price: 1000.0,
            declared_season: Season::All,
            is_direct: true,
            intermediate: vec![],
            via_hubs: vec![],
            carrier: None,
            route_metadata: None,
            river: None,
        }
    }

    #[test]
    fn builds_airplane_segment_with_haversine_distance() {
        let cities = vec![city("a", 62.0, 129.7), city("b", 61.0, 130.0)];
        let stops = vec![airport_stop("a_air", "a", 62.0, 129.7), airport_stop("b_air", "b", 61.0, 130.0)];
        let catalog = Catalog::from_tables(cities, stops, vec![], vec![]);
        let conn = connection(Mode::Airplane, "a", "b", 100.0, 20);
        let seasonality = crate::seasonality::create_seasonality(Season::All, None, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());

        let segment = build_segment(
            &catalog,
            &FailingClient,
            "seg1".into(),
            Mode::Airplane,
            &StopId("a_air".into()),
            &StopId("b_air".into()),
            &conn,
            vec![],
            seasonality,
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        )
        .unwrap();

        assert_eq!(segment.distance.method, DistanceCalculationMethod::Haversine);
        assert!(segment.distance.value_km > 0.0);
        assert!(segment.price.total > 0.0);
        assert_eq!(segment.path_geometry.coordinates.len(), 2);
    }

    #[test]
    fn rejects_segment_with_identical_stops() {
        let cities = vec![city("a", 62.0, 129.7)];
        let stops = vec![airport_stop("a_air", "a", 62.0, 129.7)];
        let catalog = Catalog::from_tables(cities, stops, vec![], vec![]);
        let conn = connection(Mode::Airplane, "a", "a", 100.0, 20);
        let seasonality = crate::seasonality::create_seasonality(Season::All, None, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());

        let result = build_segment(
            &catalog,
            &FailingClient,
            "seg1".into(),
            Mode::Airplane,
            &StopId("a_air".into()),
            &StopId("a_air".into()),
            &conn,
            vec![],
            seasonality,
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        );
        assert!(result.is_err());
    }
}
