//! Decides direct flight feasibility vs. mandatory hub chain (C8).

use crate::catalog::city::CityId;
use crate::catalog::hub::HubId;
use crate::catalog::Catalog;
use crate::error::PlannerError;
use crate::geo::distance_km;

const INTER_REGIONAL_FEDERAL_THRESHOLD_KM: f64 = 2000.0;
const SHORT_NONHUB_DIRECT_DISTANCE_KM: f64 = 500.0;

#[derive(Debug, Clone, PartialEq)]
pub enum HubDecision {
    /// Direct flight permitted. `hub_waypoints` bends the geometry through
    /// each endpoint's own hub airport when both cities are hubs; empty for
    /// a short direct hop between two non-hubs.
    Direct { hub_waypoints: Vec<HubId> },
    /// Mandatory ordered hub chain the flight must route through.
    Chain(Vec<HubId>),
}

/// Applies the four rules of spec §4.8.
pub fn select(catalog: &Catalog, from: &CityId, to: &CityId) -> Result<HubDecision, PlannerError> {
    let from_city = catalog.get_city(from).ok_or_else(|| PlannerError::InvalidInput {
        reason: format!("unknown city: {}", from.as_str()),
    })?;
    let to_city = catalog.get_city(to).ok_or_else(|| PlannerError::InvalidInput {
        reason: format!("unknown city: {}", to.as_str()),
    })?;

    // Rule 1: both are hubs.
    if from_city.is_hub && to_city.is_hub {
        return Ok(HubDecision::Direct {
            hub_waypoints: vec![HubId(from.as_str().to_string()), HubId(to.as_str().to_string())],
        });
    }

    // Rule 2: exactly one is a hub.
    if from_city.is_hub != to_city.is_hub {
        let other = if from_city.is_hub { to } else { from };
        let nearest = catalog.nearest_regional_hub(other).ok_or_else(|| PlannerError::InvalidInput {
            reason: format!("no regional hub reachable from {}", other.as_str()),
        })?;
        return Ok(HubDecision::Chain(vec![HubId(nearest.id.as_str().to_string())]));
    }

    // Rule 3: neither is a hub. A long direct hop is always forbidden; a
    // short one is left to the caller (it may exist as a catalog connection).
    let distance = distance_km(from_city.centroid, to_city.centroid);
    if distance <= SHORT_NONHUB_DIRECT_DISTANCE_KM {
        return Ok(HubDecision::Direct { hub_waypoints: vec![] });
    }

    let from_regional = catalog.nearest_regional_hub(from).ok_or_else(|| PlannerError::InvalidInput {
        reason: format!("no regional hub reachable from {}", from.as_str()),
    })?;
    let to_regional = catalog.nearest_regional_hub(to).ok_or_else(|| PlannerError::InvalidInput {
        reason: format!("no regional hub reachable from {}", to.as_str()),
    })?;

    if from_regional.id == to_regional.id {
        return Ok(HubDecision::Chain(vec![HubId(from_regional.id.as_str().to_string())]));
    }

    let hub_to_hub = distance_km(from_regional.centroid, to_regional.centroid);
    let mut chain = vec![HubId(from_regional.id.as_str().to_string())];
    if hub_to_hub > INTER_REGIONAL_FEDERAL_THRESHOLD_KM {
        let federal = catalog.nearest_federal_hub(from).ok_or_else(|| PlannerError::InvalidInput {
            reason: "no federal hub available for inter-regional jump".to_string(),
        })?;
        chain.push(HubId(federal.id.as_str().to_string()));
    }
    chain.push(HubId(to_regional.id.as_str().to_string()));

    Ok(HubDecision::Chain(chain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::city::{AdminStructure, City, Infrastructure};
    use crate::geo::Coordinate;
    use crate::kinds::HubLevel;

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

    fn infra(has_airport: bool) -> Infrastructure {
        Infrastructure {
            has_airport,
            airport_class: has_airport.then_some(crate::kinds::AirportClass::D),
            has_train_station: false,
            has_bus_station: false,
            has_ferry_pier: false,
            has_winter_road: false,
        }
    }

    fn hub_city(id: &str, lat: f64, lon: f64, level: HubLevel) -> City {
        City::new(
            CityId::new(id).unwrap(),
            id.to_string(),
            vec![],
            admin(id),
            Coordinate::new(lat, lon).unwrap(),
            "Asia/Yakutsk".into(),
            50_000,
            true,
            true,
            Some(level),
            infra(true),
        )
        .unwrap()
    }

    fn plain_city(id: &str, lat: f64, lon: f64) -> City {
        City::new(
            CityId::new(id).unwrap(),
            id.to_string(),
            vec![],
            admin(id),
            Coordinate::new(lat, lon).unwrap(),
            "Asia/Yakutsk".into(),
            500,
            false,
            false,
            None,
            infra(true),
        )
        .unwrap()
    }

    #[test]
    fn both_hubs_allow_direct_with_self_waypoints() {
        let cities = vec![
            hub_city("hub_a", 62.0, 129.7, HubLevel::Federal),
            hub_city("hub_b", 55.0, 38.0, HubLevel::Federal),
        ];
        let catalog = Catalog::from_tables(cities, vec![], vec![], vec![]);
        let decision = select(&catalog, &CityId::new("hub_a").unwrap(), &CityId::new("hub_b").unwrap()).unwrap();
        assert_eq!(
            decision,
            HubDecision::Direct {
                hub_waypoints: vec![HubId("hub_a".into()), HubId("hub_b".into())]
            }
        );
    }

    #[test]
    fn one_hub_requires_chain_via_other_sides_regional_hub() {
        let cities = vec![
            hub_city("hub_a", 62.0, 129.7, HubLevel::Federal),
            plain_city("small", 63.0, 130.0),
            hub_city("regional_near_small", 63.2, 130.1, HubLevel::Regional),
        ];
        let catalog = Catalog::from_tables(cities, vec![], vec![], vec![]);
        let decision = select(&catalog, &CityId::new("hub_a").unwrap(), &CityId::new("small").unwrap()).unwrap();
        assert_eq!(decision, HubDecision::Chain(vec![HubId("regional_near_small".into())]));
    }

    #[test]
    fn two_non_hubs_short_distance_allows_direct() {
        let cities = vec![plain_city("a", 62.0, 129.7), plain_city("b", 62.1, 129.8)];
        let catalog = Catalog::from_tables(cities, vec![], vec![], vec![]);
        let decision = select(&catalog, &CityId::new("a").unwrap(), &CityId::new("b").unwrap()).unwrap();
        assert_eq!(decision, HubDecision::Direct { hub_waypoints: vec![] });
    }

    #[test]
    fn two_non_hubs_long_distance_requires_chain() {
        let cities = vec![
            plain_city("a", 62.0, 129.7),
            plain_city("b", 50.0, 40.0),
            hub_city("regional_a", 62.5, 130.0, HubLevel::Regional),
            hub_city("regional_b", 50.5, 40.5, HubLevel::Regional),
            hub_city("federal", 56.0, 60.0, HubLevel::Federal),
        ];
        let catalog = Catalog::from_tables(cities, vec![], vec![], vec![]);
        let decision = select(&catalog, &CityId::new("a").unwrap(), &CityId::new("b").unwrap()).unwrap();
        match decision {
            HubDecision::Chain(chain) => assert!(chain.len() >= 2),
            _ => panic!("expected a chain"),
        }
    }
}
