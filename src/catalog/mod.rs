//! Immutable in-memory city/hub/stop/connection tables with lookup indexes
//! (C2). Built once via [`Catalog::from_tables`]; read-only afterwards.

pub mod city;
pub mod connection;
pub mod hub;
pub mod stop;

use std::collections::HashMap;

use city::{City, CityId};
use connection::{validate_connection, Connection};
use hub::{Hub, HubId};
use stop::{Stop, StopId};

use crate::geo::distance_km;
use crate::kinds::{HubLevel, Mode, StopType};

/// Read-only catalog of cities, stops, hubs, and pre-validated connections.
#[derive(Debug)]
pub struct Catalog {
    cities: HashMap<CityId, City>,
    stops: HashMap<StopId, Stop>,
    hubs: HashMap<HubId, Hub>,
    connections: Vec<Connection>,
    connections_from: HashMap<CityId, Vec<usize>>,
    connections_to: HashMap<CityId, Vec<usize>>,
}

impl Catalog {
    /// Builds the catalog from plain in-memory tables (no external ingestion
    /// in scope, spec §1). Connections that fail validation (§4.2) are
    /// dropped and logged, never returned as an error.
    pub fn from_tables(
        mut cities: Vec<City>,
        stops: Vec<Stop>,
        hubs: Vec<Hub>,
        connections: Vec<Connection>,
    ) -> Self {
        let stops_by_city: HashMap<CityId, Vec<StopId>> =
            stops.iter().fold(HashMap::new(), |mut acc, s| {
                acc.entry(s.city_id.clone()).or_default().push(s.id.clone());
                acc
            });
        for city in &mut cities {
            if let Some(ids) = stops_by_city.get(&city.id) {
                city.stops = ids.clone();
            }
        }

        let cities: HashMap<CityId, City> = cities.into_iter().map(|c| (c.id.clone(), c)).collect();
        let stops: HashMap<StopId, Stop> = stops.into_iter().map(|s| (s.id.clone(), s)).collect();
        let hubs: HashMap<HubId, Hub> = hubs.into_iter().map(|h| (h.id.clone(), h)).collect();

        let mut accepted = Vec::with_capacity(connections.len());
        for conn in connections {
            let from_is_hub = cities.get(&conn.from_city).is_some_and(|c| c.is_hub);
            let to_is_hub = cities.get(&conn.to_city).is_some_and(|c| c.is_hub);
            match validate_connection(&conn, from_is_hub, to_is_hub) {
                Ok(()) => accepted.push(conn),
                Err(reason) => {
                    tracing::warn!(
                        connection_id = conn.id.as_str(),
                        %reason,
                        "dropping connection that fails catalog validation"
                    );
                }
            }
        }

        let mut connections_from: HashMap<CityId, Vec<usize>> = HashMap::new();
        let mut connections_to: HashMap<CityId, Vec<usize>> = HashMap::new();
        for (idx, conn) in accepted.iter().enumerate() {
            connections_from.entry(conn.from_city.clone()).or_default().push(idx);
            connections_to.entry(conn.to_city.clone()).or_default().push(idx);
        }

        Self {
            cities,
            stops,
            hubs,
            connections: accepted,
            connections_from,
            connections_to,
        }
    }

    pub fn get_city(&self, id: &CityId) -> Option<&City> {
        self.cities.get(id)
    }

    pub fn get_stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn get_hub(&self, id: &HubId) -> Option<&Hub> {
        self.hubs.get(id)
    }

    pub fn get_connection(&self, id: &connection::ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    pub fn get_stops_by_city(&self, id: &CityId) -> Vec<&Stop> {
        self.cities
            .get(id)
            .map(|city| city.stops.iter().filter_map(|sid| self.stops.get(sid)).collect())
            .unwrap_or_default()
    }

    pub fn get_stops_by_type(&self, stop_type: StopType) -> Vec<&Stop> {
        self.stops.values().filter(|s| s.stop_type == stop_type).collect()
    }

    pub fn get_connections_between(&self, from: &CityId, to: &CityId, mode: Option<Mode>) -> Vec<&Connection> {
        self.connections_from
            .get(from)
            .into_iter()
            .flatten()
            .map(|&idx| &self.connections[idx])
            .filter(|c| &c.to_city == to && mode.is_none_or(|m| c.mode == m))
            .collect()
    }

    pub fn get_connections_from(&self, city: &CityId) -> Vec<&Connection> {
        self.connections_from
            .get(city)
            .into_iter()
            .flatten()
            .map(|&idx| &self.connections[idx])
            .collect()
    }

    pub fn get_connections_to(&self, city: &CityId) -> Vec<&Connection> {
        self.connections_to
            .get(city)
            .into_iter()
            .flatten()
            .map(|&idx| &self.connections[idx])
            .collect()
    }

    pub fn all_cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// Nearest city with `hub_level == Regional`, by centroid haversine
    /// distance from `city_id` (spec §4.2).
    pub fn nearest_regional_hub(&self, city_id: &CityId) -> Option<&City> {
        let origin = self.cities.get(city_id)?;
        self.cities
            .values()
            .filter(|c| c.is_hub && c.hub_level == Some(HubLevel::Regional))
            .min_by(|a, b| {
                let da = distance_km(origin.centroid, a.centroid);
                let db = distance_km(origin.centroid, b.centroid);
                da.total_cmp(&db)
            })
    }

    pub fn nearest_federal_hub(&self, city_id: &CityId) -> Option<&City> {
        let origin = self.cities.get(city_id)?;
        self.cities
            .values()
            .filter(|c| c.is_hub && c.hub_level == Some(HubLevel::Federal))
            .min_by(|a, b| {
                let da = distance_km(origin.centroid, a.centroid);
                let db = distance_km(origin.centroid, b.centroid);
                da.total_cmp(&db)
            })
    }

    /// Ranked city search (spec §4.2): exact name/synonym match first, then
    /// administrative full-format match, then district, then subject/region.
    /// Empty query returns empty; results are deduplicated by identity.
    pub fn search_cities(&self, query: &str) -> Vec<&City> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.trim().to_lowercase();

        let mut tier0 = Vec::new();
        let mut tier1 = Vec::new();
        let mut tier2 = Vec::new();
        let mut tier3 = Vec::new();

        for city in self.cities.values() {
            if city.normalized_name == needle
                || city.synonyms.iter().any(|s| s.to_lowercase() == needle)
            {
                tier0.push(city);
            } else if city.admin.full.to_lowercase() == needle {
                tier1.push(city);
            } else if city
                .admin
                .rayon
                .as_ref()
                .is_some_and(|r| r.to_lowercase() == needle)
            {
                tier2.push(city);
            } else if city.admin.subject.to_lowercase() == needle {
                tier3.push(city);
            }
        }

        let mut seen = std::collections::HashSet::new();
        tier0
            .into_iter()
            .chain(tier1)
            .chain(tier2)
            .chain(tier3)
            .filter(|c| seen.insert(c.id.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::city::{AdminStructure, Infrastructure};
    use crate::geo::Coordinate;

    fn admin(subject: &str, rayon: Option<&str>, full: &str) -> AdminStructure {
        AdminStructure {
            subject: subject.to_string(),
            rayon: rayon.map(str::to_string),
            settlement: full.to_string(),
            full: full.to_string(),
            with_context: full.to_string(),
            medium: full.to_string(),
            short: full.to_string(),
        }
    }

    fn plain_city(id: &str, name: &str, subject: &str, rayon: Option<&str>) -> City {
        City::new(
            CityId::new(id).unwrap(),
            name.to_string(),
            vec![],
            admin(subject, rayon, name),
            Coordinate::new(62.0, 129.0).unwrap(),
            "Asia/Yakutsk".to_string(),
            1000,
            false,
            false,
            None,
            Infrastructure {
                has_airport: false,
                airport_class: None,
                has_train_station: false,
                has_bus_station: true,
                has_ferry_pier: false,
                has_winter_road: false,
            },
        )
        .unwrap()
    }

    #[test]
    fn search_empty_query_returns_empty() {
        let catalog = Catalog::from_tables(vec![plain_city("a", "Alpha", "Subject1", None)], vec![], vec![], vec![]);
        assert!(catalog.search_cities("").is_empty());
        assert!(catalog.search_cities("   ").is_empty());
    }

    #[test]
    fn search_exact_name_ranks_first() {
        let cities = vec![
            plain_city("a", "Alpha", "Subject1", Some("Rayon1")),
            plain_city("b", "Beta", "Subject1", Some("Rayon1")),
        ];
        let catalog = Catalog::from_tables(cities, vec![], vec![], vec![]);
        let results = catalog.search_cities("Alpha");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "a");
    }

    #[test]
    fn search_by_district_returns_all_in_district() {
        let cities = vec![
            plain_city("a", "Alpha", "Subject1", Some("Rayon1")),
            plain_city("b", "Beta", "Subject1", Some("Rayon1")),
            plain_city("c", "Gamma", "Subject1", Some("Rayon2")),
        ];
        let catalog = Catalog::from_tables(cities, vec![], vec![], vec![]);
        let results = catalog.search_cities("Rayon1");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn search_by_subject_returns_all_in_subject() {
        let cities = vec![
            plain_city("a", "Alpha", "Subject1", Some("Rayon1")),
            plain_city("b", "Beta", "Subject1", Some("Rayon2")),
            plain_city("c", "Gamma", "Subject2", None),
        ];
        let catalog = Catalog::from_tables(cities, vec![], vec![], vec![]);
        let results = catalog.search_cities("Subject1");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn invalid_connections_are_dropped() {
        use crate::catalog::connection::{Connection, ConnectionId};
        use crate::kinds::Season;

        let cities = vec![plain_city("a", "Alpha", "S", None), plain_city("b", "Beta", "S", None)];
        let bad = Connection {
            id: ConnectionId("bad".into()),
            mode: Mode::Bus,
            from_city: CityId::new("a").unwrap(),
            to_city: CityId::new("b").unwrap(),
            distance_km: 2000.0,
            duration_min: 600,
            base_price: 500.0,
            declared_season: Season::All,
            is_direct: true,
            intermediate: vec![],
            via_hubs: vec![],
            carrier: None,
            route_metadata: None,
            river: None,
        };
        let catalog = Catalog::from_tables(cities, vec![], vec![], vec![bad]);
        assert!(catalog
            .get_connections_between(&CityId::new("a").unwrap(), &CityId::new("b").unwrap(), None)
            .is_empty());
    }
}
