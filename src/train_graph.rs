//! Weighted directed graph over train stations; shortest path with a
//! transfer bound (C9).

use std::collections::HashMap;

use crate::catalog::city::CityId;
use crate::catalog::connection::ConnectionId;
use crate::catalog::Catalog;
use crate::kinds::Mode;

#[derive(Debug, Clone)]
struct Edge {
    to: CityId,
    connection_id: ConnectionId,
    distance_km: f64,
    duration_min: u32,
}

/// Adjacency-map graph over `mode == train` connections, built once from the
/// catalog and immutable afterwards.
pub struct TrainGraph {
    adjacency: HashMap<CityId, Vec<Edge>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainPath {
    pub path_cities: Vec<CityId>,
    pub edges: Vec<ConnectionId>,
    pub total_distance_km: f64,
    pub total_duration_min: u32,
}

impl TrainGraph {
    pub fn build(catalog: &Catalog) -> Self {
        let mut adjacency: HashMap<CityId, Vec<Edge>> = HashMap::new();
        for city in catalog.all_cities() {
            for conn in catalog.get_connections_from(&city.id) {
                if conn.mode != Mode::Train {
                    continue;
                }
                adjacency.entry(city.id.clone()).or_default().push(Edge {
                    to: conn.to_city.clone(),
                    connection_id: conn.id.clone(),
                    distance_km: conn.distance_km,
                    duration_min: conn.duration_min,
                });
            }
        }
        Self { adjacency }
    }

    /// Shortest path by distance, tie-broken by duration, then edge count,
    /// then stable lexical order of the city-identifier path. `max_transfers
    /// = k` bounds the path to at most `k + 1` edges. Identical endpoints
    /// return a trivial zero-cost path; unknown endpoints return `None`
    /// without error (spec §4.9).
    pub fn shortest_path(&self, from: &CityId, to: &CityId, max_transfers: u32) -> Option<TrainPath> {
        if from == to {
            return Some(TrainPath {
                path_cities: vec![from.clone()],
                edges: vec![],
                total_distance_km: 0.0,
                total_duration_min: 0,
            });
        }
        if !self.adjacency.contains_key(from) && !self.adjacency.values().flatten().any(|e| &e.to == from) {
            return None;
        }
        if !self.adjacency.contains_key(to) && !self.adjacency.values().flatten().any(|e| &e.to == to) {
            return None;
        }

        let max_edges = max_transfers + 1;
        let mut best: Option<TrainPath> = None;
        let mut visited = vec![from.clone()];
        self.search(from, to, max_edges, &mut visited, Vec::new(), 0.0, 0, &mut best);
        best
    }

    #[allow(clippy::too_many_arguments)]
    fn search(
        &self,
        current: &CityId,
        target: &CityId,
        remaining_edges: u32,
        visited: &mut Vec<CityId>,
        edges_so_far: Vec<ConnectionId>,
        distance_so_far: f64,
        duration_so_far: u32,
        best: &mut Option<TrainPath>,
    ) {
        if current == target && !edges_so_far.is_empty() {
            let candidate = TrainPath {
                path_cities: visited.clone(),
                edges: edges_so_far.clone(),
                total_distance_km: distance_so_far,
                total_duration_min: duration_so_far,
            };
            if is_better(&candidate, best) {
                *best = Some(candidate);
            }
            // still allow a shorter-edge-count path to be found by continuing
            // search, but no point extending past the target further here.
            return;
        }
        if remaining_edges == 0 {
            return;
        }
        let Some(edges) = self.adjacency.get(current) else {
            return;
        };
        for edge in edges {
            if visited.contains(&edge.to) {
                continue;
            }
            visited.push(edge.to.clone());
            let mut next_edges = edges_so_far.clone();
            next_edges.push(edge.connection_id.clone());
            self.search(
                &edge.to.clone(),
                target,
                remaining_edges - 1,
                visited,
                next_edges,
                distance_so_far + edge.distance_km,
                duration_so_far + edge.duration_min,
                best,
            );
            visited.pop();
        }
    }
}

fn is_better(candidate: &TrainPath, incumbent: &Option<TrainPath>) -> bool {
    let Some(incumbent) = incumbent else {
        return true;
    };
    match candidate.total_distance_km.total_cmp(&incumbent.total_distance_km) {
        std::cmp::Ordering::Less => return true,
        std::cmp::Ordering::Greater => return false,
        std::cmp::Ordering::Equal => {}
    }
    match candidate.total_duration_min.cmp(&incumbent.total_duration_min) {
        std::cmp::Ordering::Less => return true,
        std::cmp::Ordering::Greater => return false,
        std::cmp::Ordering::Equal => {}
    }
    match candidate.edges.len().cmp(&incumbent.edges.len()) {
        std::cmp::Ordering::Less => return true,
        std::cmp::Ordering::Greater => return false,
        std::cmp::Ordering::Equal => {}
    }
    let candidate_key: Vec<&str> = candidate.path_cities.iter().map(CityId::as_str).collect();
    let incumbent_key: Vec<&str> = incumbent.path_cities.iter().map(CityId::as_str).collect();
    candidate_key < incumbent_key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::city::{AdminStructure, City, Infrastructure};
    use crate::catalog::connection::{Connection, ConnectionId as ConnId};
    use crate::geo::Coordinate;
    use crate::kinds::Season;

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

    fn city(id: &str) -> City {
        City::new(
            CityId::new(id).unwrap(),
            id.to_string(),
            vec![],
            admin(id),
            Coordinate::new(60.0, 100.0).unwrap(),
            "Asia/Yakutsk".into(),
            1000,
            false,
            false,
            None,
            Infrastructure {
                has_airport: false,
                airport_class: None,
                has_train_station: true,
                has_bus_station: false,
                has_ferry_pier: false,
                has_winter_road: false,
            },
        )
        .unwrap()
    }

    fn train_conn(id: &str, from: &str, to: &str, distance: f64, duration: u32) -> Connection {
        Connection {
            id: ConnId(id.into()),
            mode: Mode::Train,
            from_city: CityId::new(from).unwrap(),
            to_city: CityId::new(to).unwrap(),
            distance_km: distance,
            duration_min: duration,
            base_price: distance * 1.5,
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
    fn identical_endpoints_trivial_path() {
        let catalog = Catalog::from_tables(vec![city("a")], vec![], vec![], vec![]);
        let graph = TrainGraph::build(&catalog);
        let path = graph
            .shortest_path(&CityId::new("a").unwrap(), &CityId::new("a").unwrap(), 3)
            .unwrap();
        assert!(path.edges.is_empty());
        assert_eq!(path.total_distance_km, 0.0);
    }

    #[test]
    fn unknown_endpoint_returns_none() {
        let catalog = Catalog::from_tables(vec![city("a")], vec![], vec![], vec![]);
        let graph = TrainGraph::build(&catalog);
        assert!(graph
            .shortest_path(&CityId::new("a").unwrap(), &CityId::new("ghost").unwrap(), 3)
            .is_none());
    }

    #[test]
    fn bounded_transfers_reject_longer_path() {
        let cities = vec![city("a"), city("b"), city("c"), city("d")];
        let connections = vec![
            train_conn("ab", "a", "b", 100.0, 60),
            train_conn("bc", "b", "c", 100.0, 60),
            train_conn("cd", "c", "d", 100.0, 60),
        ];
        let catalog = Catalog::from_tables(cities, vec![], vec![], connections);
        let graph = TrainGraph::build(&catalog);

        // 3 edges needed, maxTransfers = 1 allows only 2 edges.
        assert!(graph
            .shortest_path(&CityId::new("a").unwrap(), &CityId::new("d").unwrap(), 1)
            .is_none());

        // maxTransfers = 2 allows exactly 3 edges.
        let path = graph
            .shortest_path(&CityId::new("a").unwrap(), &CityId::new("d").unwrap(), 2)
            .unwrap();
        assert_eq!(path.edges.len(), 3);
        assert_eq!(path.total_distance_km, 300.0);
        assert_eq!(path.total_duration_min, 180);
    }

    #[test]
    fn shorter_distance_wins_over_fewer_edges() {
        let cities = vec![city("a"), city("b"), city("c")];
        let connections = vec![
            train_conn("direct", "a", "c", 500.0, 300),
            train_conn("ab", "a", "b", 100.0, 60),
            train_conn("bc", "b", "c", 100.0, 60),
        ];
        let catalog = Catalog::from_tables(cities, vec![], vec![], connections);
        let graph = TrainGraph::build(&catalog);
        let path = graph
            .shortest_path(&CityId::new("a").unwrap(), &CityId::new("c").unwrap(), 2)
            .unwrap();
        assert_eq!(path.edges.len(), 2);
        assert_eq!(path.total_distance_km, 200.0);
    }
}
