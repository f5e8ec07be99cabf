use crate::catalog::city::CityId;
use crate::catalog::hub::HubId;
use crate::geo::Coordinate;
use crate::kinds::{Mode, Season};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ConnectionId(pub String);

impl ConnectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An intermediate waypoint declared on a connection: either a catalog city
/// or a raw coordinate (spec §3).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Waypoint {
    City(CityId),
    Coordinate(Coordinate),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub mode: Mode,
    pub from_city: CityId,
    pub to_city: CityId,
    pub distance_km: f64,
    pub duration_min: u32,
    pub base_price: f64,
    pub declared_season: Season,
    pub is_direct: bool,
    pub intermediate: Vec<Waypoint>,
    pub via_hubs: Vec<HubId>,
    pub carrier: Option<String>,
    pub route_metadata: Option<String>,
    /// River name, when this is a ferry connection following a known river
    /// system (spec §4.6): "lena", "aldan", "vilyuy".
    pub river: Option<String>,
}

/// Compact reason a connection was rejected at catalog load (spec §4.2).
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    NonPositiveDistance,
    NonPositiveDuration,
    NonPositivePrice,
    SpeedCeilingExceeded { implied_kmh: f64, ceiling_kmh: f64 },
    BusDistanceTooLong { distance_km: f64 },
    UnrealisticDirectFlight { distance_km: f64 },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::NonPositiveDistance => write!(f, "distance must be > 0"),
            RejectionReason::NonPositiveDuration => write!(f, "duration must be > 0"),
            RejectionReason::NonPositivePrice => write!(f, "base price must be > 0"),
            RejectionReason::SpeedCeilingExceeded { implied_kmh, ceiling_kmh } => write!(
                f,
                "implied speed {implied_kmh:.1} km/h exceeds ceiling {ceiling_kmh:.1} km/h"
            ),
            RejectionReason::BusDistanceTooLong { distance_km } => {
                write!(f, "bus distance {distance_km:.1} km exceeds 1500 km cap")
            }
            RejectionReason::UnrealisticDirectFlight { distance_km } => write!(
                f,
                "direct flight between two non-hub airports over {distance_km:.1} km"
            ),
        }
    }
}

/// Validates a connection against the rules of spec §4.2. Returns the
/// rejection reason rather than a hard error: the catalog builder logs and
/// drops rejected connections instead of failing the whole load.
pub fn validate_connection(
    conn: &Connection,
    from_city_is_hub: bool,
    to_city_is_hub: bool,
) -> Result<(), RejectionReason> {
    if conn.distance_km <= 0.0 {
        return Err(RejectionReason::NonPositiveDistance);
    }
    if conn.duration_min == 0 {
        return Err(RejectionReason::NonPositiveDuration);
    }
    if conn.base_price <= 0.0 {
        return Err(RejectionReason::NonPositivePrice);
    }

    let implied_kmh = conn.distance_km / (conn.duration_min as f64 / 60.0);
    let ceiling = conn.mode.speed_ceiling_kmh();
    if implied_kmh > ceiling {
        return Err(RejectionReason::SpeedCeilingExceeded {
            implied_kmh,
            ceiling_kmh: ceiling,
        });
    }

    if conn.mode == Mode::Bus && conn.distance_km > 1500.0 {
        return Err(RejectionReason::BusDistanceTooLong {
            distance_km: conn.distance_km,
        });
    }

    if conn.mode == Mode::Airplane
        && conn.is_direct
        && !from_city_is_hub
        && !to_city_is_hub
        && conn.distance_km > 500.0
    {
        return Err(RejectionReason::UnrealisticDirectFlight {
            distance_km: conn.distance_km,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::city::CityId;

    fn base_connection(mode: Mode, distance_km: f64, duration_min: u32) -> Connection {
        Connection {
            id: ConnectionId("c1".into()),
            mode,
            from_city: CityId::new("a").unwrap(),
            to_city: CityId::new("b").unwrap(),
            distance_km,
            duration_min,
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
    fn rejects_non_positive_distance() {
        let c = base_connection(Mode::Bus, 0.0, 60);
        assert_eq!(
            validate_connection(&c, false, false),
            Err(RejectionReason::NonPositiveDistance)
        );
    }

    #[test]
    fn rejects_bus_over_1500km() {
        let c = base_connection(Mode::Bus, 1501.0, 20000);
        assert!(matches!(
            validate_connection(&c, false, false),
            Err(RejectionReason::BusDistanceTooLong { .. })
        ));
    }

    #[test]
    fn accepts_bus_at_1500km() {
        let c = base_connection(Mode::Bus, 1500.0, 20000);
        assert!(validate_connection(&c, false, false).is_ok());
    }

    #[test]
    fn rejects_absurd_speed() {
        let c = base_connection(Mode::Bus, 500.0, 60); // 500 km/h
        assert!(matches!(
            validate_connection(&c, false, false),
            Err(RejectionReason::SpeedCeilingExceeded { .. })
        ));
    }

    #[test]
    fn rejects_long_direct_flight_between_non_hubs() {
        let c = base_connection(Mode::Airplane, 501.0, 60);
        assert!(matches!(
            validate_connection(&c, false, false),
            Err(RejectionReason::UnrealisticDirectFlight { .. })
        ));
    }

    #[test]
    fn allows_long_direct_flight_when_hub_to_hub() {
        let c = base_connection(Mode::Airplane, 1000.0, 90);
        assert!(validate_connection(&c, true, true).is_ok());
    }
}
