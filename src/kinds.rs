//! Closed-sum types shared across the core: modes, seasons, hub levels, stop
//! types, and visualization tags. Matched exhaustively everywhere they're
//! used; no runtime string dispatch (spec §9).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Airplane,
    Train,
    Bus,
    Ferry,
    WinterRoad,
    Taxi,
}

impl Mode {
    /// Fixed priority order strategies iterate over (spec §5/§4.10).
    pub const PRIORITY_ORDER: [Mode; 5] =
        [Mode::Bus, Mode::Train, Mode::Ferry, Mode::WinterRoad, Mode::Airplane];

    /// Per-mode implied-speed ceiling in km/h used by catalog validation (§4.2).
    pub fn speed_ceiling_kmh(self) -> f64 {
        match self {
            Mode::Airplane => 950.0,
            Mode::Train => 160.0,
            Mode::Bus => 100.0,
            Mode::Ferry => 60.0,
            Mode::WinterRoad => 70.0,
            Mode::Taxi => 120.0,
        }
    }

    /// Nominal travel speed used to derive duration when none is declared (§4.11).
    pub fn nominal_speed_kmh(self) -> f64 {
        match self {
            Mode::Airplane => 800.0,
            Mode::Train => 80.0,
            Mode::Bus => 60.0,
            Mode::Ferry => 30.0,
            Mode::WinterRoad => 50.0,
            Mode::Taxi => 40.0,
        }
    }

    /// RUB/km base tariff (§4.5).
    pub fn base_rate_rub_per_km(self) -> f64 {
        match self {
            Mode::Airplane => 5.0,
            Mode::Train => 1.5,
            Mode::Bus => 4.0,
            Mode::Ferry => 6.0,
            Mode::WinterRoad => 7.5,
            Mode::Taxi => 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Winter,
    Transition,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HubLevel {
    Federal,
    Regional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeerLevel {
    Federal,
    Regional,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopType {
    Airport,
    TrainStation,
    BusStation,
    FerryPier,
    WinterRoadPoint,
    TaxiStand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirportClass {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerIcon {
    Airport,
    TrainStation,
    BusStation,
    FerryPier,
    Hub,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerType {
    Start,
    End,
    Transfer,
    Hub,
    Intermediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolylineStyle {
    Solid,
    Dashed,
    Dotted,
    Wavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceCalculationMethod {
    Haversine,
    RoutingService,
    RiverPath,
    RailPath,
    Manual,
}
