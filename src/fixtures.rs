//! A small, hand-built catalog for the CLI demo binary and doc examples.
//! No external ingestion pipeline is in scope (spec §1); this is Rust data,
//! not a parsed fixture file.

use chrono::NaiveDate;

use crate::catalog::city::{AdminStructure, City, CityId, Infrastructure};
use crate::catalog::connection::{Connection, ConnectionId, Waypoint};
use crate::catalog::hub::{Hub, HubId, Schedule};
use crate::catalog::stop::{Stop, StopId};
use crate::catalog::Catalog;
use crate::geo::Coordinate;
use crate::kinds::{AirportClass, HubLevel, Mode, PeerLevel, Season, StopType};

fn admin(subject: &str, rayon: Option<&str>, name: &str) -> AdminStructure {
    AdminStructure {
        subject: subject.to_string(),
        rayon: rayon.map(str::to_string),
        settlement: name.to_string(),
        full: format!("{name}, {subject}"),
        with_context: format!("{name} ({subject})"),
        medium: name.to_string(),
        short: name.to_string(),
    }
}

/// Builds the demo catalog: a federal hub, a regional hub, a small
/// airport-only settlement, two river towns, and a short rail corridor.
pub fn demo_catalog() -> Catalog {
    let yakutsk = City::new(
        CityId::new("yakutsk").unwrap(),
        "Yakutsk".to_string(),
        vec!["Якутск".to_string()],
        admin("Sakha Republic", None, "Yakutsk"),
        Coordinate::new(62.03, 129.73).unwrap(),
        "Asia/Yakutsk".to_string(),
        355_000,
        true,
        true,
        Some(HubLevel::Federal),
        Infrastructure {
            has_airport: true,
            airport_class: Some(AirportClass::A),
            has_train_station: false,
            has_bus_station: true,
            has_ferry_pier: true,
            has_winter_road: true,
        },
    )
    .unwrap();

    let moscow = City::new(
        CityId::new("moscow").unwrap(),
        "Moscow".to_string(),
        vec![],
        admin("Moscow", None, "Moscow"),
        Coordinate::new(55.75, 37.62).unwrap(),
        "Europe/Moscow".to_string(),
        12_600_000,
        true,
        true,
        Some(HubLevel::Federal),
        Infrastructure {
            has_airport: true,
            airport_class: Some(AirportClass::A),
            has_train_station: true,
            has_bus_station: true,
            has_ferry_pier: false,
            has_winter_road: false,
        },
    )
    .unwrap();

    let mirny = City::new(
        CityId::new("mirny").unwrap(),
        "Mirny".to_string(),
        vec![],
        admin("Sakha Republic", Some("Mirninsky"), "Mirny"),
        Coordinate::new(62.53, 114.00).unwrap(),
        "Asia/Yakutsk".to_string(),
        32_000,
        false,
        true,
        Some(HubLevel::Regional),
        Infrastructure {
            has_airport: true,
            airport_class: Some(AirportClass::B),
            has_train_station: false,
            has_bus_station: true,
            has_ferry_pier: false,
            has_winter_road: true,
        },
    )
    .unwrap();

    let khandyga = City::new(
        CityId::new("khandyga").unwrap(),
        "Khandyga".to_string(),
        vec![],
        admin("Sakha Republic", Some("Tomponsky"), "Khandyga"),
        Coordinate::new(62.65, 135.58).unwrap(),
        "Asia/Yakutsk".to_string(),
        6_300,
        false,
        false,
        None,
        Infrastructure {
            has_airport: true,
            airport_class: Some(AirportClass::D),
            has_train_station: false,
            has_bus_station: false,
            has_ferry_pier: true,
            has_winter_road: true,
        },
    )
    .unwrap();

    let lena_town = City::new(
        CityId::new("lena_town").unwrap(),
        "Pokrovsk".to_string(),
        vec![],
        admin("Sakha Republic", Some("Khangalassky"), "Pokrovsk"),
        Coordinate::new(61.48, 129.10).unwrap(),
        "Asia/Yakutsk".to_string(),
        9_800,
        false,
        false,
        None,
        Infrastructure {
            has_airport: false,
            airport_class: None,
            has_train_station: false,
            has_bus_station: true,
            has_ferry_pier: true,
            has_winter_road: false,
        },
    )
    .unwrap();

    let rail_a = City::new(
        CityId::new("rail_a").unwrap(),
        "Tommot".to_string(),
        vec![],
        admin("Sakha Republic", Some("Aldansky"), "Tommot"),
        Coordinate::new(58.95, 126.28).unwrap(),
        "Asia/Yakutsk".to_string(),
        6_700,
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
    .unwrap();

    let rail_b = City::new(
        CityId::new("rail_b").unwrap(),
        "Aldan".to_string(),
        vec![],
        admin("Sakha Republic", Some("Aldansky"), "Aldan"),
        Coordinate::new(58.60, 125.40).unwrap(),
        "Asia/Yakutsk".to_string(),
        20_200,
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
    .unwrap();

    let rail_c = City::new(
        CityId::new("rail_c").unwrap(),
        "Neryungri".to_string(),
        vec![],
        admin("Sakha Republic", Some("Neryungrinsky"), "Neryungri"),
        Coordinate::new(56.67, 124.68).unwrap(),
        "Asia/Yakutsk".to_string(),
        57_000,
        true,
        false,
        None,
        Infrastructure {
            has_airport: true,
            airport_class: Some(AirportClass::C),
            has_train_station: true,
            has_bus_station: true,
            has_ferry_pier: false,
            has_winter_road: false,
        },
    )
    .unwrap();

    let cities = vec![yakutsk, moscow, mirny, khandyga, lena_town, rail_a, rail_b, rail_c];

    let stops = vec![
        Stop::new(
            StopId("yakutsk_air".into()),
            "Yakutsk Airport".into(),
            StopType::Airport,
            Coordinate::new(62.09, 129.77).unwrap(),
            CityId::new("yakutsk").unwrap(),
            Some(HubLevel::Federal),
            Some("YKS".into()),
        )
        .unwrap(),
        Stop::new(
            StopId("yakutsk_bus".into()),
            "Yakutsk Bus Station".into(),
            StopType::BusStation,
            Coordinate::new(62.02, 129.72).unwrap(),
            CityId::new("yakutsk").unwrap(),
            None,
            None,
        )
        .unwrap(),
        Stop::new(
            StopId("yakutsk_pier".into()),
            "Yakutsk River Pier".into(),
            StopType::FerryPier,
            Coordinate::new(62.00, 129.70).unwrap(),
            CityId::new("yakutsk").unwrap(),
            None,
            None,
        )
        .unwrap(),
        Stop::new(
            StopId("yakutsk_winter".into()),
            "Yakutsk Winter Road Point".into(),
            StopType::WinterRoadPoint,
            Coordinate::new(62.03, 129.73).unwrap(),
            CityId::new("yakutsk").unwrap(),
            None,
            None,
        )
        .unwrap(),
        Stop::new(
            StopId("moscow_air".into()),
            "Sheremetyevo".into(),
            StopType::Airport,
            Coordinate::new(55.97, 37.41).unwrap(),
            CityId::new("moscow").unwrap(),
            Some(HubLevel::Federal),
            Some("SVO".into()),
        )
        .unwrap(),
        Stop::new(
            StopId("mirny_air".into()),
            "Mirny Airport".into(),
            StopType::Airport,
            Coordinate::new(62.53, 114.04).unwrap(),
            CityId::new("mirny").unwrap(),
            Some(HubLevel::Regional),
            Some("MJZ".into()),
        )
        .unwrap(),
        Stop::new(
            StopId("khandyga_air".into()),
            "Khandyga Airport".into(),
            StopType::Airport,
            Coordinate::new(62.65, 135.60).unwrap(),
            CityId::new("khandyga").unwrap(),
            None,
            Some("KDY".into()),
        )
        .unwrap(),
        Stop::new(
            StopId("khandyga_pier".into()),
            "Khandyga Pier".into(),
            StopType::FerryPier,
            Coordinate::new(62.65, 135.58).unwrap(),
            CityId::new("khandyga").unwrap(),
            None,
            None,
        )
        .unwrap(),
        Stop::new(
            StopId("lena_town_pier".into()),
            "Pokrovsk Pier".into(),
            StopType::FerryPier,
            Coordinate::new(61.48, 129.10).unwrap(),
            CityId::new("lena_town").unwrap(),
            None,
            None,
        )
        .unwrap(),
        Stop::new(
            StopId("rail_a_station".into()),
            "Tommot Station".into(),
            StopType::TrainStation,
            Coordinate::new(58.95, 126.28).unwrap(),
            CityId::new("rail_a").unwrap(),
            None,
            None,
        )
        .unwrap(),
        Stop::new(
            StopId("rail_b_station".into()),
            "Aldan Station".into(),
            StopType::TrainStation,
            Coordinate::new(58.60, 125.40).unwrap(),
            CityId::new("rail_b").unwrap(),
            None,
            None,
        )
        .unwrap(),
        Stop::new(
            StopId("rail_c_station".into()),
            "Neryungri Station".into(),
            StopType::TrainStation,
            Coordinate::new(56.67, 124.68).unwrap(),
            CityId::new("rail_c").unwrap(),
            None,
            None,
        )
        .unwrap(),
    ];

    let hubs = vec![
        Hub {
            id: HubId("yakutsk".into()),
            name: "Yakutsk".into(),
            level: HubLevel::Federal,
            coordinates: Coordinate::new(62.03, 129.73).unwrap(),
            airport_code: Some("YKS".into()),
            connections: std::collections::HashMap::from([(
                PeerLevel::Regional,
                std::collections::HashSet::from([HubId("mirny".into())]),
            )]),
            schedule: Schedule::Daily,
        },
        Hub {
            id: HubId("moscow".into()),
            name: "Moscow".into(),
            level: HubLevel::Federal,
            coordinates: Coordinate::new(55.75, 37.62).unwrap(),
            airport_code: Some("SVO".into()),
            connections: std::collections::HashMap::new(),
            schedule: Schedule::Daily,
        },
        Hub {
            id: HubId("mirny".into()),
            name: "Mirny".into(),
            level: HubLevel::Regional,
            coordinates: Coordinate::new(62.53, 114.00).unwrap(),
            airport_code: Some("MJZ".into()),
            connections: std::collections::HashMap::from([(
                PeerLevel::Federal,
                std::collections::HashSet::from([HubId("yakutsk".into())]),
            )]),
            schedule: Schedule::Daily,
        },
    ];

    let connections = vec![
        Connection {
            id: ConnectionId("yakutsk-moscow-air".into()),
            mode: Mode::Airplane,
            from_city: CityId::new("yakutsk").unwrap(),
            to_city: CityId::new("moscow").unwrap(),
            distance_km: 4900.0,
            duration_min: 360,
            base_price: 24500.0,
            declared_season: Season::All,
            is_direct: true,
            intermediate: vec![],
            via_hubs: vec![HubId("yakutsk".into()), HubId("moscow".into())],
            carrier: Some("Yakutia Airlines".into()),
            route_metadata: None,
            river: None,
        },
        Connection {
            id: ConnectionId("mirny-yakutsk-air".into()),
            mode: Mode::Airplane,
            from_city: CityId::new("mirny").unwrap(),
            to_city: CityId::new("yakutsk").unwrap(),
            distance_km: 820.0,
            duration_min: 95,
            base_price: 9200.0,
            declared_season: Season::All,
            is_direct: true,
            intermediate: vec![],
            via_hubs: vec![],
            carrier: Some("Yakutia Airlines".into()),
            route_metadata: None,
            river: None,
        },
        Connection {
            id: ConnectionId("khandyga-yakutsk-winter".into()),
            mode: Mode::WinterRoad,
            from_city: CityId::new("khandyga").unwrap(),
            to_city: CityId::new("yakutsk").unwrap(),
            distance_km: 440.0,
            duration_min: 540,
            base_price: 3300.0,
            declared_season: Season::Winter,
            is_direct: true,
            intermediate: vec![Waypoint::Coordinate(Coordinate::new(62.30, 132.50).unwrap())],
            via_hubs: vec![],
            carrier: None,
            route_metadata: None,
            river: None,
        },
        Connection {
            id: ConnectionId("khandyga-lena-ferry".into()),
            mode: Mode::Ferry,
            from_city: CityId::new("khandyga").unwrap(),
            to_city: CityId::new("lena_town").unwrap(),
            distance_km: 610.0,
            duration_min: 1200,
            base_price: 3660.0,
            declared_season: Season::Summer,
            is_direct: true,
            intermediate: vec![],
            via_hubs: vec![],
            carrier: Some("Lena River Shipping".into()),
            route_metadata: None,
            river: Some("aldan".into()),
        },
        Connection {
            id: ConnectionId("lena-yakutsk-ferry".into()),
            mode: Mode::Ferry,
            from_city: CityId::new("lena_town").unwrap(),
            to_city: CityId::new("yakutsk").unwrap(),
            distance_km: 70.0,
            duration_min: 150,
            base_price: 420.0,
            declared_season: Season::Summer,
            is_direct: true,
            intermediate: vec![],
            via_hubs: vec![],
            carrier: Some("Lena River Shipping".into()),
            route_metadata: None,
            river: Some("lena".into()),
        },
        Connection {
            id: ConnectionId("rail-a-b".into()),
            mode: Mode::Train,
            from_city: CityId::new("rail_a").unwrap(),
            to_city: CityId::new("rail_b").unwrap(),
            distance_km: 95.0,
            duration_min: 110,
            base_price: 142.0,
            declared_season: Season::All,
            is_direct: true,
            intermediate: vec![],
            via_hubs: vec![],
            carrier: Some("AYaM Railway".into()),
            route_metadata: None,
            river: None,
        },
        Connection {
            id: ConnectionId("rail-b-c".into()),
            mode: Mode::Train,
            from_city: CityId::new("rail_b").unwrap(),
            to_city: CityId::new("rail_c").unwrap(),
            distance_km: 210.0,
            duration_min: 240,
            base_price: 315.0,
            declared_season: Season::All,
            is_direct: true,
            intermediate: vec![],
            via_hubs: vec![],
            carrier: Some("AYaM Railway".into()),
            route_metadata: None,
            river: None,
        },
    ];

    Catalog::from_tables(cities, stops, hubs, connections)
}

pub fn demo_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}
