//! Compares declared vs. computed distance/price/path; flags hub/transfer/
//! seasonality mismatches with confidence-scored corrections (C14).

use chrono::NaiveDate;

use crate::catalog::city::CityId;
use crate::catalog::Catalog;
use crate::geo::distance_km;
use crate::kinds::{Mode, Season};
use crate::price::base_price;
use crate::segment::Segment;
use crate::validate::{Correction, Finding};

const SURFACE_MODES: [Mode; 5] = [Mode::Bus, Mode::Train, Mode::Ferry, Mode::WinterRoad, Mode::Taxi];

pub fn check(segments: &[Segment], catalog: &Catalog, date: NaiveDate) -> Vec<Finding> {
    let mut findings = Vec::new();

    for segment in segments {
        distance_check(segment, &mut findings);
        price_check(segment, &mut findings);
        path_check(segment, &mut findings);
        hub_check(segment, catalog, &mut findings);
        seasonality_check(segment, date, &mut findings);
    }
    transfer_check(segments, &mut findings);

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

/// Real distance is haversine for air, polyline-integral for others.
/// Confidence of a suggested correction rises with polyline richness.
fn distance_check(segment: &Segment, findings: &mut Vec<Finding>) {
    let real = if segment.mode == Mode::Airplane {
        distance_km(
            segment.path_geometry.coordinates[0],
            *segment.path_geometry.coordinates.last().unwrap(),
        )
    } else {
        path_length_km(segment)
    };
    if real <= 0.0 {
        return;
    }
    let deviation = (segment.distance.value_km - real).abs() / real;
    if deviation > 0.10 {
        let confidence = if segment.path_geometry.coordinates.len() >= 3 { 0.85 } else { 0.6 };
        findings.push(
            Finding::warning(
                "distance_mismatch",
                Some(segment.id.clone()),
                format!(
                    "segment {} declared distance {:.1} km deviates {:.0}% from computed {:.1} km",
                    segment.id,
                    segment.distance.value_km,
                    deviation * 100.0,
                    real
                ),
            )
            .with_correction(Correction {
                correction_type: "adjust_distance".to_string(),
                suggested_value: format!("{real:.1}"),
                confidence,
            }),
        );
    }
}

fn price_check(segment: &Segment, findings: &mut Vec<Finding>) {
    let estimated = base_price(segment.mode, segment.distance.value_km);
    if estimated <= 0.0 {
        return;
    }
    let deviation = (segment.price.base - estimated).abs() / estimated;
    if deviation > 0.20 {
        findings.push(
            Finding::warning(
                "price_mismatch",
                Some(segment.id.clone()),
                format!(
                    "segment {} base price {:.0} RUB deviates {:.0}% from the per-mode tariff estimate {:.0} RUB",
                    segment.id,
                    segment.price.base,
                    deviation * 100.0,
                    estimated
                ),
            )
            .with_correction(Correction {
                correction_type: "adjust_price".to_string(),
                suggested_value: format!("{estimated:.0}"),
                confidence: 0.75,
            }),
        );
    }
}

fn path_check(segment: &Segment, findings: &mut Vec<Finding>) {
    if !SURFACE_MODES.contains(&segment.mode) {
        return;
    }
    let straight = distance_km(
        segment.path_geometry.coordinates[0],
        *segment.path_geometry.coordinates.last().unwrap(),
    );
    let flagged = segment.path_geometry.coordinates.len() <= 2
        || (straight > 0.0 && (path_length_km(segment) - straight).abs() / straight < 0.05);
    if flagged {
        findings.push(
            Finding::warning(
                "path_mismatch",
                Some(segment.id.clone()),
                format!("segment {} polyline does not credibly represent a {:?} path", segment.id, segment.mode),
            )
            .with_correction(Correction {
                correction_type: "rebuild_path".to_string(),
                suggested_value: "synthesize_non_straight_polyline".to_string(),
                confidence: if segment.path_geometry.coordinates.len() >= 3 { 0.9 } else { 0.8 },
            }),
        );
    }
}

fn hub_check(segment: &Segment, catalog: &Catalog, findings: &mut Vec<Finding>) {
    if segment.mode != Mode::Airplane {
        return;
    }
    for hub in &segment.via_hubs {
        let resolves = catalog.get_city(&CityId(hub.as_str().to_string())).is_some();
        if !resolves {
            findings.push(Finding::error(
                "hub_mismatch",
                Some(segment.id.clone()),
                format!("segment {} references unknown hub {}", segment.id, hub.as_str()),
            ));
        }
    }
    let direct = distance_km(
        segment.path_geometry.coordinates[0],
        *segment.path_geometry.coordinates.last().unwrap(),
    );
    if !segment.via_hubs.is_empty() && direct > 0.0 {
        let via_hub_total = path_length_km(segment);
        if via_hub_total > direct * 1.5 {
            findings.push(Finding::warning(
                "hub_mismatch",
                Some(segment.id.clone()),
                format!("segment {} via-hub distance exceeds 1.5x the direct distance", segment.id),
            ));
        }
    }
    if segment.via_hubs.is_empty() && segment.distance.value_km > 2000.0 {
        findings.push(
            Finding::warning(
                "hub_mismatch",
                Some(segment.id.clone()),
                format!("segment {} is a long flight ({:.0} km) with no hub waypoints", segment.id, segment.distance.value_km),
            )
            .with_correction(Correction {
                correction_type: "add_hub".to_string(),
                suggested_value: "nearest_regional_hub".to_string(),
                confidence: 0.6,
            }),
        );
    }
}

/// Minimum transfer time by adjacent-mode pair (spec §4.14); the route
/// assembler always applies a flat 30 min/transfer, so this flags the
/// mode pairs for which that flat rate understates the realistic minimum.
fn transfer_minimum(a: Mode, b: Mode) -> u32 {
    match (a, b) {
        (Mode::Airplane, Mode::Airplane) => 60,
        (Mode::Train, Mode::Train) => 15,
        (Mode::Bus, Mode::Bus) => 10,
        (x, y) if x == y => 30,
        _ => 45,
    }
}

fn transfer_check(segments: &[Segment], findings: &mut Vec<Finding>) {
    const ASSUMED_TRANSFER_MIN: u32 = 30;
    for window in segments.windows(2) {
        let required = transfer_minimum(window[0].mode, window[1].mode);
        if ASSUMED_TRANSFER_MIN < required {
            findings.push(Finding::warning(
                "transfer_mismatch",
                Some(window[0].id.clone()),
                format!(
                    "transfer between {} and {} needs at least {} min, route assumes {}",
                    window[0].id, window[1].id, required, ASSUMED_TRANSFER_MIN
                ),
            ));
        }
    }
}

fn expected_seasons(mode: Mode) -> &'static [Season] {
    match mode {
        Mode::WinterRoad => &[Season::Winter, Season::Transition],
        Mode::Ferry => &[Season::Summer, Season::Transition],
        _ => &[Season::All, Season::Summer, Season::Winter, Season::Transition],
    }
}

fn seasonality_check(segment: &Segment, date: NaiveDate, findings: &mut Vec<Finding>) {
    if !crate::seasonality::is_available(&segment.seasonality, date) {
        findings.push(Finding::error(
            "seasonality_mismatch",
            Some(segment.id.clone()),
            format!("segment {} is unavailable on {date}", segment.id),
        ));
        return;
    }
    if !expected_seasons(segment.mode).contains(&segment.seasonality.declared) {
        findings.push(Finding::error(
            "seasonality_mismatch",
            Some(segment.id.clone()),
            format!("segment {} declares a season not valid for mode {:?}", segment.id, segment.mode),
        ));
    }
    if let Some(period) = segment.seasonality.period {
        if !period.contains(date) {
            findings.push(Finding::error(
                "seasonality_mismatch",
                Some(segment.id.clone()),
                format!("segment {} travel date falls outside its declared period", segment.id),
            ));
        }
    }
}
