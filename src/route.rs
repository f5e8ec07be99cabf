//! Concatenates segments into a validated route with totals and
//! visualization metadata (C12).

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::catalog::city::CityId;
use crate::catalog::Catalog;
use crate::error::{PlannerError, PlannerResult};
use crate::geo::{BoundingBox, Coordinate};
use crate::kinds::{Mode, MarkerIcon, MarkerType, PolylineStyle};
use crate::price::{self, AdditionalCosts};
use crate::segment::Segment;
use crate::validate::{self, Verdict};

const TRANSFER_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Priority {
    Price,
    Time,
    Comfort,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TotalDistance {
    pub value_km: f64,
    pub breakdown_km: HashMap<Mode, f64>,
    pub display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TotalDuration {
    pub travel_min: u32,
    pub transfer_min: u32,
    pub total_min: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TotalPrice {
    pub base: f64,
    pub additional: AdditionalCosts,
    pub total: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polyline {
    pub coordinates: Vec<Coordinate>,
    pub color: &'static str,
    pub weight: u32,
    pub style: PolylineStyle,
    pub dash_array: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Marker {
    pub coordinates: Coordinate,
    pub icon: MarkerIcon,
    pub label: Option<String>,
    pub marker_type: MarkerType,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Visualization {
    pub polylines: Vec<Polyline>,
    pub markers: Vec<Marker>,
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Route {
    pub id: String,
    pub from_city: CityId,
    pub to_city: CityId,
    pub segments: Vec<Segment>,
    pub total_distance: TotalDistance,
    pub total_duration: TotalDuration,
    pub total_price: TotalPrice,
    pub validation: Verdict,
    pub visualization: Visualization,
}

impl Route {
    pub fn transfer_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

/// Mode-dependent polyline color (spec §4.12).
fn mode_color(mode: Mode) -> &'static str {
    match mode {
        Mode::Airplane => "blue",
        Mode::Train => "orange",
        Mode::Bus => "green",
        Mode::Ferry => "cyan",
        Mode::WinterRoad => "lightgray",
        Mode::Taxi => "orange",
    }
}

fn mode_weight(mode: Mode) -> u32 {
    match mode {
        Mode::Train => 4,
        _ => 2,
    }
}

fn marker_icon(mode: Mode) -> MarkerIcon {
    match mode {
        Mode::Airplane => MarkerIcon::Airport,
        Mode::Train => MarkerIcon::TrainStation,
        Mode::Bus | Mode::Taxi => MarkerIcon::BusStation,
        Mode::Ferry => MarkerIcon::FerryPier,
        Mode::WinterRoad => MarkerIcon::BusStation,
    }
}

/// Assembles segments into a `Route`. Structural violations (empty list,
/// disconnected segments, mismatched endpoints) raise [`PlannerError::InvalidRoute`]
/// and abort the current strategy; realism issues from the validator are
/// embedded into `validation` instead (spec §7).
pub fn assemble_route(
    id: String,
    from_city: CityId,
    to_city: CityId,
    segments: Vec<Segment>,
    catalog: &Catalog,
    date: NaiveDate,
) -> PlannerResult<Route> {
    if segments.is_empty() {
        return Err(PlannerError::InvalidRoute {
            reason: "route must contain at least one segment".to_string(),
        });
    }

    for window in segments.windows(2) {
        if window[0].to_stop != window[1].from_stop {
            return Err(PlannerError::InvalidRoute {
                reason: format!(
                    "disconnected segments: {} ends at {} but {} starts at {}",
                    window[0].id,
                    window[0].to_stop.as_str(),
                    window[1].id,
                    window[1].from_stop.as_str()
                ),
            });
        }
    }

    let first_stop = catalog.get_stop(&segments[0].from_stop).ok_or_else(|| PlannerError::InvalidRoute {
        reason: format!("unknown origin stop: {}", segments[0].from_stop.as_str()),
    })?;
    if first_stop.city_id != from_city {
        return Err(PlannerError::InvalidRoute {
            reason: "first segment does not start in the requested origin city".to_string(),
        });
    }
    let last = segments.last().expect("checked non-empty above");
    let last_stop = catalog.get_stop(&last.to_stop).ok_or_else(|| PlannerError::InvalidRoute {
        reason: format!("unknown destination stop: {}", last.to_stop.as_str()),
    })?;
    if last_stop.city_id != to_city {
        return Err(PlannerError::InvalidRoute {
            reason: "last segment does not end in the requested destination city".to_string(),
        });
    }

    let total_distance = total_distance(&segments);
    let total_duration = total_duration(&segments);
    let total_price = total_price(&segments);
    let visualization = build_visualization(&segments)?;
    let validation = validate::validate(&segments, &from_city, &to_city, date, catalog);

    Ok(Route {
        id,
        from_city,
        to_city,
        segments,
        total_distance,
        total_duration,
        total_price,
        validation,
        visualization,
    })
}

fn total_distance(segments: &[Segment]) -> TotalDistance {
    let mut value_km = 0.0;
    let mut breakdown_km: HashMap<Mode, f64> = HashMap::new();
    for segment in segments {
        value_km += segment.distance.value_km;
        for (mode, km) in &segment.distance.breakdown_km {
            *breakdown_km.entry(*mode).or_insert(0.0) += km;
        }
    }
    TotalDistance {
        value_km,
        breakdown_km,
        display: format!("{} km", value_km.round() as i64),
    }
}

fn total_duration(segments: &[Segment]) -> TotalDuration {
    let travel_min: u32 = segments.iter().map(|s| s.duration.value_min).sum();
    let transfer_min = TRANSFER_MINUTES * segments.len().saturating_sub(1) as u32;
    TotalDuration {
        travel_min,
        transfer_min,
        total_min: travel_min + transfer_min,
    }
}

fn total_price(segments: &[Segment]) -> TotalPrice {
    let base: f64 = segments.iter().map(|s| s.price.base).sum();
    let mut additional = AdditionalCosts::default();
    for segment in segments {
        additional.taxi += segment.price.additional.taxi;
        additional.baggage += segment.price.additional.baggage;
        additional.fees += segment.price.additional.fees;
    }
    additional.transfer = price::transfer_fee(segments.len().saturating_sub(1) as u32);
    let total = base + additional.sum();
    TotalPrice {
        base,
        display: format!("{:.0} RUB", total),
        additional,
        total,
    }
}

fn build_visualization(segments: &[Segment]) -> PlannerResult<Visualization> {
    let mut polylines = Vec::with_capacity(segments.len());
    let mut markers = Vec::new();
    let mut all_points: Vec<Coordinate> = Vec::new();

    for (idx, segment) in segments.iter().enumerate() {
        let dash_array = match segment.mode {
            Mode::WinterRoad => Some(vec![10, 5]),
            _ => segment.path_geometry.dash_array.clone(),
        };
        polylines.push(Polyline {
            coordinates: segment.path_geometry.coordinates.clone(),
            color: mode_color(segment.mode),
            weight: mode_weight(segment.mode),
            style: segment.path_geometry.style,
            dash_array,
        });
        all_points.extend(segment.path_geometry.coordinates.iter().copied());

        if idx == 0 {
            markers.push(Marker {
                coordinates: segment.path_geometry.coordinates[0],
                icon: marker_icon(segment.mode),
                label: None,
                marker_type: MarkerType::Start,
            });
        } else {
            markers.push(Marker {
                coordinates: segment.path_geometry.coordinates[0],
                icon: marker_icon(segment.mode),
                label: None,
                marker_type: MarkerType::Transfer,
            });
        }
        if idx == segments.len() - 1 {
            let last_point = *segment.path_geometry.coordinates.last().expect("validated non-empty");
            markers.push(Marker {
                coordinates: last_point,
                icon: marker_icon(segment.mode),
                label: None,
                marker_type: MarkerType::End,
            });
        }
    }

    let mut marker_points: Vec<Coordinate> = markers.iter().map(|m| m.coordinates).collect();
    all_points.append(&mut marker_points);
    let bounds = BoundingBox::from_points(&all_points)?;

    Ok(Visualization { polylines, markers, bounds })
}
