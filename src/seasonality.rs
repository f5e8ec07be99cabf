//! Season derivation and availability windows (C3).

use chrono::{Datelike, NaiveDate};

use crate::kinds::Season;

/// Canonical season boundaries (spec §3, Open Question resolved to Nov 1).
/// summer: Jun 1 – Oct 18; winter: Nov 1 – Apr 15;
/// transition: Apr 16 – May 31 and Oct 19 – Oct 31.
pub fn canonical_season(date: NaiveDate) -> Season {
    let month = date.month();
    let day = date.day();

    match (month, day) {
        (6..=9, _) => Season::Summer,
        (10, 1..=18) => Season::Summer,
        (10, 19..=31) => Season::Transition,
        (11 | 12, _) => Season::Winter,
        (1..=3, _) => Season::Winter,
        (4, 1..=15) => Season::Winter,
        (4, 16..=30) => Season::Transition,
        (5, _) => Season::Transition,
        _ => unreachable!("all (month, day) pairs covered"),
    }
}

/// An explicit inclusive date period, used when a connection/segment
/// declares one instead of relying on the canonical season windows.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A segment/connection's seasonality snapshot.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Seasonality {
    pub available: bool,
    pub declared: Season,
    pub period: Option<Period>,
}

pub fn create_seasonality(declared: Season, period: Option<Period>, at_date: NaiveDate) -> Seasonality {
    let available = is_available(
        &Seasonality {
            available: true,
            declared,
            period,
        },
        at_date,
    );
    Seasonality {
        available,
        declared,
        period,
    }
}

/// Date check respects an explicit period if present; otherwise falls back
/// to the canonical season windows. `all` is always available.
pub fn is_available(seasonality: &Seasonality, date: NaiveDate) -> bool {
    if seasonality.declared == Season::All {
        return true;
    }
    if let Some(period) = seasonality.period {
        return period.contains(date);
    }
    canonical_season(date) == seasonality.declared
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn summer_window() {
        assert_eq!(canonical_season(d(2024, 7, 15)), Season::Summer);
        assert_eq!(canonical_season(d(2024, 10, 18)), Season::Summer);
    }

    #[test]
    fn winter_window_starts_nov_1() {
        assert_eq!(canonical_season(d(2024, 11, 1)), Season::Winter);
        assert_eq!(canonical_season(d(2024, 12, 15)), Season::Winter);
        assert_eq!(canonical_season(d(2024, 4, 15)), Season::Winter);
    }

    #[test]
    fn transition_windows() {
        assert_eq!(canonical_season(d(2024, 4, 16)), Season::Transition);
        assert_eq!(canonical_season(d(2024, 5, 31)), Season::Transition);
        assert_eq!(canonical_season(d(2024, 10, 19)), Season::Transition);
        assert_eq!(canonical_season(d(2024, 10, 31)), Season::Transition);
    }

    #[test]
    fn all_always_available() {
        let s = create_seasonality(Season::All, None, d(2024, 1, 15));
        assert!(s.available);
        assert!(is_available(&s, d(1999, 6, 1)));
    }

    #[test]
    fn explicit_period_overrides_canonical() {
        let period = Period {
            start: d(2024, 3, 1),
            end: d(2024, 3, 31),
        };
        let s = Seasonality {
            available: true,
            declared: Season::Summer,
            period: Some(period),
        };
        assert!(is_available(&s, d(2024, 3, 15)));
        assert!(!is_available(&s, d(2024, 7, 1)));
    }

    #[test]
    fn period_boundary_inclusive() {
        let period = Period {
            start: d(2024, 3, 1),
            end: d(2024, 3, 31),
        };
        let s = Seasonality {
            available: true,
            declared: Season::Summer,
            period: Some(period),
        };
        assert!(is_available(&s, d(2024, 3, 1)));
        assert!(is_available(&s, d(2024, 3, 31)));
    }

    #[test]
    fn ferry_rejected_in_deep_winter() {
        let s = create_seasonality(Season::Summer, None, d(2024, 1, 15));
        assert!(!is_available(&s, d(2024, 1, 15)));
    }
}
