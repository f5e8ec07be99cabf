use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::geo::Coordinate;
use crate::kinds::{HubLevel, PeerLevel};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct HubId(pub String);

impl HubId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Schedule {
    Daily,
    /// Weekday set where 7 = Sunday (spec §3).
    Weekly(HashSet<u8>),
    Seasonal { start: NaiveDate, end: NaiveDate },
}

impl Schedule {
    pub fn is_available(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        match self {
            Schedule::Daily => true,
            Schedule::Weekly(days) => {
                let weekday = match date.weekday() {
                    chrono::Weekday::Mon => 1,
                    chrono::Weekday::Tue => 2,
                    chrono::Weekday::Wed => 3,
                    chrono::Weekday::Thu => 4,
                    chrono::Weekday::Fri => 5,
                    chrono::Weekday::Sat => 6,
                    chrono::Weekday::Sun => 7,
                };
                days.contains(&weekday)
            }
            Schedule::Seasonal { start, end } => date >= *start && date <= *end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hub {
    pub id: HubId,
    pub name: String,
    pub level: HubLevel,
    pub coordinates: Coordinate,
    pub airport_code: Option<String>,
    pub connections: HashMap<PeerLevel, HashSet<HubId>>,
    pub schedule: Schedule,
}

impl Hub {
    pub fn is_available(&self, date: NaiveDate) -> bool {
        self.schedule.is_available(date)
    }

    pub fn peers(&self, level: PeerLevel) -> impl Iterator<Item = &HubId> {
        self.connections.get(&level).into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn daily_always_available() {
        assert!(Schedule::Daily.is_available(d(2024, 1, 1)));
    }

    #[test]
    fn weekly_checks_weekday() {
        // 2024-07-15 is a Monday
        let schedule = Schedule::Weekly(HashSet::from([1, 3, 5]));
        assert!(schedule.is_available(d(2024, 7, 15)));
        assert!(!schedule.is_available(d(2024, 7, 16)));
    }

    #[test]
    fn seasonal_boundary_inclusive() {
        let schedule = Schedule::Seasonal {
            start: d(2024, 6, 1),
            end: d(2024, 9, 1),
        };
        assert!(schedule.is_available(d(2024, 6, 1)));
        assert!(schedule.is_available(d(2024, 9, 1)));
        assert!(!schedule.is_available(d(2024, 9, 2)));
    }
}
