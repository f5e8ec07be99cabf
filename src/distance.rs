//! Per-segment distance with per-mode breakdown (C4).

use std::collections::HashMap;

use crate::kinds::{DistanceCalculationMethod, Mode};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DistanceModel {
    pub value_km: f64,
    pub method: DistanceCalculationMethod,
    pub breakdown_km: HashMap<Mode, f64>,
    pub display: String,
}

impl DistanceModel {
    pub fn single_mode(value_km: f64, method: DistanceCalculationMethod, mode: Mode) -> Self {
        let mut breakdown_km = HashMap::new();
        breakdown_km.insert(mode, value_km);
        Self {
            value_km,
            method,
            breakdown_km,
            display: format!("{} km", value_km.round() as i64),
        }
    }

    pub fn merge(models: &[DistanceModel]) -> (f64, HashMap<Mode, f64>) {
        let mut total = 0.0;
        let mut breakdown: HashMap<Mode, f64> = HashMap::new();
        for model in models {
            total += model.value_km;
            for (mode, km) in &model.breakdown_km {
                *breakdown.entry(*mode).or_insert(0.0) += km;
            }
        }
        (total, breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_integer_km() {
        let m = DistanceModel::single_mode(123.4, DistanceCalculationMethod::Haversine, Mode::Train);
        assert_eq!(m.display, "123 km");
    }

    #[test]
    fn merge_sums_and_breaks_down() {
        let a = DistanceModel::single_mode(100.0, DistanceCalculationMethod::Haversine, Mode::Airplane);
        let b = DistanceModel::single_mode(50.0, DistanceCalculationMethod::RoutingService, Mode::Bus);
        let (total, breakdown) = DistanceModel::merge(&[a, b]);
        assert_eq!(total, 150.0);
        assert_eq!(breakdown[&Mode::Airplane], 100.0);
        assert_eq!(breakdown[&Mode::Bus], 50.0);
    }
}
