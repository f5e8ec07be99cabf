//! Per-mode base tariff × distance plus additional costs (C5).

use crate::kinds::Mode;

const TRANSFER_FEE_RUB: f64 = 750.0;
const AIRPLANE_TAXI_EQUIVALENT_KM: f64 = 15.0;
const TRAIN_TAXI_EQUIVALENT_KM: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdditionalCosts {
    pub taxi: f64,
    pub transfer: f64,
    pub baggage: f64,
    pub fees: f64,
}

impl AdditionalCosts {
    pub fn sum(&self) -> f64 {
        self.taxi + self.transfer + self.baggage + self.fees
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriceModel {
    pub base: f64,
    pub additional: AdditionalCosts,
    pub total: f64,
    pub currency: &'static str,
    pub display: String,
}

impl PriceModel {
    pub fn new(base: f64, additional: AdditionalCosts) -> Self {
        let total = base + additional.sum();
        Self {
            base,
            display: render_display(base, &additional, total),
            additional,
            total,
            currency: "RUB",
        }
    }
}

fn render_display(base: f64, additional: &AdditionalCosts, total: f64) -> String {
    let mut parts = vec![format!("{:.0} RUB", base)];
    if additional.taxi != 0.0 {
        parts.push(format!("+{:.0} taxi", additional.taxi));
    }
    if additional.transfer != 0.0 {
        parts.push(format!("+{:.0} transfer", additional.transfer));
    }
    if additional.baggage != 0.0 {
        parts.push(format!("+{:.0} baggage", additional.baggage));
    }
    if additional.fees != 0.0 {
        parts.push(format!("+{:.0} fees", additional.fees));
    }
    if parts.len() > 1 {
        parts.push(format!("= {:.0} RUB", total));
    }
    parts.join(" ")
}

/// `base = rate[mode] * distance_km` (spec §4.5).
pub fn base_price(mode: Mode, distance_km: f64) -> f64 {
    mode.base_rate_rub_per_km() * distance_km
}

/// Taxi-to-stop surcharge applied when the originating stop for an airplane
/// or train segment is not already urban (spec §4.5/§4.11).
pub fn taxi_surcharge(mode: Mode) -> Option<f64> {
    match mode {
        Mode::Airplane => Some(AIRPLANE_TAXI_EQUIVALENT_KM * Mode::Taxi.base_rate_rub_per_km()),
        Mode::Train => Some(TRAIN_TAXI_EQUIVALENT_KM * Mode::Taxi.base_rate_rub_per_km()),
        _ => None,
    }
}

pub fn transfer_fee(transfer_count: u32) -> f64 {
    TRANSFER_FEE_RUB * transfer_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_price_uses_mode_rate() {
        assert_eq!(base_price(Mode::Airplane, 100.0), 500.0);
        assert_eq!(base_price(Mode::Bus, 100.0), 400.0);
    }

    #[test]
    fn display_only_renders_nonzero_components() {
        let model = PriceModel::new(1000.0, AdditionalCosts::default());
        assert_eq!(model.display, "1000 RUB");
        let model = PriceModel::new(
            1000.0,
            AdditionalCosts {
                taxi: 225.0,
                ..Default::default()
            },
        );
        assert!(model.display.contains("+225 taxi"));
        assert!(model.display.contains("1225 RUB"));
    }

    #[test]
    fn total_sums_base_and_additional() {
        let model = PriceModel::new(
            1000.0,
            AdditionalCosts {
                taxi: 100.0,
                transfer: 750.0,
                baggage: 0.0,
                fees: 50.0,
            },
        );
        assert_eq!(model.total, 1900.0);
    }

    #[test]
    fn transfer_fee_scales_linearly() {
        assert_eq!(transfer_fee(0), 0.0);
        assert_eq!(transfer_fee(2), 1500.0);
    }
}
