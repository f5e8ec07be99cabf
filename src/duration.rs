//! Minutes-as-integers duration model with a human display string.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DurationModel {
    pub value_min: u32,
    pub unit: &'static str,
}

impl DurationModel {
    pub fn minutes(value_min: u32) -> Self {
        Self {
            value_min,
            unit: "minutes",
        }
    }

    pub fn display(&self) -> String {
        let hours = self.value_min / 60;
        let minutes = self.value_min % 60;
        match (hours, minutes) {
            (0, m) => format!("{m} min"),
            (h, 0) => format!("{h}h"),
            (h, m) => format!("{h}h {m}m"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_minutes_only() {
        assert_eq!(DurationModel::minutes(45).display(), "45 min");
    }

    #[test]
    fn renders_hours_and_minutes() {
        assert_eq!(DurationModel::minutes(90).display(), "1h 30m");
        assert_eq!(DurationModel::minutes(120).display(), "2h");
    }
}
