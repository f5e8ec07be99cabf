use crate::error::PlannerError;
use crate::geo::Coordinate;
use crate::kinds::{AirportClass, HubLevel};

/// Stable identifier, `[a-z0-9_-]+`, at most 50 characters (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct CityId(pub String);

impl CityId {
    pub fn new(raw: impl Into<String>) -> Result<Self, PlannerError> {
        let raw = raw.into();
        if raw.is_empty()
            || raw.len() > 50
            || !raw.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(PlannerError::InvalidInput {
                reason: format!("invalid city identifier: {raw}"),
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Administrative hierarchy and its four formatted renditions.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdminStructure {
    pub subject: String,
    pub rayon: Option<String>,
    pub settlement: String,
    pub full: String,
    pub with_context: String,
    pub medium: String,
    pub short: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Infrastructure {
    pub has_airport: bool,
    pub airport_class: Option<AirportClass>,
    pub has_train_station: bool,
    pub has_bus_station: bool,
    pub has_ferry_pier: bool,
    pub has_winter_road: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub normalized_name: String,
    pub synonyms: Vec<String>,
    pub admin: AdminStructure,
    pub centroid: Coordinate,
    pub timezone: String,
    pub population: u64,
    pub is_key_city: bool,
    pub is_hub: bool,
    pub hub_level: Option<HubLevel>,
    pub infrastructure: Infrastructure,
    pub stops: Vec<crate::catalog::stop::StopId>,
}

impl City {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CityId,
        name: String,
        synonyms: Vec<String>,
        admin: AdminStructure,
        centroid: Coordinate,
        timezone: String,
        population: u64,
        is_key_city: bool,
        is_hub: bool,
        hub_level: Option<HubLevel>,
        infrastructure: Infrastructure,
    ) -> Result<Self, PlannerError> {
        if is_hub != hub_level.is_some() {
            return Err(PlannerError::InvalidInput {
                reason: format!("city {}: is_hub and hub_level must agree", id.as_str()),
            });
        }
        if infrastructure.has_airport && infrastructure.airport_class.is_none() {
            return Err(PlannerError::InvalidInput {
                reason: format!("city {}: has_airport requires airport_class", id.as_str()),
            });
        }
        if name.is_empty() || name.len() > 100 {
            return Err(PlannerError::InvalidInput {
                reason: format!("city {}: name must be 1..=100 chars", id.as_str()),
            });
        }
        let normalized_name = name.to_lowercase();
        Ok(Self {
            id,
            name,
            normalized_name,
            synonyms,
            admin,
            centroid,
            timezone,
            population,
            is_key_city,
            is_hub,
            hub_level,
            infrastructure,
            stops: Vec::new(),
        })
    }
}
