use crate::catalog::city::CityId;
use crate::error::PlannerError;
use crate::geo::Coordinate;
use crate::kinds::{HubLevel, StopType};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct StopId(pub String);

impl StopId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub stop_type: StopType,
    pub coordinates: Coordinate,
    pub city_id: CityId,
    pub hub_level: Option<HubLevel>,
    /// Airport/station/pier code; advisory only, not validated against a registry.
    pub code: Option<String>,
}

impl Stop {
    pub fn new(
        id: StopId,
        name: String,
        stop_type: StopType,
        coordinates: Coordinate,
        city_id: CityId,
        hub_level: Option<HubLevel>,
        code: Option<String>,
    ) -> Result<Self, PlannerError> {
        if name.is_empty() {
            return Err(PlannerError::InvalidInput {
                reason: format!("stop {}: name must be non-empty", id.as_str()),
            });
        }
        Ok(Self {
            id,
            name,
            stop_type,
            coordinates,
            city_id,
            hub_level,
            code,
        })
    }

    pub fn is_hub(&self) -> bool {
        self.hub_level.is_some()
    }
}
