use thiserror::Error;

/// Errors raised by the route planning core.
///
/// `NoRoute` is deliberately absent: an exhausted search returns `Ok(None)`
/// from [`crate::search::build_route`], not an error (spec §7).
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid segment: {reason}")]
    InvalidSegment { reason: String },

    #[error("invalid route: {reason}")]
    InvalidRoute { reason: String },

    #[error("catalog inconsistency: {reason}")]
    CatalogInconsistency { reason: String },

    #[error("routing service unavailable: {0}")]
    RoutingServiceUnavailable(#[from] crate::routing_client::RoutingError),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
