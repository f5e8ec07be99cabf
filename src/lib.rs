//! Intermodal passenger journey planner over a sparse, seasonal transport
//! graph: flights, trains, buses, ferries, winter roads, and taxis.
//!
//! [`search::build_route`] is the single entry point: given a catalog, a
//! routing client, tunables, and a request, it returns a primary route plus
//! up to three alternatives, or `None` if no strategy in the waterfall
//! succeeds.

pub mod catalog;
pub mod config;
pub mod distance;
pub mod duration;
pub mod error;
pub mod fixtures;
pub mod geo;
pub mod geometry;
pub mod hub_selector;
pub mod kinds;
pub mod price;
pub mod route;
pub mod routing_client;
pub mod search;
pub mod seasonality;
pub mod segment;
pub mod train_graph;
pub mod validate;

pub use error::{PlannerError, PlannerResult};
pub use route::Route;
pub use search::{build_route, SearchRequest, SearchResult};
