use crate::route::Priority;

/// Tunables enumerated in spec §6. Threaded by reference; no globals.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub routing_service_base_url: String,
    pub routing_service_timeout_ms: u64,
    pub routing_cache_ttl_seconds: u64,
    pub default_max_transfers: u32,
    pub default_priority: Priority,
    pub max_bfs_iterations: usize,
    pub max_bfs_depth: usize,
    pub max_intermediate_cities: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            routing_service_base_url: "http://localhost:5000".to_string(),
            routing_service_timeout_ms: 10_000,
            routing_cache_ttl_seconds: 86_400,
            default_max_transfers: 3,
            default_priority: Priority::Price,
            max_bfs_iterations: 1_000,
            max_bfs_depth: 5,
            max_intermediate_cities: 30,
        }
    }
}
