//! External driving-path provider with cache and straight-line fallback (C7).
//!
//! This client only ever returns a real routed path or a typed failure; it
//! never decides to synthesize a fallback geometry — that's the caller's
//! call (spec §4.7), made in [`crate::geometry::road`].

pub mod cache;

use std::time::Duration;

use moka::sync::Cache;
use thiserror::Error;

use crate::geo::Coordinate;
use cache::CacheKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Driving,
}

impl Profile {
    fn as_str(self) -> &'static str {
        match self {
            Profile::Driving => "driving",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub polyline: Vec<Coordinate>,
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Debug, Error, Clone)]
pub enum RoutingError {
    #[error("routing service timed out")]
    Timeout,
    #[error("routing service returned upstream error: {0}")]
    Upstream(String),
    #[error("routing service returned a malformed body: {0}")]
    MalformedBody(String),
    #[error("routing service returned no route")]
    NoRoute,
}

/// The narrow contract C7 needs from its cache backend (spec §6): positive
/// caching only, idempotent double-population.
pub trait RouteCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<RouteResult>;
    fn set(&self, key: CacheKey, value: RouteResult, ttl: Duration);
}

/// In-memory cache backend built on `moka`.
pub struct MokaRouteCache {
    inner: Cache<CacheKey, RouteResult>,
}

impl MokaRouteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder().time_to_live(ttl).build(),
        }
    }
}

impl RouteCache for MokaRouteCache {
    fn get(&self, key: &CacheKey) -> Option<RouteResult> {
        self.inner.get(key)
    }

    fn set(&self, key: CacheKey, value: RouteResult, _ttl: Duration) {
        // moka's per-cache TTL already covers this; a per-entry override
        // would need `Expiry`, which this client does not need.
        self.inner.insert(key, value);
    }
}

/// `get_route(from, to, via, profile, overview=full)` (spec §4.7).
pub trait RoutingClient: Send + Sync {
    fn get_route(
        &self,
        from: Coordinate,
        to: Coordinate,
        via: &[Coordinate],
        profile: Profile,
        exclude_ferries: bool,
    ) -> Result<RouteResult, RoutingError>;
}

/// HTTP client against an OSRM-shaped routing service, with a positive,
/// TTL'd cache and a hard 10 s timeout (spec §4.7).
pub struct HttpRoutingClient {
    base_url: String,
    timeout: Duration,
    cache: Box<dyn RouteCache>,
    http: reqwest::blocking::Client,
}

impl HttpRoutingClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64, cache_ttl_seconds: u64) -> Self {
        let timeout = Duration::from_millis(timeout_ms);
        Self {
            base_url: base_url.into(),
            timeout,
            cache: Box::new(MokaRouteCache::new(Duration::from_secs(cache_ttl_seconds))),
            http: reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client builds with a fixed timeout"),
        }
    }

    fn fetch(
        &self,
        from: Coordinate,
        to: Coordinate,
        via: &[Coordinate],
        profile: Profile,
        exclude_ferries: bool,
    ) -> Result<RouteResult, RoutingError> {
        let mut coords = String::new();
        let mut push = |c: Coordinate| coords.push_str(&format!("{},{};", c.lon(), c.lat()));
        push(from);
        for v in via {
            push(*v);
        }
        push(to);
        coords.pop(); // trailing ';'

        let mut url = format!(
            "{}/route/v1/{}/{}?overview=full&alternatives=false&steps=false&geometries=geojson",
            self.base_url,
            profile.as_str(),
            coords
        );
        if exclude_ferries {
            url.push_str("&exclude=ferry");
        }

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| if e.is_timeout() { RoutingError::Timeout } else { RoutingError::Upstream(e.to_string()) })?;

        if !response.status().is_success() {
            return Err(RoutingError::Upstream(response.status().to_string()));
        }

        let body: OsrmResponse = response
            .json()
            .map_err(|e| RoutingError::MalformedBody(e.to_string()))?;

        if body.code != "Ok" {
            return Err(RoutingError::Upstream(body.code));
        }

        let route = body.routes.into_iter().next().ok_or(RoutingError::NoRoute)?;
        let polyline = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| Coordinate::new(lat, lon))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RoutingError::MalformedBody(e.to_string()))?;

        if polyline.len() < 2 {
            return Err(RoutingError::NoRoute);
        }

        Ok(RouteResult {
            polyline,
            distance_m: route.distance,
            duration_s: route.duration,
        })
    }
}

impl RoutingClient for HttpRoutingClient {
    fn get_route(
        &self,
        from: Coordinate,
        to: Coordinate,
        via: &[Coordinate],
        profile: Profile,
        exclude_ferries: bool,
    ) -> Result<RouteResult, RoutingError> {
        let key = CacheKey::new(from, to, via, profile.as_str(), exclude_ferries);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!("routing cache hit");
            return Ok(hit);
        }
        tracing::debug!("routing cache miss, calling upstream");

        let result = self.fetch(from, to, via, profile, exclude_ferries);
        match &result {
            Ok(route) => {
                self.cache.set(key, route.clone(), self.timeout);
            }
            Err(e) => tracing::warn!(error = %e, "routing service call failed"),
        }
        result
    }
}

#[derive(serde::Deserialize)]
struct OsrmResponse {
    code: String,
    routes: Vec<OsrmRoute>,
}

#[derive(serde::Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(serde::Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeClient {
        calls: Mutex<u32>,
        result: Result<RouteResult, RoutingError>,
    }

    impl RoutingClient for FakeClient {
        fn get_route(
            &self,
            _from: Coordinate,
            _to: Coordinate,
            _via: &[Coordinate],
            _profile: Profile,
            _exclude_ferries: bool,
        ) -> Result<RouteResult, RoutingError> {
            *self.calls.lock().unwrap() += 1;
            self.result.clone()
        }
    }

    #[test]
    fn fake_client_reports_timeout() {
        let client = FakeClient {
            calls: Mutex::new(0),
            result: Err(RoutingError::Timeout),
        };
        let from = Coordinate::new(62.0, 129.7).unwrap();
        let to = Coordinate::new(61.0, 130.0).unwrap();
        let err = client.get_route(from, to, &[], Profile::Driving, false).unwrap_err();
        assert!(matches!(err, RoutingError::Timeout));
        assert_eq!(*client.calls.lock().unwrap(), 1);
    }
}
