//! The central orchestrator: a fixed waterfall of strategies over the
//! catalog, each returning `Option<Route>`, plus alternatives generation
//! (C10).

use std::collections::{HashSet, VecDeque};

use chrono::NaiveDate;

use crate::catalog::city::CityId;
use crate::catalog::connection::Connection;
use crate::catalog::hub::HubId;
use crate::catalog::stop::StopId;
use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::hub_selector::{self, HubDecision};
use crate::kinds::{Mode, Season, StopType};
use crate::route::{self, Priority, Route};
use crate::routing_client::RoutingClient;
use crate::seasonality::{self, Seasonality};
use crate::segment::{self, Segment};
use crate::train_graph::TrainGraph;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub from_city: CityId,
    pub to_city: CityId,
    pub date: NaiveDate,
    pub preferred_mode: Option<Mode>,
    pub max_transfers: u32,
    pub priority: Priority,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub route: Route,
    pub alternatives: Vec<Route>,
}

struct SegmentIds {
    next: u32,
}

impl SegmentIds {
    fn new() -> Self {
        Self { next: 0 }
    }

    fn next(&mut self) -> String {
        self.next += 1;
        format!("seg-{}", self.next)
    }
}

struct Ctx<'a> {
    catalog: &'a Catalog,
    routing_client: &'a dyn RoutingClient,
    config: &'a PlannerConfig,
    train_graph: &'a TrainGraph,
    date: NaiveDate,
    season: Season,
}

/// `build_route(from, to, date, {preferredMode, maxTransfers, priority})`
/// (spec §4.10). `UnknownCity` propagates as [`PlannerError::InvalidInput`];
/// an exhausted search returns `Ok(None)`.
pub fn build_route(
    catalog: &Catalog,
    routing_client: &dyn RoutingClient,
    config: &PlannerConfig,
    train_graph: &TrainGraph,
    request: &SearchRequest,
) -> PlannerResult<Option<SearchResult>> {
    catalog.get_city(&request.from_city).ok_or_else(|| PlannerError::InvalidInput {
        reason: format!("unknown city: {}", request.from_city.as_str()),
    })?;
    catalog.get_city(&request.to_city).ok_or_else(|| PlannerError::InvalidInput {
        reason: format!("unknown city: {}", request.to_city.as_str()),
    })?;

    let ctx = Ctx {
        catalog,
        routing_client,
        config,
        train_graph,
        date: request.date,
        season: seasonality::canonical_season(request.date),
    };
    let mut ids = SegmentIds::new();

    let primary = run_waterfall(&ctx, request, &mut ids)?;
    let Some(primary) = primary else {
        return Ok(None);
    };

    let mut alternatives = Vec::new();
    let primary_is_airplane = primary.segments.iter().all(|s| s.mode == Mode::Airplane);
    if primary_is_airplane && request.preferred_mode.is_none() {
        for mode in [Mode::Bus, Mode::Train] {
            if let Some(route) = try_via_intermediate_cities_single_mode(&ctx, request, &mut ids, mode)? {
                if route_city_set(&route) != route_city_set(&primary) {
                    alternatives.push(route);
                }
            }
        }
    }
    if request.max_transfers >= 2 {
        if let Some(route) = try_multi_segment_bfs(&ctx, request, &mut ids)? {
            if route_city_set(&route) != route_city_set(&primary) {
                alternatives.push(route);
            }
        }
    }
    alternatives.truncate(3);
    sort_by_priority(&mut alternatives, request.priority);

    tracing::info!(
        distance_km = primary.total_distance.value_km,
        price = primary.total_price.total,
        duration_min = primary.total_duration.total_min,
        "build_route completed"
    );

    Ok(Some(SearchResult {
        route: primary,
        alternatives,
    }))
}

/// The set of stops visited, used as a cheap proxy for "the city set differs
/// materially" when deciding whether an alternative is worth keeping.
fn route_city_set(route: &Route) -> HashSet<String> {
    route
        .segments
        .iter()
        .flat_map(|s| [s.from_stop.as_str().to_string(), s.to_stop.as_str().to_string()])
        .collect()
}

fn sort_by_priority(routes: &mut [Route], priority: Priority) {
    routes.sort_by(|a, b| match priority {
        Priority::Price => a.total_price.total.total_cmp(&b.total_price.total),
        Priority::Time => a.total_duration.total_min.cmp(&b.total_duration.total_min),
        Priority::Comfort => a.segments.len().cmp(&b.segments.len()),
    });
}

fn run_waterfall(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    if let Some(route) = try_direct(ctx, request, ids)? {
        tracing::debug!("strategy direct succeeded");
        return Ok(Some(route));
    }
    if request.preferred_mode.is_none() || request.preferred_mode == Some(Mode::Airplane) {
        if let Some(route) = try_via_hubs(ctx, request, ids)? {
            tracing::debug!("strategy via_hubs succeeded");
            return Ok(Some(route));
        }
    }
    if request.preferred_mode.is_none() || request.preferred_mode == Some(Mode::Train) {
        if let Some(route) = try_via_train(ctx, request, ids)? {
            tracing::debug!("strategy via_train succeeded");
            return Ok(Some(route));
        }
    }
    if request.preferred_mode.is_none() || request.preferred_mode == Some(Mode::Ferry) {
        if let Some(route) = try_via_rivers(ctx, request, ids)? {
            tracing::debug!("strategy via_rivers succeeded");
            return Ok(Some(route));
        }
    }
    if request.preferred_mode.is_none() || request.preferred_mode == Some(Mode::WinterRoad) {
        if let Some(route) = try_via_winter_road(ctx, request, ids)? {
            tracing::debug!("strategy via_winter_road succeeded");
            return Ok(Some(route));
        }
    }
    if let Some(route) = try_via_intermediate_cities(ctx, request, ids)? {
        tracing::debug!("strategy via_intermediate_cities succeeded");
        return Ok(Some(route));
    }
    if request.max_transfers >= 2 {
        if let Some(route) = try_multi_segment_bfs(ctx, request, ids)? {
            tracing::debug!("strategy multi_segment_bfs succeeded");
            return Ok(Some(route));
        }
    }
    if let Some(route) = try_fallback(ctx, request, ids)? {
        tracing::debug!("strategy fallback succeeded");
        return Ok(Some(route));
    }
    Ok(None)
}

fn modes_to_try(preferred: Option<Mode>) -> Vec<Mode> {
    match preferred {
        Some(mode) => vec![mode],
        None => Mode::PRIORITY_ORDER.to_vec(),
    }
}

fn stop_type_for(mode: Mode) -> StopType {
    match mode {
        Mode::Airplane => StopType::Airport,
        Mode::Train => StopType::TrainStation,
        Mode::Bus => StopType::BusStation,
        Mode::Ferry => StopType::FerryPier,
        Mode::WinterRoad => StopType::WinterRoadPoint,
        Mode::Taxi => StopType::TaxiStand,
    }
}

fn representative_stop(catalog: &Catalog, city: &CityId, mode: Mode) -> Option<StopId> {
    let stop_type = stop_type_for(mode);
    catalog
        .get_stops_by_city(city)
        .into_iter()
        .find(|s| s.stop_type == stop_type)
        .map(|s| s.id.clone())
}

fn connection_season_compatible(connection: &Connection, season: Season) -> bool {
    connection.declared_season == Season::All || connection.declared_season == season
}

fn seasonally_valid_mode(mode: Mode, season: Season) -> bool {
    match mode {
        Mode::WinterRoad => matches!(season, Season::Winter | Season::Transition),
        Mode::Ferry => matches!(season, Season::Summer | Season::Transition),
        _ => true,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_leg(
    ctx: &Ctx,
    ids: &mut SegmentIds,
    mode: Mode,
    from_city: &CityId,
    to_city: &CityId,
    via_hubs: Vec<HubId>,
    connection: &Connection,
) -> Option<Segment> {
    let from_stop = representative_stop(ctx.catalog, from_city, mode)?;
    let to_stop = representative_stop(ctx.catalog, to_city, mode)?;
    let seasonality = seasonality_for(connection, ctx.date);
    segment::build_segment(
        ctx.catalog,
        ctx.routing_client,
        ids.next(),
        mode,
        &from_stop,
        &to_stop,
        connection,
        via_hubs,
        seasonality,
        ctx.date,
    )
    .ok()
}

fn seasonality_for(connection: &Connection, date: NaiveDate) -> Seasonality {
    seasonality::create_seasonality(connection.declared_season, None, date)
}

fn one_segment_route(ctx: &Ctx, request: &SearchRequest, segment: Segment) -> PlannerResult<Route> {
    route::assemble_route(
        format!("route-{}", segment.id),
        request.from_city.clone(),
        request.to_city.clone(),
        vec![segment],
        ctx.catalog,
        ctx.date,
    )
}

fn segments_route(ctx: &Ctx, request: &SearchRequest, segments: Vec<Segment>, label: &str) -> PlannerResult<Route> {
    route::assemble_route(
        format!("route-{label}"),
        request.from_city.clone(),
        request.to_city.clone(),
        segments,
        ctx.catalog,
        ctx.date,
    )
}

/// Strategy 1: direct, one candidate mode at a time in priority order.
fn try_direct(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    for mode in modes_to_try(request.preferred_mode) {
        if !seasonally_valid_mode(mode, ctx.season) {
            continue;
        }
        if mode == Mode::Airplane {
            let Ok(HubDecision::Direct { hub_waypoints }) = hub_selector::select(ctx.catalog, &request.from_city, &request.to_city) else {
                continue;
            };
            let Some(connection) = ctx
                .catalog
                .get_connections_between(&request.from_city, &request.to_city, Some(Mode::Airplane))
                .into_iter()
                .next()
            else {
                continue;
            };
            if !connection_season_compatible(connection, ctx.season) {
                continue;
            }
            if let Some(segment) = build_leg(ctx, ids, mode, &request.from_city, &request.to_city, hub_waypoints, connection) {
                if let Ok(route) = one_segment_route(ctx, request, segment) {
                    return Ok(Some(route));
                }
            }
        } else {
            let Some(connection) = ctx
                .catalog
                .get_connections_between(&request.from_city, &request.to_city, Some(mode))
                .into_iter()
                .next()
            else {
                continue;
            };
            if !connection_season_compatible(connection, ctx.season) {
                continue;
            }
            if let Some(segment) = build_leg(ctx, ids, mode, &request.from_city, &request.to_city, vec![], connection) {
                if let Ok(route) = one_segment_route(ctx, request, segment) {
                    return Ok(Some(route));
                }
            }
        }
    }
    Ok(None)
}

/// Strategy 2: mandatory hub chain, airplane only.
fn try_via_hubs(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    let Ok(HubDecision::Chain(hubs)) = hub_selector::select(ctx.catalog, &request.from_city, &request.to_city) else {
        return Ok(None);
    };

    let mut chain_cities = vec![request.from_city.clone()];
    chain_cities.extend(hubs.iter().map(|h| CityId(h.as_str().to_string())));
    chain_cities.push(request.to_city.clone());

    let mut segments = Vec::with_capacity(chain_cities.len() - 1);
    for window in chain_cities.windows(2) {
        let Some(connection) = ctx
            .catalog
            .get_connections_between(&window[0], &window[1], Some(Mode::Airplane))
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        if !connection_season_compatible(connection, ctx.season) {
            return Ok(None);
        }
        let Some(segment) = build_leg(ctx, ids, Mode::Airplane, &window[0], &window[1], vec![], connection) else {
            return Ok(None);
        };
        segments.push(segment);
    }

    match segments_route(ctx, request, segments, "via-hubs") {
        Ok(route) => Ok(Some(route)),
        Err(PlannerError::InvalidRoute { .. } | PlannerError::InvalidSegment { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Strategy 3: direct rail connection, else bounded rail-graph search.
fn try_via_train(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    if let Some(connection) = ctx
        .catalog
        .get_connections_between(&request.from_city, &request.to_city, Some(Mode::Train))
        .into_iter()
        .next()
    {
        if connection_season_compatible(connection, ctx.season) {
            if let Some(segment) = build_leg(ctx, ids, Mode::Train, &request.from_city, &request.to_city, vec![], connection) {
                if let Ok(route) = one_segment_route(ctx, request, segment) {
                    return Ok(Some(route));
                }
            }
        }
    }

    let Some(path) = ctx.train_graph.shortest_path(&request.from_city, &request.to_city, request.max_transfers) else {
        return Ok(None);
    };
    if path.edges.is_empty() {
        return Ok(None);
    }

    let mut segments = Vec::with_capacity(path.edges.len());
    for (idx, connection_id) in path.edges.iter().enumerate() {
        let Some(connection) = ctx.catalog.get_connection(connection_id) else {
            return Ok(None);
        };
        if !connection_season_compatible(connection, ctx.season) {
            return Ok(None);
        }
        let from = &path.path_cities[idx];
        let to = &path.path_cities[idx + 1];
        let Some(segment) = build_leg(ctx, ids, Mode::Train, from, to, vec![], connection) else {
            return Ok(None);
        };
        segments.push(segment);
    }

    match segments_route(ctx, request, segments, "via-train") {
        Ok(route) => Ok(Some(route)),
        Err(PlannerError::InvalidRoute { .. } | PlannerError::InvalidSegment { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Strategy 4: ferry, direct or via a river-system pivot city.
fn try_via_rivers(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    if !seasonally_valid_mode(Mode::Ferry, ctx.season) {
        return Ok(None);
    }

    if let Some(connection) = ctx
        .catalog
        .get_connections_between(&request.from_city, &request.to_city, Some(Mode::Ferry))
        .into_iter()
        .next()
    {
        if connection_season_compatible(connection, ctx.season) {
            if let Some(segment) = build_leg(ctx, ids, Mode::Ferry, &request.from_city, &request.to_city, vec![], connection) {
                if let Ok(route) = one_segment_route(ctx, request, segment) {
                    return Ok(Some(route));
                }
            }
        }
    }

    for pivot in ctx.catalog.all_cities() {
        if pivot.id == request.from_city || pivot.id == request.to_city {
            continue;
        }
        let Some(first) = ctx
            .catalog
            .get_connections_between(&request.from_city, &pivot.id, Some(Mode::Ferry))
            .into_iter()
            .next()
        else {
            continue;
        };
        let Some(second) = ctx
            .catalog
            .get_connections_between(&pivot.id, &request.to_city, Some(Mode::Ferry))
            .into_iter()
            .next()
        else {
            continue;
        };
        if !connection_season_compatible(first, ctx.season) || !connection_season_compatible(second, ctx.season) {
            continue;
        }
        let Some(leg1) = build_leg(ctx, ids, Mode::Ferry, &request.from_city, &pivot.id, vec![], first) else {
            continue;
        };
        let Some(leg2) = build_leg(ctx, ids, Mode::Ferry, &pivot.id, &request.to_city, vec![], second) else {
            continue;
        };
        match segments_route(ctx, request, vec![leg1, leg2], "via-rivers") {
            Ok(route) => return Ok(Some(route)),
            Err(PlannerError::InvalidRoute { .. } | PlannerError::InvalidSegment { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

/// Strategy 5: winter road, direct only, winter season only.
fn try_via_winter_road(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    if ctx.season != Season::Winter {
        return Ok(None);
    }
    let Some(connection) = ctx
        .catalog
        .get_connections_between(&request.from_city, &request.to_city, Some(Mode::WinterRoad))
        .into_iter()
        .next()
    else {
        return Ok(None);
    };
    if !connection_season_compatible(connection, ctx.season) {
        return Ok(None);
    }
    let Some(segment) = build_leg(ctx, ids, Mode::WinterRoad, &request.from_city, &request.to_city, vec![], connection) else {
        return Ok(None);
    };
    match one_segment_route(ctx, request, segment) {
        Ok(route) => Ok(Some(route)),
        Err(PlannerError::InvalidRoute { .. } | PlannerError::InvalidSegment { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Strategy 6: breadth-limited search over intermediate cities (hubs first),
/// enumerating (mode1, mode2) pairs from the priority list.
fn try_via_intermediate_cities(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    try_via_intermediate_cities_impl(ctx, request, ids, &Mode::PRIORITY_ORDER)
}

fn try_via_intermediate_cities_single_mode(
    ctx: &Ctx,
    request: &SearchRequest,
    ids: &mut SegmentIds,
    mode: Mode,
) -> PlannerResult<Option<Route>> {
    try_via_intermediate_cities_impl(ctx, request, ids, &[mode])
}

fn try_via_intermediate_cities_impl(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds, modes: &[Mode]) -> PlannerResult<Option<Route>> {
    let mut candidates: Vec<&CityId> = ctx
        .catalog
        .all_cities()
        .filter(|c| c.id != request.from_city && c.id != request.to_city)
        .filter(|c| c.is_hub)
        .map(|c| &c.id)
        .collect();
    candidates.extend(
        ctx.catalog
            .all_cities()
            .filter(|c| c.id != request.from_city && c.id != request.to_city)
            .filter(|c| !c.is_hub)
            .map(|c| &c.id),
    );
    candidates.truncate(ctx.config.max_intermediate_cities);

    for intermediate in candidates {
        for &mode1 in modes {
            if !seasonally_valid_mode(mode1, ctx.season) {
                continue;
            }
            let Some(leg1_conn) = ctx
                .catalog
                .get_connections_between(&request.from_city, intermediate, Some(mode1))
                .into_iter()
                .next()
            else {
                continue;
            };
            if !connection_season_compatible(leg1_conn, ctx.season) {
                continue;
            }
            for &mode2 in modes {
                if !seasonally_valid_mode(mode2, ctx.season) {
                    continue;
                }
                let Some(leg2_conn) = ctx
                    .catalog
                    .get_connections_between(intermediate, &request.to_city, Some(mode2))
                    .into_iter()
                    .next()
                else {
                    continue;
                };
                if !connection_season_compatible(leg2_conn, ctx.season) {
                    continue;
                }
                let Some(leg1) = build_leg(ctx, ids, mode1, &request.from_city, intermediate, vec![], leg1_conn) else {
                    continue;
                };
                let Some(leg2) = build_leg(ctx, ids, mode2, intermediate, &request.to_city, vec![], leg2_conn) else {
                    continue;
                };
                match segments_route(ctx, request, vec![leg1, leg2], "via-cities") {
                    Ok(route) => return Ok(Some(route)),
                    Err(PlannerError::InvalidRoute { .. } | PlannerError::InvalidSegment { .. }) => continue,
                    Err(e) => return Err(e),
                }
            }
        }
    }
    Ok(None)
}

/// Strategy 7: bounded BFS over the full connection graph for ≥ 3-segment
/// routes, `maxTransfers ≥ 2` only.
fn try_multi_segment_bfs(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    let max_depth = (request.max_transfers as usize + 1).min(ctx.config.max_bfs_depth);

    struct State {
        city: CityId,
        path: Vec<(CityId, CityId, Mode)>,
        visited: HashSet<CityId>,
    }

    let mut queue: VecDeque<State> = VecDeque::new();
    queue.push_back(State {
        city: request.from_city.clone(),
        path: vec![],
        visited: HashSet::from([request.from_city.clone()]),
    });

    let mut iterations = 0usize;
    while let Some(state) = queue.pop_front() {
        iterations += 1;
        if iterations > ctx.config.max_bfs_iterations {
            break;
        }
        if state.city == request.to_city && !state.path.is_empty() {
            let mut segments = Vec::with_capacity(state.path.len());
            let mut ok = true;
            for (from, to, mode) in &state.path {
                let Some(connection) = ctx.catalog.get_connections_between(from, to, Some(*mode)).into_iter().next() else {
                    ok = false;
                    break;
                };
                if !connection_season_compatible(connection, ctx.season) {
                    ok = false;
                    break;
                }
                let Some(segment) = build_leg(ctx, ids, *mode, from, to, vec![], connection) else {
                    ok = false;
                    break;
                };
                segments.push(segment);
            }
            if ok {
                match segments_route(ctx, request, segments, "multi-segment") {
                    Ok(route) => return Ok(Some(route)),
                    Err(PlannerError::InvalidRoute { .. } | PlannerError::InvalidSegment { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
            continue;
        }
        if state.path.len() >= max_depth {
            continue;
        }
        for connection in ctx.catalog.get_connections_from(&state.city) {
            if state.visited.contains(&connection.to_city) {
                continue;
            }
            if !seasonally_valid_mode(connection.mode, ctx.season) {
                continue;
            }
            let mut visited = state.visited.clone();
            visited.insert(connection.to_city.clone());
            let mut path = state.path.clone();
            path.push((state.city.clone(), connection.to_city.clone(), connection.mode));
            queue.push_back(State {
                city: connection.to_city.clone(),
                path,
                visited,
            });
        }
    }
    Ok(None)
}

/// Strategy 8: last resort. Ignores seasonal strictness for visualization;
/// returned routes always carry warnings rather than a clean verdict when
/// that relaxation mattered.
fn try_fallback(ctx: &Ctx, request: &SearchRequest, ids: &mut SegmentIds) -> PlannerResult<Option<Route>> {
    for mode in Mode::PRIORITY_ORDER {
        if let Some(connection) = ctx
            .catalog
            .get_connections_between(&request.from_city, &request.to_city, Some(mode))
            .into_iter()
            .next()
        {
            if let Some(segment) = build_leg(ctx, ids, mode, &request.from_city, &request.to_city, vec![], connection) {
                if let Ok(route) = one_segment_route(ctx, request, segment) {
                    return Ok(Some(route));
                }
            }
        }
    }

    for hub in ctx.catalog.all_cities().filter(|c| c.is_hub) {
        let Some(first) = ctx.catalog.get_connections_from(&request.from_city).into_iter().find(|c| c.to_city == hub.id) else {
            continue;
        };
        let Some(second) = ctx.catalog.get_connections_between(&hub.id, &request.to_city, None).into_iter().next() else {
            continue;
        };
        let Some(leg1) = build_leg(ctx, ids, first.mode, &request.from_city, &hub.id, vec![], first) else {
            continue;
        };
        let Some(leg2) = build_leg(ctx, ids, second.mode, &hub.id, &request.to_city, vec![], second) else {
            continue;
        };
        match segments_route(ctx, request, vec![leg1, leg2], "fallback") {
            Ok(route) => return Ok(Some(route)),
            Err(PlannerError::InvalidRoute { .. } | PlannerError::InvalidSegment { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}
