//! CLI front-end over the planning core: loads the built-in demo catalog,
//! runs one search, and prints the result as text or GeoJSON.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use route_planner::config::PlannerConfig;
use route_planner::fixtures;
use route_planner::kinds::Mode;
use route_planner::route::{Priority, Route};
use route_planner::routing_client::HttpRoutingClient;
use route_planner::search::SearchRequest;
use route_planner::train_graph::TrainGraph;

#[derive(Parser, Debug)]
#[command(name = "plan", about = "Plan an intermodal journey over the demo catalog")]
struct Cli {
    /// Origin city id, e.g. "yakutsk"
    from: String,
    /// Destination city id, e.g. "moscow"
    to: String,
    /// Travel date, YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    /// Restrict the search to one mode
    #[arg(long, value_enum)]
    mode: Option<CliMode>,
    /// Maximum number of transfers to allow
    #[arg(long, default_value_t = 3)]
    max_transfers: u32,
    /// Ranking priority for alternatives
    #[arg(long, value_enum, default_value_t = CliPriority::Price)]
    priority: CliPriority,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliMode {
    Airplane,
    Train,
    Bus,
    Ferry,
    WinterRoad,
    Taxi,
}

impl From<CliMode> for Mode {
    fn from(m: CliMode) -> Self {
        match m {
            CliMode::Airplane => Mode::Airplane,
            CliMode::Train => Mode::Train,
            CliMode::Bus => Mode::Bus,
            CliMode::Ferry => Mode::Ferry,
            CliMode::WinterRoad => Mode::WinterRoad,
            CliMode::Taxi => Mode::Taxi,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliPriority {
    Price,
    Time,
    Comfort,
}

impl From<CliPriority> for Priority {
    fn from(p: CliPriority) -> Self {
        match p {
            CliPriority::Price => Priority::Price,
            CliPriority::Time => Priority::Time,
            CliPriority::Comfort => Priority::Comfort,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Geojson,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();

    let date = match &cli.date {
        Some(raw) => match chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                eprintln!("invalid --date {raw:?}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => fixtures::demo_date(),
    };

    let catalog = fixtures::demo_catalog();
    let train_graph = TrainGraph::build(&catalog);
    let config = PlannerConfig::default();
    let routing_client = HttpRoutingClient::new(
        config.routing_service_base_url.clone(),
        config.routing_service_timeout_ms,
        config.routing_cache_ttl_seconds,
    );

    let from = match route_planner::catalog::city::CityId::new(&cli.from) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("invalid origin city id: {e}");
            return ExitCode::FAILURE;
        }
    };
    let to = match route_planner::catalog::city::CityId::new(&cli.to) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("invalid destination city id: {e}");
            return ExitCode::FAILURE;
        }
    };

    let request = SearchRequest {
        from_city: from,
        to_city: to,
        date,
        preferred_mode: cli.mode.map(Into::into),
        max_transfers: cli.max_transfers,
        priority: cli.priority.into(),
    };

    let result = route_planner::search::build_route(&catalog, &routing_client, &config, &train_graph, &request);
    match result {
        Ok(Some(result)) => {
            match cli.format {
                OutputFormat::Text => print_text(&result.route, &result.alternatives),
                OutputFormat::Geojson => print_geojson(&result.route),
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("no route found between {} and {} on {date}", cli.from, cli.to);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("planning failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_text(route: &Route, alternatives: &[Route]) {
    println!("route {} ({} -> {})", route.id, route.from_city.as_str(), route.to_city.as_str());
    for segment in &route.segments {
        println!(
            "  {:?}: {} -> {} ({:.0} km, {} min, {})",
            segment.mode,
            segment.from_stop.as_str(),
            segment.to_stop.as_str(),
            segment.distance.value_km,
            segment.duration.value_min,
            segment.price.display
        );
    }
    println!("total: {}, {} min, {}", route.total_distance.display, route.total_duration.total_min, route.total_price.display);
    if !route.validation.is_valid {
        println!("validation: {} error(s), {} warning(s)", route.validation.errors.len(), route.validation.warnings.len());
        for finding in &route.validation.errors {
            println!("  error[{}]: {}", finding.kind, finding.message);
        }
    }
    for warning in &route.validation.warnings {
        println!("  warning[{}]: {}", warning.kind, warning.message);
    }
    if !alternatives.is_empty() {
        println!("{} alternative(s):", alternatives.len());
        for alt in alternatives {
            println!("  {} ({} segments, {})", alt.id, alt.segments.len(), alt.total_price.display);
        }
    }
}

fn print_geojson(route: &Route) {
    use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

    let mut features = Vec::with_capacity(route.visualization.polylines.len() + route.visualization.markers.len());
    for polyline in &route.visualization.polylines {
        let coords: Vec<Vec<f64>> = polyline.coordinates.iter().map(|c| c.to_geojson().to_vec()).collect();
        let mut properties = JsonObject::new();
        properties.insert("color".to_string(), polyline.color.into());
        properties.insert("weight".to_string(), polyline.weight.into());
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(coords))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }
    for marker in &route.visualization.markers {
        let mut properties = JsonObject::new();
        properties.insert("markerType".to_string(), format!("{:?}", marker.marker_type).into());
        properties.insert("icon".to_string(), format!("{:?}", marker.icon).into());
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(marker.coordinates.to_geojson().to_vec()))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    println!("{}", serde_json::to_string_pretty(&collection).expect("geojson serializes"));
}
