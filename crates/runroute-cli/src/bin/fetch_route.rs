use anyhow::{bail, Context, Result};
use clap::Parser;
use runroute_core::{LocationKey, RouteRequest, RouteType};
use runroute_server::{Config, RouteFetchService};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a route via the configured ROUTE_API", long_about = None)]
struct Args {
    /// Route length in kilometers
    #[arg(long, default_value_t = 10.0)]
    distance: f64,

    /// Upstream route type id (69 Recreative, 65 Nature, 66 Avoid cars)
    #[arg(long, default_value_t = RouteType::default_type().id)]
    route_type: i64,

    /// Starting point location key; repeat for multi-location routes
    #[arg(long, required = true)]
    location: Vec<String>,

    /// Random seed; defaults to ROUTE_DEFAULT_RANDOM_SEED
    #[arg(long)]
    seed: Option<i64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    runroute_cli::init_logging(args.verbose);

    if RouteRequest::meters_from_km(args.distance).is_none() {
        bail!("--distance must be a positive number of kilometers");
    }
    if RouteType::find(args.route_type).is_none() {
        tracing::warn!("Route type {} is not in the known catalogue", args.route_type);
    }

    let config = Config::from_env().context("Invalid configuration")?;
    let service = RouteFetchService::from_config(&config).context("Failed to create routing client")?;

    let request = RouteRequest::from_km(
        args.distance,
        args.route_type,
        LocationKey::from(args.location),
        args.seed,
        service.defaults(),
    );
    let route = service
        .fetch_request(request)
        .await
        .context("Route generation failed")?;

    tracing::info!(
        "Route: {} points, {} m, {} s",
        route.coordinates.len(),
        route.length_meters,
        route.duration_seconds
    );
    println!("{}", serde_json::to_string_pretty(&route)?);
    Ok(())
}
