use std::env;
use std::path::Path;
use std::sync::Arc;

use dotenv::dotenv;

use velorouter::config::Params;
use velorouter::dataset::{load_locations, load_segments};
use velorouter::route::Graph;
use velorouter::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load `.env` file, if any
    dotenv().ok();

    // Create the tracer first.
    velorouter::server::trace::initialize_tracer();

    let params_path = env::var("VELOROUTER_PARAMS").unwrap_or_else(|_| "params.json".to_string());
    let params = Params::load(Path::new(&params_path))?;

    tracing::info!(message = "Loading datasets.", ?params);
    let segments = load_segments(&params.segments_file)?;
    let gazetteer = load_locations(&params.locations_file)?;

    let graph = Graph::new(segments, gazetteer)?;
    tracing::info!(message = "Graph ready.", ?graph);

    let addr = format!("{}:{}", params.host, params.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(message = "Starting server.", %addr);

    let state = Arc::new(AppState { graph, params });
    axum::serve(listener, server::router(state)).await?;

    tracing::info!(message = "Terminating server.");
    Ok(())
}
