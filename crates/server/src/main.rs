mod api;
mod source;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::info;

use planscout_catalog::{Facets, FilterState};

fn load_config() -> planscout_core::Config {
    planscout_core::config::load_dotenv();
    planscout_core::Config::from_env()
}

async fn serve(config: &planscout_core::Config) -> anyhow::Result<()> {
    config.log_summary();

    let source = source::PlanSource::from_config(&config.catalog);
    let plans = source.load_or_empty().await;
    let facets = Facets::from_plans(&plans);
    match facets.price_bounds {
        Some(b) => info!(
            "Catalog ready: {} plans, prices ${} to ${}",
            plans.len(),
            b.min,
            b.max
        ),
        None => info!("Catalog ready: empty"),
    }

    let interpreter =
        match planscout_llm::FilterInterpreter::from_config(&config.llm, &config.ollama) {
            Ok(i) => {
                info!("Filter interpreter ready (provider: {})", config.llm.provider);
                Some(i)
            }
            Err(e) => {
                tracing::warn!(
                    "Filter interpreter unavailable: {}. POST /api/insurance/ask will be disabled",
                    e
                );
                None
            }
        };

    let app_state = Arc::new(state::AppState {
        filters: RwLock::new(FilterState::unrestricted(facets.price_bounds)),
        facets: RwLock::new(facets),
        plans: RwLock::new(plans),
        interpreter,
        source,
    });

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/api/insurance", get(api::list))
        .route("/api/insurance/facets", get(api::facets))
        .route(
            "/api/insurance/filters",
            get(api::filters_get).put(api::filters_put),
        )
        .route("/api/insurance/matches", get(api::matches))
        .route("/api/insurance/ask", post(api::ask))
        .route("/api/insurance/reload", post(api::reload))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn inspect(path: &str) -> anyhow::Result<()> {
    let source = source::PlanSource::file(path);
    let plans = source.load().await?;
    let facets = Facets::from_plans(&plans);

    println!("{} plans", plans.len());
    println!("Types:    {}", facets.types.join(", "));
    println!("Regions:  {}", facets.regions.join(", "));
    println!("Terms:    {}", facets.terms.join(", "));
    println!("Benefits: {}", facets.benefits.join(", "));
    match facets.price_bounds {
        Some(b) => println!("Prices:   ${} - ${}", b.min, b.max),
        None => println!("Prices:   (empty catalog)"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = load_config();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("serve") => serve(&config).await?,
        Some("inspect") => {
            let path = args
                .get(2)
                .expect("Usage: planscout-server inspect <plans.json>");
            inspect(path).await?;
        }
        _ => {
            println!("planscout v{}", env!("CARGO_PKG_VERSION"));
            println!("Usage: planscout-server <command>");
            println!("  serve                 Start the HTTP server");
            println!("  inspect <plans.json>  Print the facet summary for a catalog file");
        }
    }

    Ok(())
}
