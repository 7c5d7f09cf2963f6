use clap::Parser;
use greenspoon::{
    api::{handlers::AppState, routes},
    catalog::RecipeStore,
    cli::{Cli, Commands},
    config::{site::SiteConfig, Settings},
    Error, Result,
};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,greenspoon=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Search { query, page } => {
            greenspoon::cli::commands::search(&settings, &query, page)?;
        }
        Commands::Validate { path } => {
            greenspoon::cli::commands::validate_dataset(&path)?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Green Spoon server");
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let store = RecipeStore::load_or_empty(settings.catalog.dataset_path.as_deref());
    if store.is_empty() {
        warn!("Recipe store is empty - the catalog will show no recipes");
    }

    let site = SiteConfig::load_or_default(&settings.catalog.site_config_path);
    info!(
        "Site content loaded: {} ({} about steps)",
        site.name,
        site.about.steps.len()
    );

    let state = AppState::new(store, site, settings.clone());
    info!(
        "Catalog ready: {} recipes, page size {}, search threshold {}",
        state.store.len(),
        settings.pagination.page_size,
        state.engine.threshold()
    );

    let app = routes::create_router(state, &settings);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Green Spoon");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("\nPages:");
    println!("  GET  /");
    println!("  GET  /about");
    println!("  GET  /recipes?s=&page=");
    println!("  GET  /recipe/:id");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/recipes?s=&page=&limit=");
    println!("  GET  /api/recipes/:id");
    println!("  GET  /api/stats");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
