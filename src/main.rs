use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use fuelwatch::{
    config::Config,
    model::app::AppState,
    router,
    scheduler::{schedule::ScheduleConfig, SyncLoop},
    service::{location::LocationResolver, sync::SyncService},
    startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fuelwatch=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config).await.unwrap();
    let feed_client = startup::build_feed_client(&config).unwrap();

    let location_resolver = Arc::new(LocationResolver::new(db.clone()));
    let sync_service = Arc::new(SyncService::new(db.clone(), feed_client));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sync_loop = SyncLoop::new(
        db.clone(),
        sync_service.clone(),
        ScheduleConfig::default(),
        shutdown_rx,
    );
    let sync_task = tokio::spawn(sync_loop.run());

    tracing::info!("Starting server on {}", config.server_address);

    let routes = router::routes().with_state(AppState {
        db,
        location_resolver,
        sync_service,
    });
    let listener = tokio::net::TcpListener::bind(&config.server_address)
        .await
        .unwrap();
    axum::serve(listener, routes)
        .with_graceful_shutdown(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {err}");
            }
            let _ = shutdown_tx.send(true);
        })
        .await
        .unwrap();

    let _ = sync_task.await;
}
