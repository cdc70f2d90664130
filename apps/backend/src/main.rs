use actix_web::{web, App, HttpServer};
use pokedeck_backend::config::app::AppConfig;
use pokedeck_backend::config::db::DbSettings;
use pokedeck_backend::infra::state::build_state;
use pokedeck_backend::middleware::request_trace::RequestTrace;
use pokedeck_backend::routes;
use pokedeck_backend::services::AchievementService;
use pokedeck_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via docker-compose env_file or docker run --env-file
    // - Local dev: source env files manually (e.g., set -a; . ./.env; set +a)
    let (db_settings, config) = match (DbSettings::from_env(), AppConfig::from_env()) {
        (Ok(db), Ok(config)) => (db, config),
        (Err(e), _) | (_, Err(e)) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let (host, port) = config.bind_addr();

    let app_state = match build_state()
        .with_db(db_settings)
        .with_config(config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    match AchievementService::new().seed_defaults(app_state.db()).await {
        Ok(inserted) => info!(inserted, "achievement catalog seeded"),
        Err(e) => {
            error!(error = %e, "failed to seed achievements");
            std::process::exit(1);
        }
    }

    let shutdown = app_state.shutdown.clone();
    let db = app_state.db.clone();
    let data = web::Data::new(app_state);

    info!(%host, port, "starting pokedeck backend");
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .disable_signals()
    .bind((host.as_str(), port))?
    .run();

    // Cancel in-flight service calls, then drain connections.
    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for shutdown signal");
        }
        info!("shutdown signal received");
        shutdown.cancel();
        handle.stop(true).await;
    });

    let result = server.await;

    if let Err(e) = db.close().await {
        error!(error = %e, "error closing database pool");
    }
    info!("shutdown complete");
    result
}
