use mimalloc::MiMalloc;
use student_records::config::Config;
use student_records::db::StudentStorage;
use student_records::error::GENERIC_FAILURE_MESSAGE;
use student_records::router::{RecordsState, records_router};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database = ?cfg.database,
        region = %cfg.region(),
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel
    );

    let storage = match StudentStorage::open(&cfg.database).await {
        Ok(storage) => storage,
        Err(e) => {
            error!(error = %e, "Database connection failed");
            eprintln!("{GENERIC_FAILURE_MESSAGE}");
            std::process::exit(1);
        }
    };

    let state = RecordsState::from_config(storage, &cfg);
    let app = records_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
