use anyhow::Result;
use tracing::info;

mod app;
mod config;
mod error;
mod extractors;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;
    middleware::logging::init_logging(&config.logging);

    info!("Starting PromptCampaign API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::PoolSettings::from(&config.database)
        .connect()
        .await?;

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Database migrations applied");

    let addr = config.socket_addr();
    let app = app::create_app(config, pool);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
