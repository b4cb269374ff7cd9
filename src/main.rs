use std::sync::Arc;

use tracing::{Level, info};

use dinnersready::config::AppConfig;
use dinnersready::detector::StubDetector;
use dinnersready::state::AppState;
use dinnersready::{database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::seed_recipes(&db).await?;
    seed::seed_admin(&db, &config.auth).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let detector = Arc::new(StubDetector::new(config.detector.delay_ms));

    let state = AppState {
        db,
        config,
        detector,
    };

    let app = dinnersready::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
