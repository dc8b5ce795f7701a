use tracing::{Level, info};

use encore::config::AppConfig;
use encore::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;
    let db = encore::database::init_db(&config.database).await?;

    if config.database.seed_demo {
        encore::seed::seed_demo_data(&db).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { db, config };
    let app = encore::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Encore listening at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
