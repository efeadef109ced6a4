//! The beer stock web service.

use beer_stock::{
    app,
    core::beer::beer_repository::{InMemoryBeerRepository, PgBeerRepository},
    infra::{config, database, logging::init_logging, state::AppState},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _guard = init_logging();
    let config = config::load_config()?;

    let listener = TcpListener::bind(config.server.http_bind_address()).await?;
    match &config.database {
        Some(db_config) => {
            let db = database::init_db(db_config);
            database::migrate(&db).await?;
            app::run_app(listener, AppState::new(PgBeerRepository::new(db))).await?;
        }
        None => {
            tracing::warn!("No database configured, beers are kept in memory");
            app::run_app(listener, AppState::new(InMemoryBeerRepository::new())).await?;
        }
    }

    Ok(())
}
