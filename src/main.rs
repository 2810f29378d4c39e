use std::{io, sync::Arc};

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use review_analyzer::{
    api, config::Config, db::ReviewStore, models::ValidLocations, pipeline::ReviewPipeline,
    sentiment::LexiconScorer,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().map_err(io::Error::other)?;
    info!("Loaded configuration: {:?}", config);

    // Bulk load once before serving
    let store = ReviewStore::load_csv(&config.reviews_csv).map_err(io::Error::other)?;

    let pipeline = web::Data::new(ReviewPipeline::new(
        Arc::new(store),
        Arc::new(LexiconScorer::new()),
        ValidLocations::default(),
    ));

    let address = ("0.0.0.0", config.port);
    info!("Listening on port {}...", config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(pipeline.clone())
            .configure(api::configure)
    })
    .bind(address)?
    .run()
    .await
}
