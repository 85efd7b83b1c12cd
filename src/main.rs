use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use doodled::classifier::{Classifier, DoodleModel};
use doodled::server::{self, AppState};
use doodled::settings::Settings;
use std::sync::Arc;
use std::{io, process};

use tracing::{error, info};
use tracing_subscriber;

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            error!("invalid configuration: {err}");
            process::exit(1);
        }
    };

    // A model that fails to load is fatal, not a degraded mode
    let model: Arc<dyn Classifier> = match DoodleModel::load(&settings.model_path) {
        Ok(model) => Arc::new(model),
        Err(err) => {
            error!("could not load model from {}: {err:#}", settings.model_path);
            process::exit(1);
        }
    };
    info!("model loaded from {}", settings.model_path);

    let state = web::Data::new(AppState::new(Some(model)));
    let bind = (settings.host.clone(), settings.port);
    info!("listening on {}:{}", settings.host, settings.port);

    // Start the HTTP server
    HttpServer::new(move || {
        let cors = settings
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .configure(server::configure)
    })
    .bind(bind)?
    .run()
    .await
}
