use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use health_explorer::{
    config::ExplorerConfig,
    data::dataset::Dataset,
    logging::setup_tracing,
    server::{configure, AppState},
};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cfg = ExplorerConfig::read_config::<&str>(None).expect("Failed to load config");
    let _guard = setup_tracing(Some(cfg.log_dir.as_str())).expect("Failed to set up tracing");

    // The dataset is loaded once; a bad file stops the server before it binds.
    let dataset = Dataset::load(&cfg.dataset_path).expect("Failed to load dataset");
    let app_state = web::Data::new(AppState::new(dataset, cfg.default_selection.clone()));

    let (host, port) = cfg.bind_address();
    info!("Serving dashboard API on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
