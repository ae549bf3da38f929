use actix_files::Files;
use actix_web::middleware::Compress;
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;

pub mod admin;
pub mod api;
pub mod config;
pub mod error;
pub mod pages;
pub mod router;
pub mod session;
pub mod state;

pub use crate::error::PortalError;
pub use crate::state::AppState;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::PortalConfig::from_env()?;
    log::info!("Remote API base URL: {}", config.base_url);

    let app_state = web::Data::new(AppState::new(&config));

    let prometheus = PrometheusMetricsBuilder::new("desa_wisata_portal")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting portal at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .app_data(app_state)
            .configure(router::configure)
            .service(Files::new("/static", "./static"))
    })
    .backlog(8192)
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(("0.0.0.0", 8080))?
    .run()
    .await?;

    Ok(())
}
