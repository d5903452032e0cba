mod config;
mod doc;
mod dtos;
mod error;
mod extractors;
mod routes;
mod state;
mod utils;

use axum::Router;
use config::Config;
use database::{db, services::seed::SeedService};
use doc::ApiDoc;
use log::info;
use migration::{Migrator, MigratorTrait};
use state::AppState;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utils::shutdown::shutdown_signal;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::load().expect("Invalid configuration");

    let db = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        info!("Database migrations applied");
    }

    if config.seed_data {
        SeedService::seed(&db, &config.admin_subject)
            .await
            .expect("Failed to seed database");
    }

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(config.oidc_issuer_url.as_str())
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    let protected = routes::protected_routes()
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = Router::new()
        .merge(routes::public_routes())
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(AppState::new(db, &config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
