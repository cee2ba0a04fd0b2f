//! Members server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use members_server::api;
use members_server::auth::TokenVerifier;
use members_server::config::Config;
use members_server::db;
use members_server::middleware::RequestLogger;
use members_server::migration::Migrator;
use members_server::services::webhook::WebhookNotifier;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - MEMBERS_JWKS must carry the bearer-token verification keys");
            error!("  - In production, DATABASE_URL must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Members Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    // Build the token verifier from the configured key set
    let verifier = match TokenVerifier::from_jwks(&config.jwks) {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to load verification keys: {}", e);
            std::process::exit(1);
        }
    };

    // Connect and migrate
    let conn = match db::connect(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    Migrator::up(&conn, None)
        .await
        .expect("Failed to run migrations");
    info!("Database migrations complete");

    let webhook = WebhookNotifier::new(&config.webhook);
    if config.webhook.url.is_some() {
        info!("Member registration webhook dispatch enabled");
    }

    let bind_address = config.bind_address();
    let is_development = config.is_development();

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        let cors = if is_development {
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                    "X-API-Key".parse().unwrap(),
                ])
                .max_age(3600)
        } else {
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                    "X-API-Key".parse().unwrap(),
                ])
                .max_age(3600)
        };

        let mut app = App::new()
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(web::Data::new(conn.clone()))
            .app_data(web::Data::new(verifier.clone()))
            .app_data(web::Data::new(webhook.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_user_routes)
                    .configure(api::configure_api_key_routes)
                    .configure(api::configure_admin_log_routes)
                    .configure(api::configure_station_routes)
                    .configure(api::configure_instructor_routes)
                    .configure(api::configure_badge_routes)
                    .configure(api::configure_donation_routes),
            );

        if is_development {
            app = app.service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
            );
        }

        app
    });

    server.workers(worker_count).bind(&bind_address)?.run().await
}
