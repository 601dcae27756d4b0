//! Model evaluation test server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use model_eval_test_server::api::{self, ApiDoc};
use model_eval_test_server::config::Config;
use model_eval_test_server::middleware::RequestLogger;
use model_eval_test_server::services::{
    EventBroadcaster, WatchdogConfig, start_watchdog_task,
};
use model_eval_test_server::store::Store;

/// Perform health check (for Docker healthcheck).
async fn health_check() -> bool {
    // Simple check - just verify we can load config
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        if health_check().await {
            std::process::exit(0);
        } else {
            std::process::exit(1);
        }
    }

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
            error!("  - In production, EVAL_ALLOWED_ORIGIN must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Model Evaluation Test Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    // Shared state
    let store = Store::new();
    let broadcaster = EventBroadcaster::new();

    // Start the job watchdog background task
    let watchdog_config = WatchdogConfig {
        job_timeout_minutes: config.job_timeout_minutes,
        interval_secs: if config.is_development() { 30 } else { 300 }, // 30s dev, 5 min prod
    };
    start_watchdog_task(store.clone(), broadcaster.clone(), watchdog_config);
    info!(
        "Job watchdog started (timeout: {} minutes)",
        config.job_timeout_minutes
    );

    let bind_address = config.bind_address();
    let is_development = config.is_development();
    let allowed_origin = config.allowed_origin.clone();

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
        // Configure CORS
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .max_age(3600);
        if let Some(ref origin) = allowed_origin {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            // Add request logging middleware
            .wrap(RequestLogger)
            // Add shared state
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(broadcaster.clone()))
            .app_data(web::Data::new(config.clone()))
            // Configure API routes
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_model_routes)
                    .configure(api::configure_dataset_routes)
                    .configure(api::configure_test_routes)
                    .configure(api::configure_job_routes)
                    .configure(api::configure_websocket_routes),
            )
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    });

    // Set worker count
    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
