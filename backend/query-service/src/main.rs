use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use db_pool::create_pool;
use s3_utils::S3Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use query_service::{configure, AppState, Config};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);

    info!("Starting query-service");

    config
        .validate()
        .context("Configuration validation failed")?;
    info!(config = ?config, "Configuration loaded and validated");

    // Initialize PostgreSQL pool
    let db_cfg = config.db_pool_config();
    db_cfg.log_config();

    let pg_pool = create_pool(db_cfg)
        .await
        .context("Failed to create PostgreSQL pool")?;
    info!("PostgreSQL connection pool created");

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .context("Failed to run query-service migrations")?;
        info!("Database migrations applied");
    }

    // Object store client (presigning only needs local credentials)
    let s3_client = S3Client::from_config(config.s3_config()).await;
    info!(bucket = %config.s3_bucket, "S3 client initialized");

    let state = AppState::new(
        pg_pool,
        Arc::new(s3_client),
        config.s3_config().presigned_url_ttl(),
        &config.enrichment_marker,
    );

    let bind_addr = (config.http_host.clone(), config.http_port);
    let cors_origins = config.cors_origins();

    info!("Starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in &cors_origins {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure)
    })
    .bind(bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}

fn init_tracing(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,query_service=debug".into());

    if config.json_logs() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
