use actix_web::{web, App, HttpServer};
use talker_backend::config::db::{DbKind, DbProfile};
use talker_backend::config::server::ServerConfig;
use talker_backend::infra::state::build_state;
use talker_backend::middleware::cors::cors_middleware;
use talker_backend::middleware::request_trace::RequestTrace;
use talker_backend::middleware::structured_logger::StructuredLogger;
use talker_backend::routes;
use talker_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let security_config =
        SecurityConfig::new(config.jwt_secret.as_bytes()).with_audience(&config.jwt_audience);

    let app_state = match build_state()
        .with_db(DbKind::Postgres(DbProfile::Prod))
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "starting Talker backend");

    let data = web::Data::new(app_state);
    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
