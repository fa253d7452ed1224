mod api;
mod config;
mod database;
mod models;
mod repositories;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;

use crate::config::Config;
use crate::repositories::MongoUserRepository;
use crate::services::UserService;

fn cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting User Service...");

    // Keep serving even if MongoDB is down; the driver reconnects on demand
    let repository = match database::MongoDB::new(&config.mongo).await {
        Ok(db) => {
            match db.ping().await {
                Ok(()) => log::info!("✅ MongoDB connected successfully"),
                Err(e) => {
                    log::error!("❌ MongoDB connection error: {}", e);
                    log::warn!("⚠️  Requests will fail with 500 until MongoDB is reachable");
                }
            }
            MongoUserRepository::new(&db)
        }
        Err(e) if database::is_resolution_error(&e) => {
            log::error!("❌ MongoDB host resolution error: {}", e);
            log::warn!("⚠️  Requests will fail with 500 until the MongoDB host resolves");
            MongoUserRepository::deferred(config.mongo.clone())
        }
        Err(e) => {
            log::error!("❌ Invalid MongoDB settings: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    let service = web::Data::new(UserService::new(Arc::new(repository)));

    let host = config.host.clone();
    let port = config.port;
    let allowed_origins = config.cors_allowed_origins.clone();

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/api-docs/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(cors(&allowed_origins))
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
