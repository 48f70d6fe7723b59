pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod infrastructure;
pub mod pricing;
pub mod quote;
pub mod schema;

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::catalog_service::CatalogService;
use crate::application::order_service::OrderService;
use crate::domain::ports::CredentialVerifier;
use crate::errors::AppError;
use crate::handlers::{auth, orders, products, ApiDoc};
use crate::infrastructure::auth::BcryptVerifier;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::product_repo::DieselProductRepository;

pub use config::AppConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Cookie-session middleware with the signing key taken from the configured
/// secret.
pub fn session_middleware(secret: &str) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), session_key(secret))
        .cookie_secure(false)
        .build()
}

/// `Key::from` requires at least 64 bytes of material; shorter secrets are
/// cycled up to that length.
fn session_key(secret: &str) -> Key {
    assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");
    let material: Vec<u8> = secret.bytes().cycle().take(secret.len().max(64)).collect();
    Key::from(&material)
}

/// Register the services, every API route and the swagger endpoints.
///
/// Shared with the integration tests, which mount this onto a test `App`
/// instead of a bound server.
pub fn configure_api(cfg: &mut web::ServiceConfig, pool: DbPool, config: &AppConfig) {
    let order_service = OrderService::new(DieselOrderRepository::new(pool.clone()));
    let catalog_service = CatalogService::new(DieselProductRepository::new(pool));
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(BcryptVerifier::new(
        config.admin_username.clone(),
        config.admin_password_hash.clone(),
    ));

    cfg.app_data(web::Data::new(order_service))
        .app_data(web::Data::new(catalog_service))
        .app_data(web::Data::from(verifier))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            AppError::Validation(err.to_string()).into()
        }))
        .service(
            web::scope("/api")
                .route("/login", web::post().to(auth::login))
                .route("/logout", web::post().to(auth::logout))
                .service(
                    web::scope("/products")
                        .route("", web::get().to(products::list_products))
                        .route("", web::post().to(products::create_product))
                        .route("/{id}", web::put().to(products::update_product))
                        .route("/{id}", web::delete().to(products::delete_product)),
                )
                .service(
                    web::scope("/orders")
                        .route("", web::post().to(orders::create_order))
                        .route("", web::get().to(orders::list_orders))
                        .route("/{id}", web::get().to(orders::get_order))
                        .route("/{id}", web::patch().to(orders::update_order_status))
                        .route("/{id}/pdf", web::get().to(orders::download_order_quote)),
                ),
        )
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
}

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, config: AppConfig) -> std::io::Result<actix_web::dev::Server> {
    let host = config.host.clone();
    let port = config.port;

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(session_middleware(&config.session_secret))
            .configure(|cfg| configure_api(cfg, pool.clone(), &config))
    })
    .bind((host, port))?
    .run())
}
