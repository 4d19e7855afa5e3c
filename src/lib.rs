#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::i18n::Catalog;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::BackendClient;
#[cfg(feature = "server")]
use crate::routes::api::api_v1_customers;
#[cfg(feature = "server")]
use crate::routes::customers::{
    apply_filters, delete_customer, export_customers, select_mode, show_customers,
};
#[cfg(feature = "server")]
use crate::routes::session::{change_locale, index, login, logout, show_login};
#[cfg(feature = "server")]
use crate::view_store::ViewStore;

pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod i18n;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod session;
#[cfg(feature = "server")]
pub mod view_store;

#[cfg(feature = "server")]
const VIEW_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Registers every page, form and API handler.
#[cfg(feature = "server")]
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(api_v1_customers))
        .service(index)
        .service(show_login)
        .service(login)
        .service(logout)
        .service(change_locale)
        .service(show_customers)
        .service(select_mode)
        .service(apply_filters)
        .service(export_customers)
        .service(delete_customer);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let backend = BackendClient::new(&server_config.backend_url)
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

    let catalog = web::Data::new(
        Catalog::load()
            .map_err(|e| std::io::Error::other(format!("Failed to load messages: {e}")))?,
    );
    let store = web::Data::new(ViewStore::with_idle_timeout(Duration::from_secs(
        server_config.view_idle_minutes * 60,
    )));

    // Drop customer views of sessions that went quiet.
    let sweeper = store.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(VIEW_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let evicted = sweeper.evict_idle();
            if evicted > 0 {
                log::debug!("Evicted {evicted} idle customer views");
            }
        }
    });

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving the admin on {}:{} against {}",
        server_config.address,
        server_config.port,
        backend.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure_routes)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(backend.clone()))
            .app_data(store.clone())
            .app_data(catalog.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
