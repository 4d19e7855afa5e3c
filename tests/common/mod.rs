#![allow(dead_code)]

use actix_session::Session;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use actix_web::{App, HttpResponse, HttpServer, web};
use nahla_admin::i18n::Locale;
use nahla_admin::models::config::ServerConfig;
use nahla_admin::session::AdminSession;

pub const OPEN_SESSION_PATH: &str = "/test/open-session";

/// Configuration pointing at a backend that is never reached.
pub fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".into(),
        address: "127.0.0.1".into(),
        port: 0,
        templates_dir: "templates/**/*.html".into(),
        secret: "test-secret-test-secret-test-secret-test-secret-test-secret-test-secret".into(),
        backend_url: "http://127.0.0.1:9".into(),
        default_locale: Locale::En,
        view_idle_minutes: 30,
    }
}

/// Cookies set by a response, ready to be sent with the next request.
///
/// Removal cookies (empty value or zero max-age) are left out, as a browser
/// would drop them instead of sending them back.
pub fn cookies_of<B>(response: &ServiceResponse<B>) -> Vec<Cookie<'static>> {
    response
        .response()
        .cookies()
        .filter(|cookie| !cookie.value().is_empty())
        .filter(|cookie| cookie.max_age().is_none_or(|age| !age.is_zero()))
        .map(|cookie| cookie.into_owned())
        .collect()
}

/// Attaches previously received cookies to a request.
pub fn with_cookies(mut request: TestRequest, cookies: &[Cookie<'static>]) -> TestRequest {
    for cookie in cookies {
        request = request.cookie(cookie.clone());
    }
    request
}

/// Opens an admin session and answers with its view key, so tests can seed
/// the view store.
pub async fn open_session(session: Session) -> HttpResponse {
    let admin = AdminSession::new("test-token", Locale::En);
    admin.save(&session).expect("session stored");
    HttpResponse::Ok().body(admin.view_key().to_string())
}

/// Starts a backend that rejects every token and returns its base URL.
pub fn rejecting_backend() -> std::io::Result<String> {
    let server = HttpServer::new(|| {
        App::new().default_service(web::to(|| async { HttpResponse::Unauthorized().finish() }))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))?;
    let address = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    Ok(format!("http://{address}"))
}

/// Builds the admin application with in-memory state for one test.
macro_rules! test_app {
    () => {
        test_app!(
            common::server_config(),
            actix_web::web::Data::new(nahla_admin::view_store::ViewStore::new())
        )
    };
    ($config:expr, $store:expr) => {{
        use actix_session::{SessionMiddleware, storage::CookieSessionStore};
        use actix_web::cookie::Key;
        use actix_web::{App, web};
        use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};

        let config = $config;
        let key = Key::from(config.secret.as_bytes());
        let tera = tera::Tera::new(&config.templates_dir).expect("templates parse");
        let backend =
            nahla_admin::repository::BackendClient::new(&config.backend_url).expect("client");
        let catalog = nahla_admin::i18n::Catalog::load().expect("catalog");

        actix_web::test::init_service(
            App::new()
                .wrap(
                    FlashMessagesFramework::builder(
                        CookieMessageStore::builder(key.clone()).build(),
                    )
                    .build(),
                )
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .route(common::OPEN_SESSION_PATH, web::post().to(common::open_session))
                .configure(nahla_admin::configure_routes)
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(backend))
                .app_data($store)
                .app_data(web::Data::new(catalog))
                .app_data(web::Data::new(config)),
        )
        .await
    }};
}
