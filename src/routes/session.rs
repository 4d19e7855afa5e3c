use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;
use validator::Validate;

use crate::forms::session::{LocaleForm, LoginForm};
use crate::i18n::Catalog;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, collect_alerts, flash_error, redirect, render_template};
use crate::session::{AdminSession, LOGIN_PATH, preferred_locale, store_locale};
use crate::view_store::ViewStore;

#[get("/")]
pub async fn index(session: Session) -> impl Responder {
    match AdminSession::from_session(&session) {
        Some(_) => redirect("/customers"),
        None => redirect(LOGIN_PATH),
    }
}

#[get("/login")]
pub async fn show_login(
    session: Session,
    flash_messages: IncomingFlashMessages,
    catalog: web::Data<Catalog>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if AdminSession::from_session(&session).is_some() {
        return redirect("/customers");
    }

    let locale = preferred_locale(&session, server_config.default_locale);
    let alerts = collect_alerts(&flash_messages);
    let context = base_context(&alerts, &catalog, locale, "login");

    render_template(&tera, "session/login.html", &context)
}

#[post("/login")]
pub async fn login(
    session: Session,
    catalog: web::Data<Catalog>,
    server_config: web::Data<ServerConfig>,
    store: web::Data<ViewStore>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let locale = form
        .locale
        .unwrap_or_else(|| preferred_locale(&session, server_config.default_locale));

    if let Err(err) = form.validate() {
        log::debug!("Rejected login form: {err}");
        flash_error(&catalog, locale, "error_invalid_login");
        return redirect(LOGIN_PATH);
    }

    if let Some(previous) = AdminSession::from_session(&session) {
        store.remove(previous.view_key());
    }

    let admin = AdminSession::new(form.token.trim(), locale);
    session.renew();
    if let Err(err) = admin.save(&session) {
        log::error!("Failed to store the admin session: {err}");
        flash_error(&catalog, locale, "error_internal");
        return redirect(LOGIN_PATH);
    }

    log::info!("Admin session opened for view {}", admin.view_key());
    redirect("/customers")
}

#[post("/logout")]
pub async fn logout(session: Session, store: web::Data<ViewStore>) -> impl Responder {
    if let Some(admin) = AdminSession::from_session(&session) {
        store.remove(admin.view_key());
        log::info!("Admin session closed for view {}", admin.view_key());
    }
    session.purge();
    redirect(LOGIN_PATH)
}

#[post("/locale")]
pub async fn change_locale(
    session: Session,
    catalog: web::Data<Catalog>,
    web::Form(form): web::Form<LocaleForm>,
) -> HttpResponse {
    let stored = match AdminSession::from_session(&session) {
        Some(mut admin) => {
            admin.set_locale(form.locale);
            admin.save(&session).map(|()| "/customers")
        }
        None => store_locale(&session, form.locale).map(|()| LOGIN_PATH),
    };

    match stored {
        Ok(location) => redirect(location),
        Err(err) => {
            log::error!("Failed to store the locale: {err}");
            flash_error(&catalog, form.locale, "error_internal");
            redirect(LOGIN_PATH)
        }
    }
}
