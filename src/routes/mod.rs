//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::filter::Segment;
use crate::i18n::{Catalog, Locale};

pub mod api;
pub mod customers;
pub mod session;

/// Maps a flash message level to the CSS class of the alert.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Alerts carried over from the previous request as `(text, class)` pairs.
pub fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

/// Context every page template expects: alerts, messages and text direction.
pub fn base_context(
    alerts: &[(String, &'static str)],
    catalog: &Catalog,
    locale: Locale,
    current_page: &str,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", alerts);
    context.insert("t", &catalog.messages(locale));
    context.insert("locale", locale.code());
    context.insert("dir", locale.direction());
    context.insert("locales", &Locale::ALL.map(Locale::code));
    context.insert("segments", &Segment::ALL.map(Segment::slug));
    context.insert("current_page", current_page);
    context
}

/// Queues a localized error notification for the next page.
pub fn flash_error(catalog: &Catalog, locale: Locale, key: &str) {
    FlashMessage::error(catalog.text(locale, key)).send();
}

pub fn flash_success(catalog: &Catalog, locale: Locale, key: &str) {
    FlashMessage::success(catalog.text(locale, key)).send();
}
