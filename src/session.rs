//! Admin session stored in the signed session cookie.
//!
//! Handlers receive the backend token, the interface locale and the key of
//! the session's customer view through the [`AdminSession`] extractor.

use std::future::{Ready, ready};

use actix_session::{Session, SessionExt, SessionInsertError};
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::i18n::Locale;

pub const LOGIN_PATH: &str = "/login";

const ADMIN_KEY: &str = "admin";
const LOCALE_KEY: &str = "locale";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminSession {
    token: String,
    locale: Locale,
    view_key: Uuid,
}

impl AdminSession {
    /// Opens a session with a fresh view key.
    pub fn new(token: impl Into<String>, locale: Locale) -> Self {
        Self {
            token: token.into(),
            locale,
            view_key: Uuid::new_v4(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn view_key(&self) -> Uuid {
        self.view_key
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Reads the admin session from the cookie, if one was opened.
    pub fn from_session(session: &Session) -> Option<Self> {
        session
            .get::<AdminSession>(ADMIN_KEY)
            .map_err(|e| log::warn!("Discarding unreadable admin session: {e}"))
            .ok()
            .flatten()
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionInsertError> {
        session.insert(ADMIN_KEY, self)?;
        session.insert(LOCALE_KEY, self.locale)
    }
}

/// Locale of the session: the admin's choice, else the one picked on the
/// login page, else `default`.
pub fn preferred_locale(session: &Session, default: Locale) -> Locale {
    AdminSession::from_session(session)
        .map(|admin| admin.locale())
        .or_else(|| session.get::<Locale>(LOCALE_KEY).ok().flatten())
        .unwrap_or(default)
}

/// Remembers the locale for visitors that have not signed in yet.
pub fn store_locale(session: &Session, locale: Locale) -> Result<(), SessionInsertError> {
    session.insert(LOCALE_KEY, locale)
}

/// Rejection of requests that carry no admin session.
#[derive(Debug, Error)]
pub enum SessionRejection {
    /// Page requests are sent to the login form.
    #[error("admin session required")]
    RedirectToLogin,
    /// API requests get a bare 401.
    #[error("unauthorized")]
    Unauthorized,
}

impl ResponseError for SessionRejection {
    fn status_code(&self) -> StatusCode {
        match self {
            SessionRejection::RedirectToLogin => StatusCode::SEE_OTHER,
            SessionRejection::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            SessionRejection::RedirectToLogin => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish(),
            SessionRejection::Unauthorized => HttpResponse::Unauthorized().finish(),
        }
    }
}

impl FromRequest for AdminSession {
    type Error = SessionRejection;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = AdminSession::from_session(&req.get_session()).ok_or_else(|| {
            if req.path().starts_with("/api/") {
                SessionRejection::Unauthorized
            } else {
                SessionRejection::RedirectToLogin
            }
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sessions_get_distinct_view_keys() {
        let first = AdminSession::new("token", Locale::Ar);
        let second = AdminSession::new("token", Locale::Ar);

        assert_ne!(first.view_key(), second.view_key());
        assert_eq!(first.token(), "token");
        assert_eq!(first.locale(), Locale::Ar);
    }

    #[test]
    fn rejection_redirects_pages_to_login() {
        let response = SessionRejection::RedirectToLogin.error_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
        assert_eq!(
            SessionRejection::Unauthorized.error_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
