use serde::Deserialize;
use validator::Validate;

use crate::i18n::Locale;

#[derive(Deserialize, Validate)]
/// Form data for opening an admin session.
pub struct LoginForm {
    /// Backend API token issued to the administrator.
    #[validate(length(min = 1))]
    pub token: String,
    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Deserialize)]
/// Form data for switching the interface language.
pub struct LocaleForm {
    pub locale: Locale,
}
