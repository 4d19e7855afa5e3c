//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::i18n::Locale;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Key signing the session and flash message cookies, at least 64 bytes.
    pub secret: String,
    /// Base URL of the customer REST API.
    pub backend_url: String,
    #[serde(default)]
    pub default_locale: Locale,
    /// Minutes after which an untouched customer view is dropped.
    #[serde(default = "default_view_idle_minutes")]
    pub view_idle_minutes: u64,
}

fn default_view_idle_minutes() -> u64 {
    30
}
