//! Interface messages in Arabic, French and English.
//!
//! The catalog is parsed once at startup from the embedded
//! `locales/messages.yaml` and shared read-only by every worker.

use std::collections::HashMap;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

const MESSAGES: &str = include_str!("../locales/messages.yaml");

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    Fr,
    #[default]
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ar, Locale::Fr, Locale::En];

    pub const fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    /// Text direction for the `dir` attribute of the page.
    pub const fn direction(self) -> &'static str {
        match self {
            Locale::Ar => "rtl",
            Locale::Fr | Locale::En => "ltr",
        }
    }
}

/// Messages keyed by locale, then by message key.
#[derive(Debug)]
pub struct Catalog {
    messages: HashMap<Locale, HashMap<String, String>>,
}

impl Catalog {
    /// Parses the embedded message file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_yaml(MESSAGES)
    }

    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let messages = Config::builder()
            .add_source(File::from_str(source, FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        Ok(Self { messages })
    }

    /// Looks `key` up for `locale`, falling back to English, then to the key.
    pub fn text<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        [locale, Locale::En]
            .iter()
            .find_map(|l| self.messages.get(l).and_then(|m| m.get(key)))
            .map_or(key, String::as_str)
    }

    /// All messages of `locale` with English filling the gaps, for templates.
    pub fn messages(&self, locale: Locale) -> HashMap<&str, &str> {
        let mut merged: HashMap<&str, &str> = HashMap::new();
        for l in [Locale::En, locale] {
            if let Some(messages) = self.messages.get(&l) {
                merged.extend(messages.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            }
        }
        merged
    }
}
