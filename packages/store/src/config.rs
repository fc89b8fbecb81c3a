//! # Application configuration — `fixkarachi.toml`
//!
//! Behavior switches shared by the server and the client. The server loads them
//! as the `[app]` part of its settings and hands them to the client through the
//! `app_config` server function.
//!
//! ```toml
//! [i18n]
//! default_language = "en"      # "en" or "ur"
//!
//! [auth]
//! min_password_length = 6
//! persist_citizen_role = false # write a role row for citizens too
//! ```
//!
//! Every section has defaults, so a missing or empty file is equivalent to the
//! default configuration.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Language shown before the user toggles.
    #[serde(default)]
    pub default_language: Language,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// When set, sign-up stores an explicit `citizen` role row instead of
    /// relying on the absence of a row.
    #[serde(default)]
    pub persist_citizen_role: bool,
}

fn default_min_password_length() -> usize {
    6
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            persist_citizen_role: false,
        }
    }
}

impl AppConfig {
    /// Builder method to set the initial language.
    pub fn with_default_language(mut self, lang: Language) -> Self {
        self.i18n.default_language = lang;
        self
    }

    /// Builder method to opt into explicit citizen role rows.
    pub fn with_persisted_citizen_role(mut self, persist: bool) -> Self {
        self.auth.persist_citizen_role = persist;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "fixkarachi.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.i18n.default_language, Language::En);
        assert_eq!(config.auth.min_password_length, 6);
        assert!(!config.auth.persist_citizen_role);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [i18n]
            default_language = "ur"

            [auth]
            persist_citizen_role = true
            "#,
        )
        .unwrap();
        assert_eq!(config.i18n.default_language, Language::Ur);
        assert!(config.auth.persist_citizen_role);
        assert_eq!(config.auth.min_password_length, 6);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(AppConfig::from_toml("[i18n]\ndefault_language = \"fr\"").is_err());
    }

    #[test]
    fn test_builder_output_parses_back() {
        let config = AppConfig::default()
            .with_default_language(Language::Ur)
            .with_persisted_citizen_role(true);
        let parsed = AppConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
