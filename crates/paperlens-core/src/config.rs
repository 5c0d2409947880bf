use std::sync::Arc;

use crate::backend::PdfBackend;
use crate::client::{AnalysisClient, DEFAULT_MODEL};
use crate::config_file::ConfigFile;
use crate::controller::Controller;
use crate::extractor::TextExtractor;
use crate::service::GeminiService;
use crate::service::gemini::DEFAULT_BASE_URL;

/// Environment variables holding the API key, in precedence order.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "VITE_API_KEY"];

pub const DEFAULT_BIND: &str = "127.0.0.1:5001";

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub bind: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("bind", &self.bind)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Resolve from the process environment and the config files.
    pub fn load() -> Self {
        Self::from_sources(&crate::config_file::load_config(), |name| {
            std::env::var(name).ok()
        })
    }

    /// Environment values override file values, which override defaults.
    pub fn from_sources(file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let service = file.service.clone().unwrap_or_default();
        let web = file.web.clone().unwrap_or_default();

        Self {
            api_key: resolve_api_key(&env),
            model: env("PAPERLENS_MODEL")
                .or(service.model)
                .unwrap_or(defaults.model),
            base_url: env("PAPERLENS_BASE_URL")
                .or(service.base_url)
                .unwrap_or(defaults.base_url),
            bind: env("PAPERLENS_BIND").or(web.bind).unwrap_or(defaults.bind),
        }
    }

    /// Wire a [`Controller`] around the given PDF backend and a Gemini service.
    pub fn build_controller(&self, backend: Arc<dyn PdfBackend>) -> Controller {
        let service = GeminiService::new(self.api_key.clone()).with_base_url(&self.base_url);
        let client = AnalysisClient::new(Arc::new(service)).with_model(&self.model);
        Controller::new(TextExtractor::new(backend), client)
    }
}

/// First non-empty value among [`API_KEY_VARS`].
pub fn resolve_api_key(env: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .iter()
        .find_map(|name| env(name).filter(|v| !v.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config_file::{ServiceConfig, WebConfig};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn runtime_key_takes_precedence() {
        let env = env_of(&[("API_KEY", "runtime"), ("VITE_API_KEY", "build")]);
        assert_eq!(resolve_api_key(env).as_deref(), Some("runtime"));
    }

    #[test]
    fn empty_runtime_key_falls_through() {
        let env = env_of(&[("API_KEY", ""), ("VITE_API_KEY", "build")]);
        assert_eq!(resolve_api_key(env).as_deref(), Some("build"));
    }

    #[test]
    fn no_key_is_none() {
        assert_eq!(resolve_api_key(env_of(&[])), None);
    }

    #[test]
    fn defaults_without_sources() {
        let config = Config::from_sources(&ConfigFile::default(), env_of(&[]));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind, DEFAULT_BIND);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn env_overrides_file() {
        let file = ConfigFile {
            service: Some(ServiceConfig {
                model: Some("file-model".into()),
                base_url: Some("http://file".into()),
            }),
            web: Some(WebConfig {
                bind: Some("0.0.0.0:1".into()),
            }),
        };
        let config = Config::from_sources(&file, env_of(&[("PAPERLENS_MODEL", "env-model")]));
        assert_eq!(config.model, "env-model");
        assert_eq!(config.base_url, "http://file");
        assert_eq!(config.bind, "0.0.0.0:1");
    }

    #[test]
    fn debug_masks_key() {
        let config = Config {
            api_key: Some("secret".into()),
            ..Config::default()
        };
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
