use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub service: Option<ServiceConfig>,
    pub web: Option<WebConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebConfig {
    pub bind: Option<String>,
}

/// Platform config directory path: `<config_dir>/paperlens/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("paperlens").join("config.toml"))
}

/// Load config by cascading CWD `.paperlens.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".paperlens.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist, can't be read, or can't be parsed; the last two are logged.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = match read_if_present(path) {
        Ok(content) => content?,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            return None;
        }
    };
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// File contents, `Ok(None)` if there is no file at `path`.
fn read_if_present(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        service: Some(ServiceConfig {
            model: overlay
                .service
                .as_ref()
                .and_then(|s| s.model.clone())
                .or_else(|| base.service.as_ref().and_then(|s| s.model.clone())),
            base_url: overlay
                .service
                .as_ref()
                .and_then(|s| s.base_url.clone())
                .or_else(|| base.service.as_ref().and_then(|s| s.base_url.clone())),
        }),
        web: Some(WebConfig {
            bind: overlay
                .web
                .as_ref()
                .and_then(|w| w.bind.clone())
                .or_else(|| base.web.as_ref().and_then(|w| w.bind.clone())),
        }),
    }
}
