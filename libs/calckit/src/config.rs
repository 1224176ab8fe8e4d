//! Layered application configuration.
//!
//! Sources are merged in this order, later ones winning:
//! 1. built-in defaults
//! 2. YAML file (when a path is given)
//! 3. environment variables prefixed with `CALC__` (`__` separates nesting levels,
//!    e.g. `CALC__SERVER__BIND_ADDR=0.0.0.0:8080`)
//! 4. CLI overrides applied via [`AppConfig::apply_cli_overrides`]
//!
//! Module sections live under `modules.<name>.config` and are read leniently
//! with [`module_config_or_default`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CALC__";

/// Configuration error for loading and typed config access
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("invalid config for module '{module}': {source}")]
    InvalidModuleConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render configuration: {0}")]
    Render(#[source] serde_json::Error),
}

/// Whole-process configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Raw per-module sections: `modules.<name> = { config: {...} }`.
    pub modules: BTreeMap<String, serde_json::Value>,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
    /// CORS is disabled when this section is absent.
    pub cors: Option<CorsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_owned(),
            request_timeout_secs: 30,
            body_limit_bytes: 16 * 1024,
            cors: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: vec!["GET".to_owned(), "POST".to_owned()],
            allowed_headers: vec!["content-type".to_owned()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set, e.g. `info` or `calculator=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable console output (development)
    #[default]
    Pretty,
    /// One JSON object per line (production)
    Json,
}

/// CLI arguments that take part in config merging.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    pub verbose: u8,
}

impl AppConfig {
    /// Load layered config: defaults -> YAML (if provided) -> env (`CALC__*`).
    ///
    /// # Errors
    /// Returns [`ConfigError::FileNotFound`] when an explicit path does not point
    /// to a file and [`ConfigError::Load`] when a source cannot be parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(&figment)
    }

    /// Extract a config from an already assembled figment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when the merged sources do not deserialize.
    pub fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            let host = self
                .server
                .bind_addr
                .rsplit_once(':')
                .map_or("127.0.0.1", |(host, _)| host);
            self.server.bind_addr = format!("{host}:{port}");
        }

        match args.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// Render the effective configuration as pretty JSON.
    ///
    /// # Errors
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Render)
    }
}

/// Lenient module configuration loader that falls back to defaults.
///
/// - module not present → `Ok(T::default())`
/// - module value is not an object, or has no `config` field → `Ok(T::default())`
/// - `config` present but invalid → `Err(ConfigError::InvalidModuleConfig)`
///
/// # Errors
/// Returns `ConfigError::InvalidModuleConfig` if the section exists but cannot be deserialized.
pub fn module_config_or_default<T: DeserializeOwned + Default>(
    app: &AppConfig,
    module_name: &str,
) -> Result<T, ConfigError> {
    let Some(section) = app
        .modules
        .get(module_name)
        .and_then(serde_json::Value::as_object)
        .and_then(|obj| obj.get("config"))
    else {
        return Ok(T::default());
    };

    serde_json::from_value(section.clone()).map_err(|e| ConfigError::InvalidModuleConfig {
        module: module_name.to_owned(),
        source: e,
    })
}
