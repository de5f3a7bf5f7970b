use crate::file;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Name of the optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "vitrine.toml";

/// Environment variable that overrides the listening port.
pub const PORT_ENV: &str = "PORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse config error: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Server configuration, immutable after startup.
///
/// Every field has a default, so a missing or empty `vitrine.toml` yields a
/// fully usable configuration. The `PORT` environment variable takes
/// precedence over both the file and the default port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
    #[serde(rename = "static", default = "ServerConfig::default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "TemplateConfig::default_dir")]
    pub dir: String,
    #[serde(default = "TemplateConfig::default_index")]
    pub index: String,
    #[serde(default = "TemplateConfig::default_not_found")]
    pub not_found: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            static_dir: Self::default_static_dir(),
            templates: TemplateConfig::default(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            index: Self::default_index(),
            not_found: Self::default_not_found(),
        }
    }
}

impl TemplateConfig {
    fn default_dir() -> String {
        "views".to_string()
    }

    fn default_index() -> String {
        "index".to_string()
    }

    fn default_not_found() -> String {
        "404".to_string()
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_static_dir() -> String {
        "public".to_string()
    }

    /// Loads the configuration from `vitrine.toml` (if present) and the
    /// `PORT` environment variable.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load() -> ConfigResult<Self> {
        let content = match fs::read_to_string(file::workspace(CONFIG_FILE)) {
            Ok(content) => Some(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        Self::from_sources(content.as_deref(), env::var(PORT_ENV).ok().as_deref())
    }

    fn from_sources(file: Option<&str>, port_env: Option<&str>) -> ConfigResult<Self> {
        let mut config: ServerConfig = match file {
            Some(content) => toml::from_str(content)?,
            None => ServerConfig::default(),
        };
        if let Some(raw) = port_env {
            match raw.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warn!("ignoring unparseable {} value: {:?}", PORT_ENV, raw),
            }
        }
        Ok(config)
    }

    /// Static asset root, resolved against the working directory.
    pub fn static_root(&self) -> PathBuf {
        file::workspace(&self.static_dir)
    }

    /// Template source directory, resolved against the working directory.
    pub fn template_dir(&self) -> PathBuf {
        file::workspace(&self.templates.dir)
    }
}
