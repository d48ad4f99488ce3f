//! Server configuration.
//!
//! Values come from an optional YAML file and from the command line; CLI
//! flags win over the file, and the file wins over the defaults.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

/// Command-line arguments for the server binary.
#[derive(Parser, Debug, Default)]
#[command(name = "chlp-server")]
#[command(about = "Serves, stores and echoes files over CHLP/1.0", long_about = None)]
pub struct ServerArgs {
    /// Port to listen on (0 means the default, 8080)
    pub port: Option<u16>,

    /// Path to a YAML configuration file
    #[arg(short, long, env = "CHLP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Directory that GET requests are served from
    #[arg(long)]
    pub www_dir: Option<PathBuf>,

    /// Directory that POST bodies are written to
    #[arg(long)]
    pub uploads_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub www_dir: PathBuf,
    pub uploads_dir: PathBuf,
    /// File served when a GET names a directory
    pub index_file: String,
    /// Largest request body the server will buffer
    pub max_body_size: usize,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            www_dir: PathBuf::from("www"),
            uploads_dir: PathBuf::from("uploads"),
            index_file: "index.html".to_string(),
            max_body_size: 256 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Builds the effective configuration from parsed arguments.
    pub fn load(args: ServerArgs) -> Result<Self, ConfigError> {
        let base = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(base.with_args(args))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;

        Self::from_yaml(&contents).map_err(|e| ConfigError::YamlParse(path.to_path_buf(), e))
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(contents)?;
        if config.port == 0 {
            config.port = DEFAULT_PORT;
        }
        Ok(config)
    }

    /// Overlays the values given on the command line.
    pub fn with_args(mut self, args: ServerArgs) -> Self {
        if let Some(port) = args.port.filter(|p| *p != 0) {
            self.port = port;
        }
        if let Some(host) = args.host {
            self.host = host;
        }
        if let Some(dir) = args.www_dir {
            self.www_dir = dir;
        }
        if let Some(dir) = args.uploads_dir {
            self.uploads_dir = dir;
        }
        if let Some(level) = args.log_level {
            self.log_level = level;
        }
        self
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    FileRead(PathBuf, std::io::Error),

    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    YamlParse(PathBuf, serde_yaml::Error),
}
