//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! the `LISTEN` environment variable, then command-line flags.

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "courier")]
#[command(about = "A small HTTP/1.1 echo and file server", long_about = None)]
pub struct CliArgs {
    /// Base directory for /files/ reads and writes
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to bind to (e.g., 127.0.0.1:4221)
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Seconds an idle connection may wait for its next request
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Upper bound on a single file read or write
    #[serde(default = "default_io_timeout")]
    pub io_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            io_timeout_secs: default_io_timeout(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:4221".to_string()
}

fn default_idle_timeout() -> u64 {
    60
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_io_timeout() -> u64 {
    30
}

impl Config {
    /// Builds the configuration from the process arguments and environment.
    pub fn load() -> anyhow::Result<(Self, CliArgs)> {
        let args = CliArgs::parse();
        let cfg = Self::resolve(&args, std::env::var("LISTEN").ok())?;
        Ok((cfg, args))
    }

    /// Layers the file, environment and CLI sources over the defaults.
    pub fn resolve(args: &CliArgs, env_listen: Option<String>) -> anyhow::Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(listen) = env_listen {
            cfg.server.listen_addr = listen;
        }
        if let Some(listen) = &args.listen {
            cfg.server.listen_addr = listen.clone();
        }
        if let Some(dir) = &args.directory {
            cfg.files.directory = dir.clone();
        }

        Ok(cfg)
    }

    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(raw).context("invalid YAML configuration")
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.server.idle_timeout_secs)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_secs(self.files.io_timeout_secs)
    }
}
