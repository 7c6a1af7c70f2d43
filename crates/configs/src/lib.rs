use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Upper bound on request bodies; photos travel inline as data URIs.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Which record layout the service stores.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Document metadata plus purchaser/seller/witness groups, three photo pairs.
    #[default]
    SaleDeed,
    /// Single party, one photo pair.
    Simple,
}

impl std::str::FromStr for SchemaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sale_deed" | "sale-deed" | "saledeed" => Ok(Self::SaleDeed),
            "simple" => Ok(Self::Simple),
            other => Err(anyhow!("unknown record schema `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_records_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub schema: SchemaKind,
    /// Refuse creates whose `id` is already stored.
    #[serde(default)]
    pub reject_duplicate_ids: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_records_path(),
            schema: SchemaKind::default(),
            reject_duplicate_ids: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self { static_dir: default_static_dir(), index_file: default_index_file() }
    }
}

impl FrontendConfig {
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3000 }
fn default_max_body_bytes() -> usize { 20 * 1024 * 1024 }
fn default_records_path() -> PathBuf { PathBuf::from("data/records.json") }
fn default_static_dir() -> PathBuf { PathBuf::from("public") }
fn default_index_file() -> String { "index.html".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` when present, otherwise start from defaults; then
    /// apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(content) => parse(&content)?,
            Err(e) => {
                info!(%path, error = %e, "config file not readable, using defaults");
                AppConfig::default()
            }
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment variables win over the file. `lookup` is injectable so
    /// tests do not have to touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").or_else(|| lookup("SERVER_PORT")) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow!("invalid port `{port}`: {e}"))?;
        }
        if let Some(threads) = lookup("TOKIO_WORKER_THREADS") {
            match threads.trim().parse::<usize>() {
                Ok(n) => self.server.worker_threads = Some(n),
                Err(e) => warn!(%threads, error = %e, "ignoring invalid TOKIO_WORKER_THREADS"),
            }
        }
        if let Some(path) = lookup("RECORDS_PATH") {
            self.storage.path = PathBuf::from(path);
        }
        if let Some(schema) = lookup("RECORD_SCHEMA") {
            self.storage.schema = schema.parse()?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.frontend.static_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        if self.storage.path.as_os_str().is_empty() {
            return Err(anyhow!("storage.path must not be empty"));
        }
        if self.frontend.static_dir.as_os_str().is_empty() {
            return Err(anyhow!("frontend.static_dir must not be empty"));
        }
        if self.frontend.index_file.trim().is_empty() {
            self.frontend.index_file = default_index_file();
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("server.max_body_bytes must be positive"));
        }
        Ok(())
    }
}
