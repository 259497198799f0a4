use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: None }
    }
}

/// Connection settings for the hosted Supabase project backing the
/// `localizations` table. `url` is the project base URL, not the REST path;
/// the storage client appends `/rest/v1/{table}` itself.
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self { url: String::new(), api_key: String::new(), table: default_table() }
    }
}

fn default_table() -> String { "localizations".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (built-in defaults when the file is absent), fill
    /// gaps from environment variables, and validate Supabase settings. A
    /// present-but-malformed file is an error, not a silent fallback.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.supabase.normalize_from_env();
        self.supabase.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(0) = self.worker_threads {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl SupabaseConfig {
    /// Fill url/api_key from `SUPABASE_URL` / `SUPABASE_API_KEY` when the
    /// TOML file did not provide them.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("SUPABASE_URL") {
                self.url = url;
            }
        }
        if self.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("SUPABASE_API_KEY") {
                self.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!(
                "supabase.url is empty; set it in config.toml or the SUPABASE_URL env var"
            ));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("supabase.url must start with http:// or https://"));
        }
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "supabase.api_key is empty; set it in config.toml or the SUPABASE_API_KEY env var"
            ));
        }
        if self.table.trim().is_empty() {
            return Err(anyhow!("supabase.table must not be empty"));
        }
        Ok(())
    }
}
