use crate::error::{AllyError, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used under the user config dir and inside projects.
pub const APP_DIR: &str = "anxiety-ally";

pub const API_URL_ENV: &str = "ALLY_API_URL";
pub const SUPABASE_URL_ENV: &str = "ALLY_SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "ALLY_SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllyConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL. Every resource client appends its own path to it.
    #[serde(default = "default_api_url")]
    pub url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Custom path for the session token file. Defaults to `~/.config/anxiety-ally/token`.
    #[serde(default)]
    pub token_path: Option<String>,
}

/// Third-party credentials carried in the environment. Loaded and reported, never used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

impl AllyConfig {
    /// Load configuration with three-layer TOML merge, then environment overrides:
    /// 1. ~/.config/anxiety-ally/config.toml (global)
    /// 2. .anxiety-ally/config.toml (project)
    /// 3. .anxiety-ally/config.local.toml (local, gitignored)
    /// 4. `ALLY_API_URL`, `ALLY_SUPABASE_URL`, `ALLY_SUPABASE_ANON_KEY`
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut cfg = Self::load_files(global_config_path().as_deref(), project_dir)?;
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.validate();
        Ok(cfg)
    }

    fn load_files(global: Option<&Path>, project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(format!(".{APP_DIR}")).join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(format!(".{APP_DIR}")).join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        let config = builder
            .build()
            .map_err(|e| AllyError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AllyError::Config(e.to_string()))
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = get(API_URL_ENV) {
            self.api.url = url;
        }
        if let Some(url) = get(SUPABASE_URL_ENV) {
            self.supabase.url = Some(url);
        }
        if let Some(key) = get(SUPABASE_ANON_KEY_ENV) {
            self.supabase.anon_key = Some(key);
        }
    }

    /// Load with defaults only (no files).
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            supabase: SupabaseConfig::default(),
        }
    }

    /// Validate config values, fixing what can be fixed and logging warnings.
    /// Lenient: repairs values instead of rejecting the config.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        let url = self.api.url.trim();
        if url.is_empty() {
            warnings.push(format!("api.url is empty, using {}", default_api_url()));
            self.api.url = default_api_url();
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(format!("api.url '{url}' has no scheme, assuming http://"));
            self.api.url = format!("http://{url}");
        }

        let trimmed = self.api.url.trim().trim_end_matches('/').to_string();
        self.api.url = trimmed;

        if let Some(ref path) = self.storage.token_path {
            if path.trim().is_empty() {
                warnings.push("storage.token_path is empty, using default".to_string());
                self.storage.token_path = None;
            }
        }

        for w in &warnings {
            tracing::warn!("config: {}", w);
        }

        warnings
    }

    /// Resolved location of the token file. `None` when no config dir exists.
    pub fn token_path(&self) -> Option<PathBuf> {
        match &self.storage.token_path {
            Some(p) => Some(PathBuf::from(p)),
            None => default_token_path(),
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
}

/// Default token path: `~/.config/anxiety-ally/token`
pub fn default_token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR).join("token"))
}
