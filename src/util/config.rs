use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "campsite-info";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Comment auto-refresh period; 0 disables it.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_image_panel")]
    pub image_panel_percent: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:3001/".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_refresh_interval() -> u64 {
    300
}
fn default_image_panel() -> u16 {
    45
}
fn default_cache_ttl() -> u64 {
    600
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            image_panel_percent: default_image_panel(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            dir: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ViewConfig {
    /// Width share of the image panel, kept within 20..=80 so both panels stay visible.
    pub fn image_panel_percent(&self) -> u16 {
        self.image_panel_percent.clamp(20, 80)
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return read_config(path);
        }

        let mut candidates = Vec::new();

        // ~/.config/campsite-info/config.toml first, on every platform
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(
                PathBuf::from(home)
                    .join(".config")
                    .join(APP_NAME)
                    .join("config.toml"),
            );
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        match candidates.iter().find(|p| p.exists()) {
            Some(path) => read_config(path),
            None => Ok(AppConfig::default()),
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.cache.dir {
            return dir.clone();
        }
        ProjectDirs::from("", "", APP_NAME)
            .map(|d| d.cache_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".cache").join(APP_NAME))
    }

    pub fn log_dir(&self) -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from(".local/share").join(APP_NAME).join("logs"))
    }
}
