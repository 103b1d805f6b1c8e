use std::path::PathBuf;

use stepgrid_core::GridConfig;

#[derive(serde::Serialize, serde::Deserialize, Default)]
pub(super) struct AppConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub(super) struct HostConfig {
    pub bpm: f64,
    /// Undelivered position messages kept before new ones are dropped
    pub message_capacity: usize,
    /// Used by the simulated host when no audio device opens
    pub fallback_sample_rate: u32,
    pub block_size: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            message_capacity: 64,
            fallback_sample_rate: 48000,
            block_size: 512,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ThemeConfig {
    pub left_color: [u8; 3],
    pub right_color: [u8; 3],
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            left_color: [66, 245, 66],
            right_color: [66, 245, 200],
        }
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join("stepgrid")
}

pub(super) fn config_path() -> PathBuf {
    app_dir(dirs::config_dir()).join("config.toml")
}

/// Saved grid bars, in the binary state format
pub(super) fn state_path() -> PathBuf {
    app_dir(dirs::data_dir()).join("grid.state")
}

pub(super) fn load_config() -> AppConfig {
    let path = config_path();
    let Ok(text) = std::fs::read_to_string(&path) else {
        tracing::debug!("No config at {}, using defaults", path.display());
        return AppConfig::default();
    };
    parse_config(&text).unwrap_or_else(|e| {
        tracing::warn!("Malformed config {}, using defaults: {}", path.display(), e);
        AppConfig::default()
    })
}

fn parse_config(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}

pub(super) fn save_config(config: &AppConfig) {
    let path = config_path();
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }
    let text = match toml::to_string_pretty(config) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to serialize config: {}", e);
            return;
        }
    };
    match std::fs::write(&path, text) {
        Ok(()) => tracing::debug!("Saved config to {}", path.display()),
        Err(e) => tracing::error!("Failed to write config {}: {}", path.display(), e),
    }
}
