use serde::{Deserialize, Serialize};

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Name of the automation target application.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Periodic refresh interval in milliseconds.
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
    /// One-shot delay between a transport command and the accelerated
    /// re-query.  Short enough to feel instant, long enough for the
    /// player state to settle before we read it back.
    #[serde(default = "default_refresh_soon_ms")]
    pub refresh_soon_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            refresh_ms: default_refresh_ms(),
            refresh_soon_ms: default_refresh_soon_ms(),
        }
    }
}

fn default_app_name() -> String {
    "Spotify".to_string()
}

fn default_refresh_ms() -> u64 {
    5000
}

fn default_refresh_soon_ms() -> u64 {
    50
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> std::path::PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.player.app_name, "Spotify");
        assert_eq!(config.polling.refresh_ms, 5000);
        assert_eq!(config.polling.refresh_soon_ms, 50);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[polling]\nrefresh_ms = 1000\n").unwrap();
        assert_eq!(config.polling.refresh_ms, 1000);
        assert_eq!(config.polling.refresh_soon_ms, 50);
        assert_eq!(config.player.app_name, "Spotify");
    }
}
