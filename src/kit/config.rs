use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::infrastructure::environment::get_data_directory;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    pub version: String,
    pub cooldown_seconds: f64,
    pub kits: Vec<String>,
    /// Role required to request kits. `None` opens the command to everyone.
    pub required_role: Option<u64>,
    pub kit_service_url: String,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            cooldown_seconds: 30.0,
            kits: vec![
                "Resources".to_string(),
                "Components".to_string(),
                "Ammo".to_string(),
                "Food".to_string(),
            ],
            required_role: None,
            kit_service_url: "http://127.0.0.1:8525".to_string(),
        }
    }
}

pub fn config_path() -> PathBuf {
    get_data_directory().join(CONFIG_FILE)
}

/// Startup entry point: ensures the data directory exists and returns the
/// loaded (or freshly created) configuration along with its path.
pub fn init_config() -> Result<(KitConfig, PathBuf)> {
    ensure_data_dir_created()?;
    let path = config_path();
    let config = load_or_create(&path)?;
    Ok((config, path))
}

fn ensure_data_dir_created() -> Result<()> {
    let path = get_data_directory();
    fs::create_dir_all(&path).context(format!("Failed to create data directory {:?}", path))
}

/// Loads the config file, migrating older versions, and writes the result
/// back so the stored file always matches the running version.
pub fn load_or_create(path: &Path) -> Result<KitConfig> {
    let config = match fs::read_to_string(path) {
        Ok(contents) => {
            let stored: KitConfig = serde_json::from_str(&contents)
                .context(format!("Failed to parse config file {:?}", path))?;
            migrate(stored)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No config file at {:?}, creating defaults", path);
            KitConfig::default()
        }
        Err(e) => return Err(e).context(format!("Failed to read config file {:?}", path)),
    };
    save(path, &config)?;
    Ok(config)
}

fn migrate(mut config: KitConfig) -> KitConfig {
    let current = env!("CARGO_PKG_VERSION");
    if config.version.as_str() >= current {
        return config;
    }

    warn!(
        "Config changes detected! Updating from version {} to {}",
        config.version, current
    );
    if config.version.as_str() < "1.0.0" {
        config = KitConfig::default();
    }
    config.version = current.to_string();
    config
}

pub fn save(path: &Path, config: &KitConfig) -> Result<()> {
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents).context(format!("Failed to write config file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_kit_list() {
        let config = KitConfig::default();
        assert_eq!(config.cooldown_seconds, 30.0);
        assert_eq!(config.kits, ["Resources", "Components", "Ammo", "Food"]);
        assert_eq!(config.required_role, None);
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: KitConfig =
            serde_json::from_str(r#"{"version": "1.0.0", "cooldown_seconds": 5.0}"#).unwrap();
        assert_eq!(config.cooldown_seconds, 5.0);
        assert_eq!(config.kits, KitConfig::default().kits);
    }

    #[test]
    fn pre_release_config_is_reset_to_defaults() {
        let stored = KitConfig {
            version: "0.9.2".to_string(),
            cooldown_seconds: 99.0,
            kits: vec!["Legacy".to_string()],
            ..KitConfig::default()
        };
        let migrated = migrate(stored);
        assert_eq!(migrated, KitConfig::default());
    }

    #[test]
    fn current_version_config_is_untouched() {
        let stored = KitConfig {
            cooldown_seconds: 12.5,
            kits: vec!["Custom".to_string()],
            ..KitConfig::default()
        };
        let migrated = migrate(stored.clone());
        assert_eq!(migrated, stored);
    }

    #[test]
    fn load_or_create_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!("kitbot-config-test-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        let created = load_or_create(&path).unwrap();
        assert_eq!(created, KitConfig::default());

        let mut edited = created;
        edited.cooldown_seconds = 7.0;
        save(&path, &edited).unwrap();
        let reloaded = load_or_create(&path).unwrap();
        assert_eq!(reloaded.cooldown_seconds, 7.0);

        let _ = fs::remove_file(&path);
    }
}
