use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::model::SearchLimits;
use crate::provider::ServiceId;

/// Stored credentials for a single keyed service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [services.openweather]
    /// api_key = "..."
    pub services: HashMap<String, ServiceConfig>,

    /// Optional [search] table overriding result-count and radius tunables.
    #[serde(default)]
    pub search: SearchLimits,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "trip-planner", "trip-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace the stored API key for a service.
    pub fn upsert_service_api_key(&mut self, id: ServiceId, api_key: String) {
        self.services.insert(id.as_str().to_string(), ServiceConfig { api_key });
    }

    /// Returns the stored API key for a service, if present.
    pub fn stored_api_key(&self, id: ServiceId) -> Option<&str> {
        self.services.get(id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    /// Resolve the credential for a keyed service: the service's environment
    /// variable wins over the stored key. `None` for unkeyed services and
    /// for keys that are simply absent; absence only fails at call time.
    pub fn credential(&self, id: ServiceId) -> Option<String> {
        if let Some(var) = id.env_var() {
            if let Ok(value) = env::var(var) {
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }

        self.stored_api_key(id).map(str::to_string)
    }

    pub fn is_service_configured(&self, id: ServiceId) -> bool {
        self.credential(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_and_read_back_api_key() {
        let mut cfg = Config::default();

        cfg.upsert_service_api_key(ServiceId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.stored_api_key(ServiceId::OpenWeather), Some("OPEN_KEY"));
        assert!(cfg.is_service_configured(ServiceId::OpenWeather));
        assert!(!cfg.is_service_configured(ServiceId::AviationStack));
    }

    #[test]
    fn upsert_replaces_existing_key() {
        let mut cfg = Config::default();

        cfg.upsert_service_api_key(ServiceId::Groq, "OLD".into());
        cfg.upsert_service_api_key(ServiceId::Groq, "NEW".into());

        assert_eq!(cfg.stored_api_key(ServiceId::Groq), Some("NEW"));
    }

    #[test]
    fn credential_falls_back_to_stored_key() {
        // AVIATIONSTACK_API_KEY is not set in the test environment.
        let mut cfg = Config::default();
        cfg.upsert_service_api_key(ServiceId::AviationStack, "FILE_KEY".into());

        assert_eq!(cfg.credential(ServiceId::AviationStack), Some("FILE_KEY".to_string()));
    }

    #[test]
    fn environment_variable_overrides_stored_key() {
        let mut cfg = Config::default();
        cfg.upsert_service_api_key(ServiceId::OpenWeather, "FILE_KEY".into());

        // Environment mutation is process-global; no other test touches
        // OPENWEATHER_API_KEY.
        unsafe { env::set_var("OPENWEATHER_API_KEY", "ENV_KEY") };
        let resolved = cfg.credential(ServiceId::OpenWeather);
        unsafe { env::remove_var("OPENWEATHER_API_KEY") };

        assert_eq!(resolved, Some("ENV_KEY".to_string()));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.upsert_service_api_key(ServiceId::Groq, "KEY".into());
        cfg.search.max_hotels = 5;

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.stored_api_key(ServiceId::Groq), Some("KEY"));
        assert_eq!(parsed.search.max_hotels, 5);
        assert_eq!(parsed.search.max_flights, 3);
    }

    #[test]
    fn search_table_is_optional_in_config_file() {
        let parsed: Config = toml::from_str(
            r#"
            [services.openweather]
            api_key = "K"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.search, SearchLimits::default());
    }
}
