use super::{
    labelling::LabellingConfig, optimisation::OptimisationConfig, traits::ConfigSection,
};
use crate::error::{Result, TrendlabError};
use crate::returns::FeesConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub labelling: LabellingConfig,
    pub fees: FeesConfig,
    pub optimisation: OptimisationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            labelling: LabellingConfig::default(),
            fees: FeesConfig::default(),
            optimisation: OptimisationConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.labelling.validate()?;
        self.fees.validate()?;
        self.optimisation.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layered load: values from the file, overridden by any
    /// `TRENDLAB_`-prefixed environment variables (`__` separates nested
    /// keys, e.g. `TRENDLAB_LABELLING__OMEGA`).
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("TRENDLAB")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| TrendlabError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| TrendlabError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.config.read().unwrap();
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| TrendlabError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| TrendlabError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    /// Applies `f` to a copy of the config and commits it only if the
    /// result validates, so a rejected update leaves the old state intact.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap();
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}
