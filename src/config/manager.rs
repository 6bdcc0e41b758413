use super::{evolution::EvolutionConfig, schedule::ScheduleConfig, traits::ConfigSection};
use crate::error::PlannerError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment prefix for overrides, e.g. `WEEKPLAN__EVOLUTION__GEN_COUNT=500`
pub const ENV_PREFIX: &str = "WEEKPLAN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), PlannerError> {
        self.evolution.validate()?;
        self.schedule.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML file, layering environment overrides on top
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PlannerError> {
        let config: AppConfig = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!(
            "Loaded {} and {} sections from {}",
            EvolutionConfig::section_name(),
            ScheduleConfig::section_name(),
            path.as_ref().display()
        );

        *self.write()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PlannerError> {
        let toml_str = toml::to_string_pretty(&*self.read()?)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, PlannerError> {
        Ok(self.read()?.clone())
    }

    /// Apply `f` and keep the result only if it still validates
    pub fn update<F>(&self, f: F) -> Result<(), PlannerError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.write()?;
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, AppConfig>, PlannerError> {
        self.config
            .read()
            .map_err(|_| PlannerError::Configuration("config lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, PlannerError> {
        self.config
            .write()
            .map_err(|_| PlannerError::Configuration("config lock poisoned".to_string()))
    }
}
