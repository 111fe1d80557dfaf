//! Configuration file support for Ascend.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/ascend/config.toml`.

use crate::{EquipmentKind, Error, FitnessLevel, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub equipment: EquipmentConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub progression: ProgressionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Equipment available when no saved inventory exists yet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EquipmentConfig {
    #[serde(default = "default_equipment")]
    pub available: Vec<EquipmentKind>,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            available: default_equipment(),
        }
    }
}

/// Training defaults
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TrainingConfig {
    #[serde(default)]
    pub fitness_level: FitnessLevel,
}

/// Experience reward parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressionConfig {
    #[serde(default = "default_strength_xp_multiplier")]
    pub strength_xp_multiplier: u64,

    #[serde(default = "default_endurance_xp_multiplier")]
    pub endurance_xp_multiplier: u64,

    #[serde(default = "default_xp_per_exercise")]
    pub xp_per_exercise: u64,

    /// Weight units per experience point when recording a workout
    #[serde(default = "default_weight_per_xp")]
    pub weight_per_xp: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            strength_xp_multiplier: default_strength_xp_multiplier(),
            endurance_xp_multiplier: default_endurance_xp_multiplier(),
            xp_per_exercise: default_xp_per_exercise(),
            weight_per_xp: default_weight_per_xp(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ascend")
}

fn default_equipment() -> Vec<EquipmentKind> {
    vec![EquipmentKind::Dumbbells, EquipmentKind::PullUpBar]
}

fn default_strength_xp_multiplier() -> u64 {
    10
}

fn default_endurance_xp_multiplier() -> u64 {
    8
}

fn default_xp_per_exercise() -> u64 {
    50
}

fn default_weight_per_xp() -> f64 {
    10.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ascend")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let weight_per_xp = self.progression.weight_per_xp;
        if !weight_per_xp.is_finite() || weight_per_xp <= 0.0 {
            return Err(Error::Config(format!(
                "progression.weight_per_xp must be positive, got {}",
                weight_per_xp
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
