//! Configuration for calibkit
//!
//! Stores the selector defaults each calibration form opens with. Supports
//! JSON and TOML files, by default in the platform config directory.
//!
//! Configuration is organized into sections:
//! - Pressure advance (extruder type, method)
//! - Temperature tower (filament type)
//! - Input shaping and junction deviation (test models)
//! - Logging

use crate::error::{SettingsError, SettingsResult};
use calibkit_core::{
    ExtruderType, FilamentType, InputShapingDampForm, InputShapingFreqForm,
    JunctionDeviationForm, PaMethod, PressureAdvanceForm, TemperatureForm, TestModel,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pressure advance form defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureAdvanceSettings {
    pub extruder_type: ExtruderType,
    pub method: PaMethod,
}

/// Temperature tower form defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureSettings {
    pub filament: FilamentType,
}

/// Input shaping form defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputShapingSettings {
    pub frequency_model: TestModel,
    pub damping_model: TestModel,
}

/// Junction deviation form defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JunctionDeviationSettings {
    pub test_model: TestModel,
}

impl Default for JunctionDeviationSettings {
    fn default() -> Self {
        Self {
            test_model: TestModel::FastTower,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pressure_advance: PressureAdvanceSettings,
    pub temperature: TemperatureSettings,
    pub input_shaping: InputShapingSettings,
    pub junction_deviation: JunctionDeviationSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// `<config dir>/calibkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("calibkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Load from `path` if given, else from the default path when it exists,
    /// else fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.logging.filter.trim().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "logging.filter".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn pressure_advance_form(&self) -> PressureAdvanceForm {
        PressureAdvanceForm::new(
            self.pressure_advance.extruder_type,
            self.pressure_advance.method,
        )
    }

    pub fn temperature_form(&self) -> TemperatureForm {
        TemperatureForm::new(self.temperature.filament)
    }

    pub fn input_shaping_freq_form(&self) -> InputShapingFreqForm {
        InputShapingFreqForm {
            test_model: self.input_shaping.frequency_model,
            ..Default::default()
        }
    }

    pub fn input_shaping_damp_form(&self) -> InputShapingDampForm {
        InputShapingDampForm {
            test_model: self.input_shaping.damping_model,
            ..Default::default()
        }
    }

    pub fn junction_deviation_form(&self) -> JunctionDeviationForm {
        JunctionDeviationForm {
            test_model: self.junction_deviation.test_model,
            ..Default::default()
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
