//! calibkit Settings Crate
//!
//! Handles persisted form defaults: which extruder, method, filament and test
//! models each calibration form opens with, plus logging preferences.

pub mod config;
pub mod error;

pub use config::{
    Config, InputShapingSettings, JunctionDeviationSettings, LoggingSettings,
    PressureAdvanceSettings, TemperatureSettings,
};
pub use error::{SettingsError, SettingsResult};
