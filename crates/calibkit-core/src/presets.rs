//! Preset tables
//!
//! This module provides:
//! - Filament type to temperature tower start/end lookup
//! - Pressure-advance defaults by extruder type and test method

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Filament types offered by the temperature tower form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilamentType {
    #[default]
    Pla,
    AbsAsa,
    Petg,
    Pctg,
    Tpu,
    PaCf,
    PetCf,
    Custom,
}

impl FilamentType {
    /// Every filament type, in selector order.
    pub const ALL: [FilamentType; 8] = [
        Self::Pla,
        Self::AbsAsa,
        Self::Petg,
        Self::Pctg,
        Self::Tpu,
        Self::PaCf,
        Self::PetCf,
        Self::Custom,
    ];

    /// Default `(start, end)` temperatures in °C.
    pub fn temperature_preset(&self) -> (u32, u32) {
        match self {
            Self::AbsAsa => (270, 230),
            Self::Petg => (250, 230),
            Self::Pctg => (280, 240),
            Self::Tpu => (240, 210),
            Self::PaCf | Self::PetCf => (320, 280),
            Self::Pla | Self::Custom => (230, 190),
        }
    }
}

impl std::fmt::Display for FilamentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pla => write!(f, "PLA"),
            Self::AbsAsa => write!(f, "ABS/ASA"),
            Self::Petg => write!(f, "PETG"),
            Self::Pctg => write!(f, "PCTG"),
            Self::Tpu => write!(f, "TPU"),
            Self::PaCf => write!(f, "PA-CF"),
            Self::PetCf => write!(f, "PET-CF"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

impl FromStr for FilamentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pla" => Ok(Self::Pla),
            "abs" | "asa" | "abs/asa" | "abs-asa" => Ok(Self::AbsAsa),
            "petg" => Ok(Self::Petg),
            "pctg" => Ok(Self::Pctg),
            "tpu" => Ok(Self::Tpu),
            "pa-cf" | "pacf" => Ok(Self::PaCf),
            "pet-cf" | "petcf" => Ok(Self::PetCf),
            "custom" => Ok(Self::Custom),
            other => Err(format!("Unknown filament type: {}", other)),
        }
    }
}

/// Extruder drive layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtruderType {
    /// Direct drive extruder
    #[default]
    Dde,
    /// Bowden extruder
    Bowden,
}

impl std::fmt::Display for ExtruderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dde => write!(f, "DDE"),
            Self::Bowden => write!(f, "Bowden"),
        }
    }
}

impl FromStr for ExtruderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dde" | "direct" => Ok(Self::Dde),
            "bowden" => Ok(Self::Bowden),
            other => Err(format!("Unknown extruder type: {}", other)),
        }
    }
}

/// Pressure-advance test geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaMethod {
    #[default]
    Tower,
    Line,
    Pattern,
}

impl PaMethod {
    pub fn mode(&self) -> crate::params::CalibMode {
        use crate::params::CalibMode;
        match self {
            Self::Tower => CalibMode::PaTower,
            Self::Line => CalibMode::PaLine,
            Self::Pattern => CalibMode::PaPattern,
        }
    }
}

impl std::fmt::Display for PaMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tower => write!(f, "PA Tower"),
            Self::Line => write!(f, "PA Line"),
            Self::Pattern => write!(f, "PA Pattern"),
        }
    }
}

impl FromStr for PaMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tower" => Ok(Self::Tower),
            "line" => Ok(Self::Line),
            "pattern" => Ok(Self::Pattern),
            other => Err(format!("Unknown PA method: {}", other)),
        }
    }
}

/// Field contents and enablement the PA form resets to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaDefaults {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub print_numbers: bool,
    /// Whether the user may toggle `print_numbers`
    pub print_numbers_editable: bool,
    /// Whether the acceleration and speed lists are editable
    pub lists_editable: bool,
}

/// Defaults for a given extruder and method.
pub fn pa_defaults(extruder: ExtruderType, method: PaMethod) -> PaDefaults {
    let mut defaults = match method {
        PaMethod::Tower => PaDefaults {
            start: 0.0,
            end: 0.1,
            step: 0.002,
            print_numbers: false,
            print_numbers_editable: false,
            lists_editable: false,
        },
        PaMethod::Line => PaDefaults {
            start: 0.0,
            end: 0.1,
            step: 0.002,
            print_numbers: true,
            print_numbers_editable: true,
            lists_editable: false,
        },
        PaMethod::Pattern => PaDefaults {
            start: 0.0,
            end: 0.08,
            step: 0.005,
            print_numbers: true,
            print_numbers_editable: false,
            lists_editable: true,
        },
    };

    // Bowden setups need far more advance.
    if extruder == ExtruderType::Bowden {
        defaults.end = 1.0;
        defaults.step = if method == PaMethod::Pattern { 0.05 } else { 0.02 };
    }

    defaults
}
