//! Calibration parameter record
//!
//! A single record type is shared by every calibration test; which fields are
//! meaningful depends on [`CalibMode`]. Records are transient: built when a
//! form is confirmed, validated, then handed to the executor once.

use serde::{Deserialize, Serialize};

/// Calibration test type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibMode {
    /// Pressure advance, tower geometry
    PaTower,
    /// Pressure advance, line geometry
    PaLine,
    /// Pressure advance, pattern geometry
    PaPattern,
    /// Temperature tower
    TempTower,
    /// Max volumetric speed tower
    VolSpeedTower,
    /// Vertical fine artifacts tower
    VfaTower,
    /// Retraction tower
    RetractionTower,
    /// Input shaping frequency sweep
    InputShapingFreq,
    /// Input shaping damping sweep
    InputShapingDamp,
    /// Junction deviation sweep
    JunctionDeviation,
}

impl CalibMode {
    /// Every mode, in menu order.
    pub const ALL: [CalibMode; 10] = [
        Self::PaTower,
        Self::PaLine,
        Self::PaPattern,
        Self::TempTower,
        Self::VolSpeedTower,
        Self::VfaTower,
        Self::RetractionTower,
        Self::InputShapingFreq,
        Self::InputShapingDamp,
        Self::JunctionDeviation,
    ];

    /// True for the three pressure-advance geometries.
    pub fn is_pressure_advance(&self) -> bool {
        matches!(self, Self::PaTower | Self::PaLine | Self::PaPattern)
    }
}

impl std::fmt::Display for CalibMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PaTower => write!(f, "PA tower"),
            Self::PaLine => write!(f, "PA line"),
            Self::PaPattern => write!(f, "PA pattern"),
            Self::TempTower => write!(f, "Temperature tower"),
            Self::VolSpeedTower => write!(f, "Max volumetric speed tower"),
            Self::VfaTower => write!(f, "VFA tower"),
            Self::RetractionTower => write!(f, "Retraction tower"),
            Self::InputShapingFreq => write!(f, "Input shaping frequency test"),
            Self::InputShapingDamp => write!(f, "Input shaping damping test"),
            Self::JunctionDeviation => write!(f, "Junction deviation test"),
        }
    }
}

impl std::str::FromStr for CalibMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "pa_tower" => Ok(Self::PaTower),
            "pa_line" => Ok(Self::PaLine),
            "pa_pattern" => Ok(Self::PaPattern),
            "temp_tower" | "temp" => Ok(Self::TempTower),
            "vol_speed_tower" | "vol_speed" => Ok(Self::VolSpeedTower),
            "vfa_tower" | "vfa" => Ok(Self::VfaTower),
            "retraction_tower" | "retraction" => Ok(Self::RetractionTower),
            "input_shaping_freq" | "is_freq" => Ok(Self::InputShapingFreq),
            "input_shaping_damp" | "is_damp" => Ok(Self::InputShapingDamp),
            "junction_deviation" | "jd" => Ok(Self::JunctionDeviation),
            _ => Err(format!("Unknown calibration mode: {}", s.trim())),
        }
    }
}

/// Test model printed by the input shaping and junction deviation tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestModel {
    #[default]
    RingingTower,
    FastTower,
}

impl std::fmt::Display for TestModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RingingTower => write!(f, "Ringing Tower"),
            Self::FastTower => write!(f, "Fast Tower"),
        }
    }
}

impl std::str::FromStr for TestModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ringing" | "ringing-tower" | "ringing_tower" => Ok(Self::RingingTower),
            "fast" | "fast-tower" | "fast_tower" => Ok(Self::FastTower),
            other => Err(format!("Unknown test model: {}", other)),
        }
    }
}

/// Parameters for one calibration run.
///
/// Generic slots are reused per mode:
/// - `start`/`end`/`step`: PA value, °C, mm³/s, mm/s, mm, damping factor or mm
/// - input shaping frequency: the damping factor lives in `start`
/// - input shaping damping: the X/Y frequencies live in `freq_start_x`/`freq_start_y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibParams {
    pub mode: CalibMode,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    /// Print PA values next to each line (PA line/pattern)
    pub print_numbers: bool,
    /// Accelerations to test, mm/s² (PA pattern)
    pub accelerations: Vec<u32>,
    /// Speeds to test, mm/s (PA pattern)
    pub speeds: Vec<u32>,
    pub freq_start_x: f64,
    pub freq_end_x: f64,
    pub freq_start_y: f64,
    pub freq_end_y: f64,
    pub test_model: TestModel,
}

impl CalibParams {
    /// Empty record for a mode; every numeric slot is zero.
    pub fn new(mode: CalibMode) -> Self {
        Self {
            mode,
            start: 0.0,
            end: 0.0,
            step: 0.0,
            print_numbers: false,
            accelerations: Vec::new(),
            speeds: Vec::new(),
            freq_start_x: 0.0,
            freq_end_x: 0.0,
            freq_start_y: 0.0,
            freq_end_y: 0.0,
            test_model: TestModel::default(),
        }
    }

    /// Set start/end/step in one go.
    pub fn with_range(mut self, start: f64, end: f64, step: f64) -> Self {
        self.start = start;
        self.end = end;
        self.step = step;
        self
    }
}

/// A record that passed its mode's policy.
///
/// Only [`crate::policy::validate`] constructs this type, so anything an
/// executor receives has been checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedParams(CalibParams);

impl ValidatedParams {
    pub(crate) fn new(params: CalibParams) -> Self {
        Self(params)
    }

    pub fn mode(&self) -> CalibMode {
        self.0.mode
    }

    pub fn params(&self) -> &CalibParams {
        &self.0
    }

    pub fn into_inner(self) -> CalibParams {
        self.0
    }
}

impl std::ops::Deref for ValidatedParams {
    type Target = CalibParams;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let p = CalibParams::new(CalibMode::VfaTower);
        assert_eq!(p.mode, CalibMode::VfaTower);
        assert_eq!(p.start, 0.0);
        assert!(p.accelerations.is_empty());
        assert_eq!(p.test_model, TestModel::RingingTower);
    }

    #[test]
    fn test_pressure_advance_modes() {
        let pa: Vec<_> = CalibMode::ALL
            .iter()
            .filter(|m| m.is_pressure_advance())
            .collect();
        assert_eq!(pa.len(), 3);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("pa-line".parse::<CalibMode>().unwrap(), CalibMode::PaLine);
        assert_eq!("jd".parse::<CalibMode>().unwrap(), CalibMode::JunctionDeviation);
        assert!("speed".parse::<CalibMode>().is_err());
    }

    #[test]
    fn test_mode_serializes_snake_case() {
        let json = serde_json::to_string(&CalibMode::InputShapingFreq).unwrap();
        assert_eq!(json, "\"input_shaping_freq\"");
    }
}
