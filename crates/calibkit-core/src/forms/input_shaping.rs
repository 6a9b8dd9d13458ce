//! Input shaping forms
//!
//! The frequency test sweeps X/Y frequency ranges at a fixed damping factor;
//! the damping test sweeps damping at fixed X/Y frequencies.

use super::CalibrationForm;
use crate::error::ParseError;
use crate::params::{CalibMode, CalibParams, TestModel};
use crate::parse::parse_f64;

#[derive(Debug, Clone, PartialEq)]
pub struct InputShapingFreqForm {
    pub test_model: TestModel,
    pub start_x: String,
    pub end_x: String,
    pub start_y: String,
    pub end_y: String,
    /// 0 keeps the printer's configured or last saved damping.
    pub damping: String,
}

impl Default for InputShapingFreqForm {
    fn default() -> Self {
        Self {
            test_model: TestModel::RingingTower,
            start_x: "15".to_string(),
            end_x: "110".to_string(),
            start_y: "15".to_string(),
            end_y: "110".to_string(),
            damping: format!("{:.3}", 0.15),
        }
    }
}

impl CalibrationForm for InputShapingFreqForm {
    fn mode(&self) -> CalibMode {
        CalibMode::InputShapingFreq
    }

    fn parse(&self) -> Result<CalibParams, ParseError> {
        let mut params = CalibParams::new(self.mode());
        params.freq_start_x = parse_f64("freq_start_x", &self.start_x)?;
        params.freq_end_x = parse_f64("freq_end_x", &self.end_x)?;
        params.freq_start_y = parse_f64("freq_start_y", &self.start_y)?;
        params.freq_end_y = parse_f64("freq_end_y", &self.end_y)?;
        params.start = parse_f64("damping", &self.damping)?;
        params.test_model = self.test_model;
        Ok(params)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputShapingDampForm {
    pub test_model: TestModel,
    /// Previously measured X frequency, Hz
    pub freq_x: String,
    /// Previously measured Y frequency, Hz
    pub freq_y: String,
    pub damping_start: String,
    pub damping_end: String,
}

impl Default for InputShapingDampForm {
    fn default() -> Self {
        Self {
            test_model: TestModel::RingingTower,
            freq_x: "30".to_string(),
            freq_y: "30".to_string(),
            damping_start: format!("{:.3}", 0.0),
            damping_end: format!("{:.3}", 0.4),
        }
    }
}

impl CalibrationForm for InputShapingDampForm {
    fn mode(&self) -> CalibMode {
        CalibMode::InputShapingDamp
    }

    fn parse(&self) -> Result<CalibParams, ParseError> {
        let mut params = CalibParams::new(self.mode());
        params.freq_start_x = parse_f64("freq_x", &self.freq_x)?;
        params.freq_start_y = parse_f64("freq_y", &self.freq_y)?;
        params.start = parse_f64("damping_start", &self.damping_start)?;
        params.end = parse_f64("damping_end", &self.damping_end)?;
        params.test_model = self.test_model;
        Ok(params)
    }
}
