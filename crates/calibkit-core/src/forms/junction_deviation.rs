//! Junction deviation form
//!
//! Lower values give sharper corners at slower speeds. An end value above
//! 0.3 mm is accepted with a layer-shift warning.

use super::CalibrationForm;
use crate::error::ParseError;
use crate::params::{CalibMode, CalibParams, TestModel};
use crate::parse::parse_f64;

#[derive(Debug, Clone, PartialEq)]
pub struct JunctionDeviationForm {
    pub test_model: TestModel,
    /// Start junction deviation, mm
    pub start: String,
    /// End junction deviation, mm
    pub end: String,
}

impl Default for JunctionDeviationForm {
    fn default() -> Self {
        Self {
            test_model: TestModel::FastTower,
            start: format!("{:.3}", 0.0),
            end: format!("{:.3}", 0.25),
        }
    }
}

impl CalibrationForm for JunctionDeviationForm {
    fn mode(&self) -> CalibMode {
        CalibMode::JunctionDeviation
    }

    fn parse(&self) -> Result<CalibParams, ParseError> {
        let mut params = CalibParams::new(self.mode());
        params.start = parse_f64("start", &self.start)?;
        params.end = parse_f64("end", &self.end)?;
        params.test_model = self.test_model;
        Ok(params)
    }
}
