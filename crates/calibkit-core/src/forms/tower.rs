//! Start/end/step tower forms
//!
//! Max volumetric speed, VFA and retraction towers share the same three
//! fields and differ only in their defaults and policy.

use super::{format_value, CalibrationForm};
use crate::error::ParseError;
use crate::params::{CalibMode, CalibParams};
use crate::parse::parse_f64;

#[derive(Debug, Clone, PartialEq)]
pub struct TowerForm {
    mode: CalibMode,
    pub start: String,
    pub end: String,
    pub step: String,
}

impl TowerForm {
    fn with_defaults(mode: CalibMode, start: f64, end: f64, step: f64) -> Self {
        Self {
            mode,
            start: format_value(start),
            end: format_value(end),
            step: format_value(step),
        }
    }

    /// Volumetric speed tower, mm³/s.
    pub fn max_volumetric_speed() -> Self {
        Self::with_defaults(CalibMode::VolSpeedTower, 5.0, 20.0, 0.5)
    }

    /// VFA tower, mm/s.
    pub fn vfa() -> Self {
        Self::with_defaults(CalibMode::VfaTower, 40.0, 200.0, 10.0)
    }

    /// Retraction tower, mm.
    pub fn retraction() -> Self {
        Self::with_defaults(CalibMode::RetractionTower, 0.0, 2.0, 0.1)
    }
}

impl CalibrationForm for TowerForm {
    fn mode(&self) -> CalibMode {
        self.mode
    }

    fn parse(&self) -> Result<CalibParams, ParseError> {
        Ok(CalibParams::new(self.mode).with_range(
            parse_f64("start", &self.start)?,
            parse_f64("end", &self.end)?,
            parse_f64("step", &self.step)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_text() {
        let form = TowerForm::max_volumetric_speed();
        assert_eq!((form.start.as_str(), form.end.as_str(), form.step.as_str()), ("5", "20", "0.5"));

        let form = TowerForm::retraction();
        assert_eq!(form.step, "0.1");
        assert_eq!(form.mode(), CalibMode::RetractionTower);
    }

    #[test]
    fn test_parse_reports_first_bad_field() {
        let mut form = TowerForm::vfa();
        form.end = "fast".to_string();
        form.step = "".to_string();
        assert_eq!(form.parse().unwrap_err().field, "end");
    }
}
