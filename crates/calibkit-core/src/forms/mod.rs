//! Form models
//!
//! One form per calibration dialog. A form holds the raw text of each field
//! and the state of its selectors, and reproduces the dialog's event hooks
//! (selection changes, field exit, confirm) without any widget toolkit.

pub mod input_shaping;
pub mod junction_deviation;
pub mod pressure_advance;
pub mod temperature;
pub mod tower;

pub use input_shaping::{InputShapingDampForm, InputShapingFreqForm};
pub use junction_deviation::JunctionDeviationForm;
pub use pressure_advance::PressureAdvanceForm;
pub use temperature::{normalize_temperature, TemperatureField, TemperatureForm};
pub use tower::TowerForm;

use crate::error::{CalibError, CalibResult, CalibWarning, ParseError};
use crate::executor::CalibrationExecutor;
use crate::params::{CalibMode, CalibParams};
use crate::policy::{validate, Validation};
use crate::presets::{ExtruderType, PaMethod};
use serde::Serialize;
use tracing::{info, warn};

/// Result of a successful confirm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    /// Copy of the record handed to the executor
    pub params: CalibParams,
    /// Advisory notices raised while validating
    pub warnings: Vec<CalibWarning>,
}

/// Behavior shared by every calibration form.
pub trait CalibrationForm {
    /// The test this form configures.
    fn mode(&self) -> CalibMode;

    /// Read every field into a fresh record. Only parse failures are reported.
    fn parse(&self) -> Result<CalibParams, ParseError>;

    /// Parse, validate and hand the record to the executor.
    ///
    /// On failure nothing reaches the executor and the form is left as it was.
    fn confirm(&self, executor: &mut dyn CalibrationExecutor) -> CalibResult<Submission> {
        let mode = self.mode();
        let outcome = self
            .parse()
            .map_err(CalibError::from)
            .and_then(|params| validate(params).map_err(CalibError::from));

        let Validation { params, warnings } = match outcome {
            Ok(validation) => validation,
            Err(e) => {
                warn!(%mode, error = %e, "calibration parameters rejected");
                return Err(e);
            }
        };

        for warning in &warnings {
            warn!(%mode, "{}", warning);
        }

        let submission = Submission {
            params: params.params().clone(),
            warnings,
        };
        info!(%mode, "starting calibration");
        executor.execute(params);
        Ok(submission)
    }
}

/// A freshly opened form for the given test.
pub fn default_form(mode: CalibMode) -> Box<dyn CalibrationForm> {
    match mode {
        CalibMode::PaTower => Box::new(PressureAdvanceForm::new(ExtruderType::Dde, PaMethod::Tower)),
        CalibMode::PaLine => Box::new(PressureAdvanceForm::new(ExtruderType::Dde, PaMethod::Line)),
        CalibMode::PaPattern => {
            Box::new(PressureAdvanceForm::new(ExtruderType::Dde, PaMethod::Pattern))
        }
        CalibMode::TempTower => Box::new(TemperatureForm::default()),
        CalibMode::VolSpeedTower => Box::new(TowerForm::max_volumetric_speed()),
        CalibMode::VfaTower => Box::new(TowerForm::vfa()),
        CalibMode::RetractionTower => Box::new(TowerForm::retraction()),
        CalibMode::InputShapingFreq => Box::new(InputShapingFreqForm::default()),
        CalibMode::InputShapingDamp => Box::new(InputShapingDampForm::default()),
        CalibMode::JunctionDeviation => Box::new(JunctionDeviationForm::default()),
    }
}

/// Render a number the way the form fields display it (`0.1`, `2`, `0`).
pub(crate) fn format_value(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(0.1), "0.1");
        assert_eq!(format_value(0.002), "0.002");
        assert_eq!(format_value(1.0), "1");
    }

    #[test]
    fn test_default_form_modes() {
        for mode in CalibMode::ALL {
            assert_eq!(default_form(mode).mode(), mode);
        }
    }
}
