//! Pressure advance form
//!
//! Extruder type and method selectors drive the default field contents and
//! which optional controls are editable. Any selection change, and reopening
//! the form, resets the numeric fields.

use super::{format_value, CalibrationForm};
use crate::error::ParseError;
use crate::params::{CalibMode, CalibParams};
use crate::parse::{parse_f64, parse_positive_ints};
use crate::presets::{pa_defaults, ExtruderType, PaMethod};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct PressureAdvanceForm {
    extruder: ExtruderType,
    method: PaMethod,
    /// Start PA
    pub start: String,
    /// End PA
    pub end: String,
    /// PA step
    pub step: String,
    print_numbers: bool,
    accelerations: String,
    speeds: String,
    print_numbers_editable: bool,
    lists_editable: bool,
}

impl Default for PressureAdvanceForm {
    fn default() -> Self {
        Self::new(ExtruderType::default(), PaMethod::default())
    }
}

impl PressureAdvanceForm {
    pub fn new(extruder: ExtruderType, method: PaMethod) -> Self {
        let mut form = Self {
            extruder,
            method,
            start: String::new(),
            end: String::new(),
            step: String::new(),
            print_numbers: false,
            accelerations: String::new(),
            speeds: String::new(),
            print_numbers_editable: false,
            lists_editable: false,
        };
        form.reset();
        form
    }

    /// Restore the defaults for the current extruder and method.
    ///
    /// The acceleration and speed lists keep whatever text they hold.
    pub fn reset(&mut self) {
        let d = pa_defaults(self.extruder, self.method);
        self.start = format_value(d.start);
        self.end = format_value(d.end);
        self.step = format_value(d.step);
        self.print_numbers = d.print_numbers;
        self.print_numbers_editable = d.print_numbers_editable;
        self.lists_editable = d.lists_editable;
        debug!(extruder = %self.extruder, method = %self.method, "PA form reset");
    }

    /// Called when the form is shown again.
    pub fn on_show(&mut self) {
        self.reset();
    }

    pub fn set_extruder_type(&mut self, extruder: ExtruderType) {
        self.extruder = extruder;
        self.reset();
    }

    pub fn set_method(&mut self, method: PaMethod) {
        self.method = method;
        self.reset();
    }

    pub fn extruder_type(&self) -> ExtruderType {
        self.extruder
    }

    pub fn method(&self) -> PaMethod {
        self.method
    }

    pub fn print_numbers(&self) -> bool {
        self.print_numbers
    }

    pub fn print_numbers_editable(&self) -> bool {
        self.print_numbers_editable
    }

    pub fn lists_editable(&self) -> bool {
        self.lists_editable
    }

    pub fn accelerations(&self) -> &str {
        &self.accelerations
    }

    pub fn speeds(&self) -> &str {
        &self.speeds
    }

    /// Toggle number printing. Returns false when the control is disabled.
    pub fn set_print_numbers(&mut self, value: bool) -> bool {
        if !self.print_numbers_editable {
            return false;
        }
        self.print_numbers = value;
        true
    }

    /// Set the acceleration list text. Returns false when the control is disabled.
    pub fn set_accelerations(&mut self, text: &str) -> bool {
        if !self.lists_editable {
            return false;
        }
        self.accelerations = text.to_string();
        true
    }

    /// Set the speed list text. Returns false when the control is disabled.
    pub fn set_speeds(&mut self, text: &str) -> bool {
        if !self.lists_editable {
            return false;
        }
        self.speeds = text.to_string();
        true
    }
}

impl CalibrationForm for PressureAdvanceForm {
    fn mode(&self) -> CalibMode {
        self.method.mode()
    }

    fn parse(&self) -> Result<CalibParams, ParseError> {
        let mut params = CalibParams::new(self.mode()).with_range(
            parse_f64("start", &self.start)?,
            parse_f64("end", &self.end)?,
            parse_f64("step", &self.step)?,
        );
        params.print_numbers = self.print_numbers;
        params.accelerations = parse_positive_ints(&self.accelerations);
        params.speeds = parse_positive_ints(&self.speeds);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_change_resets_fields() {
        let mut form = PressureAdvanceForm::default();
        form.end = "0.5".to_string();
        form.set_method(PaMethod::Pattern);
        assert_eq!(form.end, "0.08");
        assert_eq!(form.step, "0.005");
        assert_eq!(form.mode(), CalibMode::PaPattern);
    }

    #[test]
    fn test_disabled_controls_ignore_edits() {
        let mut form = PressureAdvanceForm::new(ExtruderType::Dde, PaMethod::Tower);
        assert!(!form.set_print_numbers(true));
        assert!(!form.set_accelerations("1000"));
        assert!(!form.print_numbers());

        form.set_method(PaMethod::Line);
        assert!(form.set_print_numbers(false));
        assert!(!form.print_numbers());
    }

    #[test]
    fn test_lists_survive_reset() {
        let mut form = PressureAdvanceForm::new(ExtruderType::Dde, PaMethod::Pattern);
        assert!(form.set_accelerations("1000, 2000"));
        form.set_extruder_type(ExtruderType::Bowden);
        assert_eq!(form.accelerations(), "1000, 2000");
        assert_eq!(form.end, "1");
        assert_eq!(form.step, "0.05");
    }
}
