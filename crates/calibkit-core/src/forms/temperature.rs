//! Temperature tower form

use super::CalibrationForm;
use crate::error::{CalibWarning, ParseError};
use crate::params::{CalibMode, CalibParams};
use crate::parse::parse_u32;
use crate::policy::{TEMP_MAX, TEMP_MIN, TEMP_STEP};
use crate::presets::FilamentType;
use tracing::debug;

/// Editable temperature fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureField {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureForm {
    filament: FilamentType,
    /// Start temperature, °C
    pub start: String,
    /// End temperature, °C
    pub end: String,
}

impl Default for TemperatureForm {
    fn default() -> Self {
        Self::new(FilamentType::default())
    }
}

impl TemperatureForm {
    pub fn new(filament: FilamentType) -> Self {
        let (start, end) = filament.temperature_preset();
        Self {
            filament,
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn filament(&self) -> FilamentType {
        self.filament
    }

    /// Select a filament; both fields are overwritten with its preset.
    pub fn set_filament(&mut self, filament: FilamentType) {
        let (start, end) = filament.temperature_preset();
        self.filament = filament;
        self.start = start.to_string();
        self.end = end.to_string();
        debug!(%filament, start, end, "temperature preset applied");
    }

    /// Normalize a field after it loses focus.
    ///
    /// Unparsable text is left alone. Otherwise the value is clamped to the
    /// supported range and snapped to the 5 °C grid.
    pub fn on_field_exit(&mut self, field: TemperatureField) -> Option<CalibWarning> {
        let text = match field {
            TemperatureField::Start => &mut self.start,
            TemperatureField::End => &mut self.end,
        };
        let value = text.trim().parse::<u32>().ok()?;
        let (normalized, warning) = normalize_temperature(value);
        *text = normalized.to_string();
        warning
    }
}

/// Clamp to 170..=350 °C, then round to the nearest multiple of 5.
pub fn normalize_temperature(value: u32) -> (u32, Option<CalibWarning>) {
    let clamped = value.clamp(TEMP_MIN, TEMP_MAX);
    let warning = (clamped != value).then_some(CalibWarning::TemperatureClamped {
        entered: value,
        clamped,
    });
    let rounded = (clamped + TEMP_STEP / 2) / TEMP_STEP * TEMP_STEP;
    (rounded, warning)
}

impl CalibrationForm for TemperatureForm {
    fn mode(&self) -> CalibMode {
        CalibMode::TempTower
    }

    fn parse(&self) -> Result<CalibParams, ParseError> {
        let start = parse_u32("start", &self.start)?;
        let end = parse_u32("end", &self.end)?;
        Ok(CalibParams::new(CalibMode::TempTower).with_range(
            f64::from(start),
            f64::from(end),
            f64::from(TEMP_STEP),
        ))
    }
}
