//! # calibkit Core
//!
//! Parameter handling for 3D printer calibration tests.
//!
//! ## Modules
//!
//! - **params** - The calibration record and its mode tag
//! - **parse** - Field text to number conversion, including the positive-integer list reader
//! - **policy** - Per-test range and ordering rules
//! - **presets** - Filament temperature presets and pressure-advance defaults
//! - **executor** - The hand-off seam to whatever runs the calibration
//! - **forms** - Presentation-free models of each calibration dialog
//!
//! A typical flow opens a form, lets the user edit its text fields, then
//! calls [`CalibrationForm::confirm`], which parses, validates and hands the
//! record to a [`CalibrationExecutor`] exactly once.

pub mod error;
pub mod executor;
pub mod forms;
pub mod params;
pub mod parse;
pub mod policy;
pub mod presets;

pub use error::{
    CalibError, CalibResult, CalibWarning, ConstraintClass, NumericKind, ParseError, RangeError,
};
pub use executor::CalibrationExecutor;
pub use forms::{
    default_form, CalibrationForm, InputShapingDampForm, InputShapingFreqForm,
    JunctionDeviationForm, PressureAdvanceForm, Submission, TemperatureField, TemperatureForm,
    TowerForm,
};
pub use params::{CalibMode, CalibParams, TestModel, ValidatedParams};
pub use policy::{validate, Validation};
pub use presets::{pa_defaults, ExtruderType, FilamentType, PaDefaults, PaMethod};
