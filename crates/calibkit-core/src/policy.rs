//! Per-test validation policy
//!
//! [`validate`] dispatches on the record's [`CalibMode`] to one check function
//! per test. Checks run in a fixed order and the first failing predicate is
//! reported as a [`RangeError`].

use crate::error::{CalibWarning, ConstraintClass, RangeError};
use crate::params::{CalibMode, CalibParams, ValidatedParams};
use tracing::debug;

/// Smallest accepted pressure-advance step.
pub const PA_STEP_EPSILON: f64 = 1e-4;

/// Hottest supported temperature tower start, °C.
pub const TEMP_MAX: u32 = 350;

/// Coolest supported temperature tower end, °C.
pub const TEMP_MIN: u32 = 170;

/// Temperature tower step, °C. Start must exceed end by at least this much.
pub const TEMP_STEP: u32 = 5;

/// Upper frequency bound for input shaping tests, Hz.
pub const INPUT_SHAPING_MAX_FREQ: f64 = 500.0;

/// Junction deviation end above which a layer-shift warning is raised, mm.
pub const JD_WARN_THRESHOLD: f64 = 0.3;

const PA_EXPECTED: &str = "Start PA >= 0.0, PA step >= 0.0001, End PA >= Start PA + PA step";
const TEMP_EXPECTED: &str = "Start temp <= 350, End temp >= 170, Start temp >= End temp + 5";
const VOL_SPEED_EXPECTED: &str = "start > 0, step > 0, end >= start + step";
const VFA_EXPECTED: &str = "start > 10, step > 0, end >= start + step";
const RETRACTION_EXPECTED: &str = "start >= 0, step > 0, end >= start + step";
const IS_FREQ_EXPECTED: &str = "0 <= FreqStart < FreqEnd <= 500";
const IS_FREQ_DAMPING_EXPECTED: &str = "0 <= Damping/zeta factor < 1";
const IS_DAMP_FREQ_EXPECTED: &str = "0 <= Freq <= 500";
const IS_DAMP_EXPECTED: &str = "0 <= DampingStart < DampingEnd <= 1";
const JD_EXPECTED: &str = "0 <= Junction Deviation start < end < 1";

/// A record accepted by its policy, plus any advisory warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub params: ValidatedParams,
    pub warnings: Vec<CalibWarning>,
}

/// Check a fully parsed record against its mode's policy.
pub fn validate(params: CalibParams) -> Result<Validation, RangeError> {
    debug!(mode = %params.mode, start = params.start, end = params.end, step = params.step, "validating calibration parameters");

    let warnings = match params.mode {
        CalibMode::PaTower | CalibMode::PaLine | CalibMode::PaPattern => {
            check_pressure_advance(&params)?
        }
        CalibMode::TempTower => check_temperature(&params)?,
        CalibMode::VolSpeedTower => check_volumetric_speed(&params)?,
        CalibMode::VfaTower => check_vfa(&params)?,
        CalibMode::RetractionTower => check_retraction(&params)?,
        CalibMode::InputShapingFreq => check_input_shaping_freq(&params)?,
        CalibMode::InputShapingDamp => check_input_shaping_damp(&params)?,
        CalibMode::JunctionDeviation => check_junction_deviation(&params)?,
    };

    Ok(Validation {
        params: ValidatedParams::new(params),
        warnings,
    })
}

/// Fails with the given constraint unless `ok` holds.
fn require(
    ok: bool,
    mode: CalibMode,
    class: ConstraintClass,
    constraint: &'static str,
    expected: &'static str,
) -> Result<(), RangeError> {
    if ok {
        Ok(())
    } else {
        Err(RangeError {
            mode,
            class,
            constraint,
            expected,
        })
    }
}

fn check_pressure_advance(p: &CalibParams) -> Result<Vec<CalibWarning>, RangeError> {
    use ConstraintClass::*;
    let m = p.mode;
    require(p.start >= 0.0, m, Range, "start >= 0", PA_EXPECTED)?;
    require(p.step >= PA_STEP_EPSILON, m, Range, "step >= 0.0001", PA_EXPECTED)?;
    require(p.end >= p.start + p.step, m, Ordering, "end >= start + step", PA_EXPECTED)?;
    Ok(Vec::new())
}

fn check_temperature(p: &CalibParams) -> Result<Vec<CalibWarning>, RangeError> {
    use ConstraintClass::*;
    let m = p.mode;
    require(
        p.start.fract() == 0.0 && p.end.fract() == 0.0,
        m,
        Range,
        "whole degrees",
        TEMP_EXPECTED,
    )?;
    require(p.start <= f64::from(TEMP_MAX), m, Range, "start <= 350", TEMP_EXPECTED)?;
    require(p.end >= f64::from(TEMP_MIN), m, Range, "end >= 170", TEMP_EXPECTED)?;
    // Signed difference: a start below 5 must not wrap around.
    require(
        p.start - p.end >= f64::from(TEMP_STEP),
        m,
        Ordering,
        "start - end >= 5",
        TEMP_EXPECTED,
    )?;
    Ok(Vec::new())
}

/// Shared shape of the speed/flow/length towers: lower bound on start, positive step,
/// end at least one step above start.
fn check_stepped_tower(
    p: &CalibParams,
    start_ok: bool,
    start_constraint: &'static str,
    expected: &'static str,
) -> Result<Vec<CalibWarning>, RangeError> {
    use ConstraintClass::*;
    let m = p.mode;
    require(start_ok, m, Range, start_constraint, expected)?;
    require(p.step > 0.0, m, Range, "step > 0", expected)?;
    require(p.end >= p.start + p.step, m, Ordering, "end >= start + step", expected)?;
    Ok(Vec::new())
}

fn check_volumetric_speed(p: &CalibParams) -> Result<Vec<CalibWarning>, RangeError> {
    check_stepped_tower(p, p.start > 0.0, "start > 0", VOL_SPEED_EXPECTED)
}

fn check_vfa(p: &CalibParams) -> Result<Vec<CalibWarning>, RangeError> {
    check_stepped_tower(p, p.start > 10.0, "start > 10", VFA_EXPECTED)
}

fn check_retraction(p: &CalibParams) -> Result<Vec<CalibWarning>, RangeError> {
    check_stepped_tower(p, p.start >= 0.0, "start >= 0", RETRACTION_EXPECTED)
}

fn check_input_shaping_freq(p: &CalibParams) -> Result<Vec<CalibWarning>, RangeError> {
    use ConstraintClass::*;
    let m = p.mode;
    require(p.freq_start_x >= 0.0, m, Range, "freq_start_x >= 0", IS_FREQ_EXPECTED)?;
    require(
        p.freq_end_x <= INPUT_SHAPING_MAX_FREQ,
        m,
        Range,
        "freq_end_x <= 500",
        IS_FREQ_EXPECTED,
    )?;
    require(p.freq_start_y >= 0.0, m, Range, "freq_start_y >= 0", IS_FREQ_EXPECTED)?;
    require(
        p.freq_start_x < p.freq_end_x,
        m,
        Ordering,
        "freq_start_x < freq_end_x",
        IS_FREQ_EXPECTED,
    )?;
    require(
        p.freq_start_y < p.freq_end_y,
        m,
        Ordering,
        "freq_start_y < freq_end_y",
        IS_FREQ_EXPECTED,
    )?;

    // Damping factor rides in `start`.
    require(
        (0.0..1.0).contains(&p.start),
        m,
        Range,
        "0 <= damping < 1",
        IS_FREQ_DAMPING_EXPECTED,
    )?;
    Ok(Vec::new())
}

fn check_input_shaping_damp(p: &CalibParams) -> Result<Vec<CalibWarning>, RangeError> {
    use ConstraintClass::*;
    let m = p.mode;
    let freq_range = 0.0..=INPUT_SHAPING_MAX_FREQ;
    require(
        freq_range.contains(&p.freq_start_x),
        m,
        Range,
        "0 <= freq_x <= 500",
        IS_DAMP_FREQ_EXPECTED,
    )?;
    require(
        freq_range.contains(&p.freq_start_y),
        m,
        Range,
        "0 <= freq_y <= 500",
        IS_DAMP_FREQ_EXPECTED,
    )?;

    require(p.start >= 0.0, m, Range, "damping start >= 0", IS_DAMP_EXPECTED)?;
    require(p.end <= 1.0, m, Range, "damping end <= 1", IS_DAMP_EXPECTED)?;
    require(
        p.start < p.end,
        m,
        Ordering,
        "damping start < damping end",
        IS_DAMP_EXPECTED,
    )?;
    Ok(Vec::new())
}

fn check_junction_deviation(p: &CalibParams) -> Result<Vec<CalibWarning>, RangeError> {
    use ConstraintClass::*;
    let m = p.mode;
    require(p.start >= 0.0, m, Range, "start >= 0", JD_EXPECTED)?;
    require(p.end < 1.0, m, Range, "end < 1", JD_EXPECTED)?;
    require(p.start < p.end, m, Ordering, "start < end", JD_EXPECTED)?;

    let mut warnings = Vec::new();
    if p.end > JD_WARN_THRESHOLD {
        warnings.push(CalibWarning::HighJunctionDeviation { end: p.end });
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintClass;

    fn tower(mode: CalibMode, start: f64, end: f64, step: f64) -> CalibParams {
        CalibParams::new(mode).with_range(start, end, step)
    }

    #[test]
    fn test_pressure_advance_bounds() {
        assert!(validate(tower(CalibMode::PaLine, 0.0, 0.1, 0.002)).is_ok());

        let err = validate(tower(CalibMode::PaTower, -0.1, 0.1, 0.002)).unwrap_err();
        assert_eq!(err.constraint, "start >= 0");

        let err = validate(tower(CalibMode::PaPattern, 0.0, 0.1, 0.00001)).unwrap_err();
        assert_eq!(err.class, ConstraintClass::Range);

        let err = validate(tower(CalibMode::PaTower, 0.05, 0.051, 0.002)).unwrap_err();
        assert_eq!(err.class, ConstraintClass::Ordering);
        assert_eq!(err.mode, CalibMode::PaTower);
    }

    #[test]
    fn test_temperature_signed_ordering() {
        assert!(validate(tower(CalibMode::TempTower, 230.0, 190.0, 5.0)).is_ok());
        assert!(validate(tower(CalibMode::TempTower, 235.0, 230.0, 5.0)).is_ok());

        let err = validate(tower(CalibMode::TempTower, 233.0, 230.0, 5.0)).unwrap_err();
        assert_eq!(err.class, ConstraintClass::Ordering);

        // A start below 5 is an ordering failure, not a wraparound pass.
        let err = validate(tower(CalibMode::TempTower, 3.0, 180.0, 5.0)).unwrap_err();
        assert_eq!(err.class, ConstraintClass::Ordering);

        let err = validate(tower(CalibMode::TempTower, 355.0, 200.0, 5.0)).unwrap_err();
        assert_eq!(err.constraint, "start <= 350");

        let err = validate(tower(CalibMode::TempTower, 200.0, 165.0, 5.0)).unwrap_err();
        assert_eq!(err.constraint, "end >= 170");
    }

    #[test]
    fn test_temperature_requires_whole_degrees() {
        let err = validate(tower(CalibMode::TempTower, 232.5, 190.0, 5.0)).unwrap_err();
        assert_eq!(err.class, ConstraintClass::Range);
        assert_eq!(err.constraint, "whole degrees");

        assert!(validate(tower(CalibMode::TempTower, 230.0, 190.25, 5.0)).is_err());
    }

    #[test]
    fn test_stepped_towers_start_bounds() {
        assert!(validate(tower(CalibMode::VolSpeedTower, 0.0, 20.0, 0.5)).is_err());
        assert!(validate(tower(CalibMode::VolSpeedTower, 0.5, 20.0, 0.5)).is_ok());

        assert!(validate(tower(CalibMode::VfaTower, 10.0, 200.0, 10.0)).is_err());
        assert!(validate(tower(CalibMode::VfaTower, 10.5, 200.0, 10.0)).is_ok());

        assert!(validate(tower(CalibMode::RetractionTower, 0.0, 2.0, 0.1)).is_ok());
        assert!(validate(tower(CalibMode::RetractionTower, 0.0, 2.0, 0.0)).is_err());
    }

    #[test]
    fn test_end_before_start_rejected_everywhere() {
        for mode in [
            CalibMode::PaTower,
            CalibMode::VolSpeedTower,
            CalibMode::VfaTower,
            CalibMode::RetractionTower,
        ] {
            let err = validate(tower(mode, 20.0, 15.0, 1.0)).unwrap_err();
            assert_eq!(err.class, ConstraintClass::Ordering, "{mode}");
        }
        let err = validate(tower(CalibMode::JunctionDeviation, 0.2, 0.1, 0.0)).unwrap_err();
        assert_eq!(err.class, ConstraintClass::Ordering);
    }

    #[test]
    fn test_input_shaping_freq_damping_message() {
        let mut p = CalibParams::new(CalibMode::InputShapingFreq);
        p.freq_start_x = 15.0;
        p.freq_end_x = 110.0;
        p.freq_start_y = 15.0;
        p.freq_end_y = 110.0;
        p.start = 1.0;
        let err = validate(p.clone()).unwrap_err();
        assert_eq!(err.expected, IS_FREQ_DAMPING_EXPECTED);

        // Frequencies are checked before the damping factor.
        p.freq_end_x = 600.0;
        let err = validate(p).unwrap_err();
        assert_eq!(err.expected, IS_FREQ_EXPECTED);
    }

    #[test]
    fn test_input_shaping_freq_y_has_no_upper_bound() {
        let mut p = CalibParams::new(CalibMode::InputShapingFreq);
        p.freq_start_x = 15.0;
        p.freq_end_x = 110.0;
        p.freq_start_y = 15.0;
        p.freq_end_y = 600.0;
        assert!(validate(p).is_ok());
    }

    #[test]
    fn test_input_shaping_damp() {
        let mut p = CalibParams::new(CalibMode::InputShapingDamp).with_range(0.0, 1.0, 0.0);
        p.freq_start_x = 500.0;
        p.freq_start_y = 0.0;
        assert!(validate(p.clone()).is_ok());

        p.freq_start_y = 501.0;
        assert_eq!(validate(p.clone()).unwrap_err().expected, IS_DAMP_FREQ_EXPECTED);

        p.freq_start_y = 30.0;
        p.end = 1.1;
        assert_eq!(validate(p.clone()).unwrap_err().constraint, "damping end <= 1");

        p.start = 0.4;
        p.end = 0.4;
        assert_eq!(
            validate(p).unwrap_err().class,
            ConstraintClass::Ordering
        );
    }

    #[test]
    fn test_junction_deviation_warning() {
        let ok = validate(tower(CalibMode::JunctionDeviation, 0.0, 0.25, 0.0)).unwrap();
        assert!(ok.warnings.is_empty());

        let warned = validate(tower(CalibMode::JunctionDeviation, 0.0, 0.35, 0.0)).unwrap();
        assert_eq!(
            warned.warnings,
            vec![CalibWarning::HighJunctionDeviation { end: 0.35 }]
        );

        assert!(validate(tower(CalibMode::JunctionDeviation, 0.2, 0.2, 0.0)).is_err());
        assert!(validate(tower(CalibMode::JunctionDeviation, 0.0, 1.0, 0.0)).is_err());
    }
}
