//! Executor interface
//!
//! The executor turns validated parameters into a runnable calibration job.
//! Its behavior is opaque here: it receives each accepted record once and its
//! outcome is not consulted.

use crate::params::ValidatedParams;

/// Receiver of validated calibration parameters.
pub trait CalibrationExecutor {
    /// Take ownership of one accepted record.
    fn execute(&mut self, params: ValidatedParams);
}

impl<F> CalibrationExecutor for F
where
    F: FnMut(ValidatedParams),
{
    fn execute(&mut self, params: ValidatedParams) {
        self(params)
    }
}
