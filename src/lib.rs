//! # calibkit
//!
//! Validates parameters for 3D printer calibration tests before they are
//! handed to a slicer's calibration runner:
//! - Pressure advance (tower, line, pattern)
//! - Temperature tower
//! - Max volumetric speed, VFA and retraction towers
//! - Input shaping frequency and damping
//! - Junction deviation
//!
//! ## Architecture
//!
//! calibkit is organized as a workspace:
//!
//! 1. **calibkit-core** - Calibration records, parsing, range policy, form models
//! 2. **calibkit-settings** - Persisted form defaults (JSON/TOML)
//! 3. **calibkit** - Command-line binary and the JSON executor

pub mod cli;
pub mod executor;

pub use calibkit_core::{
    validate, CalibError, CalibMode, CalibParams, CalibWarning, CalibrationExecutor,
    CalibrationForm, Submission, ValidatedParams,
};
pub use calibkit_settings::Config;
pub use executor::JsonExecutor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `default_filter`. Logs go to stderr so
/// calibration records on stdout stay machine readable.
pub fn init_logging(default_filter: &str, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let pretty_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()?;

    Ok(())
}
