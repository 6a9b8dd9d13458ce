//! Command-line front end
//!
//! Each calibration subcommand opens the matching form with the configured
//! selector defaults, overrides whichever fields were given, confirms it and
//! prints the accepted record as JSON.

use crate::executor::JsonExecutor;
use anyhow::{bail, Context};
use calibkit_core::forms::TemperatureField;
use calibkit_core::{
    default_form, CalibMode, CalibrationForm, ExtruderType, FilamentType, PaMethod, TestModel,
    TowerForm,
};
use calibkit_settings::Config;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser, Debug)]
#[command(name = "calibkit")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Validate 3D printer calibration parameters", long_about = None)]
pub struct Cli {
    /// Settings file (.toml or .json); defaults to the platform config dir
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pressure advance tower, line or pattern
    Pa(PaArgs),
    /// Temperature tower
    Temp(TempArgs),
    /// Max volumetric speed tower (mm³/s)
    VolSpeed(TowerArgs),
    /// VFA tower (mm/s)
    Vfa(TowerArgs),
    /// Retraction tower (mm)
    Retraction(TowerArgs),
    /// Input shaping frequency test
    IsFreq(IsFreqArgs),
    /// Input shaping damping test
    IsDamp(IsDampArgs),
    /// Junction deviation test
    Jd(JdArgs),
    /// List filament temperature presets
    Presets,
    /// Print the record a freshly opened form would submit
    Defaults {
        /// Calibration mode, e.g. pa-line, temp, vfa, is-freq, jd
        mode: CalibMode,
    },
    /// Write a settings file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct PaArgs {
    /// dde or bowden
    #[arg(long)]
    pub extruder: Option<ExtruderType>,
    /// tower, line or pattern
    #[arg(long)]
    pub method: Option<PaMethod>,
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub step: Option<String>,
    /// Print PA values beside each line (line method only)
    #[arg(long)]
    pub print_numbers: Option<bool>,
    /// Comma separated accelerations (pattern method only)
    #[arg(long, allow_hyphen_values = true)]
    pub accelerations: Option<String>,
    /// Comma separated speeds (pattern method only)
    #[arg(long, allow_hyphen_values = true)]
    pub speeds: Option<String>,
}

#[derive(Args, Debug)]
pub struct TempArgs {
    /// pla, abs-asa, petg, pctg, tpu, pa-cf, pet-cf or custom
    #[arg(long)]
    pub filament: Option<FilamentType>,
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<String>,
}

#[derive(Args, Debug)]
pub struct TowerArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub step: Option<String>,
}

#[derive(Args, Debug)]
pub struct IsFreqArgs {
    /// ringing or fast
    #[arg(long)]
    pub model: Option<TestModel>,
    #[arg(long, allow_hyphen_values = true)]
    pub start_x: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub end_x: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub start_y: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub end_y: Option<String>,
    /// 0 keeps the printer's configured damping
    #[arg(long, allow_hyphen_values = true)]
    pub damping: Option<String>,
}

#[derive(Args, Debug)]
pub struct IsDampArgs {
    /// ringing or fast
    #[arg(long)]
    pub model: Option<TestModel>,
    #[arg(long, allow_hyphen_values = true)]
    pub freq_x: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub freq_y: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub damping_start: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub damping_end: Option<String>,
}

#[derive(Args, Debug)]
pub struct JdArgs {
    /// ringing or fast
    #[arg(long)]
    pub model: Option<TestModel>,
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<String>,
}

/// Replace `field` when a value was given.
fn apply(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Run a parsed command line, writing results to `out`.
pub fn run(cli: Cli, config: &Config, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Pa(args) => {
            let mut form = config.pressure_advance_form();
            if let Some(extruder) = args.extruder {
                form.set_extruder_type(extruder);
            }
            if let Some(method) = args.method {
                form.set_method(method);
            }
            apply(&mut form.start, args.start);
            apply(&mut form.end, args.end);
            apply(&mut form.step, args.step);
            if let Some(value) = args.print_numbers {
                if !form.set_print_numbers(value) {
                    eprintln!("note: --print-numbers is ignored for {}", form.method());
                }
            }
            if let Some(text) = args.accelerations {
                if !form.set_accelerations(&text) {
                    eprintln!("note: --accelerations is ignored for {}", form.method());
                }
            }
            if let Some(text) = args.speeds {
                if !form.set_speeds(&text) {
                    eprintln!("note: --speeds is ignored for {}", form.method());
                }
            }
            submit(&form, out)
        }
        Commands::Temp(args) => {
            let mut form = config.temperature_form();
            if let Some(filament) = args.filament {
                form.set_filament(filament);
            }
            // Entered values go through the same normalization as leaving the field.
            if let Some(start) = args.start {
                form.start = start;
                if let Some(warning) = form.on_field_exit(TemperatureField::Start) {
                    eprintln!("warning: {}", warning);
                }
            }
            if let Some(end) = args.end {
                form.end = end;
                if let Some(warning) = form.on_field_exit(TemperatureField::End) {
                    eprintln!("warning: {}", warning);
                }
            }
            submit(&form, out)
        }
        Commands::VolSpeed(args) => submit(&tower(TowerForm::max_volumetric_speed(), args), out),
        Commands::Vfa(args) => submit(&tower(TowerForm::vfa(), args), out),
        Commands::Retraction(args) => submit(&tower(TowerForm::retraction(), args), out),
        Commands::IsFreq(args) => {
            let mut form = config.input_shaping_freq_form();
            if let Some(model) = args.model {
                form.test_model = model;
            }
            apply(&mut form.start_x, args.start_x);
            apply(&mut form.end_x, args.end_x);
            apply(&mut form.start_y, args.start_y);
            apply(&mut form.end_y, args.end_y);
            apply(&mut form.damping, args.damping);
            submit(&form, out)
        }
        Commands::IsDamp(args) => {
            let mut form = config.input_shaping_damp_form();
            if let Some(model) = args.model {
                form.test_model = model;
            }
            apply(&mut form.freq_x, args.freq_x);
            apply(&mut form.freq_y, args.freq_y);
            apply(&mut form.damping_start, args.damping_start);
            apply(&mut form.damping_end, args.damping_end);
            submit(&form, out)
        }
        Commands::Jd(args) => {
            let mut form = config.junction_deviation_form();
            if let Some(model) = args.model {
                form.test_model = model;
            }
            apply(&mut form.start, args.start);
            apply(&mut form.end, args.end);
            submit(&form, out)
        }
        Commands::Presets => {
            for filament in FilamentType::ALL {
                let (start, end) = filament.temperature_preset();
                writeln!(
                    out,
                    "{:<8} {}\u{2103} -> {}\u{2103}",
                    filament.to_string(),
                    start,
                    end
                )?;
            }
            Ok(())
        }
        Commands::Defaults { mode } => {
            let params = default_form(mode)
                .parse()
                .with_context(|| format!("default {} form did not parse", mode))?;
            serde_json::to_writer_pretty(&mut *out, &params)?;
            writeln!(out)?;
            Ok(())
        }
        Commands::InitConfig { force } => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::default_path()?,
            };
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            Config::default()
                .save_to_file(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote default settings");
            writeln!(out, "{}", path.display())?;
            Ok(())
        }
    }
}

fn tower(mut form: TowerForm, args: TowerArgs) -> TowerForm {
    apply(&mut form.start, args.start);
    apply(&mut form.end, args.end);
    apply(&mut form.step, args.step);
    form
}

fn submit(form: &dyn CalibrationForm, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut executor = JsonExecutor::new(&mut *out);
    let submission = form.confirm(&mut executor)?;
    executor
        .finish()
        .context("failed to write calibration record")?;

    for warning in &submission.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}
