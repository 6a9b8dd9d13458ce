use calibkit::cli::{run, Cli};
use calibkit::Config;
use clap::Parser;
use tempfile::TempDir;

fn invoke(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("calibkit").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(cli, &Config::default(), &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn record(args: &[&str]) -> serde_json::Value {
    serde_json::from_str(&invoke(args).unwrap()).unwrap()
}

#[test]
fn test_vfa_defaults() {
    let value = record(&["vfa"]);
    assert_eq!(value["mode"], "vfa_tower");
    assert_eq!(value["start"], 40.0);
    assert_eq!(value["end"], 200.0);
    assert_eq!(value["step"], 10.0);
}

#[test]
fn test_pa_line_with_overrides() {
    let value = record(&[
        "pa",
        "--extruder",
        "bowden",
        "--method",
        "line",
        "--step",
        "0.05",
        "--print-numbers",
        "false",
    ]);
    assert_eq!(value["mode"], "pa_line");
    assert_eq!(value["end"], 1.0);
    assert_eq!(value["step"], 0.05);
    assert_eq!(value["print_numbers"], false);
}

#[test]
fn test_pa_pattern_lists() {
    let value = record(&[
        "pa",
        "--method",
        "pattern",
        "--accelerations",
        "0,1000, 2000",
        "--speeds",
        "100",
    ]);
    assert_eq!(value["mode"], "pa_pattern");
    assert_eq!(value["accelerations"], serde_json::json!([1000, 2000]));
    assert_eq!(value["speeds"], serde_json::json!([100]));
}

#[test]
fn test_temperature_entry_is_clamped() {
    let value = record(&["temp", "--start", "400"]);
    assert_eq!(value["mode"], "temp_tower");
    assert_eq!(value["start"], 350.0);
    assert_eq!(value["end"], 190.0);
}

#[test]
fn test_temperature_filament_preset() {
    let value = record(&["temp", "--filament", "pctg"]);
    assert_eq!(value["start"], 280.0);
    assert_eq!(value["end"], 240.0);
}

#[test]
fn test_rejected_values_write_nothing() {
    let err = invoke(&["retraction", "--step", "-1"]).unwrap_err();
    assert!(err.to_string().contains("Please input valid values"), "{err}");

    let err = invoke(&["vol-speed", "--start", "fast"]).unwrap_err();
    assert!(err.to_string().contains("Parse error"), "{err}");
}

#[test]
fn test_input_shaping_freq_overrides() {
    let value = record(&["is-freq", "--model", "fast", "--end-y", "80", "--damping", "0"]);
    assert_eq!(value["mode"], "input_shaping_freq");
    assert_eq!(value["test_model"], "fast_tower");
    assert_eq!(value["freq_end_y"], 80.0);
    assert_eq!(value["start"], 0.0);

    assert!(invoke(&["is-freq", "--damping", "1"]).is_err());
}

#[test]
fn test_input_shaping_damp_range() {
    assert!(invoke(&["is-damp", "--damping-start", "0.5", "--damping-end", "0.2"]).is_err());
    let value = record(&["is-damp", "--freq-x", "42"]);
    assert_eq!(value["freq_start_x"], 42.0);
}

#[test]
fn test_junction_deviation_high_end_still_accepted() {
    let value = record(&["jd", "--end", "0.5"]);
    assert_eq!(value["mode"], "junction_deviation");
    assert_eq!(value["end"], 0.5);
}

#[test]
fn test_defaults_command() {
    let value = record(&["defaults", "jd"]);
    assert_eq!(value["test_model"], "fast_tower");
    assert_eq!(value["end"], 0.25);

    assert!(Cli::try_parse_from(["calibkit", "defaults", "flow"]).is_err());
}

#[test]
fn test_presets_lists_every_filament() {
    let out = invoke(&["presets"]).unwrap();
    assert_eq!(out.lines().count(), 8);
    assert!(out.contains("PETG"));
    assert!(out.contains("250"));
}

#[test]
fn test_init_config_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calibkit.toml");
    let path = path.to_str().unwrap();

    invoke(&["init-config", "--config", path]).unwrap();
    assert!(Config::load_from_file(std::path::Path::new(path)).is_ok());

    assert!(invoke(&["init-config", "--config", path]).is_err());
    assert!(invoke(&["init-config", "--config", path, "--force"]).is_ok());
}
