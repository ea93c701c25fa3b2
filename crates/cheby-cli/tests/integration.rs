//! Integration tests for cheby-cli.
//!
//! Tests run the built `cheby` binary end to end.

use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `cheby` binary built by cargo.
fn cheby_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cheby"))
}

fn run_ok(args: &[&str]) -> String {
    let output = cheby_bin().args(args).output().expect("failed to run cheby");
    assert!(
        output.status.success(),
        "cheby {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_tone(path: &std::path::Path, freq: f64, sample_rate: u32, len: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for n in 0..len {
        let x = (2.0 * std::f64::consts::PI * freq * n as f64 / f64::from(sample_rate)).sin();
        writer.write_sample((0.5 * x) as f32).unwrap();
    }
    writer.finalize().unwrap();
}

fn read_samples(path: &std::path::Path) -> Vec<f32> {
    hound::WavReader::open(path)
        .unwrap()
        .into_samples::<f32>()
        .map(Result::unwrap)
        .collect()
}

// ---------------------------------------------------------------------------
// `cheby design`
// ---------------------------------------------------------------------------

#[test]
fn design_list_has_two_values_per_pole_plus_gain() {
    let stdout = run_ok(&["design", "--poles", "4", "--ripple", "0.5", "--normalized", "0.1"]);
    let values = cheby_core::parse_coefficient_list(stdout.trim()).unwrap();
    assert_eq!(values.len(), 9);
}

#[test]
fn design_table_shows_report() {
    let stdout = run_ok(&[
        "design", "--pass", "high", "--poles", "4", "--ripple", "0.5", "--normalized", "0.1",
        "--format", "table",
    ]);
    assert!(stdout.contains("Fc =  0.1000,  # poles = 4,  % ripple =  0.50"), "{stdout}");
    assert!(stdout.contains("a[04] ="));
    assert!(stdout.contains("Nyquist gain"), "{stdout}");
}

#[test]
fn design_json_matches_list_order() {
    let stdout = run_ok(&[
        "design", "--poles", "2", "--cutoff", "1000", "--sample-rate", "48000", "--order",
        "aaabb", "--format", "json",
    ]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["order"], "grouped");
    assert_eq!(json["poles"], 2);

    let a = json["a"].as_array().unwrap();
    let b = json["b"].as_array().unwrap();
    let list = json["list"].as_array().unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(list[1], a[1]);
    assert_eq!(list[2], a[2]);
    assert_eq!(list[3], b[1]);
    assert_eq!(list[4], b[2]);
}

#[test]
fn design_from_factory_preset() {
    let stdout = run_ok(&["design", "--preset", "steep-lowpass", "--format", "table"]);
    assert!(stdout.contains("# poles = 8"), "{stdout}");
}

#[test]
fn design_rejects_single_pole() {
    let output = cheby_bin().args(["design", "--poles", "1"]).output().unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `cheby impulse`
// ---------------------------------------------------------------------------

#[test]
fn impulse_prints_requested_samples() {
    let stdout = run_ok(&["impulse", "--poles", "4", "--normalized", "0.1", "--samples", "50"]);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 51);
    assert!(lines[50].starts_with("# peak ="));
    for line in &lines[..50] {
        assert!(line.parse::<f64>().unwrap().is_finite());
    }
}

// ---------------------------------------------------------------------------
// `cheby process`
// ---------------------------------------------------------------------------

#[test]
fn process_attenuates_stop_band() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_tone(&input, 8000.0, 48000, 9600);

    run_ok(&[
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--poles",
        "4",
        "--cutoff",
        "500",
    ]);

    let samples = read_samples(&output);
    assert_eq!(samples.len(), 9600);
    let tail_peak = samples[4800..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(tail_peak < 0.01, "tail peak {tail_peak}");
}

#[test]
fn process_with_explicit_gain_list() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_tone(&input, 440.0, 44100, 1000);

    run_ok(&[
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--coeffs",
        "0.5",
    ]);

    let original = read_samples(&input);
    let filtered = read_samples(&output);
    for (x, y) in original.iter().zip(&filtered) {
        assert!((x * 0.5 - y).abs() < 1e-6);
    }
}

#[test]
fn process_list_follows_preset_order() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_tone(&input, 440.0, 48000, 200);

    // Grouped: a0 a1 a2 b1 b2, a pure two-sample delay
    run_ok(&[
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--preset",
        "steep-lowpass",
        "--coeffs",
        "0 0 1 0 0",
    ]);

    let original = read_samples(&input);
    let filtered = read_samples(&output);
    assert_eq!(&filtered[..2], &[0.0, 0.0]);
    assert_eq!(&filtered[2..], &original[..original.len() - 2]);
}

#[test]
fn process_sweep_stays_bounded() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_tone(&input, 1000.0, 48000, 24000);

    run_ok(&[
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--poles",
        "4",
        "--ripple",
        "0.5",
        "--cutoff",
        "200",
        "--sweep-to",
        "5000",
        "--bit-depth",
        "24",
    ]);

    let spec = hound::WavReader::open(&output).unwrap().spec();
    assert_eq!(spec.bits_per_sample, 24);
}

#[test]
fn process_rejects_bad_list() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_tone(&input, 440.0, 44100, 100);

    let output = cheby_bin()
        .args(["process", input.to_str().unwrap()])
        .arg(dir.path().join("out.wav"))
        .args(["--coeffs", "0.5 abc 0.1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `cheby presets`
// ---------------------------------------------------------------------------

#[test]
fn presets_list_shows_factory_presets() {
    let stdout = run_ok(&["presets", "list"]);
    for name in cheby_config::FACTORY_PRESET_NAMES {
        assert!(stdout.contains(name), "missing {name}");
    }
}

#[test]
fn presets_show_prints_coefficients() {
    let stdout = run_ok(&["presets", "show", "rumble-filter"]);
    assert!(stdout.contains("Rumble Filter"));
    assert!(stdout.contains("Sample Rate: 48000 Hz"));
    assert!(stdout.contains("a[04] ="));
}

#[test]
fn presets_save_then_design_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mine.toml");
    let path_str = path.to_str().unwrap();

    run_ok(&[
        "presets", "save", "Mine", path_str, "--pass", "high", "--poles", "6", "--normalized",
        "0.2",
    ]);
    let preset = cheby_config::FilterPreset::load(&path).unwrap();
    assert_eq!(preset.name, "Mine");
    assert_eq!(preset.design.poles, 6);

    let stdout = run_ok(&["design", "--preset", path_str, "--format", "table"]);
    assert!(stdout.contains("# poles = 6"));

    // Existing files need --force
    let again = cheby_bin()
        .args(["presets", "save", "Mine", path_str])
        .output()
        .unwrap();
    assert!(!again.status.success());
}
