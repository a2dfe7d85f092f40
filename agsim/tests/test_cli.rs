//! End-to-end tests of the `agsim` binary and the library pipeline.

use std::fs;
use std::path::Path;
use std::process::Command;

use agsim::core::ForecastConfig;
use agsim::data::{load_price_series, to_inr_per_gram, ColumnNames};
use agsim::Forecast;
use approx::assert_relative_eq;
use tempfile::tempdir;

fn write_series(path: &Path, header: &str, start_value: f64, step: f64, n: usize) {
    let mut text = format!("{header}\n");
    let start = chrono::NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    for (i, date) in start.iter_days().take(n).enumerate() {
        let wiggle = if i % 2 == 0 { 1.0 } else { 1.004 };
        let value = (start_value + step * i as f64) * wiggle;
        text.push_str(&format!("{date},{value}\n"));
    }
    fs::write(path, text).unwrap();
}

#[test]
fn library_pipeline_from_usd_files() {
    let dir = tempdir().unwrap();
    let silver = dir.path().join("silver.csv");
    let fx = dir.path().join("fx.csv");
    write_series(&silver, "Date,Close", 23.0, 0.01, 90);
    write_series(&fx, "Date,Close", 82.0, 0.002, 90);

    let cols = ColumnNames::new("Date", "Close");
    let history = to_inr_per_gram(
        &load_price_series(&silver, &cols).unwrap(),
        &load_price_series(&fx, &cols).unwrap(),
    )
    .unwrap();
    assert_eq!(history.len(), 90);

    let cfg = ForecastConfig {
        num_paths: 300,
        horizon_days: 15,
        seed: Some(3),
        ..ForecastConfig::default()
    };
    let f = Forecast::run(&history, &cfg).unwrap();
    let (_, latest) = history.latest().unwrap();
    assert_relative_eq!(f.report().historical.latest_price, latest, max_relative = 1e-15);
    assert_eq!(f.ensemble().shape(), (300, 16));
}

#[test]
fn binary_writes_csv_and_summary() {
    let dir = tempdir().unwrap();
    let prices = dir.path().join("inr.csv");
    write_series(&prices, "date,price", 70.0, 0.05, 120);
    let out = dir.path().join("out");

    let status = Command::new(env!("CARGO_BIN_EXE_agsim"))
        .args(["forecast", "--prices"])
        .arg(&prices)
        .args(["--paths", "200", "--days", "10", "--seed", "42", "--out"])
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let csv = fs::read_to_string(out.join("simulation_results.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines[0].starts_with("day,path_0,path_1,"));
    assert_eq!(lines[0].split(',').count(), 201);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["seed"], 42);
    assert_eq!(summary["outcome"]["paths"], 200);
    assert!(summary["outcome"]["median"].as_f64().unwrap() > 0.0);
}

#[test]
fn binary_rejects_missing_input() {
    let status = Command::new(env!("CARGO_BIN_EXE_agsim"))
        .args(["forecast", "--silver", "only-silver.csv"])
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn binary_fails_cleanly_on_bad_file() {
    let dir = tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_agsim"))
        .args(["forecast", "--prices"])
        .arg(dir.path().join("absent.csv"))
        .arg("--out")
        .arg(dir.path().join("out"))
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}
