#![warn(clippy::pedantic)]

use std::path::{Path, PathBuf};
use std::process::Command;

use vlmdeck::{generate, write_deck, AircraftConfig, Destination, RawAircraftConfig, DECK_FILE_NAME};

fn config_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("configs").join(name)
}

fn vlmdeck() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vlmdeck"))
}

#[test]
fn written_deck_matches_rendered_text() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let config = AircraftConfig::new(RawAircraftConfig::discoidal_demo()).expect("valid");
    let (_, text) = generate(&config).expect("deck builds");

    let path = write_deck(dir.path(), &text).expect("deck written");
    assert_eq!(path, dir.path().join(DECK_FILE_NAME));
    assert_eq!(std::fs::read_to_string(&path).expect("readable"), text);

    // A second run replaces the deck and leaves no temporary files behind.
    write_deck(dir.path(), "short\n").expect("deck rewritten");
    assert_eq!(std::fs::read_to_string(&path).expect("readable"), "short\n");
    let entries = std::fs::read_dir(dir.path()).expect("listable").count();
    assert_eq!(entries, 1);
}

#[test]
fn side_file_names_the_directory() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let side_file = dir.path().join("dir.txt");
    std::fs::write(&side_file, "\n  \n/runs/vorlax\nignored\n").expect("side file written");

    let resolved = Destination::SideFile(side_file).resolve().expect("resolves");
    assert!(resolved.ends_with("runs/vorlax"));
}

#[test]
fn missing_directory_is_reported_not_created() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let missing = dir.path().join("absent");
    assert!(write_deck(&missing, "deck\n").is_err());
    assert!(!missing.exists());
}

#[test]
fn cli_writes_deck_into_out_dir() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let out_dir = dir.path().to_str().expect("utf-8 temporary path");

    let output = vlmdeck()
        .arg(config_path("reference_transport.yaml"))
        .args(["--out-dir", out_dir, "--summary"])
        .output()
        .expect("binary runs");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let summary = String::from_utf8_lossy(&output.stdout);
    assert!(summary.contains("Panel records (NPAN): 9"));

    let deck = std::fs::read_to_string(dir.path().join(DECK_FILE_NAME)).expect("deck written");
    assert!(deck.starts_with("Auto Generated VORLAX Case\n*\n"));
    assert!(deck.ends_with("********* End VORLAX Input Deck *********\n"));
}

#[test]
fn cli_prints_deck_and_metrics() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let metrics_path = dir.path().join("metrics.json");

    let output = vlmdeck()
        .arg(config_path("discoidal.yaml"))
        .arg("--stdout")
        .arg("--metrics-json")
        .arg(&metrics_path)
        .output()
        .expect("binary runs");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let deck = String::from_utf8_lossy(&output.stdout);
    assert!(deck.contains("*** ELEVON PANELS ***"));

    let metrics: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&metrics_path).expect("metrics written"))
            .expect("metrics are JSON");
    assert_eq!(metrics["panel_count"], 12);
    assert!(metrics["vertical_tail"].is_object());
}

#[test]
fn cli_rejects_invalid_configuration() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let config = dir.path().join("broken.yaml");
    let yaml = std::fs::read_to_string(config_path("reference_transport.yaml"))
        .expect("shipped configuration")
        .replace("taper_ratio: 0.278", "taper_ratio: 1.5");
    std::fs::write(&config, yaml).expect("configuration written");

    let output = vlmdeck()
        .arg(&config)
        .args(["--out-dir", dir.path().to_str().expect("utf-8 temporary path")])
        .output()
        .expect("binary runs");
    assert!(!output.status.success());
    assert!(!dir.path().join(DECK_FILE_NAME).exists());
}
