use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sketchboard_cmd() -> Command {
    Command::cargo_bin("sketchboard").expect("binary exists")
}

#[test]
fn sketchboard_help_prints_usage() {
    sketchboard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand drawing surface with raster export",
        ));
}

#[test]
fn no_arguments_prints_trace_usage() {
    sketchboard_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("--trace <FILE>"))
        .stdout(predicate::str::contains("pointer_down"));
}

#[test]
fn missing_trace_file_fails() {
    sketchboard_cmd()
        .args(["--trace", "/nonexistent/trace.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load trace"));
}

#[test]
fn malformed_trace_fails() {
    let temp = TempDir::new().unwrap();
    let trace_path = temp.path().join("broken.json");
    std::fs::write(&trace_path, "{ not json").unwrap();

    sketchboard_cmd()
        .arg("--trace")
        .arg(&trace_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load trace"));
}

#[test]
fn replayed_trace_writes_png_to_output_path() {
    let temp = TempDir::new().unwrap();
    let trace_path = temp.path().join("stroke.json");
    std::fs::write(
        &trace_path,
        r#"{
            "surface": { "width": 64, "height": 48 },
            "events": [
                { "type": "pointer_down", "x": 4.0, "y": 24.0 },
                { "type": "pointer_move", "x": 60.0, "y": 24.0 },
                { "type": "pointer_up" }
            ]
        }"#,
    )
    .unwrap();
    let output = temp.path().join("out.png");

    sketchboard_cmd()
        .arg("--trace")
        .arg(&trace_path)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote "));

    let data = std::fs::read(&output).unwrap();
    assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn export_event_lands_in_configured_directory() {
    let temp = TempDir::new().unwrap();
    let export_dir = temp.path().join("exports");

    let config_path = temp.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("[export]\ndirectory = \"{}\"\n", export_dir.display()),
    )
    .unwrap();

    let trace_path = temp.path().join("fill.json");
    std::fs::write(
        &trace_path,
        r#"{
            "surface": { "width": 32, "height": 32 },
            "events": [
                { "type": "color", "value": "red" },
                { "type": "tool_mode_toggle" },
                { "type": "surface_tap" },
                { "type": "export" }
            ]
        }"#,
    )
    .unwrap();

    sketchboard_cmd()
        .arg("--trace")
        .arg(&trace_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("drawing.png"));

    assert!(export_dir.join("drawing.png").exists());
}
