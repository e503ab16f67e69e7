use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn inkpad_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("inkpad").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn pixel(path: &std::path::Path, x: u32, y: u32) -> [u8; 4] {
    image::open(path).unwrap().to_rgba8().get_pixel(x, y).0
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    inkpad_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Freehand raster drawing surface"));
}

#[test]
fn replays_script_into_png() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("strokes.json");
    std::fs::write(
        &script,
        r#"[
            {"op": "offset", "left": 10, "top": 10},
            {"op": "color", "value": "red"},
            {"op": "brush", "size": 8},
            {"op": "pointer", "phase": "down", "x": 20, "y": 30},
            {"op": "pointer", "phase": "move", "x": 20, "y": 30},
            {"op": "pointer", "phase": "move", "x": 50, "y": 30},
            {"op": "pointer", "phase": "up"}
        ]"#,
    )
    .unwrap();
    let output = temp.path().join("out").join("sketch.png");

    inkpad_cmd(&temp)
        .args(["--width", "64", "--height", "48", "--script"])
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let (width, height) = image::image_dimensions(&output).unwrap();
    assert_eq!((width, height), (64, 48));
    assert_eq!(pixel(&output, 25, 20), [255, 0, 0, 255]);
    assert_eq!(pixel(&output, 5, 5)[3], 0);
}

#[test]
fn background_survives_clear_in_script() {
    let temp = TempDir::new().unwrap();
    let background = temp.path().join("bg.png");
    image::RgbaImage::from_pixel(16, 16, image::Rgba([0, 0, 255, 255]))
        .save(&background)
        .unwrap();

    let script = temp.path().join("steps.json");
    std::fs::write(
        &script,
        r#"[
            {"op": "image", "path": "bg.png"},
            {"op": "pointer", "phase": "down", "x": 8, "y": 8},
            {"op": "pointer", "phase": "move", "x": 8, "y": 8},
            {"op": "pointer", "phase": "up"},
            {"op": "clear"}
        ]"#,
    )
    .unwrap();
    let output = temp.path().join("cleared.png");

    inkpad_cmd(&temp)
        .args(["--width", "16", "--height", "16", "--script"])
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(pixel(&output, 8, 8), [0, 0, 255, 255]);
}

#[test]
fn malformed_script_fails() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.json");
    std::fs::write(&script, r#"[{"op": "color", "value": "not-a-color"}]"#).unwrap();

    inkpad_cmd(&temp)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized color"));

    assert!(!temp.path().join("never.png").exists());
}

#[test]
fn unreadable_background_only_warns() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("blank.png");

    inkpad_cmd(&temp)
        .args(["--width", "8", "--height", "8", "--background"])
        .arg(temp.path().join("missing.png"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(pixel(&output, 4, 4)[3], 0);
}

#[test]
fn rejects_zero_width() {
    let temp = TempDir::new().unwrap();
    inkpad_cmd(&temp)
        .args(["--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width"));
}
