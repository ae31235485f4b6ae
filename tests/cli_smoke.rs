use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_morphloop")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "morphloop.exe"
            } else {
                "morphloop"
            });
            p
        })
}

fn smoke_dir() -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_frame_writes_png() {
    let out_path = smoke_dir().join("hero_frame.png");
    let _ = std::fs::remove_file(&out_path);

    let status = Command::new(exe())
        .args(["frame", "--time", "0.5", "--size", "64", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 64));
    assert_eq!(img.get_pixel(0, 0).0, [18, 20, 28, 255]);
}

#[test]
fn cli_steps_lists_labels_in_order() {
    let output = Command::new(exe()).args(["steps"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].contains("Frontend"));
    assert!(lines[4].contains("Tech + Design"));
    assert!(lines[5].contains("Creative"));
}

#[test]
fn cli_steps_json_uses_a_custom_set() {
    let set_path = smoke_dir().join("two_squares.json");
    std::fs::write(
        &set_path,
        serde_json::json!({
            "shapes": ["M2 2 H22 V22 H2 Z", "M6 6 H18 V18 H6 Z"],
            "colors": ["#ff0000", "#0000ff"],
            "labels": ["big", "small"],
            "step_secs": 0.5,
            "ease": "linear"
        })
        .to_string(),
    )
    .unwrap();

    let output = Command::new(exe())
        .args(["steps", "--json", "--fps", "30", "--cycles", "2", "--set"])
        .arg(&set_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let labels: Vec<_> = events.iter().map(|e| e["label"].as_str().unwrap()).collect();
    assert_eq!(labels, ["small", "big", "small", "big"]);
    assert_eq!(events[0]["frame"], 15);
}

#[test]
fn cli_steps_reports_the_wrap_for_unaligned_step_lengths() {
    let set_path = smoke_dir().join("three_unaligned.json");
    std::fs::write(
        &set_path,
        serde_json::json!({
            "shapes": ["M2 2 H22 V22 H2 Z", "M6 6 H18 V18 H6 Z", "M12 2 L22 22 H2 Z"],
            "colors": ["#ff0000", "#00ff00", "#0000ff"],
            "step_secs": 1.004
        })
        .to_string(),
    )
    .unwrap();

    let output = Command::new(exe())
        .args(["steps", "--json", "--cycles", "1", "--set"])
        .arg(&set_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let indices: Vec<_> = events.iter().map(|e| e["index"].as_u64().unwrap()).collect();
    assert_eq!(indices, [1, 2, 0]);
    assert_eq!(events[2]["frame"], 183);
}

#[test]
fn cli_svg_prints_to_stdout() {
    let output = Command::new(exe())
        .args(["svg", "--time", "1.0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).unwrap();
    assert!(svg.contains("viewBox=\"0 0 24 24\""));
    assert!(svg.contains("fill=\"#0ea5e9\""));
}

#[test]
fn cli_rejects_a_broken_set() {
    let set_path = smoke_dir().join("broken.json");
    std::fs::write(&set_path, r##"{"shapes": ["M0 0 L1 0 L1 1 Z"], "colors": []}"##).unwrap();

    let status = Command::new(exe())
        .args(["svg", "--set"])
        .arg(&set_path)
        .status()
        .unwrap();
    assert!(!status.success());
}
