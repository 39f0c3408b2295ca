use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn lvconf(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lvconf"))
        .args(args)
        .current_dir(dir)
        .env_remove("LVCONF_PROJECT_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("run lvconf")
}

fn make_project(root: &Path, content: &[u8], envs: &[&str]) -> Vec<PathBuf> {
    fs::create_dir_all(root.join("include")).unwrap();
    fs::write(root.join("include/lv_conf.h"), content).unwrap();
    envs.iter()
        .map(|env| {
            let dir = root.join(".pio/libdeps").join(env).join("lvgl/src");
            fs::create_dir_all(&dir).unwrap();
            dir
        })
        .collect()
}

#[test]
fn copies_header_from_current_directory() {
    let temp = tempdir().expect("tempdir");
    let dirs = make_project(temp.path(), b"X=1", &["esp32"]);

    let output = lvconf(temp.path(), &[]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout:\n{}", stdout);
    assert!(lines[0].starts_with("✓ Copied lv_conf.h to LVGL source"));
    assert_eq!(fs::read(dirs[0].join("lv_conf.h")).unwrap(), b"X=1");
}

#[test]
fn missing_libdeps_exits_nonzero() {
    let temp = tempdir().expect("tempdir");
    make_project(temp.path(), b"X=1", &[]);

    let output = lvconf(temp.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("✗ Error: Could not find LVGL in .pio/libdeps"), "stderr: {}", stderr);
    assert!(!temp.path().join(".pio").exists());
}

#[test]
fn missing_source_exits_nonzero() {
    let temp = tempdir().expect("tempdir");
    let dir = temp.path().join(".pio/libdeps/esp32/lvgl/src");
    fs::create_dir_all(&dir).unwrap();

    let output = lvconf(temp.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lv_conf.h not found"), "stderr: {}", stderr);
    assert!(!dir.join("lv_conf.h").exists());
}

#[test]
fn project_dir_flag_and_env_selection() {
    let temp = tempdir().expect("tempdir");
    let project = temp.path().join("firmware");
    let dirs = make_project(&project, b"X=7", &["esp32", "native"]);
    let elsewhere = tempdir().expect("tempdir");

    let ambiguous = lvconf(elsewhere.path(), &["-C", project.to_str().unwrap()]);
    assert_eq!(ambiguous.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&ambiguous.stderr).contains("esp32, native"));

    let output = lvconf(
        elsewhere.path(),
        &["-C", project.to_str().unwrap(), "--env", "native"],
    );
    assert!(output.status.success());
    assert!(!dirs[0].join("lv_conf.h").exists());
    assert_eq!(fs::read(dirs[1].join("lv_conf.h")).unwrap(), b"X=7");
}

#[test]
fn json_output_reports_outcome() {
    let temp = tempdir().expect("tempdir");
    make_project(temp.path(), b"X=1", &["esp32"]);

    let output = lvconf(temp.path(), &["--format", "json", "--dry-run"]);

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["status"], "ok");
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["env"], "esp32");
    assert!(!temp.path().join(".pio/libdeps/esp32/lvgl/src/lv_conf.h").exists());
}

#[test]
fn json_output_stays_single_object_when_verbose() {
    let temp = tempdir().expect("tempdir");
    make_project(temp.path(), b"X=1", &["esp32"]);

    let output = lvconf(temp.path(), &["--format", "json", "-vv"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "stdout:\n{}", stdout);
    let value: Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(value["status"], "ok");
}

#[test]
fn unknown_env_exits_nonzero() {
    let temp = tempdir().expect("tempdir");
    let dirs = make_project(temp.path(), b"X=1", &["esp32"]);

    let output = lvconf(temp.path(), &["--env", "stm32"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("✗ Error: Environment 'stm32' not found (available: esp32)"),
        "stderr: {}",
        stderr
    );
    assert!(!dirs[0].join("lv_conf.h").exists());
}

#[cfg(unix)]
#[test]
fn symlinked_destination_keeps_header() {
    let temp = tempdir().expect("tempdir");
    let dirs = make_project(temp.path(), b"#define LV_USE_LOG 1\n", &["esp32"]);
    let header = temp.path().join("include/lv_conf.h");
    std::os::unix::fs::symlink(&header, dirs[0].join("lv_conf.h")).unwrap();

    let output = lvconf(temp.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read(&header).unwrap(), b"#define LV_USE_LOG 1\n");
}
