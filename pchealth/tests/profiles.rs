//! Profile persistence through the binary (non-interactive paths only)
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

fn run_pchealth(config_home: &Path, args: &[&str]) -> (bool, String) {
    let output = Command::cargo_bin("pchealth")
        .unwrap()
        .env("XDG_CONFIG_HOME", config_home)
        .args(args)
        .output()
        .expect("run pchealth");
    let ok = output.status.success();
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (ok, text)
}

fn profiles_path(config_home: &Path) -> PathBuf {
    config_home.join("pchealth").join("profiles.json")
}

#[test]
fn profile_created_on_first_use() {
    let td = tempfile::tempdir().unwrap();
    let (ok, out) = run_pchealth(
        td.path(),
        &["--profile", "unittest", "http://example:5000", "--dry-run"],
    );
    assert!(ok, "{out}");
    let data = fs::read_to_string(profiles_path(td.path())).expect("profiles.json created");
    assert!(
        data.contains("unittest") && data.contains("http://example:5000"),
        "profiles.json missing profile entry: {data}"
    );
}

#[test]
fn profile_overwrite_only_when_changed() {
    let td = tempfile::tempdir().unwrap();
    run_pchealth(td.path(), &["--profile", "prod", "http://one:5000", "--dry-run"]);
    let first = fs::read_to_string(profiles_path(td.path())).unwrap();

    run_pchealth(td.path(), &["--profile", "prod", "http://one:5000", "--dry-run"]);
    let second = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert_eq!(first, second, "Profile file changed despite identical input");

    // --save skips the overwrite prompt
    run_pchealth(
        td.path(),
        &["--profile", "prod", "--save", "http://two:5000", "--dry-run"],
    );
    let third = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(third.contains("two"), "Updated URL not written: {third}");
}

#[test]
fn saved_profile_resolves_without_url() {
    let td = tempfile::tempdir().unwrap();
    run_pchealth(
        td.path(),
        &["--profile", "lab", "--hide", "logs,cache", "http://lab:5000", "--dry-run"],
    );
    let data = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(data.contains("logs") && data.contains("cache"), "{data}");

    let (ok, out) = run_pchealth(td.path(), &["-P", "lab", "--dry-run"]);
    assert!(ok, "{out}");
    assert!(out.contains("cleanup: http://lab:5000/api/clean_cache"), "{out}");
}

#[test]
fn corrupt_profiles_file_is_ignored() {
    let td = tempfile::tempdir().unwrap();
    let path = profiles_path(td.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();
    let (ok, out) = run_pchealth(td.path(), &["--dry-run", "http://box:5000"]);
    assert!(ok, "{out}");
    assert!(out.contains("socket: ws://box:5000/"), "{out}");
}
