use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("delivery-estimate").unwrap()
}

fn write_config(name: &str, json: &str) -> PathBuf {
    let file = format!("delivery-estimate-{}-{name}.json", std::process::id());
    let path = std::env::temp_dir().join(file);
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_easter() {
    cmd()
        .args(["easter", "--year", "2025"])
        .assert()
        .success()
        .stdout("2025-04-20\n");
}

#[test]
fn test_holidays_gb_text() {
    cmd()
        .args(["holidays", "--country", "GB", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-29"))
        .stdout(predicate::str::contains("2024-12-26"));
}

#[test]
fn test_holidays_json() {
    let output = cmd()
        .args(["holidays", "--country", "uk", "--year", "2024", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let dates: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dates.len(), 8);
    assert_eq!(dates[0], "2024-01-01");
}

#[test]
fn test_holidays_unknown_country_fails() {
    cmd()
        .args(["holidays", "--country", "XX", "--year", "2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported --country"));
}

#[test]
fn test_estimate_both_surfaces_match() {
    let path = write_config(
        "both",
        r#"{"global": {"cutoff_time": "14:00", "closed_days": "sat,sun",
            "min_delivery_days": 3, "max_delivery_days": 5}}"#,
    );
    cmd()
        .args(["estimate", "--config"])
        .arg(&path)
        .args(["--now", "2024-03-01T16:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin_preview: ships Mar 4, arrives Mar 7-11"))
        .stdout(predicate::str::contains("storefront: ships Mar 4, arrives Mar 7-11"));
    fs::remove_file(path).ok();
}

#[test]
fn test_estimate_json_storefront() {
    let path = write_config(
        "json",
        r#"{"global": {"closed_days": [], "timezone": "Europe/London"}}"#,
    );
    let output = cmd()
        .args(["estimate", "--surface", "storefront", "--json", "--config"])
        .arg(&path)
        .args(["--now", "2024-03-04T10:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rendered: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered[0]["surface"], "storefront");
    assert_eq!(rendered[0]["shipping_date"], "2024-03-04");
    assert_eq!(rendered[0]["ships_today"], true);
    fs::remove_file(path).ok();
}

#[test]
fn test_estimate_single_surface_by_alias() {
    let path = write_config("admin", r#"{"global": {"closed_days": "sat,sun"}}"#);
    cmd()
        .args(["estimate", "--surface", "preview", "--config"])
        .arg(&path)
        .args(["--now", "2024-03-01T16:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin_preview: ships Mar 4"))
        .stdout(predicate::str::contains("storefront").not());
    fs::remove_file(path).ok();
}

#[test]
fn test_estimate_unknown_surface_fails() {
    let path = write_config("badsurface", "{}");
    cmd()
        .args(["estimate", "--surface", "email", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown surface 'email'"));
    fs::remove_file(path).ok();
}

#[test]
fn test_estimate_missing_config_fails() {
    cmd()
        .args(["estimate", "--config", "/nonexistent/settings.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_estimate_bad_now_fails() {
    let path = write_config("badnow", "{}");
    cmd()
        .args(["estimate", "--config"])
        .arg(&path)
        .args(["--now", "next tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --now"));
    fs::remove_file(path).ok();
}
