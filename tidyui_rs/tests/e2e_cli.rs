//! End-to-End CLI Tests for tidyui
//!
//! Runs the real binary against `tests/fixtures/pokedex` and small temp trees.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get path to test fixtures
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn pokedex() -> PathBuf {
    fixtures_path().join("pokedex")
}

/// Get a command pointing to the tidyui binary
fn tidyui() -> Command {
    cargo_bin_cmd!("tidyui")
}

// ============================================
// Basic CLI Tests
// ============================================

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        tidyui()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("tidyui"))
            .stdout(predicate::str::contains("--fail-on-issues"));
    }

    #[test]
    fn shows_version() {
        tidyui()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn rejects_unknown_flag() {
        tidyui().arg("--no-such-flag").assert().failure();
    }
}

// ============================================
// Scanning the fixture tree
// ============================================

mod scan {
    use super::*;

    #[test]
    fn writes_markdown_report_and_prints_summary() {
        let out = TempDir::new().expect("tmp dir");
        let report = out.path().join("report.md");

        tidyui()
            .arg(pokedex())
            .arg("-o")
            .arg(&report)
            .assert()
            .success()
            .stdout(predicate::str::contains("Scanned 6 files, found 6 issues"));

        let md = std::fs::read_to_string(&report).expect("report written");
        assert!(md.contains("# Component Analysis Report"));
        assert!(md.contains("## Duplicate Components"));
        assert!(md.contains("features/battle/PokemonButton.tsx"));
        assert!(md.contains("`Orphan`"));
        assert!(md.contains("hardcoded-color"));
        assert!(!md.contains("effects/Glow.tsx:"));
    }

    #[test]
    fn json_to_stdout_is_parseable() {
        let out = TempDir::new().expect("tmp dir");
        let assert = tidyui()
            .arg(pokedex())
            .arg("-o")
            .arg(out.path().join("report.md"))
            .arg("--json")
            .assert()
            .success();

        let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
        let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
        assert_eq!(json["tool"], "tidyui");
        assert_eq!(json["summary"]["files_scanned"], 6);
        assert_eq!(json["summary"]["duplicate_components"], 1);
        assert_eq!(json["summary"]["style_violations"], 2);
        assert_eq!(json["summary"]["unused_components"], 2);
        assert_eq!(json["summary"]["naming_conflicts"], 1);
        assert_eq!(json["summary"]["total_issues"], 6);
        assert_eq!(json["duplicate_components"][0]["similarity"], 50);

        let unused: Vec<&str> = json["unused_components"]
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|s| s["name"].as_str())
            .collect();
        assert_eq!(unused, vec!["App", "Orphan"]);
    }

    #[test]
    fn json_output_file_is_written() {
        let out = TempDir::new().expect("tmp dir");
        let json_path = out.path().join("nested/report.json");
        tidyui()
            .arg(pokedex())
            .arg("-o")
            .arg(out.path().join("report.md"))
            .arg("--json-output")
            .arg(&json_path)
            .arg("--quiet")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let text = std::fs::read_to_string(&json_path).expect("json written");
        assert!(text.contains("\"naming_conflicts\""));
    }

    #[test]
    fn fail_on_issues_sets_exit_code() {
        let out = TempDir::new().expect("tmp dir");
        tidyui()
            .arg(pokedex())
            .arg("-o")
            .arg(out.path().join("report.md"))
            .arg("--quiet")
            .arg("--fail-on-issues")
            .assert()
            .code(1);
    }
}

// ============================================
// Edge cases
// ============================================

mod edge_cases {
    use super::*;

    #[test]
    fn empty_root_is_clean() {
        let root = TempDir::new().expect("tmp dir");
        let out = TempDir::new().expect("tmp dir");
        tidyui()
            .arg(root.path())
            .arg("-o")
            .arg(out.path().join("report.md"))
            .arg("--fail-on-issues")
            .assert()
            .success()
            .stdout(predicate::str::contains("Scanned 0 files, found 0 issues"));
    }

    #[test]
    fn missing_root_fails() {
        let out = TempDir::new().expect("tmp dir");
        tidyui()
            .arg(out.path().join("does-not-exist"))
            .arg("-o")
            .arg(out.path().join("report.md"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("cannot enumerate source root"));
    }

    #[test]
    fn broken_explicit_config_fails() {
        let root = TempDir::new().expect("tmp dir");
        let config = root.path().join("tidyui.toml");
        std::fs::write(&config, "[blocks\nwindow = ").expect("write config");
        tidyui()
            .arg(root.path())
            .arg("--config")
            .arg(&config)
            .arg("-o")
            .arg(root.path().join("report.md"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid config"));
    }

    #[test]
    fn project_config_adds_exclusions() {
        let root = TempDir::new().expect("tmp dir");
        let dir = root.path().join("legacy");
        std::fs::create_dir_all(&dir).expect("dir");
        std::fs::write(
            dir.join("Banner.tsx"),
            "const c = '#123456';\n",
        )
        .expect("write source");

        let report = root.path().join("report.md");
        tidyui()
            .arg(root.path())
            .arg("-o")
            .arg(&report)
            .arg("--fail-on-issues")
            .assert()
            .code(1);

        std::fs::create_dir_all(root.path().join(".tidyui")).expect("config dir");
        std::fs::write(
            root.path().join(".tidyui/config.toml"),
            "[exclusions]\nhardcoded_color = [\"legacy/\"]\n",
        )
        .expect("write config");
        tidyui()
            .arg(root.path())
            .arg("-o")
            .arg(&report)
            .arg("--fail-on-issues")
            .assert()
            .success();
    }
}
