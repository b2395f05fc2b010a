//! Report sinks produced by a full run

use serde_json::Value;
use serial_test::serial;
use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use tempfile::TempDir;

use verirun::harness::run;

use super::helpers::*;

#[test]
#[serial]
fn test_reports_match_summary() {
    let temp = TempDir::new().unwrap();
    let config = test_config(
        &temp,
        &[
            ("crafted/a.v", "HOLDS"),
            ("crafted/b.v", "HANG"),
            ("crafted/c.v", "CEX"),
            ("crafted/d.v", "plain"),
        ],
    );

    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap().unwrap();

    let doc: Value =
        serde_json::from_str(&fs::read_to_string(&config.results_path).unwrap()).unwrap();
    assert_eq!(doc["experiment"], "Integration");
    assert_eq!(doc["timeout"], 0);
    assert_eq!(doc["total_cases"], 4);
    assert_eq!(doc["solved_count"], 2);
    assert_eq!(doc["timeout_count"], 1);
    assert_eq!(doc["error_count"], 0);
    assert_eq!(doc["unsolved_count"], 1);
    assert_eq!(
        doc["solved_cases"],
        serde_json::json!(["crafted_a", "crafted_c"])
    );
    assert_eq!(doc["timeout_cases"], serde_json::json!(["crafted_b"]));
    assert_eq!(doc["unsolved_cases"], serde_json::json!(["crafted_d"]));

    let details = doc["detailed_results"].as_array().unwrap();
    assert_eq!(details.len(), summary.total_cases);
    for (detail, record) in details.iter().zip(&summary.records) {
        assert_eq!(detail["case"], record.case_id.as_str());
        assert_eq!(detail["result"], record.outcome.as_str());
        assert_eq!(detail["success"], record.succeeded);
        assert_eq!(detail["returncode"], record.return_code);
    }

    let stats = fs::read_to_string(&config.stats_path).unwrap();
    assert!(stats.starts_with("Integration results\n"));
    assert!(stats.contains("Total cases: 4\n"));
    assert!(stats.contains("Solved: 2 (50.0%)\n"));
    assert!(stats.contains("Timeout: 1 (25.0%)\n"));
    assert!(stats.contains("Unsolved: 1 (25.0%)\n"));
    assert!(stats.contains("  crafted_a - safe ("));
    assert!(stats.contains("  crafted_c - unsafe ("));
    assert!(stats.contains("  crafted_b - timeout ("));
    assert!(stats.contains("  crafted_d - unknown ("));
    assert!(!stats.contains("Error cases"));

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("Found 4 input files"));
    assert!(console.contains("[4/4] crafted_d"));
    assert!(console.contains("Timeout cases (1):"));
}

#[test]
#[serial]
fn test_non_utf8_corpus_path_still_writes_both_reports() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp, &[("ok/a.v", "HOLDS")]);
    let bad_dir = config.corpus_dir.join(OsStr::from_bytes(b"bad\xff"));
    fs::create_dir_all(&bad_dir).unwrap();
    fs::write(bad_dir.join("b.v"), "CEX").unwrap();

    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap().unwrap();
    assert_eq!(summary.total_cases, 2);
    assert_eq!(summary.solved_count, 2);

    let doc: Value =
        serde_json::from_str(&fs::read_to_string(&config.results_path).unwrap()).unwrap();
    let files: Vec<_> = doc["detailed_results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["file"].as_str().unwrap().to_string())
        .collect();
    assert!(files.iter().any(|f| f.ends_with("bad\u{fffd}/b.v")), "{files:?}");
    assert!(files.iter().any(|f| f.ends_with("ok/a.v")), "{files:?}");

    let stats = fs::read_to_string(&config.stats_path).unwrap();
    assert!(stats.contains("Solved: 2 (100.0%)\n"));
}
