//! End-to-end pipeline behavior: invocation, deadlines, launch faults

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use verirun::classify::Classifier;
use verirun::corpus;
use verirun::harness::{run, run_cases};
use verirun::invoke::{Invoker, ToolCommand};
use verirun::models::{Outcome, NO_RETURN_CODE};
use verirun::report::Aggregator;

use super::helpers::*;

/// A: safe verdict; B: never returns; C: tool fails to launch
#[test]
#[serial]
fn test_safe_timeout_error_scenario() {
    let temp = TempDir::new().unwrap();
    let config = test_config(
        &temp,
        &[
            ("suite/A.v", "HOLDS"),
            ("suite/B.v", "HANG"),
            ("suite/C.v", "HOLDS"),
        ],
    );

    let cases = corpus::discover(&config.corpus_dir, &config.suffix);
    assert_eq!(cases.len(), 3);

    let classifier = Classifier::new(&config.markers).unwrap();
    let invoker = Invoker::from_config(&config);
    let broken = Invoker::new(
        ToolCommand {
            tool: vec!["/nonexistent/verifier".to_string()],
            ..invoker.command().clone()
        },
        invoker.deadline(),
    );

    let mut console = Vec::new();
    let summary = run_cases(
        &cases,
        Aggregator::new(&config.experiment, config.timeout_secs, config.grace()),
        |case| {
            let chosen = if case.case_id == "suite_C" {
                &broken
            } else {
                &invoker
            };
            classifier.resolve(case, chosen.invoke(case))
        },
        &mut console,
    );

    assert_eq!(summary.total_cases, 3);
    assert_eq!(summary.solved_count, 1);
    assert_eq!(summary.timeout_count, 1);
    assert_eq!(summary.error_count, 1);
    assert_eq!(summary.unsolved_count, 0);

    let by_id = |id: &str| {
        summary
            .records
            .iter()
            .find(|r| r.case_id == id)
            .unwrap_or_else(|| panic!("missing record {id}"))
    };

    let a = by_id("suite_A");
    assert_eq!(a.outcome, Outcome::Safe);
    assert!(a.succeeded);
    assert_eq!(a.return_code, 0);

    let b = by_id("suite_B");
    assert_eq!(b.outcome, Outcome::Timeout);
    assert_eq!(b.return_code, NO_RETURN_CODE);
    assert!(b.stdout.is_empty());
    assert!(b.elapsed_seconds >= 1.0, "elapsed {}", b.elapsed_seconds);
    assert!(b.elapsed_seconds < 5.0, "elapsed {}", b.elapsed_seconds);

    let c = by_id("suite_C");
    assert_eq!(c.outcome, Outcome::Error);
    assert_eq!(c.return_code, NO_RETURN_CODE);
    assert_eq!(c.elapsed_seconds, 0.0);
    assert!(c.stderr.contains("/nonexistent/verifier"));

    // The hanging tool's background sleeper must not outlive the case
    let pid = read_pid(&config.output_dir.join("suite_B.pid"));
    assert!(wait_until_gone(pid), "process {pid} left running");

    let console = String::from_utf8(console).unwrap();
    assert!(console.contains("[3/3] suite_C"));
}

#[test]
#[serial]
fn test_missing_tool_marks_every_case_error() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(&temp, &[("x/one.v", "HOLDS"), ("x/two.v", "CEX")]);
    config.tool = vec!["/nonexistent/verifier".to_string()];

    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap().expect("corpus is not empty");

    assert_eq!(summary.total_cases, 2);
    assert_eq!(summary.error_count, 2);
    assert!(summary.records.iter().all(|r| r.return_code == NO_RETURN_CODE));
    assert!(config.results_path.exists());
    assert!(config.stats_path.exists());
}

#[test]
#[serial]
fn test_classifies_each_tool_behavior() {
    let temp = TempDir::new().unwrap();
    let config = test_config(
        &temp,
        &[
            ("m/crash.v", "CRASH"),
            ("m/proved.v", "HOLDS"),
            ("m/refuted.v", "CEX"),
            ("m/silent.v", "nothing to see"),
        ],
    );

    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap().unwrap();

    let outcomes: Vec<_> = summary
        .records
        .iter()
        .map(|r| (r.case_id.as_str(), r.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("m_crash", Outcome::Timeout),
            ("m_proved", Outcome::Safe),
            ("m_refuted", Outcome::Unsafe),
            ("m_silent", Outcome::Unknown),
        ]
    );

    let crash = &summary.records[0];
    assert_eq!(crash.return_code, 3);
    assert_eq!(crash.stderr, "internal error\n");

    for record in &summary.records {
        assert_eq!(record.succeeded, record.outcome.is_definitive());
    }

    // Tool artifacts land in the output directory untouched
    assert!(config.output_dir.join("m_proved.log").exists());
}

#[test]
#[serial]
fn test_echoed_flags_and_case_name_are_not_verdicts() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp, &[("crafted/safe_counter.v", "ECHO")]);

    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap().unwrap();

    let record = &summary.records[0];
    assert!(record.stdout.contains("--timeout 0 -n crafted_safe_counter"));
    assert_eq!(record.outcome, Outcome::Unknown);
}

#[test]
#[serial]
fn test_rerun_gives_same_classification() {
    let temp = TempDir::new().unwrap();
    let config = test_config(
        &temp,
        &[
            ("r/a.v", "HOLDS"),
            ("r/b.v", "CEX"),
            ("r/c.v", "CRASH"),
            ("r/d.v", "plain"),
        ],
    );

    let outcomes = || {
        let mut out = Vec::new();
        run(&config, &mut out)
            .unwrap()
            .unwrap()
            .records
            .into_iter()
            .map(|r| (r.case_id, r.outcome))
            .collect::<Vec<_>>()
    };

    assert_eq!(outcomes(), outcomes());
}

#[test]
#[serial]
fn test_output_dir_exists_before_first_case() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(&temp, &[("d/only.v", "HOLDS")]);
    let script = temp.path().join("needs_out_dir.sh");
    fs::write(&script, "test -d \"$6\" || exit 9\necho \"Result: SAFE\"\n").unwrap();
    config.tool = vec!["sh".to_string(), script.display().to_string()];
    assert!(!config.output_dir.exists());

    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap().unwrap();

    let record = &summary.records[0];
    assert_eq!(record.return_code, 0, "stderr: {}", record.stderr);
    assert_eq!(record.outcome, Outcome::Safe);
    assert!(config.output_dir.is_dir());
}

#[test]
fn test_empty_corpus_writes_no_reports() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp, &[("notes/readme.txt", "not verilog")]);

    let mut out = Vec::new();
    let result = run(&config, &mut out).unwrap();

    assert!(result.is_none());
    assert!(!config.results_path.exists());
    assert!(!config.stats_path.exists());
    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("No input files"));
}

#[test]
fn test_missing_corpus_root_is_empty_run() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(&temp, &[]);
    config.corpus_dir = PathBuf::from("/nonexistent/corpus");

    let mut out = Vec::new();
    assert!(run(&config, &mut out).unwrap().is_none());
}

#[test]
fn test_deadline_is_timeout_plus_grace() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(&temp, &[]);
    config.timeout_secs = 2;
    config.grace_ms = 250;
    assert_eq!(
        Invoker::from_config(&config).deadline(),
        Duration::from_millis(2250)
    );
}
