//! Shared helpers: scratch corpora and a scripted stand-in for the verifier

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

use verirun::config::HarnessConfig;
use verirun::process::is_process_running;

/// Fake verifier. Arguments arrive as
/// `--timeout T -n <case_id> -o <output_dir> <input_file>`, so `$4` is the case
/// id, `$6` the output directory and `$7` the input file. The verdict is
/// picked from a keyword in the input file.
pub const FAKE_TOOL: &str = r#"
case_id="$4"
out_dir="$6"
input="$7"
mkdir -p "$out_dir"
echo "checked $case_id" > "$out_dir/$case_id.log"
content=$(cat "$input")
case "$content" in
  *HOLDS*) echo "Result: SAFE" ;;
  *CEX*) echo "Result: cea found at depth 4" ;;
  *CRASH*) echo "internal error" >&2; exit 3 ;;
  *HANG*) sleep 30 & echo $! > "$out_dir/$case_id.pid"; wait ;;
  *ECHO*) echo "invoked with $*" ;;
  *) echo "done" ;;
esac
"#;

/// Write the fake tool into `dir` and return the tool command
pub fn install_fake_tool(dir: &Path) -> Vec<String> {
    let script = dir.join("fake_verifier.sh");
    fs::write(&script, FAKE_TOOL).expect("Failed to write fake tool");
    vec!["sh".to_string(), script.display().to_string()]
}

/// Create corpus files under `<dir>/corpus`; each entry is (relative path, content)
pub fn write_corpus(dir: &Path, files: &[(&str, &str)]) -> PathBuf {
    let root = dir.join("corpus");
    fs::create_dir_all(&root).expect("Failed to create corpus root");
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create corpus dir");
        fs::write(&path, content).expect("Failed to write corpus file");
    }
    root
}

/// Config rooted entirely in `temp`, with a 1s harness deadline
pub fn test_config(temp: &TempDir, files: &[(&str, &str)]) -> HarnessConfig {
    colored::control::set_override(false);
    let dir = temp.path();
    HarnessConfig {
        experiment: "Integration".to_string(),
        corpus_dir: write_corpus(dir, files),
        tool: install_fake_tool(dir),
        timeout_secs: 0,
        grace_ms: 1000,
        output_dir: dir.join("out"),
        base_dir: dir.to_path_buf(),
        results_path: dir.join("reports/results.json"),
        stats_path: dir.join("reports/stats.txt"),
        ..HarnessConfig::default()
    }
}

/// Poll until `pid` is gone (or a zombie), giving up after ~2s
pub fn wait_until_gone(pid: u32) -> bool {
    for _ in 0..100 {
        if !is_process_running(pid) {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    false
}

pub fn read_pid(path: &Path) -> u32 {
    fs::read_to_string(path)
        .expect("Failed to read pid file")
        .trim()
        .parse()
        .expect("pid file does not hold a pid")
}
