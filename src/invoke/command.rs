//! Tool command-line construction

use shell_escape::escape;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::models::CaseSpec;

/// Fixed parts of every tool invocation
#[derive(Debug, Clone)]
pub struct ToolCommand {
    /// Program followed by leading arguments
    pub tool: Vec<String>,
    pub timeout_secs: u64,
    pub output_dir: PathBuf,
    pub base_dir: PathBuf,
}

impl ToolCommand {
    /// Full argument vector: `<tool...> --timeout T -n <case_id> -o <output_dir> <input>`
    pub fn argv(&self, case: &CaseSpec) -> Vec<String> {
        let mut argv = self.tool.clone();
        argv.extend([
            "--timeout".to_string(),
            self.timeout_secs.to_string(),
            "-n".to_string(),
            case.case_id.clone(),
            "-o".to_string(),
            self.output_dir.display().to_string(),
            case.source_path.display().to_string(),
        ]);
        argv
    }

    /// Build the process command for one case.
    ///
    /// Paths are passed as `OsStr` so non-UTF-8 names survive intact.
    pub fn build(&self, case: &CaseSpec) -> Command {
        let (program, leading) = match self.tool.split_first() {
            Some((program, leading)) => (program.as_str(), leading),
            None => ("", &[][..]),
        };

        let mut cmd = Command::new(program);
        cmd.args(leading)
            .arg("--timeout")
            .arg(self.timeout_secs.to_string())
            .arg("-n")
            .arg(&case.case_id)
            .arg("-o")
            .arg(&self.output_dir)
            .arg(&case.source_path)
            .current_dir(&self.base_dir);
        cmd
    }

    /// Shell-quoted rendering of the command line, for logs
    pub fn display(&self, case: &CaseSpec) -> String {
        self.argv(case)
            .into_iter()
            .map(|a| escape(Cow::Owned(a)).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn program(&self) -> Option<&Path> {
        self.tool.first().map(Path::new)
    }
}
