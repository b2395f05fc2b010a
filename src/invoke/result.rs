//! Raw results of a single tool invocation

use std::time::Duration;

/// Observable output of a tool run that returned control on its own
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedRun {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, or -1 if the tool was terminated by a signal
    pub return_code: i32,
    pub elapsed: Duration,
}

/// What happened when the tool was invoked for one case
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// The tool exited within the deadline; its output still needs classifying
    Finished(FinishedRun),
    /// The harness deadline expired and the process group was killed
    Expired { elapsed: Duration },
    /// The tool could not be launched or waited on
    Faulted { description: String },
}

impl Invocation {
    /// One-line description for logs
    pub fn summary(&self) -> String {
        match self {
            Invocation::Finished(run) => format!(
                "FINISHED ({}ms, exit code: {})",
                run.elapsed.as_millis(),
                run.return_code
            ),
            Invocation::Expired { elapsed } => {
                format!("EXPIRED ({}ms)", elapsed.as_millis())
            }
            Invocation::Faulted { description } => format!("FAULTED ({description})"),
        }
    }
}
