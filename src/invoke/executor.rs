//! Per-case tool execution

use std::time::Duration;

use super::command::ToolCommand;
use super::result::{FinishedRun, Invocation};
use crate::config::HarnessConfig;
use crate::models::{CaseSpec, NO_RETURN_CODE};
use crate::process::{run_with_deadline, Completion};

/// Runs the verification tool for one case at a time under a hard deadline
#[derive(Debug, Clone)]
pub struct Invoker {
    command: ToolCommand,
    deadline: Duration,
}

impl Invoker {
    pub fn new(command: ToolCommand, deadline: Duration) -> Self {
        Self { command, deadline }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(
            ToolCommand {
                tool: config.tool.clone(),
                timeout_secs: config.timeout_secs,
                output_dir: config.output_dir.clone(),
                base_dir: config.base_dir.clone(),
            },
            config.deadline(),
        )
    }

    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    /// Harness-side ceiling: tool timeout plus grace
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Warn early if the tool program cannot be resolved.
    ///
    /// Advisory only; every case still goes through [`Invoker::invoke`] and a
    /// missing program is recorded per case as a launch fault.
    pub fn preflight(&self) -> Option<String> {
        let program = self.command.program()?;
        match which::which(program) {
            Ok(path) => {
                tracing::debug!(program = %path.display(), "resolved tool program");
                None
            }
            Err(e) => Some(format!(
                "tool program '{}' not found: {e}",
                program.display()
            )),
        }
    }

    /// Invoke the tool for `case`.
    ///
    /// Never fails: launch and wait faults come back as [`Invocation::Faulted`],
    /// an expired deadline as [`Invocation::Expired`]. In every branch the
    /// child's process group is gone by the time this returns.
    pub fn invoke(&self, case: &CaseSpec) -> Invocation {
        tracing::debug!(
            case = %case.case_id,
            command = %self.command.display(case),
            deadline_ms = self.deadline.as_millis() as u64,
            "invoking tool"
        );

        let mut cmd = self.command.build(case);
        let invocation = match run_with_deadline(&mut cmd, self.deadline) {
            Ok(Completion::Exited {
                status,
                stdout,
                stderr,
                elapsed,
            }) => Invocation::Finished(FinishedRun {
                stdout,
                stderr,
                return_code: status.code().unwrap_or(NO_RETURN_CODE),
                elapsed,
            }),
            Ok(Completion::Expired { elapsed }) => {
                tracing::warn!(case = %case.case_id, ?elapsed, "deadline expired, tool killed");
                Invocation::Expired { elapsed }
            }
            Err(e) => {
                let description = format!("{e:#}");
                tracing::warn!(case = %case.case_id, error = %description, "tool launch failed");
                Invocation::Faulted { description }
            }
        };
        tracing::debug!(case = %case.case_id, "{}", invocation.summary());
        invocation
    }
}
