//! Process control for tool invocations
//!
//! Children are spawned into their own process group so that a single
//! `killpg` tears down the tool and everything it forked. The liveness probes
//! here let callers (and tests) confirm nothing was left behind.

mod deadline;

pub use deadline::{run_with_deadline, Completion, GroupChild};

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;

/// Check if a process with the given PID exists
///
/// Uses `kill` with the null signal. `EPERM` still means the process exists;
/// `ESRCH` means it does not. Zombies count as existing; see
/// [`is_process_running`] to exclude them.
pub fn is_process_alive(pid: u32) -> bool {
    let Some(pid) = to_pid(pid) else {
        return false;
    };

    match kill(pid, None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(Errno::ESRCH) => false,
        Err(_) => false,
    }
}

/// Check if a process exists and has not already exited
///
/// A killed process that was reparented may linger as a zombie until its new
/// parent reaps it. On Linux the state letter in `/proc/<pid>/stat` tells the
/// two apart; elsewhere this falls back to [`is_process_alive`].
pub fn is_process_running(pid: u32) -> bool {
    if !is_process_alive(pid) {
        return false;
    }

    #[cfg(target_os = "linux")]
    {
        let Ok(stat) = std::fs::read_to_string(format!("/proc/{pid}/stat")) else {
            return false;
        };
        // Format: "<pid> (<comm>) <state> ..."; comm may itself contain ')'
        let state = stat
            .rfind(')')
            .and_then(|idx| stat[idx + 1..].trim_start().chars().next());
        !matches!(state, Some('Z') | Some('X') | None)
    }

    #[cfg(not(target_os = "linux"))]
    {
        true
    }
}

pub(crate) fn to_pid(pid: u32) -> Option<Pid> {
    i32::try_from(pid).ok().map(Pid::from_raw)
}
