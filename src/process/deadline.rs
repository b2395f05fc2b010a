//! Deadline-bounded child execution
//!
//! [`run_with_deadline`] is the one place a tool process is started and torn
//! down. It races the child's exit against a wall-clock deadline; whichever
//! branch wins, the child's process group is killed and the direct child is
//! reaped before the function returns.

use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use std::io::{ErrorKind, Read};
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

use super::to_pid;

/// Budget shared by both pipes for collecting output after the child exits
const OUTPUT_COLLECTION_WINDOW: Duration = Duration::from_secs(10);

const READ_CHUNK: usize = 8192;

/// How a deadline-bounded run ended
#[derive(Debug)]
pub enum Completion {
    /// The child exited on its own before the deadline
    Exited {
        status: ExitStatus,
        stdout: String,
        stderr: String,
        elapsed: Duration,
    },
    /// The deadline expired; the process group was killed and reaped
    Expired { elapsed: Duration },
}

/// Owned child running as leader of its own process group.
///
/// Dropping an unreaped `GroupChild` kills the whole group and reaps the
/// leader, so no exit path can leak a running tool.
pub struct GroupChild {
    child: Child,
    reaped: bool,
}

impl GroupChild {
    /// Spawn `command` as the leader of a fresh process group
    pub fn spawn(command: &mut Command) -> std::io::Result<Self> {
        let child = command.process_group(0).spawn()?;
        Ok(Self {
            child,
            reaped: false,
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn child_mut(&mut self) -> &mut Child {
        &mut self.child
    }

    /// SIGKILL every process in the group. Missing groups are not an error.
    pub fn kill_group(&self) {
        let Some(pgid) = to_pid(self.child.id()) else {
            return;
        };
        match killpg(pgid, Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(e) => tracing::warn!(pgid = %pgid, error = %e, "failed to kill process group"),
        }
    }

    /// Kill the group and reap the leader
    pub fn terminate(&mut self) {
        self.kill_group();
        if !self.reaped {
            // Falls back to a direct kill if the group signal was refused
            let _ = self.child.kill();
            let _ = self.child.wait();
            self.reaped = true;
        }
    }

    fn mark_reaped(&mut self) {
        self.reaped = true;
    }
}

impl Drop for GroupChild {
    fn drop(&mut self) {
        if !self.reaped {
            self.terminate();
        }
    }
}

/// Run `command` to completion or until `deadline` elapses.
///
/// stdin is closed and both output pipes are drained on background threads
/// while waiting, so a chatty child cannot block on a full pipe. Any process
/// the child leaves behind in its group is killed once the child exits.
///
/// Errors are launch or wait faults; an expired deadline is not an error.
pub fn run_with_deadline(command: &mut Command, deadline: Duration) -> Result<Completion> {
    run_within(command, deadline, OUTPUT_COLLECTION_WINDOW)
}

/// A descendant that left the group (e.g. via `setsid`) can hold the pipes
/// open past the exit; whatever arrived within `collection_window` is kept.
fn run_within(
    command: &mut Command,
    deadline: Duration,
    collection_window: Duration,
) -> Result<Completion> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let start = Instant::now();
    let mut child = GroupChild::spawn(command)
        .with_context(|| format!("Failed to spawn {:?}", command.get_program()))?;

    let stdout_rx = drain(child.child_mut().stdout.take());
    let stderr_rx = drain(child.child_mut().stderr.take());

    let waited = child
        .child_mut()
        .wait_timeout(deadline)
        .with_context(|| format!("Failed to wait for process {}", child.id()));

    match waited {
        Ok(Some(status)) => {
            child.mark_reaped();
            let elapsed = start.elapsed();
            // Stragglers would otherwise keep the pipes open
            child.kill_group();

            let until = Instant::now() + collection_window;
            let stdout = collect(&stdout_rx, until);
            let stderr = collect(&stderr_rx, until);
            Ok(Completion::Exited {
                status,
                stdout,
                stderr,
                elapsed,
            })
        }
        Ok(None) => {
            child.terminate();
            Ok(Completion::Expired {
                elapsed: start.elapsed(),
            })
        }
        Err(e) => {
            child.terminate();
            Err(e)
        }
    }
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    if let Some(stream) = stream {
        thread::spawn(move || pump(stream, &tx));
    }
    rx
}

/// Forward `stream` in chunks until EOF, a read error, or a dropped receiver
fn pump<R: Read>(mut stream: R, tx: &Sender<Vec<u8>>) {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!(error = %e, "error reading child output");
                break;
            }
        }
    }
}

/// Gather chunks until the writer side closes or `until` passes
fn collect(rx: &Receiver<Vec<u8>>, until: Instant) -> String {
    let mut buf = Vec::new();
    loop {
        let remaining = until.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(chunk) => buf.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    bytes = buf.len(),
                    "output pipe still open after the tool exited; keeping partial output"
                );
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
