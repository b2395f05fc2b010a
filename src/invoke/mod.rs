//! Run Invoker
//!
//! Executes the external verification tool once per case:
//!
//! ```text
//! <tool...> --timeout <T> -n <case_id> -o <output_dir> <input_file>
//! ```
//!
//! # Timeout Behavior
//!
//! The tool is asked to honor `T` itself, but it is not trusted to. The
//! invoker enforces its own wall-clock deadline of `T + grace`:
//! - The tool runs as the leader of a fresh process group
//! - On expiry the whole group receives SIGKILL and the leader is reaped
//! - The case is reported as expired with no captured output
//!
//! Launch and wait faults are returned as data, never as errors, so one bad
//! case cannot abort the batch.

mod command;
mod executor;
mod result;

pub use command::ToolCommand;
pub use executor::Invoker;
pub use result::{FinishedRun, Invocation};
