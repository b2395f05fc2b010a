//! Outcome Classifier
//!
//! Maps an invocation to exactly one [`Outcome`]. For runs that returned on
//! their own, stdout is checked in a fixed order and the first match wins:
//!
//! 1. a safe marker → `safe`
//! 2. an unsafe marker → `unsafe`
//! 3. a timeout phrase, or a non-zero return code → `timeout`
//! 4. otherwise → `unknown`
//!
//! Expired runs are `timeout` and faulted runs are `error` without looking at
//! any output.

mod markers;

pub use markers::MarkerSet;

use anyhow::Result;

use crate::config::MarkerConfig;
use crate::invoke::{FinishedRun, Invocation};
use crate::models::{CaseRecord, CaseSpec, Outcome};

/// Compiled marker sets
#[derive(Debug, Clone)]
pub struct Classifier {
    safe: MarkerSet,
    unsafe_: MarkerSet,
    timeout: MarkerSet,
}

impl Classifier {
    pub fn new(markers: &MarkerConfig) -> Result<Self> {
        Ok(Self {
            safe: MarkerSet::new(&markers.safe_markers)?,
            unsafe_: MarkerSet::new(&markers.unsafe_markers)?,
            timeout: MarkerSet::new(&markers.timeout_phrases)?,
        })
    }

    /// Classify a run that exited within the deadline
    pub fn classify(&self, run: &FinishedRun) -> Outcome {
        if self.safe.is_match(&run.stdout) {
            Outcome::Safe
        } else if self.unsafe_.is_match(&run.stdout) {
            Outcome::Unsafe
        } else if self.timeout.is_match(&run.stdout) || run.return_code != 0 {
            Outcome::Timeout
        } else {
            Outcome::Unknown
        }
    }

    /// Finalize an invocation into the immutable record for `case`
    pub fn resolve(&self, case: &CaseSpec, invocation: Invocation) -> CaseRecord {
        match invocation {
            Invocation::Finished(run) => {
                let outcome = self.classify(&run);
                CaseRecord::new(
                    case,
                    outcome,
                    run.elapsed,
                    run.return_code,
                    run.stdout,
                    run.stderr,
                )
            }
            Invocation::Expired { elapsed } => CaseRecord::expired(case, elapsed),
            Invocation::Faulted { description } => CaseRecord::launch_fault(case, description),
        }
    }
}
