//! Integration tests for the harness pipeline
//!
//! These drive real child processes through a scripted stand-in verifier
//! and check the records, reports and process cleanup end to end.

pub mod helpers;
pub mod pipeline;
pub mod reports;
