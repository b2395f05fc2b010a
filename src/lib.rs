//! Batch harness for an external verification tool.
//!
//! Discovers a corpus of input files, runs the tool once per file under a
//! hard deadline, classifies each run from its output, and writes a JSON
//! report plus a plain-text summary.

pub mod classify;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod harness;
pub mod invoke;
pub mod models;
pub mod process;
pub mod report;
