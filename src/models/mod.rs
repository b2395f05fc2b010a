pub mod case;
pub mod summary;

pub use case::{derive_case_id, CaseRecord, CaseSpec, Outcome, NO_RETURN_CODE};
pub use summary::{percentage, Bucket, Percentages, RunSummary};
