//! Negative keyword pipeline
//!
//! [`normalize`] turns loosely-typed rows into deduplicated request groups;
//! [`BatchSubmitter`] sends each group to the endpoint and aggregates the
//! per-group outcomes into a [`SubmissionReport`].

pub mod normalize;
pub mod outcome;
pub mod record;
pub mod submit;

pub use normalize::{Normalized, SkipReason, SkippedRow, normalize, normalize_with_diagnostics};
pub use outcome::{FailureCause, GroupFailure, SubmissionOutcome, SubmissionReport};
pub use record::{CellValue, Field, RawRecord};
pub use submit::{
    BatchSubmitter, FALLBACK_FAILURE_MESSAGE, ReplyFailure, TRANSPORT_FALLBACK_MESSAGE,
    interpret_reply,
};
