//! Per-candidate competitor classification (name, then keyword, then
//! vision) and the per-site runner that aggregates the verdicts.

pub mod cascade;
pub mod runner;
pub mod summary;

pub use cascade::{CandidateEvaluation, Cascade, FailedStage, Outcome, Verdict};
pub use runner::{RunSettings, SiteReport, SiteRunner};
pub use summary::summarize;
