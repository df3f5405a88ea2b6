//! Pairwise judgment, aggregation, and report generation.
//!
//! This module provides the core evaluation pipeline:
//!
//! - [`judge`]: outcome labels and the three pairwise judgment rules
//! - [`tally`]: outcome counters and derived rate tables
//! - [`session`]: evaluation passes over declared comparison pairs
//! - [`report`]: serializable reports and text rendering

pub mod judge;
pub mod report;
pub mod session;
pub mod tally;

pub use judge::{Outcome, ref_attr_answer_match, refloc_bbox_match, samediff_answer_match};
pub use report::{EvalReport, TaskSummary};
pub use session::{
    EvalConfig, GroundingResults, REF_LOC_TASK, VqaResults, VqaTask, eval_vg, eval_vqa,
};
pub use tally::{RateTable, Tally, TaskTallies};
