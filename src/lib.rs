//! # illusion-eval
//!
//! Scoring library for vision-language models on optical-illusion
//! perception tasks.
//!
//! Model predictions for paired images (illusion vs. no-illusion, original
//! vs. flipped) are judged against human-derived ground truth: tolerant
//! text matching for question answering, containment/IoU matching for
//! grounding boxes. Pair outcomes are tallied overall and per illusion
//! category and reported as rates.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use illusion_eval::{dataset, EvalConfig, EvalReport, eval_vqa};
//!
//! let data_dir = Path::new("./dataset");
//! let pair_info = dataset::PairInfo::from_path(&data_dir.join(dataset::PAIR_INFO_FILE))?;
//! let annotation: dataset::VqaAnnotation =
//!     dataset::load_json(&data_dir.join(dataset::VQA_ANNOTATION_FILE))?;
//! let predictions: dataset::VqaPredictions =
//!     dataset::load_json(Path::new("predictions/vqa__my-model.json"))?;
//!
//! let results = eval_vqa(&predictions, &pair_info, &annotation, &EvalConfig::default())?;
//!
//! let mut report = EvalReport::new();
//! report.push_vqa(&results);
//! print!("{}", report.render());
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`matching`]: Matching primitives (fuzzy text, bounding boxes)
//! - [`dataset`]: Dataset model and JSON loading
//! - [`eval`]: Pairwise judgment, aggregation, and reports
//! - [`model`]: Model collaborator interface and inference driving

pub mod dataset;
pub mod error;
pub mod eval;
pub mod matching;
pub mod model;

// Re-export commonly used types
pub use dataset::{IllusionCategory, PairInfo, category_for_id};
pub use error::{Error, Result};
pub use eval::{
    EvalConfig, EvalReport, GroundingResults, Outcome, RateTable, Tally, TaskSummary, TaskTallies,
    VqaResults, eval_vg, eval_vqa,
};
pub use matching::{BoundingBox, box_contains, compute_iou, eval_bbox, fuzzy_match};
pub use model::VisionModel;
