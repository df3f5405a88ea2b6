//! Matching primitives for model outputs.
//!
//! Pure predicates deciding whether a model's free-text answer or bounding
//! box matches a reference:
//!
//! - [`fuzzy_match`]: tolerant string equality for question answers
//! - [`box_contains`], [`compute_iou`], [`eval_bbox`]: bounding-box matching

pub mod bbox;
pub mod text;

pub use bbox::{BoundingBox, DEFAULT_IOU_THRESHOLD, box_contains, compute_iou, eval_bbox};
pub use text::fuzzy_match;
