//! Dataset model: annotations, predictions, and pair definitions.
//!
//! All inputs are JSON files keyed by data ID. A data ID is a string whose
//! integer prefix selects the illusion category (see [`category_for_id`]).
//! Maps are ordered so evaluation and reporting are deterministic.

pub mod category;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::matching::BoundingBox;

pub use category::{IllusionCategory, category_for_id};

/// Pair definition file name within a dataset directory.
pub const PAIR_INFO_FILE: &str = "pair_info.json";

/// VQA annotation file name within a dataset directory.
pub const VQA_ANNOTATION_FILE: &str = "vqa_annotation.json";

/// Visual grounding annotation file name within a dataset directory.
pub const VG_ANNOTATION_FILE: &str = "vg_annotation.json";

/// Ground-truth annotation for a single VQA data point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VqaEntry {
    /// Question posed about the image.
    pub question: String,

    /// Image file name within the dataset image directory.
    pub img: String,

    /// Expected humanlike answer when no illusion is present.
    pub answer_match: String,

    /// Expected humanlike answer under the illusion.
    pub answer_mismatch: String,
}

/// Ground-truth annotation for a single visual grounding data point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingEntry {
    /// Referring expression to localize.
    pub query: String,

    /// Image file name within the dataset image directory.
    pub img: String,

    /// Humanlike bounding box for the query.
    pub bbox_match: BoundingBox,
}

/// A two-element comparison pair of data IDs.
pub type IdPair = (String, String);

/// Which data points are compared together, per task.
///
/// Missing keys deserialize as empty lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairInfo {
    /// Same/different question pairs (no-illusion image first).
    #[serde(default)]
    pub samediff_qa: Vec<IdPair>,

    /// Subject question pairs (original image first). Declared in pair-info
    /// files but not consulted by the evaluator; see
    /// [`eval_vqa`](crate::eval::eval_vqa).
    #[serde(default)]
    pub subj_qa: Vec<IdPair>,

    /// Description question pairs (original image first). Declared in
    /// pair-info files but not consulted by the evaluator; see
    /// [`eval_vqa`](crate::eval::eval_vqa).
    #[serde(default)]
    pub desc_qa: Vec<IdPair>,

    /// Localization pairs (original image first).
    #[serde(default)]
    pub localization: Vec<IdPair>,
}

impl PairInfo {
    /// Load pair definitions from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

/// VQA annotations keyed by data ID.
pub type VqaAnnotation = BTreeMap<String, VqaEntry>;

/// Visual grounding annotations keyed by data ID.
pub type GroundingAnnotation = BTreeMap<String, GroundingEntry>;

/// Model answers keyed by data ID.
pub type VqaPredictions = BTreeMap<String, String>;

/// Model bounding boxes keyed by data ID.
pub type GroundingPredictions = BTreeMap<String, BoundingBox>;

/// Load a JSON-encoded dataset file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
