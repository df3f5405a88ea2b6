//! Model collaborator interface and inference driving.
//!
//! The evaluator never inspects a model under test; it consumes two query
//! capabilities. Backends implement [`VisionModel`] and the drivers here
//! turn an annotation set into the prediction maps the evaluator scores.
//! Images are passed as file paths; loading and preprocessing belong to the
//! backend.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::dataset::{GroundingAnnotation, GroundingPredictions, VqaAnnotation, VqaPredictions};
use crate::error::Result;
use crate::matching::BoundingBox;

/// A vision-language model under test.
pub trait VisionModel {
    /// Short identifier used in prediction file names.
    fn name(&self) -> &str;

    /// Answer a question about an image.
    ///
    /// `candidates` lists the expected answer strings for the question
    /// ("yes"/"no" for same/different questions); backends may use it to
    /// constrain generation or to parse their own output.
    fn answer(&self, image: &Path, question: &str, candidates: &[&str]) -> Result<String>;

    /// Locate the object described by `query` in the image.
    fn locate(&self, image: &Path, query: &str) -> Result<BoundingBox>;
}

/// Run VQA inference over an annotation set.
///
/// Returns answers keyed by data ID, the map consumed by
/// [`eval_vqa`](crate::eval::eval_vqa).
///
/// # Errors
///
/// Fails on the first backend error; predictions are all-or-nothing.
pub fn run_vqa_inference(
    model: &dyn VisionModel,
    annotation: &VqaAnnotation,
    image_dir: &Path,
) -> Result<VqaPredictions> {
    let mut predictions = VqaPredictions::new();
    for (id, entry) in annotation {
        let image = image_dir.join(&entry.img);
        let candidates = [entry.answer_match.as_str(), entry.answer_mismatch.as_str()];
        let answer = model.answer(&image, &entry.question, &candidates)?;
        predictions.insert(id.clone(), answer);
    }
    Ok(predictions)
}

/// Run visual grounding inference over an annotation set.
///
/// Returns bounding boxes keyed by data ID, the map consumed by
/// [`eval_vg`](crate::eval::eval_vg).
///
/// # Errors
///
/// Fails on the first backend error; predictions are all-or-nothing.
pub fn run_grounding_inference(
    model: &dyn VisionModel,
    annotation: &GroundingAnnotation,
    image_dir: &Path,
) -> Result<GroundingPredictions> {
    let mut predictions = GroundingPredictions::new();
    for (id, entry) in annotation {
        let image = image_dir.join(&entry.img);
        let bbox = model.locate(&image, &entry.query)?;
        predictions.insert(id.clone(), bbox);
    }
    Ok(predictions)
}

/// Write predictions as `<task>__<model>.json` under `save_dir`.
///
/// Returns the path written. The output is the same JSON shape the
/// evaluator loads back.
pub fn save_predictions<T: Serialize>(
    predictions: &BTreeMap<String, T>,
    task: &str,
    model_name: &str,
    save_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(save_dir)?;
    let path = save_dir.join(format!("{task}__{model_name}.json"));
    fs::write(&path, serde_json::to_string_pretty(predictions)?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::VqaEntry;
    use crate::error::Error;

    /// Backend that always answers with the first candidate.
    struct FirstCandidate;

    impl VisionModel for FirstCandidate {
        fn name(&self) -> &str {
            "first-candidate"
        }

        fn answer(&self, _image: &Path, _question: &str, candidates: &[&str]) -> Result<String> {
            candidates.first().map(|c| (*c).to_string()).ok_or_else(|| Error::Model {
                model: self.name().to_string(),
                message: "no candidate answers".to_string(),
            })
        }

        fn locate(&self, _image: &Path, _query: &str) -> Result<BoundingBox> {
            Ok(BoundingBox::new(0.0, 0.0, 1.0, 1.0))
        }
    }

    fn annotation() -> VqaAnnotation {
        let mut map = VqaAnnotation::new();
        map.insert(
            "1_a".to_string(),
            VqaEntry {
                question: "Are the two circles the same color?".to_string(),
                img: "1_a.png".to_string(),
                answer_match: "yes".to_string(),
                answer_mismatch: "no".to_string(),
            },
        );
        map
    }

    #[test]
    fn test_vqa_inference_keys_by_data_id() {
        let predictions =
            run_vqa_inference(&FirstCandidate, &annotation(), Path::new("images")).unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions["1_a"], "yes");
    }

    #[test]
    fn test_save_predictions_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let predictions =
            run_vqa_inference(&FirstCandidate, &annotation(), Path::new("images")).unwrap();
        let path = save_predictions(&predictions, "vqa", "first-candidate", dir.path()).unwrap();

        assert!(path.ends_with("vqa__first-candidate.json"));
        let loaded: VqaPredictions = crate::dataset::load_json(&path).unwrap();
        assert_eq!(loaded, predictions);
    }
}
