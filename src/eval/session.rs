//! Evaluation passes over declared comparison pairs.
//!
//! [`eval_vqa`] and [`eval_vg`] resolve each declared pair against the
//! prediction and annotation maps, judge it, and tally the outcome overall
//! and per illusion category. A pair that fails to resolve aborts the pass;
//! there are no partial results.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dataset::{
    GroundingAnnotation, GroundingPredictions, IdPair, IllusionCategory, PairInfo, VqaAnnotation,
    VqaPredictions, category_for_id,
};
use crate::error::{Error, Result};
use crate::eval::judge::{self, Outcome};
use crate::eval::tally::TaskTallies;
use crate::matching::DEFAULT_IOU_THRESHOLD;

/// VQA task types scored by [`eval_vqa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VqaTask {
    /// Same/different questions, judged by the same/diff rule.
    SameDiff,
    /// Subject reference questions, judged by the ref/attr rule.
    Ref,
    /// Attribute questions, judged by the ref/attr rule.
    Attr,
}

impl VqaTask {
    /// Task name used in reports and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SameDiff => "SameDiffQA",
            Self::Ref => "RefQA",
            Self::Attr => "AttrQA",
        }
    }
}

impl std::fmt::Display for VqaTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Task name used for visual grounding in reports and error messages.
pub const REF_LOC_TASK: &str = "RefLoc";

/// Configuration for an evaluation pass.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// IoU threshold for bounding-box matching (strict greater-than).
    pub iou_threshold: f64,

    /// Judge pairs in parallel. Tallies are order-independent counters, so
    /// the result is identical to a sequential pass.
    pub parallel: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            parallel: false,
        }
    }
}

impl EvalConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> EvalConfigBuilder {
        EvalConfigBuilder::default()
    }
}

/// Builder for [`EvalConfig`].
#[derive(Debug, Default)]
pub struct EvalConfigBuilder {
    iou_threshold: Option<f64>,
    parallel: bool,
}

impl EvalConfigBuilder {
    /// Set the IoU threshold for bounding-box matching.
    #[must_use]
    pub fn iou_threshold(mut self, threshold: f64) -> Self {
        self.iou_threshold = Some(threshold);
        self
    }

    /// Judge pairs in parallel.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EvalConfig {
        EvalConfig {
            iou_threshold: self.iou_threshold.unwrap_or(DEFAULT_IOU_THRESHOLD),
            parallel: self.parallel,
        }
    }
}

/// Tallies from a VQA evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VqaResults {
    /// Same/different question task.
    pub samediff_qa: TaskTallies,

    /// Subject reference question task.
    pub ref_qa: TaskTallies,

    /// Attribute question task.
    pub attr_qa: TaskTallies,
}

impl VqaResults {
    /// Task names and tallies in evaluation order.
    #[must_use]
    pub fn tasks(&self) -> [(&'static str, &TaskTallies); 3] {
        [
            (VqaTask::SameDiff.name(), &self.samediff_qa),
            (VqaTask::Ref.name(), &self.ref_qa),
            (VqaTask::Attr.name(), &self.attr_qa),
        ]
    }

    fn for_task_mut(&mut self, task: VqaTask) -> &mut TaskTallies {
        match task {
            VqaTask::SameDiff => &mut self.samediff_qa,
            VqaTask::Ref => &mut self.ref_qa,
            VqaTask::Attr => &mut self.attr_qa,
        }
    }
}

/// Tallies from a visual grounding evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingResults {
    /// Referring-expression localization task.
    pub ref_loc: TaskTallies,
}

/// Evaluate VQA predictions over the declared comparison pairs.
///
/// All three question tasks are driven by the `samediff_qa` pair list; the
/// `subj_qa` and `desc_qa` lists carried by [`PairInfo`] do not feed the
/// evaluation. Ground truth for the first ID of a pair is its
/// `answer_match` field, for the second ID its `answer_mismatch` field, and
/// the per-category tally is keyed by the first ID's category.
///
/// # Errors
///
/// Fails if a pair references an ID missing from `predictions` or
/// `annotation`, or an ID whose prefix is outside the category table.
pub fn eval_vqa(
    predictions: &VqaPredictions,
    pair_info: &PairInfo,
    annotation: &VqaAnnotation,
    config: &EvalConfig,
) -> Result<VqaResults> {
    let mut results = VqaResults::default();

    for task in [VqaTask::SameDiff, VqaTask::Ref, VqaTask::Attr] {
        let judged = judge_pairs(&pair_info.samediff_qa, config.parallel, |pair| {
            let (id1, id2) = pair;
            let pred1 = predictions
                .get(id1)
                .ok_or_else(|| missing_prediction(task.name(), id1))?;
            let pred2 = predictions
                .get(id2)
                .ok_or_else(|| missing_prediction(task.name(), id2))?;
            let gt1 = annotation
                .get(id1)
                .ok_or_else(|| missing_annotation(task.name(), id1))?;
            let gt2 = annotation
                .get(id2)
                .ok_or_else(|| missing_annotation(task.name(), id2))?;

            let outcome = match task {
                VqaTask::SameDiff => judge::samediff_answer_match(
                    pred1,
                    pred2,
                    &gt1.answer_match,
                    &gt2.answer_mismatch,
                ),
                VqaTask::Ref | VqaTask::Attr => judge::ref_attr_answer_match(
                    pred1,
                    pred2,
                    &gt1.answer_match,
                    &gt2.answer_mismatch,
                ),
            };
            Ok((category_for_id(id1)?, outcome))
        })?;

        let tallies = results.for_task_mut(task);
        for (category, outcome) in judged {
            tallies.record(category, outcome);
        }
    }

    Ok(results)
}

/// Evaluate visual grounding predictions over the declared comparison pairs.
///
/// Iterates the `localization` pair list; ground truth for both IDs is the
/// `bbox_match` field, and the per-category tally is keyed by the first
/// ID's category.
///
/// # Errors
///
/// Fails if a pair references an ID missing from `predictions` or
/// `annotation`, or an ID whose prefix is outside the category table.
pub fn eval_vg(
    predictions: &GroundingPredictions,
    pair_info: &PairInfo,
    annotation: &GroundingAnnotation,
    config: &EvalConfig,
) -> Result<GroundingResults> {
    let threshold = config.iou_threshold;
    let judged = judge_pairs(&pair_info.localization, config.parallel, |pair| {
        let (id1, id2) = pair;
        let pred1 = predictions
            .get(id1)
            .ok_or_else(|| missing_prediction(REF_LOC_TASK, id1))?;
        let pred2 = predictions
            .get(id2)
            .ok_or_else(|| missing_prediction(REF_LOC_TASK, id2))?;
        let gt1 = annotation
            .get(id1)
            .ok_or_else(|| missing_annotation(REF_LOC_TASK, id1))?;
        let gt2 = annotation
            .get(id2)
            .ok_or_else(|| missing_annotation(REF_LOC_TASK, id2))?;

        let outcome =
            judge::refloc_bbox_match(pred1, pred2, &gt1.bbox_match, &gt2.bbox_match, threshold);
        Ok((category_for_id(id1)?, outcome))
    })?;

    let mut results = GroundingResults::default();
    for (category, outcome) in judged {
        results.ref_loc.record(category, outcome);
    }
    Ok(results)
}

/// Judge every pair, sequentially or in parallel.
///
/// Both paths produce the same outcome vector; the tallies built from it
/// are order-independent either way.
fn judge_pairs<F>(
    pairs: &[IdPair],
    parallel: bool,
    judge_one: F,
) -> Result<Vec<(IllusionCategory, Outcome)>>
where
    F: Fn(&IdPair) -> Result<(IllusionCategory, Outcome)> + Sync,
{
    if parallel {
        pairs.par_iter().map(&judge_one).collect()
    } else {
        pairs.iter().map(&judge_one).collect()
    }
}

fn missing_prediction(task: &str, id: &str) -> Error {
    Error::MissingPrediction {
        task: task.to_string(),
        id: id.to_string(),
    }
}

fn missing_annotation(task: &str, id: &str) -> Error {
    Error::MissingAnnotation {
        task: task.to_string(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{GroundingEntry, VqaEntry};
    use crate::matching::BoundingBox;

    fn vqa_entry(img: &str, answer_match: &str, answer_mismatch: &str) -> VqaEntry {
        VqaEntry {
            question: "Are the two circles the same color?".to_string(),
            img: img.to_string(),
            answer_match: answer_match.to_string(),
            answer_mismatch: answer_mismatch.to_string(),
        }
    }

    fn vqa_fixture() -> (VqaPredictions, PairInfo, VqaAnnotation) {
        let mut annotation = VqaAnnotation::new();
        annotation.insert("1_a".to_string(), vqa_entry("1_a.png", "yes", "no"));
        annotation.insert("1_b".to_string(), vqa_entry("1_b.png", "yes", "no"));
        annotation.insert("3_a".to_string(), vqa_entry("3_a.png", "yes", "no"));
        annotation.insert("3_b".to_string(), vqa_entry("3_b.png", "yes", "no"));

        let mut predictions = VqaPredictions::new();
        predictions.insert("1_a".to_string(), "yes".to_string());
        predictions.insert("1_b".to_string(), "no".to_string());
        predictions.insert("3_a".to_string(), "yes".to_string());
        predictions.insert("3_b".to_string(), "yes".to_string());

        let pair_info = PairInfo {
            samediff_qa: vec![
                ("1_a".to_string(), "1_b".to_string()),
                ("3_a".to_string(), "3_b".to_string()),
            ],
            ..PairInfo::default()
        };

        (predictions, pair_info, annotation)
    }

    #[test]
    fn test_eval_vqa_samediff_outcomes() {
        let (predictions, pair_info, annotation) = vqa_fixture();
        let results =
            eval_vqa(&predictions, &pair_info, &annotation, &EvalConfig::default()).unwrap();

        // Pair 1: baseline "yes" matches, illusion "no" matches the
        // mismatch answer. Pair 3: illusion side answers "yes" against "no".
        assert_eq!(results.samediff_qa.overall.count(Outcome::Humanlike), 1);
        assert_eq!(results.samediff_qa.overall.count(Outcome::NoIllusion), 1);
        assert_eq!(results.samediff_qa.overall.total(), 2);
    }

    #[test]
    fn test_eval_vqa_all_tasks_share_samediff_pairs() {
        let (predictions, pair_info, annotation) = vqa_fixture();
        let results =
            eval_vqa(&predictions, &pair_info, &annotation, &EvalConfig::default()).unwrap();

        assert_eq!(results.ref_qa.overall.total(), 2);
        assert_eq!(results.attr_qa.overall.total(), 2);
        // The ref/attr rule has no inconclusive state.
        assert_eq!(results.ref_qa.overall.count(Outcome::Humanlike), 1);
        assert_eq!(results.ref_qa.overall.count(Outcome::Unlike), 1);
        assert_eq!(results.ref_qa, results.attr_qa);
    }

    #[test]
    fn test_eval_vqa_per_category_sums_to_overall() {
        let (predictions, pair_info, annotation) = vqa_fixture();
        let results =
            eval_vqa(&predictions, &pair_info, &annotation, &EvalConfig::default()).unwrap();

        for (_, tallies) in results.tasks() {
            let mut merged = crate::eval::tally::Tally::new();
            for tally in tallies.per_category.values() {
                merged.merge(tally);
            }
            assert_eq!(merged, tallies.overall);
        }
        assert_eq!(
            results.samediff_qa.per_category[&IllusionCategory::Assimilation].total(),
            1
        );
        assert_eq!(
            results.samediff_qa.per_category[&IllusionCategory::Contrast].total(),
            1
        );
    }

    #[test]
    fn test_eval_vqa_missing_prediction_fails() {
        let (mut predictions, pair_info, annotation) = vqa_fixture();
        predictions.remove("3_b");

        let err = eval_vqa(&predictions, &pair_info, &annotation, &EvalConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingPrediction { .. }));
    }

    #[test]
    fn test_eval_vqa_unknown_category_fails() {
        let (mut predictions, mut pair_info, mut annotation) = vqa_fixture();
        predictions.insert("99_a".to_string(), "yes".to_string());
        predictions.insert("99_b".to_string(), "no".to_string());
        annotation.insert("99_a".to_string(), vqa_entry("99_a.png", "yes", "no"));
        annotation.insert("99_b".to_string(), vqa_entry("99_b.png", "yes", "no"));
        pair_info
            .samediff_qa
            .push(("99_a".to_string(), "99_b".to_string()));

        let err = eval_vqa(&predictions, &pair_info, &annotation, &EvalConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { index: 99, .. }));
    }

    #[test]
    fn test_eval_vqa_parallel_matches_sequential() {
        let (predictions, pair_info, annotation) = vqa_fixture();
        let sequential =
            eval_vqa(&predictions, &pair_info, &annotation, &EvalConfig::default()).unwrap();
        let parallel = eval_vqa(
            &predictions,
            &pair_info,
            &annotation,
            &EvalConfig::builder().parallel(true).build(),
        )
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    fn vg_fixture() -> (GroundingPredictions, PairInfo, GroundingAnnotation) {
        let entry = |img: &str, bbox: BoundingBox| GroundingEntry {
            query: "the longer line".to_string(),
            img: img.to_string(),
            bbox_match: bbox,
        };

        let mut annotation = GroundingAnnotation::new();
        annotation.insert(
            "10_a".to_string(),
            entry("10_a.png", BoundingBox::new(0.0, 0.0, 100.0, 40.0)),
        );
        annotation.insert(
            "10_b".to_string(),
            entry("10_b.png", BoundingBox::new(0.0, 60.0, 100.0, 100.0)),
        );

        let mut predictions = GroundingPredictions::new();
        predictions.insert("10_a".to_string(), BoundingBox::new(5.0, 5.0, 95.0, 35.0));
        predictions.insert("10_b".to_string(), BoundingBox::new(0.0, 0.0, 10.0, 10.0));

        let pair_info = PairInfo {
            localization: vec![("10_a".to_string(), "10_b".to_string())],
            ..PairInfo::default()
        };

        (predictions, pair_info, annotation)
    }

    #[test]
    fn test_eval_vg_outcomes() {
        let (predictions, pair_info, annotation) = vg_fixture();
        let results =
            eval_vg(&predictions, &pair_info, &annotation, &EvalConfig::default()).unwrap();

        // The second box is disjoint from its ground truth, so the pair is
        // unlike even though the first box is contained.
        assert_eq!(results.ref_loc.overall.count(Outcome::Unlike), 1);
        assert_eq!(
            results.ref_loc.per_category[&IllusionCategory::Relativity].total(),
            1
        );
    }

    #[test]
    fn test_eval_vg_threshold_is_configurable() {
        let (mut predictions, pair_info, annotation) = vg_fixture();
        // Covers the ground truth plus the same area again below it: IoU is
        // exactly 0.5 and neither box contains the other.
        predictions.insert("10_b".to_string(), BoundingBox::new(0.0, 60.0, 100.0, 140.0));

        let strict = eval_vg(
            &predictions,
            &pair_info,
            &annotation,
            &EvalConfig::builder().iou_threshold(0.5).build(),
        )
        .unwrap();
        assert_eq!(strict.ref_loc.overall.count(Outcome::Unlike), 1);

        let loose = eval_vg(
            &predictions,
            &pair_info,
            &annotation,
            &EvalConfig::builder().iou_threshold(0.4).build(),
        )
        .unwrap();
        assert_eq!(loose.ref_loc.overall.count(Outcome::Humanlike), 1);
    }

    #[test]
    fn test_eval_vg_missing_annotation_fails() {
        let (predictions, pair_info, mut annotation) = vg_fixture();
        annotation.remove("10_b");

        let err =
            eval_vg(&predictions, &pair_info, &annotation, &EvalConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingAnnotation { .. }));
    }
}
