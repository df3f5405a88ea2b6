//! Pairwise judgment rules.
//!
//! Each rule takes the model outputs and ground truth for one comparison
//! pair and classifies the pair into an [`Outcome`]. Argument order is
//! always (pred1, pred2, gt1, gt2), where subscript 1 is the baseline
//! condition (no-illusion or original image) and subscript 2 the illusion
//! or flipped condition.

use serde::{Deserialize, Serialize};

use crate::matching::{BoundingBox, eval_bbox, fuzzy_match};

/// Outcome of judging one comparison pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    /// The model's behavior matches the expected human response pattern.
    #[serde(rename = "humanlike")]
    Humanlike,

    /// The model answered the illusion image as if no illusion existed.
    #[serde(rename = "no_illusion")]
    NoIllusion,

    /// The model's answers do not match the humanlike expectation.
    #[serde(rename = "unlike")]
    Unlike,

    /// The model failed the baseline case, so the pair is inconclusive.
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl Outcome {
    /// Label used in reports and serialized output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Humanlike => "humanlike",
            Self::NoIllusion => "no_illusion",
            Self::Unlike => "unlike",
            Self::NotApplicable => "n/a",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Judge a same/different question pair.
///
/// `pred1`/`gt1` belong to the no-illusion image, `pred2`/`gt2` to the
/// illusion image. A baseline miss makes the pair inconclusive
/// ([`Outcome::NotApplicable`]); otherwise the illusion-side answer decides
/// between [`Outcome::Humanlike`] and [`Outcome::NoIllusion`].
#[must_use]
pub fn samediff_answer_match(pred1: &str, pred2: &str, gt1: &str, gt2: &str) -> Outcome {
    if fuzzy_match(pred1, gt1) {
        if fuzzy_match(pred2, gt2) {
            Outcome::Humanlike
        } else {
            Outcome::NoIllusion
        }
    } else {
        Outcome::NotApplicable
    }
}

/// Judge a reference or attribute question pair.
///
/// `pred1`/`gt1` belong to the original illusion image, `pred2`/`gt2` to
/// the flipped one. Both answers must independently match for
/// [`Outcome::Humanlike`].
#[must_use]
pub fn ref_attr_answer_match(pred1: &str, pred2: &str, gt1: &str, gt2: &str) -> Outcome {
    if fuzzy_match(pred1, gt1) && fuzzy_match(pred2, gt2) {
        Outcome::Humanlike
    } else {
        Outcome::Unlike
    }
}

/// Judge a localization pair.
///
/// `pred1`/`gt1` belong to the original illusion image, `pred2`/`gt2` to
/// the flipped one. Both boxes must pass [`eval_bbox`] at `threshold` for
/// [`Outcome::Humanlike`].
#[must_use]
pub fn refloc_bbox_match(
    pred1: &BoundingBox,
    pred2: &BoundingBox,
    gt1: &BoundingBox,
    gt2: &BoundingBox,
    threshold: f64,
) -> Outcome {
    if eval_bbox(pred1, gt1, threshold) && eval_bbox(pred2, gt2, threshold) {
        Outcome::Humanlike
    } else {
        Outcome::Unlike
    }
}
