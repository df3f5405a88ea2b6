//! Bounding-box matching primitives.

use serde::{Deserialize, Serialize};

/// Default IoU threshold for [`eval_bbox`].
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Axis-aligned rectangle in image pixel coordinates.
///
/// Serializes as the 4-element `[x1, y1, x2, y2]` array used by prediction
/// and annotation files. `x1 <= x2` and `y1 <= y2` are expected but not
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    /// Left edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y2: f64,
}

impl BoundingBox {
    /// Create a box from its corner coordinates.
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Absolute area of the box.
    #[must_use]
    pub fn area(&self) -> f64 {
        ((self.x2 - self.x1) * (self.y2 - self.y1)).abs()
    }

    /// Intersection area with another box, clamped to zero per axis.
    fn intersection_area(&self, other: &Self) -> f64 {
        let x_a = self.x1.max(other.x1);
        let y_a = self.y1.max(other.y1);
        let x_b = self.x2.min(other.x2);
        let y_b = self.y2.min(other.y2);
        (x_b - x_a).max(0.0) * (y_b - y_a).max(0.0)
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(coords: [f64; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.x1, bbox.y1, bbox.x2, bbox.y2]
    }
}

/// Check whether `outer` fully contains `inner`.
///
/// True iff the intersection area exactly equals the area of `inner`. A
/// zero-area `inner` therefore always counts as contained, wherever it lies.
#[must_use]
pub fn box_contains(outer: &BoundingBox, inner: &BoundingBox) -> bool {
    outer.intersection_area(inner) == inner.area()
}

/// Intersection-over-union of two boxes.
///
/// Returns 0.0 directly when the intersection is empty, without computing
/// the union.
#[must_use]
pub fn compute_iou(box_a: &BoundingBox, box_b: &BoundingBox) -> f64 {
    let inter = box_a.intersection_area(box_b);
    if inter == 0.0 {
        return 0.0;
    }
    inter / (box_a.area() + box_b.area() - inter)
}

/// Check whether a generated box matches the ground-truth box.
///
/// True when the ground truth fully contains the generated box, or when
/// their IoU exceeds `threshold` (strict greater-than).
#[must_use]
pub fn eval_bbox(bbox_gen: &BoundingBox, bbox_gt: &BoundingBox, threshold: f64) -> bool {
    box_contains(bbox_gt, bbox_gen) || compute_iou(bbox_gen, bbox_gt) > threshold
}
