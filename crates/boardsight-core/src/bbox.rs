use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned detector box `(x1, y1, x2, y2)` in pixels.
///
/// Serialized as a plain `[x1, y1, x2, y2]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Middle of the bottom edge, where the piece touches the board.
    #[inline]
    pub fn bottom_center(&self) -> Point2<f32> {
        Point2::new((self.x1 + self.x2) * 0.5, self.y2)
    }

    /// True if both the x- and y-intervals share a non-empty open interior.
    ///
    /// Boxes that only touch along an edge or at a corner do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        if self.x2 <= other.x1 || other.x2 <= self.x1 {
            return false;
        }
        if self.y2 <= other.y1 || other.y2 <= self.y1 {
            return false;
        }
        true
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// True if any two boxes in `boxes` overlap.
///
/// Plain pairwise check; callers pass a handful of boxes (the source and
/// destination candidates of a move) to judge whether a frame is ambiguous.
pub fn any_overlap(boxes: &[BoundingBox]) -> bool {
    for (i, a) in boxes.iter().enumerate() {
        for b in &boxes[i + 1..] {
            if a.overlaps(b) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overlap_is_detected() {
        let boxes = [
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(5.0, 5.0, 15.0, 15.0),
        ];
        assert!(any_overlap(&boxes));
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let boxes = [
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(10.0, 0.0, 20.0, 10.0),
        ];
        assert!(!any_overlap(&boxes));

        let corner_touch = [
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(10.0, 10.0, 20.0, 20.0),
        ];
        assert!(!any_overlap(&corner_touch));
    }

    #[test]
    fn trivial_inputs_never_overlap() {
        assert!(!any_overlap(&[]));
        assert!(!any_overlap(&[BoundingBox::new(0.0, 0.0, 1.0, 1.0)]));
    }

    #[test]
    fn finds_late_pair_among_four() {
        let boxes = [
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(20.0, 0.0, 30.0, 10.0),
            BoundingBox::new(40.0, 0.0, 50.0, 10.0),
            BoundingBox::new(29.0, 9.0, 35.0, 20.0),
        ];
        assert!(any_overlap(&boxes));
        assert!(!any_overlap(&boxes[..3]));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let inner = BoundingBox::new(40.0, 40.0, 60.0, 60.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn serializes_as_array() {
        let b = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&b).expect("serialize");
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: BoundingBox = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, b);
    }

    #[test]
    fn bottom_center_uses_lower_edge() {
        let b = BoundingBox::new(10.0, 20.0, 30.0, 80.0);
        assert_eq!(b.bottom_center(), Point2::new(20.0, 80.0));
    }
}
