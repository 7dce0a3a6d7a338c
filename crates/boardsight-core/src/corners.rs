use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The four board corners in `{top-left, top-right, bottom-right, bottom-left}` order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortedCorners {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
}

impl SortedCorners {
    /// Corners as `[tl, tr, br, bl]`.
    pub fn to_array(&self) -> [Point2<f32>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// True when the four roles were filled by four distinct input points.
    pub fn is_distinct(&self) -> bool {
        let pts = self.to_array();
        (0..4).all(|i| (i + 1..4).all(|j| pts[i] != pts[j]))
    }
}

fn lexicographic(a: &Point2<f32>, b: &Point2<f32>) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

fn arg_by<F>(pts: &[Point2<f32>; 4], key: F, want_max: bool) -> Point2<f32>
where
    F: Fn(&Point2<f32>) -> f32,
{
    let mut best = pts[0];
    let mut best_key = key(&pts[0]);
    for p in &pts[1..] {
        let k = key(p);
        let better = if want_max { k > best_key } else { k < best_key };
        if better {
            best = *p;
            best_key = k;
        }
    }
    best
}

/// Sort 4 unordered corners by the sum/difference heuristic.
///
/// - top-left: min `x + y`
/// - bottom-right: max `x + y`
/// - top-right: min `y - x`
/// - bottom-left: max `y - x`
///
/// Points are pre-sorted lexicographically so ties break the same way for
/// every permutation of the input. The heuristic assumes a convex quad that
/// is rotated less than about 45 degrees; beyond that two roles can land on
/// the same point (see [`SortedCorners::is_distinct`]).
pub fn sort_corners(corners: &[Point2<f32>; 4]) -> SortedCorners {
    let mut pts = *corners;
    pts.sort_by(lexicographic);

    let sum = |p: &Point2<f32>| p.x + p.y;
    let diff = |p: &Point2<f32>| p.y - p.x;

    SortedCorners {
        top_left: arg_by(&pts, sum, false),
        top_right: arg_by(&pts, diff, false),
        bottom_right: arg_by(&pts, sum, true),
        bottom_left: arg_by(&pts, diff, true),
    }
}
