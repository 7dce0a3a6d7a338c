use crate::{homography_from_4pt, sort_corners, Homography, SortedCorners};
use log::debug;
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Relative cross-product below which three corners count as collinear.
const COLLINEAR_REL_EPS: f64 = 1e-6;

/// Geometry failures. These are transient: the next frame may well succeed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("degenerate board quadrilateral: {reason}")]
    DegenerateQuad { reason: &'static str },
    #[error("canonical square size must be finite and > 0 (got {size})")]
    InvalidSquareSize { size: f32 },
}

/// Forward/inverse transforms between the photographed board and the
/// canonical `square_size × square_size` square.
#[derive(Clone, Copy, Debug)]
pub struct BoardRectification {
    pub sorted: SortedCorners,
    pub square_size: f32,
    /// Image → canonical square.
    pub img_to_canon: Homography,
    /// Canonical square → image.
    pub canon_to_img: Homography,
}

impl BoardRectification {
    /// Canonical square corners in the same order as [`SortedCorners::to_array`].
    pub fn canonical_corners(&self) -> [Point2<f32>; 4] {
        canonical_square(self.square_size)
    }

    #[inline]
    pub fn to_canonical(&self, p: Point2<f32>) -> Point2<f32> {
        self.img_to_canon.apply(p)
    }

    #[inline]
    pub fn to_image(&self, p: Point2<f32>) -> Point2<f32> {
        self.canon_to_img.apply(p)
    }
}

fn canonical_square(s: f32) -> [Point2<f32>; 4] {
    [
        Point2::new(0.0, 0.0),
        Point2::new(s, 0.0),
        Point2::new(s, s),
        Point2::new(0.0, s),
    ]
}

fn has_collinear_triple(pts: &[Point2<f32>; 4]) -> bool {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLES.iter().any(|&[a, b, c]| {
        let (ax, ay) = (pts[a].x as f64, pts[a].y as f64);
        let (ux, uy) = (pts[b].x as f64 - ax, pts[b].y as f64 - ay);
        let (vx, vy) = (pts[c].x as f64 - ax, pts[c].y as f64 - ay);
        let cross = (ux * vy - uy * vx).abs();
        let scale = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt();
        scale <= f64::EPSILON || cross / scale < COLLINEAR_REL_EPS
    })
}

/// Sort the corners and solve both homographies for the board quad.
///
/// Fails with [`GeometryError::DegenerateQuad`] when the corners are not
/// finite, when the sorting heuristic assigns one point to two roles, when
/// any three corners are (nearly) collinear, or when either solve is singular.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(corners)))]
pub fn rectify_quad(
    corners: &[Point2<f32>; 4],
    square_size: f32,
) -> Result<BoardRectification, GeometryError> {
    if !square_size.is_finite() || square_size <= 0.0 {
        return Err(GeometryError::InvalidSquareSize { size: square_size });
    }
    if corners.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(GeometryError::DegenerateQuad {
            reason: "non-finite corner",
        });
    }

    let sorted = sort_corners(corners);
    if !sorted.is_distinct() {
        return Err(GeometryError::DegenerateQuad {
            reason: "corner roles are not distinct",
        });
    }

    let src = sorted.to_array();
    if has_collinear_triple(&src) {
        return Err(GeometryError::DegenerateQuad {
            reason: "collinear corners",
        });
    }

    let dst = canonical_square(square_size);
    let img_to_canon = homography_from_4pt(&src, &dst).ok_or(GeometryError::DegenerateQuad {
        reason: "forward homography is singular",
    })?;
    let canon_to_img = homography_from_4pt(&dst, &src).ok_or(GeometryError::DegenerateQuad {
        reason: "inverse homography is singular",
    })?;

    debug!(
        "rectified quad tl=({:.1},{:.1}) br=({:.1},{:.1}) into {}px square",
        sorted.top_left.x, sorted.top_left.y, sorted.bottom_right.x, sorted.bottom_right.y, square_size
    );

    Ok(BoardRectification {
        sorted,
        square_size,
        img_to_canon,
        canon_to_img,
    })
}
