//! Geometry core for reading a chessboard's occupancy from one camera frame.
//!
//! This crate is purely geometric. It knows nothing about piece labels or
//! detectors: it turns four photographed board corners into a pair of
//! planar transforms, derives the grid-line intersections in image space,
//! and offers the containment and overlap tests the board assembler needs.
//!
//! ```
//! use boardsight_core::{rectify_quad, IntersectionGrid};
//! use nalgebra::Point2;
//!
//! let corners = [
//!     Point2::new(0.0_f32, 0.0),
//!     Point2::new(100.0, 0.0),
//!     Point2::new(100.0, 100.0),
//!     Point2::new(0.0, 100.0),
//! ];
//! let rect = rectify_quad(&corners, 800.0).expect("convex quad");
//! let grid = IntersectionGrid::compute(&rect.canon_to_img, 8, rect.square_size);
//! assert_eq!(grid.lines(), 9);
//! ```

mod bbox;
mod corners;
mod grid;
mod homography;
mod logger;
mod polygon;
mod rectify;

pub use bbox::{any_overlap, BoundingBox};
pub use corners::{sort_corners, SortedCorners};
pub use grid::{BoardCell, GridLines, GridShapeError, IntersectionGrid, LineSegment};
pub use homography::{homography_from_4pt, Homography};
pub use polygon::{contains_point, point_on_segment};
pub use rectify::{rectify_quad, BoardRectification, GeometryError};

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, LOG_ENV};

pub use logger::init_with_level;
