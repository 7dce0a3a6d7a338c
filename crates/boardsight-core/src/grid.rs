//! Grid-line intersections of the board, expressed in image coordinates.

use crate::{contains_point, Homography};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// `(N+1) × (N+1)` grid-line intersections in image pixels.
///
/// Row `i` is horizontal line `i` (top to bottom in canonical space),
/// column `j` is vertical line `j` (left to right).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionGrid {
    points: Vec<Vec<Point2<f32>>>,
}

/// Why an intersection grid cannot be split into cells.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridShapeError {
    #[error("need at least 2 grid lines, got {lines}")]
    TooFewLines { lines: usize },
    #[error("row {row} has {len} points, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("grid point ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },
}

/// One board square as a 4-vertex polygon.
///
/// Vertices are `grid[i][j], grid[i][j+1], grid[i+1][j], grid[i+1][j+1]`.
/// That is not a perimeter walk: the ring crosses itself at the cell centre,
/// so under the even-odd rule only the top and bottom lobes are inside.
/// Use [`IntersectionGrid::cell_outline`] for the perimeter-ordered quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardCell {
    pub row: usize,
    pub col: usize,
    pub vertices: [Point2<f32>; 4],
}

impl BoardCell {
    pub fn contains(&self, p: Point2<f32>) -> bool {
        contains_point(&self.vertices, p)
    }
}

/// Straight segment between two image points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point2<f32>,
    pub end: Point2<f32>,
}

/// Interior grid lines for an overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLines {
    pub vertical: Vec<LineSegment>,
    pub horizontal: Vec<LineSegment>,
}

impl IntersectionGrid {
    /// Sample line crossings at spacing `square_size / grid_size` in canonical
    /// space and map them back into the image through `canon_to_img`.
    pub fn compute(canon_to_img: &Homography, grid_size: usize, square_size: f32) -> Self {
        let step = square_size / grid_size.max(1) as f32;
        let points = (0..=grid_size)
            .map(|i| {
                (0..=grid_size)
                    .map(|j| canon_to_img.apply(Point2::new(j as f32 * step, i as f32 * step)))
                    .collect()
            })
            .collect();
        Self { points }
    }

    /// Wrap an externally produced grid. Shape is not checked here.
    pub fn from_rows(points: Vec<Vec<Point2<f32>>>) -> Self {
        Self { points }
    }

    pub fn rows(&self) -> &[Vec<Point2<f32>>] {
        &self.points
    }

    /// Number of grid lines per axis (`N + 1` for a well-formed grid).
    pub fn lines(&self) -> usize {
        self.points.len()
    }

    /// Number of cells per side (`N`), zero for an empty grid.
    pub fn cells_per_side(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<Point2<f32>> {
        self.points.get(i)?.get(j).copied()
    }

    /// Check the grid is square, has at least two lines and holds only
    /// finite points. Returns the number of cells per side.
    pub fn validate(&self) -> Result<usize, GridShapeError> {
        let lines = self.points.len();
        if lines < 2 {
            return Err(GridShapeError::TooFewLines { lines });
        }
        for (row, points) in self.points.iter().enumerate() {
            if points.len() != lines {
                return Err(GridShapeError::RaggedRow {
                    row,
                    len: points.len(),
                    expected: lines,
                });
            }
            if let Some(col) = points
                .iter()
                .position(|p| !p.x.is_finite() || !p.y.is_finite())
            {
                return Err(GridShapeError::NonFinite { row, col });
            }
        }
        Ok(lines - 1)
    }

    /// Cell `(i, j)` with the vertex order documented on [`BoardCell`].
    pub fn cell(&self, i: usize, j: usize) -> Option<BoardCell> {
        Some(BoardCell {
            row: i,
            col: j,
            vertices: [
                self.get(i, j)?,
                self.get(i, j + 1)?,
                self.get(i + 1, j)?,
                self.get(i + 1, j + 1)?,
            ],
        })
    }

    /// Cell `(i, j)` as a perimeter-ordered quad `[tl, tr, br, bl]`.
    pub fn cell_outline(&self, i: usize, j: usize) -> Option<[Point2<f32>; 4]> {
        Some([
            self.get(i, j)?,
            self.get(i, j + 1)?,
            self.get(i + 1, j + 1)?,
            self.get(i + 1, j)?,
        ])
    }

    /// Outer border `[tl, tr, br, bl]`.
    pub fn border(&self) -> Option<[Point2<f32>; 4]> {
        let n = self.cells_per_side();
        if n == 0 {
            return None;
        }
        Some([
            self.get(0, 0)?,
            self.get(0, n)?,
            self.get(n, n)?,
            self.get(n, 0)?,
        ])
    }

    /// Integer pixel positions, truncated toward zero, for raster overlays.
    pub fn to_pixels(&self) -> Vec<Vec<[i32; 2]>> {
        self.points
            .iter()
            .map(|row| row.iter().map(|p| [p.x as i32, p.y as i32]).collect())
            .collect()
    }

    /// Interior grid lines mapped into the image.
    ///
    /// Straight lines stay straight under a homography, so mapping the two
    /// canonical endpoints is enough.
    pub fn grid_lines(canon_to_img: &Homography, grid_size: usize, square_size: f32) -> GridLines {
        let step = square_size / grid_size.max(1) as f32;
        let segment = |a: Point2<f32>, b: Point2<f32>| LineSegment {
            start: canon_to_img.apply(a),
            end: canon_to_img.apply(b),
        };
        let interior = 1..grid_size.max(1);
        GridLines {
            vertical: interior
                .clone()
                .map(|k| {
                    let x = k as f32 * step;
                    segment(Point2::new(x, 0.0), Point2::new(x, square_size))
                })
                .collect(),
            horizontal: interior
                .map(|k| {
                    let y = k as f32 * step;
                    segment(Point2::new(0.0, y), Point2::new(square_size, y))
                })
                .collect(),
        }
    }
}
