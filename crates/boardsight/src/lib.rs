//! Read a chessboard's occupancy from one camera frame.
//!
//! Inputs come from two external collaborators: a board locator giving the
//! four corners of the board, and a piece detector giving labelled boxes.
//! The pipeline rectifies the quad, lays the grid back over the image,
//! projects each box to an anchor point and assigns anchors to cells.
//!
//! ## Quickstart
//!
//! ```
//! use boardsight::{BoardReader, BoundingBox, PieceDetection};
//! use nalgebra::Point2;
//!
//! let corners = [
//!     Point2::new(0.0_f32, 0.0),
//!     Point2::new(800.0, 0.0),
//!     Point2::new(800.0, 800.0),
//!     Point2::new(0.0, 800.0),
//! ];
//! let detections = vec![PieceDetection::new(
//!     BoundingBox::new(420.0, 0.0, 480.0, 98.0),
//!     "King_b",
//! )];
//!
//! let reading = BoardReader::default().read(&corners, &detections)?;
//! assert_eq!(reading.board.rows()[0], "....k...");
//! # Ok::<(), boardsight::ReadError>(())
//! ```
//!
//! A missing board for one frame is normal: [`ReadError::is_transient`]
//! tells a capture loop whether to just try the next frame.
//!
//! ## API map
//! - [`pipeline`]: [`BoardReader`], one call per frame.
//! - [`assemble`]: anchors + intersection grid -> [`BoardMatrix`].
//! - [`anchor`]: box -> anchor point.
//! - [`moves`]: UCI moves -> square outlines for an overlay.
//! - [`engine`]: owned UCI engine process.
//! - [`io`]: JSON frames and reports.
//! - `boardsight_core` (re-exported as [`core`]): homography, grid, polygons, overlap.

pub mod anchor;
pub mod assemble;
mod board;
mod detection;
pub mod engine;
pub mod io;
pub mod moves;
mod params;
mod piece;
pub mod pipeline;

pub use boardsight_core as core;

pub use anchor::{project_anchor, DEFAULT_ANCHOR_OFFSET_REL};
pub use assemble::{assemble_board, assemble_board_from_labels, AssembleError, CellShape};
pub use board::{BoardMatrix, BoardTextError, EMPTY_CELL};
pub use boardsight_core::{any_overlap, BoundingBox, GeometryError, IntersectionGrid};
pub use detection::{PieceAnchor, PieceDetection};
pub use params::{BoardParams, ParamsError};
pub use piece::{PieceColor, PieceKind, PieceLabel, UnknownLabel};
pub use pipeline::{BoardGeometry, BoardReader, BoardReading, ReadError};
