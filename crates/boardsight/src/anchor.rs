use boardsight_core::{BoardRectification, BoundingBox};
use nalgebra::Point2;

/// Anchor lift as a fraction of the canonical square side (10 px at 800 px).
pub const DEFAULT_ANCHOR_OFFSET_REL: f32 = 10.0 / 800.0;

/// Project a piece box onto the point that stands for its square.
///
/// The bottom-centre of the box is where the piece base meets the board.
/// It is moved into canonical space, lifted by `offset_rel * square_size`
/// (detector boxes tend to run slightly past the square's lower edge), and
/// mapped back into the image. Malformed boxes give meaningless points.
pub fn project_anchor(
    bbox: &BoundingBox,
    rect: &BoardRectification,
    offset_rel: f32,
) -> Point2<f32> {
    let base = rect.to_canonical(bbox.bottom_center());
    let lifted = Point2::new(base.x, base.y - offset_rel * rect.square_size);
    rect.to_image(lifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use boardsight_core::rectify_quad;

    fn square_board(side: f32, canon: f32) -> BoardRectification {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
        ];
        rectify_quad(&corners, canon).expect("rectify")
    }

    #[test]
    fn lifts_bottom_center_by_scaled_offset() {
        // 800 px board rectified 1:1, so the lift is exactly 10 px.
        let rect = square_board(800.0, 800.0);
        let bbox = BoundingBox::new(100.0, 20.0, 180.0, 200.0);
        let anchor = project_anchor(&bbox, &rect, DEFAULT_ANCHOR_OFFSET_REL);
        assert_abs_diff_eq!(anchor.x, 140.0, epsilon = 1e-2);
        assert_abs_diff_eq!(anchor.y, 190.0, epsilon = 1e-2);
    }

    #[test]
    fn offset_scales_with_canonical_size() {
        // The lift is a fraction of the board, independent of the working size.
        let bbox = BoundingBox::new(10.0, 10.0, 30.0, 50.0);
        let small = project_anchor(&bbox, &square_board(100.0, 400.0), DEFAULT_ANCHOR_OFFSET_REL);
        let large = project_anchor(&bbox, &square_board(100.0, 1600.0), DEFAULT_ANCHOR_OFFSET_REL);
        assert_abs_diff_eq!(small.y, large.y, epsilon = 1e-2);
        assert_abs_diff_eq!(small.y, 50.0 - 1.25, epsilon = 1e-2);
    }

    #[test]
    fn zero_offset_returns_bottom_center() {
        let corners = [
            Point2::new(112.0, 87.0),
            Point2::new(530.5, 101.0),
            Point2::new(560.0, 470.0),
            Point2::new(90.0, 455.0),
        ];
        let rect = rectify_quad(&corners, 800.0).expect("rectify");
        let bbox = BoundingBox::new(200.0, 150.0, 240.0, 260.0);
        let anchor = project_anchor(&bbox, &rect, 0.0);
        assert_abs_diff_eq!(anchor.x, 220.0, epsilon = 1e-2);
        assert_abs_diff_eq!(anchor.y, 260.0, epsilon = 1e-2);
    }

    #[test]
    fn lift_moves_toward_far_edge_under_perspective() {
        let corners = [
            Point2::new(112.0, 87.0),
            Point2::new(530.5, 101.0),
            Point2::new(560.0, 470.0),
            Point2::new(90.0, 455.0),
        ];
        let rect = rectify_quad(&corners, 800.0).expect("rectify");
        let bbox = BoundingBox::new(300.0, 300.0, 340.0, 400.0);
        let anchor = project_anchor(&bbox, &rect, DEFAULT_ANCHOR_OFFSET_REL);
        assert!(anchor.y < 400.0);
    }
}
