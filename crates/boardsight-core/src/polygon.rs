//! Point-in-polygon over plain coordinate pairs.

use nalgebra::Point2;

/// Tolerance in pixels for treating a point as lying on an edge.
const EDGE_EPS: f64 = 1e-4;

/// True if `p` lies on the closed segment `a..b` (within a small tolerance).
pub fn point_on_segment(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> bool {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);

    let ex = bx - ax;
    let ey = by - ay;
    let len = (ex * ex + ey * ey).sqrt();
    if len <= EDGE_EPS {
        let dx = px - ax;
        let dy = py - ay;
        return (dx * dx + dy * dy).sqrt() <= EDGE_EPS;
    }

    let cross = ex * (py - ay) - ey * (px - ax);
    if cross.abs() / len > EDGE_EPS {
        return false;
    }
    let t = (ex * (px - ax) + ey * (py - ay)) / (len * len);
    let slack = EDGE_EPS / len;
    (-slack..=1.0 + slack).contains(&t)
}

/// Even-odd (crossing number) containment, boundary inclusive.
///
/// Vertices are taken in the given order and the ring is closed implicitly.
/// Self-intersecting rings are allowed; the even-odd rule decides which
/// lobes count as inside. Non-finite points are never contained.
pub fn contains_point(polygon: &[Point2<f32>], p: Point2<f32>) -> bool {
    if polygon.len() < 3 || !p.x.is_finite() || !p.y.is_finite() {
        return false;
    }

    let n = polygon.len();
    for k in 0..n {
        if point_on_segment(p, polygon[k], polygon[(k + 1) % n]) {
            return true;
        }
    }

    let (px, py) = (p.x as f64, p.y as f64);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (polygon[i].x as f64, polygon[i].y as f64);
        let (xj, yj) = (polygon[j].x as f64, polygon[j].y as f64);
        if (yi > py) != (yj > py) {
            let x_cross = xj + (py - yj) * (xi - xj) / (yi - yj);
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
