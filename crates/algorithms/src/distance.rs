//! Closest and farthest points on the outline of a path.
//!
//! Distances are measured in space, unlike hit testing which works on the XY projection.
//! The outline includes the points of move-to elements and the closing edges.

use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::math::Point;
use crate::path::PathElement;

/// A point of the outline along with its square distance to the query position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OutlinePoint {
    pub point: Point,
    pub square_distance: f64,
}

impl OutlinePoint {
    #[inline]
    pub fn distance(&self) -> f64 {
        self.square_distance.sqrt()
    }
}

/// Returns the point of the outline closest to `pos`, or `None` if the path has no element.
///
/// Curves are measured exactly. When several points are equally close, the first one
/// along the path is returned.
pub fn closest_point<Iter>(pos: &Point, path: Iter) -> Option<OutlinePoint>
where
    Iter: IntoIterator<Item = PathElement>,
{
    let pos = *pos;
    let mut best: Option<OutlinePoint> = None;
    let mut candidate = |p: Point| {
        let square_distance = (p - pos).square_length();
        match best {
            Some(ref b) if b.square_distance <= square_distance => {}
            _ => {
                best = Some(OutlinePoint {
                    point: p,
                    square_distance,
                });
            }
        }
    };

    for element in path {
        match element {
            PathElement::MoveTo { to } => candidate(to),
            PathElement::LineTo { from, to } | PathElement::Close { last: from, first: to } => {
                candidate(LineSegment { from, to }.closest_point(pos));
            }
            PathElement::QuadTo { from, ctrl, to } => {
                let curve = QuadraticBezierSegment { from, ctrl, to };
                candidate(curve.sample(curve.closest_point(pos)));
            }
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let curve = CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                };
                candidate(curve.sample(curve.closest_point(pos)));
            }
        }
    }

    best
}

/// Returns the point of the outline farthest from `pos`, or `None` if the path has no element.
///
/// The farthest point of a straight edge is one of its endpoints, so curves are flattened
/// with `tolerance` and only the vertices are considered.
pub fn farthest_point<Iter>(pos: &Point, path: Iter, tolerance: f64) -> Option<OutlinePoint>
where
    Iter: IntoIterator<Item = PathElement>,
{
    let pos = *pos;
    let mut best: Option<OutlinePoint> = None;
    let mut candidate = |p: Point| {
        let square_distance = (p - pos).square_length();
        match best {
            Some(ref b) if b.square_distance >= square_distance => {}
            _ => {
                best = Some(OutlinePoint {
                    point: p,
                    square_distance,
                });
            }
        }
    };

    for element in path {
        match element {
            PathElement::MoveTo { to } | PathElement::LineTo { to, .. } => candidate(to),
            PathElement::Close { .. } => {}
            PathElement::QuadTo { from, ctrl, to } => {
                QuadraticBezierSegment { from, ctrl, to }
                    .for_each_flattened(tolerance, &mut |line| candidate(line.to));
            }
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                }
                .for_each_flattened(tolerance, &mut |line| candidate(line.to));
            }
        }
    }

    best
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::point;
    use crate::path::Path;
    use approx::assert_abs_diff_eq;

    fn fixture(close: bool) -> Path {
        let mut path = Path::new();
        path.move_to(point(0.0, 0.0, 0.0)).unwrap();
        path.line_to(point(1.0, 1.0, 0.0)).unwrap();
        path.quad_to(point(3.0, 0.0, 0.0), point(4.0, 3.0, 0.0)).unwrap();
        path.curve_to(point(5.0, -1.0, 0.0), point(6.0, 5.0, 0.0), point(7.0, -5.0, 0.0))
            .unwrap();
        if close {
            path.close();
        }
        path
    }

    #[test]
    fn closest_point_on_open_outline() {
        let path = fixture(false);

        let c = closest_point(&point(-2.0, 1.0, 0.0), &path).unwrap();
        assert_eq!(c.point, point(0.0, 0.0, 0.0));
        assert_abs_diff_eq!(c.distance(), 5.0f64.sqrt(), epsilon = 1e-9);

        let c = closest_point(&point(1.0, 0.0, 0.0), &path).unwrap();
        assert_abs_diff_eq!(c.point.x, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(c.point.y, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(c.distance(), 0.5f64.sqrt(), epsilon = 1e-9);

        let c = closest_point(&point(1.0, -4.0, 0.0), &path).unwrap();
        assert_eq!(c.point, point(0.0, 0.0, 0.0));
        assert_abs_diff_eq!(c.distance(), 17.0f64.sqrt(), epsilon = 1e-9);

        // On the quadratic curve.
        let c = closest_point(&point(3.0, 0.0, 0.0), &path).unwrap();
        assert_abs_diff_eq!(c.point.x, 2.56537, epsilon = 1e-4);
        assert_abs_diff_eq!(c.point.y, 0.89390, epsilon = 1e-4);
        assert_abs_diff_eq!(c.distance(), 0.99396, epsilon = 1e-4);
    }

    #[test]
    fn closest_point_on_closing_edge() {
        let path = fixture(true);

        let c = closest_point(&point(1.0, -4.0, 0.0), &path).unwrap();
        assert_abs_diff_eq!(c.point.x, 2.55405, epsilon = 1e-4);
        assert_abs_diff_eq!(c.point.y, -1.82432, epsilon = 1e-4);
        assert_abs_diff_eq!(c.distance(), 2.6737, epsilon = 1e-4);
    }

    #[test]
    fn closest_point_in_space() {
        let path = fixture(false);
        let c = closest_point(&point(0.0, 0.0, 3.0), &path).unwrap();
        assert_eq!(c.point, point(0.0, 0.0, 0.0));
        assert_abs_diff_eq!(c.distance(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn farthest_point_on_outline() {
        let path = fixture(false);
        for &(x, y) in &[(-2.0, 1.0), (1.0, 0.0), (3.0, 0.0)] {
            let f = farthest_point(&point(x, y, 0.0), &path, 0.001).unwrap();
            assert_eq!(f.point, point(7.0, -5.0, 0.0));
        }

        let f = farthest_point(&point(1.0, -4.0, 0.0), &path, 0.001).unwrap();
        assert_eq!(f.point, point(4.0, 3.0, 0.0));
    }

    #[test]
    fn empty_outline() {
        let path = Path::new();
        assert_eq!(closest_point(&point(0.0, 0.0, 0.0), &path), None);
        assert_eq!(farthest_point(&point(0.0, 0.0, 0.0), &path, 0.1), None);
    }

    #[test]
    fn ties_go_to_the_first_element() {
        let mut path = Path::new();
        path.move_to(point(-1.0, 0.0, 0.0)).unwrap();
        path.move_to(point(-1.0, 0.0, 0.0)).unwrap();
        path.line_to(point(-1.0, 1.0, 0.0)).unwrap();
        path.move_to(point(1.0, 0.0, 0.0)).unwrap();
        path.line_to(point(1.0, 1.0, 0.0)).unwrap();

        let c = closest_point(&point(0.0, 0.0, 0.0), &path).unwrap();
        assert_eq!(c.point, point(-1.0, 0.0, 0.0));
        let f = farthest_point(&point(0.0, 0.0, 0.0), &path, 0.1).unwrap();
        assert_eq!(f.point, point(-1.0, 1.0, 0.0));
    }
}
