//! Bounding box computation for paths.

use crate::geom::{CubicBezierSegment, QuadraticBezierSegment};
use crate::math::{point, Box3D, Point};
use crate::path::PathElement;

/// Computes a conservative axis-aligned box that contains the path.
///
/// This is the box of the endpoints and control points. It is faster but less precise
/// than [`bounding_box`](fn.bounding_box.html).
///
/// Returns the zero box at the origin if there is no element in the path.
pub fn fast_bounding_box<Iter, Elt>(path: Iter) -> Box3D
where
    Iter: IntoIterator<Item = Elt>,
    Elt: FastBoundingBox,
{
    let mut min = point(f64::MAX, f64::MAX, f64::MAX);
    let mut max = point(f64::MIN, f64::MIN, f64::MIN);
    for e in path {
        e.min_max(&mut min, &mut max);
    }

    if min == point(f64::MAX, f64::MAX, f64::MAX) {
        return Box3D::zero();
    }

    Box3D { min, max }
}

#[doc(hidden)]
pub trait FastBoundingBox {
    fn min_max(&self, min: &mut Point, max: &mut Point);
}

impl FastBoundingBox for PathElement {
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        match self {
            PathElement::MoveTo { to } | PathElement::LineTo { to, .. } => {
                *min = Point::min(*min, *to);
                *max = Point::max(*max, *to);
            }
            PathElement::QuadTo { ctrl, to, .. } => {
                *min = Point::min(*min, Point::min(*ctrl, *to));
                *max = Point::max(*max, Point::max(*ctrl, *to));
            }
            PathElement::CurveTo {
                ctrl1, ctrl2, to, ..
            } => {
                *min = Point::min(*min, Point::min(*ctrl1, Point::min(*ctrl2, *to)));
                *max = Point::max(*max, Point::max(*ctrl1, Point::max(*ctrl2, *to)));
            }
            PathElement::Close { .. } => {}
        }
    }
}

/// Computes the smallest axis-aligned box that contains the drawn path.
///
/// Returns the zero box at the origin if there is no element in the path.
pub fn bounding_box<Iter, Elt>(path: Iter) -> Box3D
where
    Iter: IntoIterator<Item = Elt>,
    Elt: TightBoundingBox,
{
    let mut min = point(f64::MAX, f64::MAX, f64::MAX);
    let mut max = point(f64::MIN, f64::MIN, f64::MIN);

    for e in path {
        e.min_max(&mut min, &mut max);
    }

    if min == point(f64::MAX, f64::MAX, f64::MAX) {
        return Box3D::zero();
    }

    Box3D { min, max }
}

#[doc(hidden)]
pub trait TightBoundingBox {
    fn min_max(&self, min: &mut Point, max: &mut Point);
}

impl TightBoundingBox for PathElement {
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        match self {
            PathElement::MoveTo { to } | PathElement::LineTo { to, .. } => {
                *min = Point::min(*min, *to);
                *max = Point::max(*max, *to);
            }
            PathElement::QuadTo { from, ctrl, to } => {
                let r = QuadraticBezierSegment {
                    from: *from,
                    ctrl: *ctrl,
                    to: *to,
                }
                .bounding_box();
                *min = Point::min(*min, r.min);
                *max = Point::max(*max, r.max);
            }
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let r = CubicBezierSegment {
                    from: *from,
                    ctrl1: *ctrl1,
                    ctrl2: *ctrl2,
                    to: *to,
                }
                .bounding_box();
                *min = Point::min(*min, r.min);
                *max = Point::max(*max, r.max);
            }
            PathElement::Close { .. } => {}
        }
    }
}

#[cfg(test)]
fn fixture() -> crate::path::Path {
    let mut path = crate::path::Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 1.0, 0.0)).unwrap();
    path.quad_to(point(3.0, 0.0, 0.0), point(4.0, 3.0, 0.0)).unwrap();
    path.curve_to(point(5.0, -1.0, 0.0), point(6.0, 5.0, 0.0), point(7.0, -5.0, 0.0))
        .unwrap();
    path
}

#[test]
fn control_point_bounding_box() {
    assert_eq!(
        fast_bounding_box(&fixture()),
        Box3D {
            min: point(0.0, -5.0, 0.0),
            max: point(7.0, 5.0, 0.0)
        },
    );
}

#[test]
fn drawable_bounding_box() {
    use approx::assert_abs_diff_eq;

    let b = bounding_box(fixture().iter());
    assert_abs_diff_eq!(b.min.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.min.y, -5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.max.x, 7.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.max.y, 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.max.z, 0.0, epsilon = 1e-9);
}

#[test]
fn empty_bounding_box() {
    let path = crate::path::Path::new();
    assert_eq!(fast_bounding_box(&path), Box3D::zero());
    assert_eq!(bounding_box(&path), Box3D::zero());
}

#[test]
fn bounding_box_in_space() {
    let mut path = crate::path::Path::new();
    path.move_to(point(-10.0, -3.0, 1.0)).unwrap();
    path.line_to(point(0.0, -12.0, -2.0)).unwrap();
    path.quad_to(point(3.0, 4.0, 8.0), point(5.0, 3.0, 0.0)).unwrap();
    path.close();

    assert_eq!(
        fast_bounding_box(&path),
        Box3D {
            min: point(-10.0, -12.0, -2.0),
            max: point(5.0, 4.0, 8.0)
        },
    );
    let tight = bounding_box(&path);
    assert!(tight.max.z < 8.0);
    assert!(tight.max.y < 4.0);
    assert_eq!(tight.min, point(-10.0, -12.0, -2.0));
}
