//! Approximate path length.

use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::path::PathElement;

use core::iter::IntoIterator;

/// Sums the lengths of the drawn elements, including closing edges.
///
/// Cubic curves are measured on their flattening at `tolerance`.
pub fn approximate_length<Iter>(path: Iter, tolerance: f64) -> f64
where
    Iter: IntoIterator<Item = PathElement>,
{
    let tolerance = tolerance.max(1e-6);

    let mut length = 0.0;

    for element in path.into_iter() {
        match element {
            PathElement::LineTo { from, to } => length += LineSegment { from, to }.length(),
            PathElement::QuadTo { from, ctrl, to } => {
                length += QuadraticBezierSegment { from, ctrl, to }.length()
            }
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                length += CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                }
                .approximate_length(tolerance)
            }
            PathElement::Close { last, first } => {
                length += LineSegment {
                    from: last,
                    to: first,
                }
                .length()
            }
            PathElement::MoveTo { .. } => {}
        }
    }

    length
}

#[cfg(test)]
use crate::math::point;

#[test]
fn approx_length() {
    let mut path = crate::path::Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 1.0, 0.0)).unwrap();
    path.line_to(point(0.0, 1.0, 0.0)).unwrap();
    path.close();

    assert!((approximate_length(&path, 0.01) - 4.0).abs() < 0.0001);
}

#[test]
fn length_in_space() {
    let mut path = crate::path::Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 2.0, 2.0)).unwrap();
    path.move_to(point(5.0, 5.0, 5.0)).unwrap();
    path.line_to(point(5.0, 5.0, 1.0)).unwrap();

    assert!((approximate_length(&path, 0.01) - 7.0).abs() < 1e-12);
}

#[test]
fn curved_length() {
    use approx::assert_abs_diff_eq;

    let mut path = crate::path::Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 1.0, 0.0)).unwrap();
    path.quad_to(point(3.0, 0.0, 0.0), point(4.0, 3.0, 0.0)).unwrap();
    path.curve_to(point(5.0, -1.0, 0.0), point(6.0, 5.0, 0.0), point(7.0, -5.0, 0.0))
        .unwrap();

    assert_abs_diff_eq!(approximate_length(&path, 0.001), 14.7277, epsilon = 1e-2);

    path.close();
    assert_abs_diff_eq!(approximate_length(&path, 0.001), 23.33, epsilon = 1e-2);
}

#[test]
fn empty_length() {
    assert_eq!(approximate_length(&crate::path::Path::new(), 0.1), 0.0);
}
