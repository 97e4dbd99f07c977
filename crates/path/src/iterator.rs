//! Tools to iterate over paths.
//!
//! # Path iterators
//!
//! This module provides a collection of adapters extending the `Iterator` trait when
//! iterating over [`PathElement`]s.
//!
//! ## Examples
//!
//! ```
//! use afp_path::iterator::*;
//! use afp_path::math::{point, vector};
//! use afp_path::{Path, PathElement};
//!
//! let mut path = Path::new();
//! path.move_to(point(0.0, 0.0, 0.0)).unwrap();
//! path.line_to(point(10.0, 0.0, 0.0)).unwrap();
//! path.curve_to(point(10.0, 10.0, 0.0), point(0.0, 10.0, 0.0), point(0.0, 5.0, 0.0)).unwrap();
//! path.close();
//!
//! // The curves are approximated with line segments lazily while iterating,
//! // without allocating a new path.
//! for element in path.iter().transformed(&vector(1.0, 2.0, 3.0)).flattened(0.01) {
//!     match element {
//!         PathElement::MoveTo { to } => println!(" - move to {:?}", to),
//!         PathElement::LineTo { from, to } => println!(" - line {:?} -> {:?}", from, to),
//!         PathElement::Close { last, first } => println!(" - close {:?} -> {:?}", last, first),
//!         _ => panic!(),
//!     }
//! }
//! ```

use crate::geom::traits::Transformation;
use crate::geom::{cubic_bezier, quadratic_bezier};
use crate::math::*;
use crate::PathElement;

/// An extension trait for `PathElement` iterators.
pub trait PathIterator: Iterator<Item = PathElement> + Sized {
    /// Returns an iterator that turns curves into line segments.
    fn flattened(self, tolerance: f64) -> Flattened<Self> {
        Flattened::new(tolerance, self)
    }

    /// Returns an iterator applying a transform to all of its elements.
    fn transformed<T: Transformation<f64>>(self, mat: &T) -> Transformed<Self, T> {
        Transformed::new(mat, self)
    }
}

impl<Iter> PathIterator for Iter where Iter: Iterator<Item = PathElement> {}

/// An iterator that consumes a `PathElement` iterator and yields flattened elements (with no curves).
pub struct Flattened<Iter> {
    it: Iter,
    current_position: Point,
    current_curve: TmpFlatteningIter,
    tolerance: f64,
}

enum TmpFlatteningIter {
    Quadratic(quadratic_bezier::Flattened<f64>),
    Cubic(cubic_bezier::Flattened<f64>),
    None,
}

impl<Iter: Iterator<Item = PathElement>> Flattened<Iter> {
    /// Create the iterator.
    pub fn new(tolerance: f64, it: Iter) -> Self {
        Flattened {
            it,
            current_position: Point::origin(),
            current_curve: TmpFlatteningIter::None,
            tolerance,
        }
    }
}

impl<Iter> Iterator for Flattened<Iter>
where
    Iter: Iterator<Item = PathElement>,
{
    type Item = PathElement;
    fn next(&mut self) -> Option<PathElement> {
        let next_point = match self.current_curve {
            TmpFlatteningIter::Quadratic(ref mut it) => it.next(),
            TmpFlatteningIter::Cubic(ref mut it) => it.next(),
            TmpFlatteningIter::None => None,
        };
        if let Some(to) = next_point {
            let from = self.current_position;
            self.current_position = to;
            return Some(PathElement::LineTo { from, to });
        }

        self.current_curve = TmpFlatteningIter::None;
        match self.it.next()? {
            PathElement::QuadTo { from, ctrl, to } => {
                self.current_position = from;
                self.current_curve = TmpFlatteningIter::Quadratic(
                    quadratic_bezier::QuadraticBezierSegment { from, ctrl, to }
                        .flattened(self.tolerance),
                );
                self.next()
            }
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                self.current_position = from;
                self.current_curve = TmpFlatteningIter::Cubic(
                    cubic_bezier::CubicBezierSegment {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    }
                    .flattened(self.tolerance),
                );
                self.next()
            }
            element => Some(element),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The flattened curves can only add elements.
        let mut lo = self.it.size_hint().0;
        match &self.current_curve {
            TmpFlatteningIter::Quadratic(t) => {
                lo += t.size_hint().0;
            }
            TmpFlatteningIter::Cubic(t) => {
                lo += t.size_hint().0;
            }
            TmpFlatteningIter::None => {}
        }
        (lo, None)
    }
}

/// Applies a transform to a path iterator and yields the resulting path iterator.
pub struct Transformed<'l, I, T> {
    it: I,
    transform: &'l T,
}

impl<'l, I, T: Transformation<f64>> Transformed<'l, I, T>
where
    I: Iterator<Item = PathElement>,
{
    /// Creates a new transformed path iterator from a path iterator.
    #[inline]
    pub fn new(transform: &'l T, it: I) -> Transformed<'l, I, T> {
        Transformed { it, transform }
    }
}

impl<'l, I, T> Iterator for Transformed<'l, I, T>
where
    I: Iterator<Item = PathElement>,
    T: Transformation<f64>,
{
    type Item = PathElement;
    fn next(&mut self) -> Option<PathElement> {
        self.it.next().map(|element| element.transformed(self.transform))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// An iterator that consumes an iterator of `Point`s and produces `PathElement`s.
///
/// A closed polyline ends with a close element, unless it has a single point.
///
/// # Example
///
/// ```
/// # use afp_path::iterator::FromPolyline;
/// # use afp_path::math::point;
/// let points = [
///     point(1.0, 1.0, 0.0),
///     point(2.0, 1.0, 0.0),
///     point(1.0, 2.0, 1.0)
/// ];
/// let iter = FromPolyline::closed(points.iter().cloned());
/// assert_eq!(iter.count(), 4);
/// ```
pub struct FromPolyline<Iter> {
    iter: Iter,
    current: Point,
    first: Point,
    is_first: bool,
    has_edges: bool,
    done: bool,
    close: bool,
}

impl<Iter: Iterator<Item = Point>> FromPolyline<Iter> {
    pub fn new(close: bool, iter: Iter) -> Self {
        FromPolyline {
            iter,
            current: Point::origin(),
            first: Point::origin(),
            is_first: true,
            has_edges: false,
            done: false,
            close,
        }
    }

    pub fn closed(iter: Iter) -> Self {
        FromPolyline::new(true, iter)
    }

    pub fn open(iter: Iter) -> Self {
        FromPolyline::new(false, iter)
    }
}

impl<Iter> Iterator for FromPolyline<Iter>
where
    Iter: Iterator<Item = Point>,
{
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        if self.done {
            return None;
        }

        if let Some(next) = self.iter.next() {
            let from = self.current;
            self.current = next;
            return if self.is_first {
                self.is_first = false;
                self.first = next;
                Some(PathElement::MoveTo { to: next })
            } else {
                self.has_edges = true;
                Some(PathElement::LineTo { from, to: next })
            };
        }

        self.done = true;

        if !self.close || !self.has_edges {
            return None;
        }

        Some(PathElement::Close {
            last: self.current,
            first: self.first,
        })
    }
}

#[test]
fn test_from_polyline_open() {
    let points = &[
        point(1.0, 1.0, 0.0),
        point(3.0, 1.0, 1.0),
        point(4.0, 5.0, 2.0),
    ];

    let mut elements = FromPolyline::open(points.iter().cloned());

    assert_eq!(
        elements.next(),
        Some(PathElement::MoveTo {
            to: point(1.0, 1.0, 0.0)
        })
    );
    assert_eq!(
        elements.next(),
        Some(PathElement::LineTo {
            from: point(1.0, 1.0, 0.0),
            to: point(3.0, 1.0, 1.0)
        })
    );
    assert_eq!(
        elements.next(),
        Some(PathElement::LineTo {
            from: point(3.0, 1.0, 1.0),
            to: point(4.0, 5.0, 2.0)
        })
    );
    assert_eq!(elements.next(), None);
    assert_eq!(elements.next(), None);
}

#[test]
fn test_from_polyline_closed() {
    let points = &[
        point(1.0, 1.0, 0.0),
        point(3.0, 1.0, 1.0),
        point(4.0, 5.0, 2.0),
    ];

    let elements: Vec<PathElement> = FromPolyline::closed(points.iter().cloned()).collect();
    assert_eq!(elements.len(), 4);
    assert_eq!(
        elements[3],
        PathElement::Close {
            last: point(4.0, 5.0, 2.0),
            first: point(1.0, 1.0, 0.0)
        }
    );

    assert_eq!(FromPolyline::closed(points[..1].iter().cloned()).count(), 1);
    assert_eq!(FromPolyline::closed(points[..0].iter().cloned()).count(), 0);
}

#[test]
fn test_flattened_replaces_curves() {
    use crate::Path;

    let mut path = Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.quad_to(point(1.0, 2.0, 0.0), point(2.0, 0.0, 0.0))
        .unwrap();
    path.line_to(point(2.0, -1.0, 1.0)).unwrap();
    path.close();

    let elements: Vec<PathElement> = path.flattened(0.01).collect();
    assert!(elements.iter().all(|e| !e.is_curve()));
    assert!(elements.len() > 4);
    assert_eq!(elements[0].to(), point(0.0, 0.0, 0.0));

    // Flattened lines are chained and the curve ends exactly at its endpoint.
    for pair in elements.windows(2) {
        assert_eq!(pair[0].to(), pair[1].from());
    }
    let quad_end = elements
        .iter()
        .position(|e| e.to() == point(2.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(
        elements[quad_end + 1],
        PathElement::LineTo {
            from: point(2.0, 0.0, 0.0),
            to: point(2.0, -1.0, 1.0)
        }
    );
}

#[test]
fn test_transformed() {
    use crate::Path;

    let mut path = Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0, 0.0)).unwrap();
    path.close();

    let by = vector(0.0, 1.0, 2.0);
    let elements: Vec<PathElement> = path.iter().transformed(&by).collect();
    assert_eq!(
        elements,
        vec![
            PathElement::MoveTo {
                to: point(0.0, 1.0, 2.0)
            },
            PathElement::LineTo {
                from: point(0.0, 1.0, 2.0),
                to: point(1.0, 1.0, 2.0)
            },
            PathElement::Close {
                last: point(1.0, 1.0, 2.0),
                first: point(0.0, 1.0, 2.0)
            },
        ]
    );
}
